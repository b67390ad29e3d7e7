//! This module defines [ColumnKind] and the schema-guess model produced by
//! the sniffer.

use once_cell::sync::Lazy;
use regex::Regex;

static DOUBLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:-?\d+(?:\.\d*)?|[Nn][Aa][Nn]|-?[Ii][Nn][Ff])\s*$")
        .expect("the double pattern is valid")
});

static INT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-?\d+\s*$").expect("the int pattern is valid"));

/// The candidate cell types a sniffed column can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Arbitrary text; every cell is compatible with this kind
    String,
    /// A double-precision floating point number, including NaN and
    /// infinity spellings
    Double,
    /// A signed integer
    Int,
}

impl ColumnKind {
    /// All kinds, in no particular order.
    pub const ALL: [ColumnKind; 3] = [ColumnKind::String, ColumnKind::Double, ColumnKind::Int];

    /// Signifies which kinds are more precise.
    ///
    /// When several kinds remain compatible with every cell of a column,
    /// the most precise one wins the vote; everything can be represented
    /// by a string, so string ranks lowest.
    pub fn priority(&self) -> u32 {
        match self {
            ColumnKind::String => 0,
            ColumnKind::Double => 10,
            ColumnKind::Int => 100,
        }
    }

    /// Returns true iff `cell` could belong to a column of this kind.
    ///
    /// Empty cells are compatible with every kind. Compatibility is
    /// monotonic in precision: a cell compatible with [ColumnKind::Int]
    /// is also compatible with [ColumnKind::Double] and
    /// [ColumnKind::String].
    pub fn is_compatible_with(&self, cell: &str) -> bool {
        if cell.is_empty() {
            return true;
        }

        match self {
            ColumnKind::String => true,
            ColumnKind::Double => DOUBLE_PATTERN.is_match(cell),
            ColumnKind::Int => INT_PATTERN.is_match(cell),
        }
    }
}

/// The best guess for what a single column contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    /// Column name, taken from the header row or synthesized
    pub name: String,
    /// Guessed cell kind
    pub kind: ColumnKind,
}

/// Everything the sniffer can tell about a tabular text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaGuess {
    /// The field separator the document most plausibly uses
    pub separator: char,
    /// Whether the first row looks like a header rather than data
    pub has_header_row: bool,
    /// Per-column name and kind guesses, in document order
    pub columns: Vec<SchemaColumn>,
}
