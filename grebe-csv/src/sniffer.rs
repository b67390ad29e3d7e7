//! This module implements schema sniffing over tabular text.
//!
//! The sniffer guesses three things no delimiter-separated file announces
//! about itself: the separator, whether the first row is a header, and the
//! cell kind of every column. All three are heuristics over the complete
//! lines of the buffer.

use itertools::Itertools;

use crate::{
    error::ReadingError,
    schema::{ColumnKind, SchemaColumn, SchemaGuess},
};

/// Separator candidates, ordered by how likely they are a priori.
const SEPARATORS: [char; 3] = [',', '\t', '|'];

/// Goodness of fit of one separator candidate.
#[derive(Debug, Clone, Copy)]
struct SeparatorScore {
    separator: char,
    /// True iff every line splits into more than one field
    non_empty: bool,
    /// Number of lines whose field count deviates from the first line's
    deviating_lines: usize,
    /// Largest field count over all lines
    column_count: usize,
}

/// Attempts to sniff schema information from tabular text.
///
/// Only complete lines are considered: the final line of the buffer is
/// dropped since it may be truncated, and blank lines are skipped
/// throughout.
///
/// # Errors
/// Returns [ReadingError::TooShort] if fewer than two complete lines
/// remain and [ReadingError::NonUtf8] if the buffer is not UTF-8.
pub fn sniff_schema(buffer: &[u8]) -> Result<SchemaGuess, ReadingError> {
    let text = std::str::from_utf8(buffer)?;

    let lines: Vec<&str> = text.split('\n').filter(|line| !line.is_empty()).collect();
    if lines.len() < 2 {
        return Err(ReadingError::TooShort);
    }
    let full_lines = &lines[..lines.len() - 1];

    let score = pick_separator(&separator_scores(full_lines));
    log::debug!(
        "guessed separator {:?} over {} complete lines",
        score.separator,
        full_lines.len()
    );

    let (with_first_row, without_first_row) =
        vote_column_kinds(full_lines, score.separator, score.column_count);

    let has_header_row = guess_has_header(&with_first_row, &without_first_row);
    log::debug!(
        "guessing the document {} a header row",
        if has_header_row { "has" } else { "lacks" }
    );

    let kinds = if has_header_row {
        without_first_row
    } else {
        with_first_row
    };
    let names = if has_header_row {
        header_column_names(lines[0], score.separator, score.column_count)
    } else {
        (0..score.column_count)
            .map(|index| format!("c{index}"))
            .collect()
    };

    let columns = names
        .into_iter()
        .zip_eq(kinds)
        .map(|(name, kind)| SchemaColumn { name, kind })
        .collect();

    Ok(SchemaGuess {
        separator: score.separator,
        has_header_row,
        columns,
    })
}

/// Splits a line into fields, dropping empty ones.
///
/// Separator scoring and kind voting both ignore empty fields, so `a,,b`
/// counts two fields; the record reader used for materialization keeps
/// them.
fn split_fields(line: &str, separator: char) -> impl Iterator<Item = &str> {
    line.split(separator).filter(|field| !field.is_empty())
}

fn separator_scores(lines: &[&str]) -> Vec<SeparatorScore> {
    SEPARATORS
        .iter()
        .map(|&separator| {
            let field_counts: Vec<usize> = lines
                .iter()
                .map(|line| split_fields(line, separator).count())
                .collect();

            let non_empty = field_counts.iter().all(|&count| count > 1);
            let deviating_lines = field_counts
                .iter()
                .filter(|&&count| count != field_counts[0])
                .count();
            let column_count = field_counts
                .iter()
                .copied()
                .max()
                .expect("scoring runs on at least two lines");

            SeparatorScore {
                separator,
                non_empty,
                deviating_lines,
                column_count,
            }
        })
        .collect()
}

/// Picks the most plausible separator: the first candidate that splits
/// every line into the same, nonzero number of fields, else the candidate
/// with the fewest deviating lines, else the a-priori favorite.
fn pick_separator(scores: &[SeparatorScore]) -> SeparatorScore {
    scores
        .iter()
        .find(|score| score.non_empty && score.deviating_lines == 0)
        .or_else(|| {
            scores
                .iter()
                .filter(|score| score.non_empty)
                .min_by_key(|score| score.deviating_lines)
        })
        .unwrap_or(&scores[0])
        .to_owned()
}

/// Tallies, for every column, which kinds are compatible with all of its
/// cells, both including and excluding the first row.
fn vote_column_kinds(
    lines: &[&str],
    separator: char,
    column_count: usize,
) -> (Vec<ColumnKind>, Vec<ColumnKind>) {
    let mut with_first_row = vec![KindVote::new(); column_count];
    let mut without_first_row = vec![KindVote::new(); column_count];

    for (row, line) in lines.iter().enumerate() {
        for (column, cell) in split_fields(line, separator).enumerate() {
            with_first_row[column].update(cell);
            if row != 0 {
                without_first_row[column].update(cell);
            }
        }
    }

    (
        with_first_row.iter().map(KindVote::best_guess).collect(),
        without_first_row.iter().map(KindVote::best_guess).collect(),
    )
}

/// The kinds still compatible with every cell seen so far in one column.
#[derive(Debug, Clone)]
struct KindVote {
    possible: Vec<ColumnKind>,
}

impl KindVote {
    fn new() -> Self {
        Self {
            possible: ColumnKind::ALL.to_vec(),
        }
    }

    fn update(&mut self, cell: &str) {
        self.possible.retain(|kind| kind.is_compatible_with(cell));
    }

    /// The most precise kind that survived.
    fn best_guess(&self) -> ColumnKind {
        self.possible
            .iter()
            .max_by_key(|kind| kind.priority())
            .copied()
            .expect("string is compatible with every cell")
    }
}

/// A header row is assumed when the first row is all strings but at least
/// one column is typed once that row is excluded.
fn guess_has_header(with_first_row: &[ColumnKind], without_first_row: &[ColumnKind]) -> bool {
    if with_first_row
        .iter()
        .any(|&kind| kind != ColumnKind::String)
    {
        // some column is typed even counting the first row, so the first
        // row is data
        return false;
    }

    without_first_row
        .iter()
        .any(|&kind| kind != ColumnKind::String)
}

/// Extracts column names from the header row, synthesizing `col_{i}`
/// names for columns the header does not cover.
fn header_column_names(header: &str, separator: char, column_count: usize) -> Vec<String> {
    let mut names: Vec<String> = split_fields(header, separator).map(str::to_owned).collect();
    for index in names.len()..column_count {
        names.push(format!("col_{index}"));
    }

    names
}

#[cfg(test)]
mod test {
    use test_log::test;

    use crate::schema::ColumnKind;

    use super::sniff_schema;

    #[test]
    fn sniffs_a_comma_separated_document_with_header() {
        let guess = sniff_schema(b"name,age,score\nalice,31,1.5\nbob,12,2.5\ncarol,45,0.5\n")
            .expect("document is sniffable");

        assert_eq!(guess.separator, ',');
        assert!(guess.has_header_row);

        let names: Vec<&str> = guess
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();
        let kinds: Vec<ColumnKind> = guess.columns.iter().map(|column| column.kind).collect();

        assert_eq!(names, vec!["name", "age", "score"]);
        assert_eq!(
            kinds,
            vec![ColumnKind::String, ColumnKind::Int, ColumnKind::Double]
        );
    }

    #[test]
    fn sniffs_a_tab_separated_document() {
        let guess = sniff_schema(b"a\tb\n1\t2\n3\t4\n5\t6\n").expect("document is sniffable");

        assert_eq!(guess.separator, '\t');
        assert!(guess.has_header_row);
    }

    #[test]
    fn the_last_line_is_ignored_as_possibly_truncated() {
        // the final "1000,trunca" line must not influence the kind vote
        let guess = sniff_schema(b"x,y\n1,2\n3,4\n1000,trunca").expect("document is sniffable");

        assert_eq!(
            guess.columns.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![ColumnKind::Int, ColumnKind::Int]
        );
    }

    #[test]
    fn numeric_first_row_means_no_header() {
        let guess = sniff_schema(b"1,2\n3,4\n5,6\n").expect("document is sniffable");

        assert!(!guess.has_header_row);
        assert_eq!(
            guess
                .columns
                .iter()
                .map(|column| column.name.as_str())
                .collect::<Vec<_>>(),
            vec!["c0", "c1"]
        );
    }

    #[test]
    fn all_string_documents_are_assumed_headerless() {
        let guess = sniff_schema(b"pet,sound\ncat,meow\ndog,woof\ncow,moo\n")
            .expect("document is sniffable");

        assert!(!guess.has_header_row);
        assert_eq!(
            guess.columns.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![ColumnKind::String, ColumnKind::String]
        );
    }

    #[test]
    fn short_header_rows_get_synthesized_names() {
        let guess = sniff_schema(b"name,age\nalice,31,x\nbob,12,y\ncarol,45,z\n")
            .expect("document is sniffable");

        assert!(guess.has_header_row);
        assert_eq!(
            guess
                .columns
                .iter()
                .map(|column| column.name.as_str())
                .collect::<Vec<_>>(),
            vec!["name", "age", "col_2"]
        );
    }

    #[test]
    fn too_short_documents_are_rejected() {
        assert!(matches!(
            sniff_schema(b"only,one,line\n"),
            Err(crate::error::ReadingError::TooShort)
        ));
    }
}
