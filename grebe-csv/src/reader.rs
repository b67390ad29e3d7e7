//! Schema-driven reading of delimiter-separated tabular text into
//! type-erased column buffers.

use csv::ReaderBuilder;
use grebe::{
    columnar::{buffer::AnyColumnBuffer, typedcolumn::TypedColumn},
    datatypes::Double,
};

use crate::{
    error::ReadingError,
    schema::{ColumnKind, SchemaGuess},
};

/// Materializes one type-erased column buffer per sniffed column.
///
/// The separator and header disposition are taken from `guess`, and each
/// cell is parsed according to its column's guessed kind. Rows shorter
/// than the schema contribute empty cells; an empty or malformed cell in a
/// numeric column is a parse error, and a NaN or infinity spelling in a
/// double column is rejected by the NaN-free storage layer.
///
/// # Errors
/// Returns [ReadingError::UnsupportedSeparator] for a separator outside
/// the single-byte range, and surfaces record-reading and cell-parsing
/// failures as is.
pub fn read_columns(
    buffer: &[u8],
    guess: &SchemaGuess,
) -> Result<Vec<(String, AnyColumnBuffer)>, ReadingError> {
    let delimiter = u8::try_from(guess.separator)
        .map_err(|_| ReadingError::UnsupportedSeparator(guess.separator))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(guess.has_header_row)
        .flexible(true)
        .from_reader(buffer);

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); guess.columns.len()];
    for record in reader.records() {
        let record = record?;
        for (column, slot) in cells.iter_mut().enumerate() {
            slot.push(record.get(column).unwrap_or_default().to_owned());
        }
    }

    guess
        .columns
        .iter()
        .zip(cells)
        .map(|(schema, cells)| Ok((schema.name.clone(), erase_column(schema.kind, cells)?)))
        .collect()
}

/// Builds the typed column a kind calls for and erases it.
fn erase_column(kind: ColumnKind, cells: Vec<String>) -> Result<AnyColumnBuffer, ReadingError> {
    Ok(match kind {
        ColumnKind::Int => {
            let values = cells
                .iter()
                .map(|cell| cell.trim().parse::<i64>())
                .collect::<Result<Vec<_>, _>>()?;
            TypedColumn::new(values).into()
        }
        ColumnKind::Double => {
            let values = cells
                .iter()
                .map(|cell| parse_double(cell))
                .collect::<Result<Vec<_>, _>>()?;
            TypedColumn::new(values).into()
        }
        ColumnKind::String => TypedColumn::new(cells).into(),
    })
}

fn parse_double(cell: &str) -> Result<Double, ReadingError> {
    let raw: f64 = cell.trim().parse()?;

    Ok(Double::new(raw)?)
}
