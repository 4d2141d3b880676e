//! Reader for one density table.

use bfstats_error::{Result, StatsError};
use bfstats_model::{CategoryKey, DensityTable};
use tracing::debug;

use crate::cursor::LineCursor;

/// Reads one five-line density table at the cursor: an attribute name
/// (trailing colon stripped), two header lines, a row of category values,
/// and a row of occurrence counts.
///
/// Values and counts are zipped positionally, so the rows must have the
/// same number of tokens; counts must parse as unsigned integers. An empty
/// attribute produces two blank rows and an empty table.
pub fn read_density(cursor: &mut LineCursor<'_>) -> Result<DensityTable> {
    let name = cursor
        .next_line("density table name")?
        .trim()
        .trim_end_matches(':')
        .to_owned();
    cursor.skip(2, "density table header")?;

    let values: Vec<&str> = cursor
        .next_line("density value row")?
        .split_ascii_whitespace()
        .collect();
    let count_line_number = cursor.line_number();
    let counts: Vec<&str> = cursor
        .next_line("density count row")?
        .split_ascii_whitespace()
        .collect();

    if values.len() != counts.len() {
        return Err(StatsError::RowLengthMismatch {
            path: cursor.path().to_owned(),
            line: count_line_number,
            table: name,
            values: values.len(),
            counts: counts.len(),
        });
    }

    let mut rows = Vec::with_capacity(values.len());
    for (value, count) in values.iter().zip(&counts) {
        let count: u64 = count.parse().map_err(|_| StatsError::InvalidCount {
            path: cursor.path().to_owned(),
            line: count_line_number,
            table: name.clone(),
            token: (*count).to_owned(),
        })?;
        rows.push((CategoryKey::new(*value), count));
    }

    debug!(table = %name, rows = rows.len(), "read density table");
    Ok(DensityTable::new(name, rows))
}
