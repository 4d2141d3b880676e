//! CSV emission.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bfstats_error::{Result, StatsError};
use bfstats_model::{CategoryMap, MergedResult, Strategy};
use tracing::debug;

/// Writes one CSV per strategy next to `stem`, e.g. a stem of
/// `results/run1` produces `results/run1-dfs.csv` and friends.
///
/// `aux` is prepended verbatim to every row, including any separator it
/// carries.
pub fn write_reports(merged: &MergedResult, stem: &str, aux: &str) -> Result<()> {
    for strategy in Strategy::ALL {
        let path = format!("{stem}{}", strategy.csv_suffix());
        debug!(strategy = %strategy, path = %path, "writing csv");
        write_category_csv(&merged.stats(strategy).table, Path::new(&path), aux)?;
    }
    Ok(())
}

/// Writes one category map as CSV rows `{aux}{key}, {correct},
/// {incorrect}, {total}`, ascending by category key.
pub fn write_category_csv(table: &CategoryMap, path: &Path, aux: &str) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut out = BufWriter::new(file);
    for (key, counts) in table {
        writeln!(
            out,
            "{aux}{key}, {}, {}, {}",
            counts.correct, counts.incorrect, counts.total
        )
        .map_err(io_err(path))?;
    }
    out.flush().map_err(io_err(path))
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StatsError + '_ {
    move |error| StatsError::io(path.display().to_string(), error)
}
