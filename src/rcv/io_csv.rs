// Primitives for reading CSV files.

use std::fs::File;

use crate::rcv::{io_common::Grid, *};

/// Reads a form export saved as CSV.
///
/// The first record is the header. Rows may be shorter than the header:
/// missing cells are simply unranked.
pub fn read_csv_grid(path: &str) -> RcvResult<Grid> {
    let mut records = get_records(path)?;

    let header: Vec<String> = match records.next() {
        Some(line_r) => {
            let line = line_r.context(CsvLineParseSnafu {})?;
            line.iter()
                .enumerate()
                // Some exports start with a byte order mark.
                .map(|(idx, s)| {
                    if idx == 0 {
                        s.trim_start_matches('\u{feff}').to_string()
                    } else {
                        s.to_string()
                    }
                })
                .collect()
        }
        None => return EmptyInputSnafu { path }.fail(),
    };

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let line = line_r.context(CsvLineParseSnafu {})?;
        // Quoted cells may span several lines, prefer the position reported by the reader.
        let lineno = line
            .position()
            .map_or(idx + 2, |p| p.line() as usize);
        debug!("read_csv_grid: lineno: {:?} row: {:?}", lineno, line);
        rows.push((lineno, line.iter().map(|s| s.to_string()).collect()));
    }
    Ok(Grid { header, rows })
}

fn get_records(path: &str) -> RcvResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    Ok(rdr.into_records())
}
