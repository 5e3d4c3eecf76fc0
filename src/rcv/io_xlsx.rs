use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::rcv::{io_common::Grid, *};

/// Reads a form export saved as an Excel workbook.
///
/// Uses the named worksheet, or the only worksheet of the workbook.
pub fn read_xlsx_grid(path: &str, worksheet_name: Option<&str>) -> RcvResult<Grid> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => row
            .iter()
            .map(|cell| read_cell(cell, 1))
            .collect::<RcvResult<Vec<String>>>()?,
        None => return EmptyInputSnafu { path }.fail(),
    };
    debug!("read_xlsx_grid: header: {:?}", header);

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let cells = row
            .iter()
            .map(|cell| read_cell(cell, lineno))
            .collect::<RcvResult<Vec<String>>>()?;
        debug!("read_xlsx_grid: lineno: {:?} row: {:?}", lineno, cells);
        rows.push((lineno, cells));
    }
    Ok(Grid { header, rows })
}

// Ranks typed by hand are stored as numbers; they are read back as integers.
fn read_cell(cell: &DataType, lineno: usize) -> RcvResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok((*f as i64).to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        // Form timestamps. They are never part of a vote.
        DataType::DateTime(f) => Ok(f.to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno: lineno as u64,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> RcvResult<calamine::Range<DataType>> {
    debug!(
        "read_xlsx_grid: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_xlsx_grid: path: {:?} worksheet: {:?}",
                    path, worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => TooManyWorksheetsSnafu { path }.fail(),
        }
    }
}
