//! Reading the list of CVE identifiers to enrich.

use crate::error::{CveEnrichError, InputErrorKind, Result};
use crate::model::CveId;
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Identifiers read from an input file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CveList {
    /// Valid identifiers
    pub ids: Vec<CveId>,
    /// Non-empty rows that were not CVE identifiers
    pub invalid: Vec<String>,
}

/// Extensions read as workbooks rather than text.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read a single-column list of CVE identifiers.
///
/// Workbooks (`.xlsx`, `.xls`, `.ods`, ...) are read from column A of the
/// first sheet. Anything else is read as UTF-8 CSV/text, using the first
/// field of each row. A missing or unreadable file is an error; rows that do
/// not hold a CVE identifier are reported in [`CveList::invalid`] and
/// otherwise ignored.
pub fn read_cve_list(path: &Path) -> Result<CveList> {
    let list = if is_spreadsheet(path) {
        read_spreadsheet(path)?
    } else {
        read_text(path)?
    };

    tracing::info!(
        "Read {} CVE identifiers from {}",
        list.ids.len(),
        path.display()
    );
    Ok(list)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn input_error(path: &Path, kind: InputErrorKind) -> CveEnrichError {
    CveEnrichError::input(path.display().to_string(), kind)
}

fn io_error_kind(err: std::io::Error) -> InputErrorKind {
    if err.kind() == std::io::ErrorKind::NotFound {
        InputErrorKind::NotFound
    } else {
        InputErrorKind::Io(err)
    }
}

fn read_text(path: &Path) -> Result<CveList> {
    let bytes = std::fs::read(path).map_err(|e| input_error(path, io_error_kind(e)))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        input_error(path, InputErrorKind::NotText(e.utf8_error().to_string()))
    })?;
    Ok(parse_cve_list(&text))
}

/// Column A of the first worksheet, blank cells dropped.
fn read_spreadsheet(path: &Path) -> Result<CveList> {
    std::fs::metadata(path).map_err(|e| input_error(path, io_error_kind(e)))?;
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| input_error(path, InputErrorKind::NotSpreadsheet(e.to_string())))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            return Err(input_error(
                path,
                InputErrorKind::NotSpreadsheet(e.to_string()),
            ));
        }
        None => return Ok(CveList::default()),
    };

    // The range starts at the first used cell; no column A means no ids.
    if range.start().is_none_or(|(_, col)| col != 0) {
        return Ok(CveList::default());
    }

    let cells: Vec<String> = range
        .rows()
        .filter_map(|row| row.first())
        .map(|cell| match cell {
            Data::String(text) => text.clone(),
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    Ok(collect_ids(cells.iter().map(|cell| cell.trim())))
}

/// Parse identifier rows from already-loaded text.
#[must_use]
pub fn parse_cve_list(text: &str) -> CveList {
    collect_ids(text.trim_start_matches('\u{feff}').lines().map(first_field))
}

fn collect_ids<'a>(fields: impl Iterator<Item = &'a str>) -> CveList {
    let mut list = CveList::default();

    for field in fields.filter(|field| !field.is_empty()) {
        match CveId::parse(field) {
            Ok(id) => list.ids.push(id),
            Err(e) => {
                tracing::warn!("Skipping input row: {}", e);
                list.invalid.push(field.to_string());
            }
        }
    }

    list
}

fn first_field(line: &str) -> &str {
    line.split([',', ';', '\t'])
        .next()
        .unwrap_or_default()
        .trim()
}
