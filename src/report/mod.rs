//! Extraction pipeline: header location, column mapping, header-block
//! metadata and the row scan, driven by one configuration table per kind.
pub mod columns;
pub mod header;
pub mod kinds;
pub mod layout;
pub mod meta;
pub mod record;
pub mod rows;
pub mod sniff;
use self::{kinds::ReportKind, record::Record};
use crate::{config::Settings, error::Result, excel::sheet::RawSheet, excel::source_reader};
use std::path::Path;
/// Records of every sheet in the workbook, using settings from the environment.
pub fn extract(path: &Path, kind: ReportKind) -> Result<Vec<Record>> {
    extract_with(path, kind, &Settings::from_env())
}
/// Structural problems yield fewer records; only I/O and workbook errors are returned.
pub fn extract_with(path: &Path, kind: ReportKind, settings: &Settings) -> Result<Vec<Record>> {
    let sheets = source_reader::read_sheets(path)?;
    let records: Vec<Record> = sheets
        .iter()
        .flat_map(|sheet| extract_sheet(sheet, kind, settings))
        .collect();
    tracing::info!(file = %path.display(), %kind, sheets = sheets.len(), records = records.len(), "extração concluída");
    Ok(records)
}
pub fn extract_sheet(sheet: &RawSheet, kind: ReportKind, settings: &Settings) -> Vec<Record> {
    let spec = kind.spec();
    let Some(found) = header::locate_header(sheet, &spec.header, settings.header_scan_rows) else {
        tracing::debug!(sheet = sheet.name(), %kind, "cabeçalho não encontrado");
        return Vec::new();
    };
    tracing::debug!(
        sheet = sheet.name(),
        row = found.row,
        strategy = ?found.strategy,
        "cabeçalho localizado"
    );
    let meta = meta::read_meta(sheet, &spec.meta);
    let columns = columns::map_columns(sheet, &found, spec);
    rows::extract_rows(
        sheet,
        kind,
        &found,
        &columns,
        &meta,
        settings.blank_run_limit,
    )
}
