use super::sheet::RawSheet;
use crate::error::{Error, Result};
use calamine::{Reader, open_workbook_auto};
use std::{fs, path::Path};
/// Rejects missing, empty or non-spreadsheet inputs before calamine sees them.
pub fn validate_source(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|v| v.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !matches!(ext.as_str(), "xls" | "xlsx") {
        return Err(Error::UnsupportedExtension(path.to_path_buf()));
    }
    let len = fs::metadata(path)
        .map_err(|e| Error::io(path, e))?
        .len();
    if len == 0 {
        return Err(Error::EmptyFile(path.to_path_buf()));
    }
    Ok(())
}
/// Loads every sheet; a sheet that cannot be read is skipped unless all fail.
pub fn read_sheets(path: &Path) -> Result<Vec<RawSheet>> {
    validate_source(path)?;
    read_workbook(path, None)
}
/// Loads the sheet called `preferred`, or the first sheet when it is absent.
pub fn read_named_or_first(path: &Path, preferred: &str) -> Result<Option<RawSheet>> {
    Ok(read_workbook(path, Some(preferred))?.into_iter().next())
}
fn read_workbook(path: &Path, preferred: Option<&str>) -> Result<Vec<RawSheet>> {
    let mut workbook = open_workbook_auto(path).map_err(|source| Error::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let mut names = workbook.sheet_names();
    if let Some(wanted) = preferred {
        names = names
            .iter()
            .find(|n| n.as_str() == wanted)
            .or_else(|| names.first())
            .cloned()
            .into_iter()
            .collect();
    }
    let mut sheets = Vec::with_capacity(names.len());
    let mut last_err = None;
    for name in &names {
        match workbook.worksheet_range(name) {
            Ok(range) => sheets.push(RawSheet::from_range(name, &range)),
            Err(source) => {
                tracing::warn!(file = %path.display(), sheet = %name, error = %source, "aba ignorada");
                last_err = Some(source);
            }
        }
    }
    match last_err {
        Some(source) if sheets.is_empty() => Err(Error::Workbook {
            path: path.to_path_buf(),
            source,
        }),
        Some(_) | None => Ok(sheets),
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;
    #[test]
    fn validation_reports_each_problem() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let missing = dir.path().join("nada.xlsx");
        assert!(matches!(validate_source(&missing), Err(Error::NotFound(_))), "missing");
        let csv = dir.path().join("dados.csv");
        fs::write(&csv, "a;b")?;
        assert!(
            matches!(validate_source(&csv), Err(Error::UnsupportedExtension(_))),
            "csv"
        );
        let empty = dir.path().join("vazio.xlsx");
        fs::write(&empty, "")?;
        assert!(matches!(validate_source(&empty), Err(Error::EmptyFile(_))), "empty");
        let broken = dir.path().join("quebrado.xlsx");
        fs::write(&broken, "not a zip")?;
        assert!(matches!(read_sheets(&broken), Err(Error::Workbook { .. })), "broken");
        Ok(())
    }
    #[test]
    fn reads_all_sheets_with_absolute_positions()
    -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("relatorio.xlsx");
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Resumo")?;
        first.write_string(2, 3, "12345")?;
        let second = workbook.add_worksheet();
        second.set_name("Dados")?;
        second.write_number(0, 0, 1.5)?;
        workbook.save(&path)?;
        let sheets = read_sheets(&path)?;
        assert_eq!(sheets.len(), 2, "both sheets");
        assert_eq!(sheets.first().map(|s| s.cell(2, 3).display()).as_deref(), Some("12345"));
        let named = read_named_or_first(&path, "Dados")?;
        assert_eq!(named.as_ref().map(RawSheet::name), Some("Dados"), "preferred");
        let fallback = read_named_or_first(&path, "Outra")?;
        assert_eq!(fallback.as_ref().map(RawSheet::name), Some("Resumo"), "first");
        Ok(())
    }
}
