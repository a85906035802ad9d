use super::kinds::ReportKind;
use crate::{error::Result, excel::source_reader, text};
use std::path::Path;
const SNIFF_ROWS: usize = 15;
/// Whether the workbook's first sheet looks like a report of `kind`.
/// Kinds without keywords accept any readable workbook.
pub fn sniff(path: &Path, kind: ReportKind) -> Result<bool> {
    let keywords = kind.spec().sniff_keywords;
    let sheets = source_reader::read_sheets(path)?;
    if keywords.is_empty() {
        return Ok(true);
    }
    let Some(sheet) = sheets.first() else {
        return Ok(false);
    };
    let haystack = (0..sheet.height().min(SNIFF_ROWS))
        .flat_map(|r| sheet.folded_row(r))
        .collect::<Vec<_>>()
        .join(" ");
    let found = keywords.iter().any(|k| haystack.contains(&text::fold(k)));
    tracing::debug!(file = %path.display(), %kind, found, "verificação estrutural");
    Ok(found)
}
