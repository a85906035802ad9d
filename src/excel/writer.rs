use super::{
    sheet::{self, Cell, RawSheet},
    source_reader,
};
use crate::{
    error::{Error, Result},
    numeric, path_policy,
};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::{fs, path::Path};
pub const STORE_SHEET_NAME: &str = "Dados";
const FLOAT_FORMAT: &str = "#,##0.00";
const PERCENT_FORMAT: &str = "0.00%";
const DATE_FORMAT: &str = "dd/mm/yyyy";
const FLOAT_WIDTH: f64 = 15.0;
const PERCENT_WIDTH: f64 = 12.0;
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Empty,
    Text(String),
    Number(f64),
    /// Excel date serial, written back with a date format.
    Date(f64),
}
impl StoreValue {
    pub fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Empty => Self::Empty,
            Cell::Text(v) => Self::Text(v.clone()),
            Cell::Number(v) => Self::Number(*v),
            Cell::Date(v) => Self::Date(*v),
        }
    }
    /// Text used for duplicate-key comparison.
    pub fn key_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(v) => v.trim().to_owned(),
            Self::Number(v) => numeric::format_number(*v),
            Self::Date(v) => sheet::serial_to_date(*v).map_or_else(
                || numeric::format_number(*v),
                |date| date.format("%d/%m/%Y").to_string(),
            ),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStyle {
    General,
    Float,
    Percent,
}
#[derive(Debug, Clone, Copy)]
pub struct SheetTable<'a> {
    pub headers: &'a [String],
    pub styles: &'a [ColumnStyle],
    pub rows: &'a [Vec<StoreValue>],
}
impl SheetTable<'_> {
    fn style(&self, col: usize) -> ColumnStyle {
        self.styles.get(col).copied().unwrap_or(ColumnStyle::General)
    }
}
/// Writes to a temp file beside `dest`, optionally re-reads it, then renames it over `dest`.
pub fn save_table(dest: &Path, table: &SheetTable<'_>, verify: bool) -> Result<()> {
    path_policy::ensure_parent_dir(dest)?;
    let tmp = path_policy::create_unique_temp_path(dest)?;
    let result = write_table(&tmp, table)
        .and_then(|()| {
            if verify {
                verify_saved(&tmp, table)
            } else {
                Ok(())
            }
        })
        .and_then(|()| path_policy::promote_temp_output(&tmp, dest));
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            tracing::debug!(file = %tmp.display(), error = %e, "temporário não removido");
        }
    }
    result
}
pub fn write_table(path: &Path, table: &SheetTable<'_>) -> Result<()> {
    let wrap = |source: XlsxError| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let header_format = Format::new().set_bold();
    let float_format = Format::new().set_num_format(FLOAT_FORMAT);
    let percent_format = Format::new().set_num_format(PERCENT_FORMAT);
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(STORE_SHEET_NAME).map_err(wrap)?;
    for (c, name) in table.headers.iter().enumerate() {
        let col = col_num(c)?;
        worksheet
            .write_string_with_format(0, col, name, &header_format)
            .map_err(wrap)?;
        match table.style(c) {
            ColumnStyle::Float => {
                worksheet.set_column_width(col, FLOAT_WIDTH).map_err(wrap)?;
            }
            ColumnStyle::Percent => {
                worksheet.set_column_width(col, PERCENT_WIDTH).map_err(wrap)?;
            }
            ColumnStyle::General => {}
        }
    }
    for (r, values) in table.rows.iter().enumerate() {
        let row = row_num(r.saturating_add(1))?;
        for (c, value) in values.iter().enumerate() {
            let col = col_num(c)?;
            match (value, table.style(c)) {
                (StoreValue::Empty, _) => {}
                (StoreValue::Text(v), _) => {
                    worksheet.write_string(row, col, v).map_err(wrap)?;
                }
                (StoreValue::Number(v), ColumnStyle::Float) => {
                    worksheet
                        .write_number_with_format(row, col, *v, &float_format)
                        .map_err(wrap)?;
                }
                (StoreValue::Number(v), ColumnStyle::Percent) => {
                    worksheet
                        .write_number_with_format(row, col, *v, &percent_format)
                        .map_err(wrap)?;
                }
                (StoreValue::Number(v), ColumnStyle::General) => {
                    worksheet.write_number(row, col, *v).map_err(wrap)?;
                }
                (StoreValue::Date(v), _) => {
                    worksheet
                        .write_number_with_format(row, col, *v, &date_format)
                        .map_err(wrap)?;
                }
            }
        }
    }
    workbook.save(path).map_err(wrap)
}
fn verify_saved(path: &Path, table: &SheetTable<'_>) -> Result<()> {
    let fail = |reason: String| Error::Verify {
        path: path.to_path_buf(),
        reason,
    };
    let sheet: RawSheet = source_reader::read_named_or_first(path, STORE_SHEET_NAME)?
        .ok_or_else(|| fail("nenhuma aba".to_owned()))?;
    let expected_rows = table.rows.len().saturating_add(1);
    if sheet.height() != expected_rows {
        return Err(fail(format!(
            "linhas esperadas {expected_rows}, encontradas {}",
            sheet.height()
        )));
    }
    let header_ok = table
        .headers
        .iter()
        .enumerate()
        .all(|(c, name)| sheet.cell(0, c).display() == name.trim());
    if !header_ok {
        return Err(fail("cabeçalho divergente".to_owned()));
    }
    Ok(())
}
fn row_num(r: usize) -> Result<u32> {
    u32::try_from(r)
        .ok()
        .filter(|v| *v < 1_048_576)
        .ok_or_else(|| Error::Limits(format!("linha {r}")))
}
fn col_num(c: usize) -> Result<u16> {
    u16::try_from(c)
        .ok()
        .filter(|v| *v < 16_384)
        .ok_or_else(|| Error::Limits(format!("coluna {c}")))
}
