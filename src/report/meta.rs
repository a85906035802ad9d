use super::layout::{MetaLayout, PeriodRule};
use crate::{excel::sheet::RawSheet, text};
use regex::Regex;
use std::sync::LazyLock;
const CONTRACT_SCAN_ROWS: usize = 12;
const CONTRACT_VALUE_SPAN: usize = 2;
const PERIOD_SCAN_ROWS: usize = 15;
const PERIOD_VALUE_SPAN: usize = 3;
static MONTH_YEAR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d{2}/\d{4}").ok());
/// Contract and reporting period read from a sheet's header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMeta {
    pub contract: String,
    pub period_start: String,
    pub period_end: String,
}
pub fn read_meta(sheet: &RawSheet, layout: &MetaLayout) -> HeaderMeta {
    let contract = first_non_blank(sheet, layout.contract_cells)
        .or_else(|| contract_by_label(sheet))
        .unwrap_or_default();
    let (period_start, period_end) = match layout.period_rule {
        PeriodRule::Range => first_non_blank(sheet, layout.period_cells)
            .and_then(|v| split_range(&v))
            .or_else(|| range_by_label(sheet)),
        PeriodRule::MonthYear => month_year_bounds(sheet),
    }
    .unwrap_or_default();
    HeaderMeta {
        contract,
        period_start,
        period_end,
    }
}
/// "01/01/2024 até 31/01/2024" gives tokens 0 and 2; the format is not checked.
pub fn split_range(text: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [start, _, end, ..] => Some(((*start).to_owned(), (*end).to_owned())),
        _ => None,
    }
}
fn first_non_blank(sheet: &RawSheet, cells: &[(usize, usize)]) -> Option<String> {
    cells
        .iter()
        .map(|&(row, col)| sheet.cell(row, col))
        .find(|cell| !cell.is_blank())
        .map(crate::excel::sheet::Cell::display)
}
fn label_cells<'a>(
    sheet: &'a RawSheet,
    rows: usize,
    token: &'a str,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    (0..rows.min(sheet.height())).flat_map(move |row| {
        sheet
            .row(row)
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.folded().contains(token))
            .map(move |(col, _)| (row, col))
    })
}
fn contract_by_label(sheet: &RawSheet) -> Option<String> {
    label_cells(sheet, CONTRACT_SCAN_ROWS, "contrato").find_map(|(row, col)| {
        (1..=CONTRACT_VALUE_SPAN).find_map(|offset| {
            let cell = sheet.cell(row, col.checked_add(offset)?);
            (!cell.is_blank() && !cell.folded().contains("contrato")).then(|| cell.display())
        })
    })
}
fn range_by_label(sheet: &RawSheet) -> Option<(String, String)> {
    label_cells(sheet, PERIOD_SCAN_ROWS, "period").find_map(|(row, col)| {
        let own = sheet.cell(row, col).display();
        own.split_once(':')
            .and_then(|(_, rest)| split_range(rest))
            .or_else(|| {
                (1..=PERIOD_VALUE_SPAN).find_map(|offset| {
                    let cell = sheet.cell(row, col.checked_add(offset)?);
                    split_range(&cell.display())
                })
            })
    })
}
fn month_year_bounds(sheet: &RawSheet) -> Option<(String, String)> {
    let re = MONTH_YEAR.as_ref()?;
    (0..PERIOD_SCAN_ROWS.min(sheet.height())).find_map(|row| {
        let line = sheet
            .row(row)
            .iter()
            .filter(|cell| !cell.is_blank())
            .map(crate::excel::sheet::Cell::display)
            .collect::<Vec<_>>()
            .join(" ");
        if !text::fold(&line).contains("period") {
            return None;
        }
        let found: Vec<&str> = re.find_iter(&line).map(|m| m.as_str()).collect();
        Some(((*found.first()?).to_owned(), (*found.last()?).to_owned()))
    })
}
/// `MM/YYYY` found in `text`, if any.
pub fn month_year_in(text: &str) -> Option<String> {
    MONTH_YEAR
        .as_ref()?
        .find(text)
        .map(|m| m.as_str().to_owned())
}
