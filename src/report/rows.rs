use super::{
    columns::ColumnMap,
    header::HeaderMatch,
    kinds::ReportKind,
    layout::{FieldSource, KindSpec, ReadAs},
    meta::{self, HeaderMeta},
    record::Record,
};
use crate::{
    excel::sheet::{self, Cell, RawSheet},
    numeric::{self, NumberMode, PercentScale},
    text,
};
use chrono::NaiveDate;
use std::ops::ControlFlow;
/// Fold state threaded through the row scan.
struct Scan {
    blank_run: usize,
    carried: Vec<Option<String>>,
    records: Vec<Record>,
}
pub fn extract_rows(
    sheet: &RawSheet,
    kind: ReportKind,
    header: &HeaderMatch,
    columns: &ColumnMap,
    meta: &HeaderMeta,
    blank_run_limit: usize,
) -> Vec<Record> {
    let spec = kind.spec();
    let Some(anchor_col) = columns.column_of(spec, spec.anchor_field) else {
        tracing::debug!(sheet = sheet.name(), "coluna âncora não mapeada");
        return Vec::new();
    };
    let start = Scan {
        blank_run: 0,
        carried: vec![None; spec.fields.len()],
        records: Vec::new(),
    };
    let first_row = header.row.saturating_add(1);
    let outcome = (first_row..sheet.height()).try_fold(start, |mut scan, row| {
        if sheet.is_blank_row(row) {
            scan.blank_run = scan.blank_run.saturating_add(1);
            return if scan.blank_run >= blank_run_limit {
                ControlFlow::Break(scan)
            } else {
                ControlFlow::Continue(scan)
            };
        }
        scan.blank_run = 0;
        if !is_data_row(sheet.cell(row, anchor_col), spec) {
            return ControlFlow::Continue(scan);
        }
        let values = row_values(sheet, row, spec, columns, meta, &mut scan.carried);
        scan.records.push(Record::new(kind, values));
        ControlFlow::Continue(scan)
    });
    let (ControlFlow::Break(scan) | ControlFlow::Continue(scan)) = outcome;
    scan.records
}
fn is_data_row(anchor: &Cell, spec: &KindSpec) -> bool {
    !anchor.is_blank() && !is_total_label(&anchor.display(), spec)
}
fn row_values(
    sheet: &RawSheet,
    row: usize,
    spec: &KindSpec,
    columns: &ColumnMap,
    meta: &HeaderMeta,
    carried: &mut [Option<String>],
) -> Vec<String> {
    spec.fields
        .iter()
        .enumerate()
        .map(|(i, field)| match field.source {
            FieldSource::Column { read, carry, .. } => {
                let value = columns.get(i).map_or_else(String::new, |m| {
                    read_cell(sheet.cell(row, m.col), read, spec.percent_scale)
                });
                if carry {
                    carry_forward(carried.get_mut(i), value)
                } else {
                    value
                }
            }
            FieldSource::ReportName => spec.report_name.to_owned(),
            FieldSource::Contract => meta.contract.clone(),
            FieldSource::PeriodStart => meta.period_start.clone(),
            FieldSource::PeriodEnd => meta.period_end.clone(),
        })
        .collect()
}
fn carry_forward(slot: Option<&mut Option<String>>, value: String) -> String {
    let Some(slot) = slot else {
        return value;
    };
    if value.is_empty() {
        return slot.clone().unwrap_or_default();
    }
    let value = numeric::integer_text(&value).unwrap_or(value);
    *slot = Some(value.clone());
    value
}
fn read_cell(cell: &Cell, read: ReadAs, scale: PercentScale) -> String {
    match read {
        ReadAs::Text => cell.display(),
        ReadAs::Number { blank_zero } => numeric::to_display(cell, NumberMode::Plain, blank_zero),
        ReadAs::Percent { blank_zero } => {
            numeric::to_display(cell, NumberMode::Percent(scale), blank_zero)
        }
        ReadAs::Code => numeric::code_text(cell),
        ReadAs::Month => month_text(cell),
    }
}
fn month_text(cell: &Cell) -> String {
    if let Cell::Date(serial) = *cell {
        if let Some(date) = sheet::serial_to_date(serial) {
            return date.format("%m/%Y").to_string();
        }
    }
    let raw = cell.display();
    if raw.is_empty() {
        return raw;
    }
    if let Some(found) = meta::month_year_in(&raw) {
        return found;
    }
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .map_or_else(|| raw.clone(), |d| d.format("%m/%Y").to_string())
}
pub fn is_total_label(value: &str, spec: &KindSpec) -> bool {
    let folded = text::fold(value);
    spec.total_markers.iter().any(|m| folded.starts_with(m))
}
