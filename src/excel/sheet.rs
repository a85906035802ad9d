use crate::{numeric, text};
use calamine::{Data, DataType, Range};
use chrono::{NaiveDate, TimeDelta};
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    /// Excel serial date (days since 1899-12-30).
    Date(f64),
}
static EMPTY_CELL: Cell = Cell::Empty;
impl Cell {
    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Float(v) => Self::Number(*v),
            Data::Int(_) => data.as_f64().map_or(Self::Empty, Self::Number),
            Data::Bool(b) => Self::Text(if *b { "TRUE" } else { "FALSE" }.to_owned()),
            Data::DateTime(dt) => Self::Date(dt.as_f64()),
        }
    }
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(v) => v.trim().to_owned(),
            Self::Number(v) => numeric::format_number(*v),
            Self::Date(v) => serial_to_date(*v).map_or_else(
                || numeric::format_number(*v),
                |d| d.format("%d/%m/%Y").to_string(),
            ),
        }
    }
    pub fn folded(&self) -> String {
        text::fold(&self.display())
    }
}
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let days = numeric::round_f64_to_i64(serial.floor())?;
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(TimeDelta::try_days(days)?)
}
/// One worksheet as a grid addressed from A1, whatever the used range.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}
impl RawSheet {
    pub fn new<S: Into<String>>(name: S, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
    pub fn from_range(name: &str, range: &Range<Data>) -> Self {
        let (start_row, start_col) = range
            .start()
            .map_or((0, 0), |(r, c)| (to_usize(r), to_usize(c)));
        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
        for data_row in range.rows() {
            let mut row = vec![Cell::Empty; start_col];
            row.extend(data_row.iter().map(Cell::from_data));
            while row.last().is_some_and(Cell::is_blank) {
                row.pop();
            }
            rows.push(row);
        }
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        Self::new(name, rows)
    }
    /// Builds a sheet from literal text; empty strings become empty cells.
    pub fn from_text_rows(name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        if v.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::Text((*v).to_owned())
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(name, rows)
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn height(&self) -> usize {
        self.rows.len()
    }
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.row(row).get(col).unwrap_or(&EMPTY_CELL)
    }
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.row(row).iter().all(Cell::is_blank)
    }
    pub fn folded_row(&self, row: usize) -> Vec<String> {
        self.row(row).iter().map(Cell::folded).collect()
    }
}
fn to_usize(v: u32) -> usize {
    usize::try_from(v).unwrap_or(0)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn range_offset_is_padded_to_absolute_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("contrato".to_owned()));
        range.set_value((3, 2), Data::Float(12345.0));
        let sheet = RawSheet::from_range("Plan1", &range);
        assert_eq!(sheet.height(), 4, "rows 0 and 1 are padded");
        assert_eq!(sheet.cell(2, 1), &Cell::Text("contrato".to_owned()), "B3");
        assert_eq!(sheet.cell(3, 2).display(), "12345", "C4 shown without decimals");
        assert!(sheet.is_blank_row(0), "padding rows are blank");
        assert_eq!(sheet.cell(50, 50), &Cell::Empty, "outside the grid");
    }
    #[test]
    fn typed_cells_map_to_cell_values() {
        assert_eq!(Cell::from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(Cell::from_data(&Data::Bool(true)).display(), "TRUE");
        assert_eq!(Cell::Date(45292.0).display(), "01/01/2024", "serial date");
    }
    #[test]
    fn whitespace_text_is_blank() {
        assert!(Cell::Text("  \u{a0}".to_owned()).is_blank(), "nbsp only");
        assert!(!Cell::Number(0.0).is_blank(), "zero is a value");
    }
}
