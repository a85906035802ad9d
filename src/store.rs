//! Per-kind consolidated store: create, append or reject a whole batch.
use crate::{
    error::{Error, Result},
    excel::{
        sheet::RawSheet,
        source_reader,
        writer::{self, ColumnStyle, STORE_SHEET_NAME, SheetTable, StoreValue},
    },
    numeric, path_policy,
    report::{
        kinds::ReportKind,
        layout::{KindSpec, StoreType},
        record::Record,
    },
};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveMode {
    #[default]
    Verify,
    Fast,
    DryRun,
}
impl SaveMode {
    pub const fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
    pub const fn verify_saved_file(self) -> bool {
        matches!(self, Self::Verify)
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Created { rows: usize },
    Appended { rows: usize },
    RejectedDuplicate { contract: String, period: String },
}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub save_mode: SaveMode,
    pub backup: bool,
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    pub outcome: MergeOutcome,
    pub backup_path: Option<PathBuf>,
    pub written: bool,
}
pub fn merge(dest: &Path, records: &[Record]) -> Result<MergeOutcome> {
    merge_with(dest, records, &MergeOptions::default()).map(|report| report.outcome)
}
pub fn merge_with(dest: &Path, records: &[Record], options: &MergeOptions) -> Result<MergeReport> {
    let kind = batch_kind(records)?;
    let spec = kind.spec();
    let incoming: Vec<Vec<StoreValue>> = records.iter().map(coerce_record).collect();
    let dry_run = options.save_mode.is_dry_run();
    let verify = options.save_mode.verify_saved_file();
    if !dest.exists() {
        let headers: Vec<String> = spec.field_names().map(str::to_owned).collect();
        if !dry_run {
            let styles = column_styles(spec, &headers);
            writer::save_table(
                dest,
                &SheetTable {
                    headers: &headers,
                    styles: &styles,
                    rows: &incoming,
                },
                verify,
            )?;
        }
        tracing::info!(store = %dest.display(), rows = incoming.len(), dry_run, "base criada");
        return Ok(MergeReport {
            outcome: MergeOutcome::Created {
                rows: incoming.len(),
            },
            backup_path: None,
            written: !dry_run,
        });
    }
    let existing = load_store(dest)?;
    let headers = aligned_headers(&existing.headers, spec);
    let placement: Vec<Option<usize>> = spec
        .field_names()
        .map(|name| headers.iter().position(|h| h == name))
        .collect();
    if let Some((contract, period)) = first_collision(&existing, spec, &incoming) {
        tracing::info!(store = %dest.display(), %contract, %period, "lote duplicado rejeitado");
        return Ok(MergeReport {
            outcome: MergeOutcome::RejectedDuplicate { contract, period },
            backup_path: None,
            written: false,
        });
    }
    let appended = incoming.len();
    let mut rows = existing.rows;
    for row in &mut rows {
        row.resize(headers.len(), StoreValue::Empty);
    }
    rows.extend(incoming.into_iter().map(|values| {
        let mut row = vec![StoreValue::Empty; headers.len()];
        for (value, slot) in values.into_iter().zip(&placement) {
            if let Some(cell) = slot.and_then(|col| row.get_mut(col)) {
                *cell = value;
            }
        }
        row
    }));
    let mut backup = None;
    if !dry_run {
        if options.backup {
            backup = Some(backup_store(dest)?);
        }
        let styles = column_styles(spec, &headers);
        writer::save_table(
            dest,
            &SheetTable {
                headers: &headers,
                styles: &styles,
                rows: &rows,
            },
            verify,
        )?;
    }
    tracing::info!(store = %dest.display(), rows = appended, dry_run, "linhas anexadas");
    Ok(MergeReport {
        outcome: MergeOutcome::Appended { rows: appended },
        backup_path: backup,
        written: !dry_run,
    })
}
fn batch_kind(records: &[Record]) -> Result<ReportKind> {
    let first = records.first().ok_or(Error::EmptyBatch)?.kind();
    match records.iter().map(Record::kind).find(|k| *k != first) {
        Some(found) => Err(Error::MixedKinds {
            expected: first,
            found,
        }),
        None => Ok(first),
    }
}
/// Store cells for one record, aligned with the kind's field list.
pub fn coerce_record(record: &Record) -> Vec<StoreValue> {
    record
        .kind()
        .spec()
        .fields
        .iter()
        .zip(record.values())
        .map(|(field, value)| match field.store {
            StoreType::Text if value.trim().is_empty() => StoreValue::Empty,
            StoreType::Text => StoreValue::Text(value.clone()),
            StoreType::Int => StoreValue::Number(numeric::int_to_f64(numeric::display_to_i64(value))),
            StoreType::Float => StoreValue::Number(numeric::display_to_f64(value)),
            StoreType::Percent => StoreValue::Number(numeric::display_to_fraction(value)),
        })
        .collect()
}
#[derive(Debug, Clone, Default)]
struct StoreTable {
    headers: Vec<String>,
    rows: Vec<Vec<StoreValue>>,
}
fn load_store(path: &Path) -> Result<StoreTable> {
    let Some(sheet) = source_reader::read_named_or_first(path, STORE_SHEET_NAME)? else {
        return Ok(StoreTable::default());
    };
    Ok(table_from_sheet(&sheet))
}
fn table_from_sheet(sheet: &RawSheet) -> StoreTable {
    let width = sheet.width();
    let headers: Vec<String> = (0..width).map(|c| sheet.cell(0, c).display()).collect();
    let rows = (1..sheet.height())
        .filter(|&r| !sheet.is_blank_row(r))
        .map(|r| (0..width).map(|c| StoreValue::from_cell(sheet.cell(r, c))).collect())
        .collect();
    StoreTable { headers, rows }
}
/// Existing header order first, then kind columns the store lacks.
fn aligned_headers(existing: &[String], spec: &KindSpec) -> Vec<String> {
    let mut headers = existing.to_vec();
    for name in spec.field_names() {
        if !headers.iter().any(|h| h == name) {
            headers.push(name.to_owned());
        }
    }
    headers
}
fn column_styles(spec: &KindSpec, headers: &[String]) -> Vec<ColumnStyle> {
    headers
        .iter()
        .map(|h| {
            match spec
                .field_index(h)
                .and_then(|i| spec.fields.get(i))
                .map(|f| f.store)
            {
                Some(StoreType::Float) => ColumnStyle::Float,
                Some(StoreType::Percent) => ColumnStyle::Percent,
                Some(StoreType::Text | StoreType::Int) | None => ColumnStyle::General,
            }
        })
        .collect()
}
fn first_collision(
    existing: &StoreTable,
    spec: &KindSpec,
    incoming: &[Vec<StoreValue>],
) -> Option<(String, String)> {
    let period_field = spec.dedup_period_field;
    let existing_col = |name: &str| existing.headers.iter().position(|h| h == name);
    let (contract_col, period_col) = (existing_col("contrato"), existing_col(period_field));
    let key_at = |row: &[StoreValue], col: Option<usize>| {
        col.and_then(|c| row.get(c))
            .map(StoreValue::key_text)
            .unwrap_or_default()
    };
    let known: HashSet<(String, String)> = existing
        .rows
        .iter()
        .map(|row| (key_at(row, contract_col), key_at(row, period_col)))
        .collect();
    let (new_contract, new_period) = (spec.field_index("contrato"), spec.field_index(period_field));
    incoming
        .iter()
        .map(|row| (key_at(row, new_contract), key_at(row, new_period)))
        .find(|key| known.contains(key))
}
fn backup_store(dest: &Path) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let backup = path_policy::reserve_backup_path(dest, &today)?;
    if let Err(e) = fs::copy(dest, &backup) {
        path_policy::cleanup_reservation_file(&backup);
        return Err(Error::io(backup, e));
    }
    tracing::info!(backup = %backup.display(), "cópia de segurança criada");
    Ok(backup)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::sheet::Cell;
    use tempfile::TempDir;
    fn tmp() -> Result<TempDir> {
        TempDir::new().map_err(|e| Error::io("tmp", e))
    }
    fn beneficiary(name: &str, contract: &str, start: &str) -> Result<Record> {
        Record::from_pairs(
            ReportKind::Beneficiaries,
            &[
                ("beneficiario", name),
                ("qteventos", "2,00"),
                ("porcqteventos", "50,00%"),
                ("valortotal", "1234,56"),
                ("relatorio", "Ranking de Beneficiários"),
                ("contrato", contract),
                ("dtcompetde", start),
                ("dtcompetate", "31/01/2024"),
            ],
        )
    }
    fn read_store(path: &Path) -> Result<RawSheet> {
        source_reader::read_named_or_first(path, STORE_SHEET_NAME)?
            .ok_or_else(|| Error::Limits("sem aba".to_owned()))
    }
    fn column(sheet: &RawSheet, name: &str) -> Option<usize> {
        (0..sheet.width()).find(|&c| sheet.cell(0, c).display() == name)
    }
    #[test]
    fn coercion_follows_store_types() -> Result<()> {
        let values = coerce_record(&beneficiary("Ana", "12345", "01/01/2024")?);
        let spec = ReportKind::Beneficiaries.spec();
        let at = |name: &str| spec.field_index(name).and_then(|i| values.get(i)).cloned();
        assert_eq!(at("qteventos"), Some(StoreValue::Number(2.0)), "int");
        assert_eq!(at("porcqteventos"), Some(StoreValue::Number(0.5)), "fraction");
        assert_eq!(at("valortotal"), Some(StoreValue::Number(1234.56)), "float");
        assert_eq!(at("valorliq"), Some(StoreValue::Number(0.0)), "blank float");
        assert_eq!(at("contrato"), Some(StoreValue::Number(12345.0)), "int contract");
        assert_eq!(at("vigente"), Some(StoreValue::Empty), "blank text");
        Ok(())
    }
    #[test]
    fn create_then_append_then_reject() -> Result<()> {
        let dir = tmp()?;
        let dest = dir.path().join("databases").join("despesas.xlsx");
        let january = vec![beneficiary("Ana", "12345", "01/01/2024")?];
        assert_eq!(merge(&dest, &january)?, MergeOutcome::Created { rows: 1 });
        let february = vec![
            beneficiary("Bia", "12345", "01/02/2024")?,
            beneficiary("Caio", "12345", "01/02/2024")?,
        ];
        assert_eq!(merge(&dest, &february)?, MergeOutcome::Appended { rows: 2 });
        let mixed = vec![
            beneficiary("Duda", "12345", "01/03/2024")?,
            beneficiary("Eva", "12345", "01/01/2024")?,
        ];
        assert_eq!(
            merge(&dest, &mixed)?,
            MergeOutcome::RejectedDuplicate {
                contract: "12345".to_owned(),
                period: "01/01/2024".to_owned(),
            },
            "one colliding record rejects the whole batch"
        );
        let sheet = read_store(&dest)?;
        assert_eq!(sheet.height(), 4, "header plus three rows");
        let name_col = column(&sheet, "beneficiario");
        let names: Vec<String> = (1..sheet.height())
            .map(|r| name_col.map(|c| sheet.cell(r, c).display()).unwrap_or_default())
            .collect();
        assert_eq!(names, ["Ana", "Bia", "Caio"], "order preserved");
        let pct_col = column(&sheet, "porcqteventos");
        assert_eq!(pct_col.map(|c| sheet.cell(1, c)), Some(&Cell::Number(0.5)));
        Ok(())
    }
    #[test]
    fn existing_rows_and_foreign_columns_are_preserved() -> Result<()> {
        let dir = tmp()?;
        let dest = dir.path().join("despesas.xlsx");
        let headers = vec!["observacao".to_owned(), "contrato".to_owned(), "dtcompetde".to_owned()];
        let rows = vec![vec![
            StoreValue::Text("manual".to_owned()),
            StoreValue::Text("777".to_owned()),
            StoreValue::Text("01/05/2023".to_owned()),
        ]];
        writer::save_table(
            &dest,
            &SheetTable {
                headers: &headers,
                styles: &[],
                rows: &rows,
            },
            false,
        )?;
        let batch = vec![beneficiary("Ana", "777", "01/06/2023")?];
        let report = merge_with(
            &dest,
            &batch,
            &MergeOptions {
                save_mode: SaveMode::Fast,
                backup: true,
            },
        )?;
        assert_eq!(report.outcome, MergeOutcome::Appended { rows: 1 });
        assert!(report.backup_path.as_ref().is_some_and(|p| p.exists()), "backup copied");
        let sheet = read_store(&dest)?;
        assert_eq!(sheet.cell(0, 0).display(), "observacao", "existing order kept");
        assert_eq!(sheet.cell(1, 0).display(), "manual", "existing value untouched");
        assert_eq!(sheet.cell(1, 1), &Cell::Text("777".to_owned()), "text stays text");
        assert_eq!(sheet.cell(2, 0), &Cell::Empty, "new row has no foreign value");
        assert_eq!(
            column(&sheet, "beneficiario").map(|c| sheet.cell(2, c).display()).as_deref(),
            Some("Ana"),
            "missing kind columns appended"
        );
        let duplicate = vec![beneficiary("Bia", "777", "01/05/2023")?];
        assert!(
            matches!(merge(&dest, &duplicate)?, MergeOutcome::RejectedDuplicate { .. }),
            "numeric contract matches stored text"
        );
        Ok(())
    }
    #[test]
    fn date_typed_periods_still_collide_and_survive_rewrites() -> Result<()> {
        let dir = tmp()?;
        let dest = dir.path().join("despesas.xlsx");
        let headers = vec!["contrato".to_owned(), "dtcompetde".to_owned()];
        let rows = vec![vec![StoreValue::Number(12345.0), StoreValue::Date(45292.0)]];
        writer::save_table(
            &dest,
            &SheetTable {
                headers: &headers,
                styles: &[],
                rows: &rows,
            },
            false,
        )?;
        let again = vec![beneficiary("Ana", "12345", "01/01/2024")?];
        assert_eq!(
            merge(&dest, &again)?,
            MergeOutcome::RejectedDuplicate {
                contract: "12345".to_owned(),
                period: "01/01/2024".to_owned(),
            },
            "date cell compared as dd/mm/yyyy"
        );
        let february = vec![beneficiary("Bia", "12345", "01/02/2024")?];
        assert_eq!(merge(&dest, &february)?, MergeOutcome::Appended { rows: 1 });
        let sheet = read_store(&dest)?;
        assert_eq!(sheet.cell(1, 1), &Cell::Date(45292.0), "existing date kept as date");
        assert_eq!(sheet.cell(2, 1), &Cell::Text("01/02/2024".to_owned()));
        Ok(())
    }
    #[test]
    fn dry_run_never_touches_disk() -> Result<()> {
        let dir = tmp()?;
        let dest = dir.path().join("novo").join("exames.xlsx");
        let record = Record::from_pairs(ReportKind::Exams, &[("grupo", "Imagem")])?;
        let report = merge_with(
            &dest,
            &[record],
            &MergeOptions {
                save_mode: SaveMode::DryRun,
                backup: true,
            },
        )?;
        assert_eq!(report.outcome, MergeOutcome::Created { rows: 1 });
        assert!(!report.written, "dry run");
        assert!(!dest.exists() && !dir.path().join("novo").exists(), "nothing created");
        Ok(())
    }
    #[test]
    fn batches_must_be_non_empty_and_single_kind() -> Result<()> {
        let dir = tmp()?;
        let dest = dir.path().join("x.xlsx");
        assert!(matches!(merge(&dest, &[]), Err(Error::EmptyBatch)), "empty");
        let mixed = vec![
            Record::from_pairs(ReportKind::Exams, &[])?,
            Record::from_pairs(ReportKind::Therapies, &[])?,
        ];
        assert!(
            matches!(merge(&dest, &mixed), Err(Error::MixedKinds { .. })),
            "mixed kinds"
        );
        assert!(!dest.exists(), "no write on error");
        Ok(())
    }
}
