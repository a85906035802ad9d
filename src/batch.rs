//! Input discovery and the serialized extract-then-merge loop over files.
use crate::{
    config::Settings,
    error::{Error, Result},
    report::{self, kinds::ReportKind, sniff},
    store::{self, MergeOptions, MergeOutcome},
};
use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};
const LOCK_FILE_PREFIX: &str = "~$";
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub merge: MergeOptions,
    /// Process files that fail structural sniffing.
    pub force: bool,
    pub settings: Settings,
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Created { rows: usize },
    Appended { rows: usize },
    RejectedDuplicate { contract: String, period: String },
    NoRecords,
    Incompatible,
    Failed { message: String },
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub records: usize,
    pub status: FileStatus,
    pub backup: Option<PathBuf>,
}
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub kind: ReportKind,
    pub store: PathBuf,
    pub options: BatchOptions,
    pub files: Vec<FileReport>,
}
impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.files
            .iter()
            .any(|f| matches!(f.status, FileStatus::Failed { .. }))
    }
    pub fn count<F: Fn(&FileStatus) -> bool>(&self, pred: F) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }
    pub fn rows_written(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.status {
                FileStatus::Created { rows } | FileStatus::Appended { rows } => rows,
                FileStatus::RejectedDuplicate { .. }
                | FileStatus::NoRecords
                | FileStatus::Incompatible
                | FileStatus::Failed { .. } => 0,
            })
            .sum()
    }
}
/// Explicit files are kept in the given order; directories contribute their
/// `.xls`/`.xlsx` files in natural name order, minus Excel lock files.
pub fn collect_inputs(inputs: &[PathBuf], prefix: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_source_files(input, prefix.unwrap_or_default())?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
pub fn find_source_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let prefix_fold = prefix.to_lowercase();
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let file_name_fold = file_name.to_lowercase();
        if file_name.starts_with(LOCK_FILE_PREFIX) || !file_name_fold.starts_with(&prefix_fold) {
            continue;
        }
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or_default();
        if ext.eq_ignore_ascii_case("xls") || ext.eq_ignore_ascii_case("xlsx") {
            candidates.push(SourceFileCandidate {
                natural_key: split_natural_parts(&file_name_fold),
                path,
            });
        }
    }
    candidates.sort_by(|a, b| {
        compare_natural_parts(&a.natural_key, &b.natural_key).then_with(|| a.path.cmp(&b.path))
    });
    Ok(candidates.into_iter().map(|v| v.path).collect())
}
/// Each file is extracted and merged on its own; a failing file is recorded
/// and the loop moves on.
pub fn run_batch(
    kind: ReportKind,
    files: &[PathBuf],
    store_path: &Path,
    options: &BatchOptions,
) -> BatchReport {
    let files = files
        .iter()
        .map(|path| {
            process_file(kind, path, store_path, options).unwrap_or_else(|e| {
                tracing::warn!(file = %path.display(), error = %e, "arquivo com falha");
                FileReport {
                    path: path.clone(),
                    records: 0,
                    status: FileStatus::Failed {
                        message: e.to_string(),
                    },
                    backup: None,
                }
            })
        })
        .collect();
    BatchReport {
        kind,
        store: store_path.to_path_buf(),
        options: options.clone(),
        files,
    }
}
fn process_file(
    kind: ReportKind,
    path: &Path,
    store_path: &Path,
    options: &BatchOptions,
) -> Result<FileReport> {
    let file_report = |records, status, backup| FileReport {
        path: path.to_path_buf(),
        records,
        status,
        backup,
    };
    if !options.force && !sniff::sniff(path, kind)? {
        tracing::info!(file = %path.display(), %kind, "arquivo incompatível");
        return Ok(file_report(0, FileStatus::Incompatible, None));
    }
    let records = report::extract_with(path, kind, &options.settings)?;
    if records.is_empty() {
        return Ok(file_report(0, FileStatus::NoRecords, None));
    }
    let merged = store::merge_with(store_path, &records, &options.merge)?;
    let status = match merged.outcome {
        MergeOutcome::Created { rows } => FileStatus::Created { rows },
        MergeOutcome::Appended { rows } => FileStatus::Appended { rows },
        MergeOutcome::RejectedDuplicate { contract, period } => {
            FileStatus::RejectedDuplicate { contract, period }
        }
    };
    Ok(file_report(records.len(), status, merged.backup_path))
}
struct SourceFileCandidate {
    path: PathBuf,
    natural_key: Vec<NaturalPart>,
}
#[derive(Debug, Clone, PartialEq, Eq)]
enum NaturalPart {
    Number { digits: String, raw_len: usize },
    Text(String),
}
fn split_natural_parts(s: &str) -> Vec<NaturalPart> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(&first) = chars.peek() {
        let digits = first.is_ascii_digit();
        let mut run = String::new();
        while let Some(ch) = chars.next_if(|c| c.is_ascii_digit() == digits) {
            run.push(ch);
        }
        out.push(if digits {
            let trimmed = run.trim_start_matches('0');
            NaturalPart::Number {
                digits: if trimmed.is_empty() { "0" } else { trimmed }.to_owned(),
                raw_len: run.len(),
            }
        } else {
            NaturalPart::Text(run)
        });
    }
    out
}
fn compare_natural_parts(a: &[NaturalPart], b: &[NaturalPart]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_natural_part(x, y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
fn compare_natural_part(a: &NaturalPart, b: &NaturalPart) -> Ordering {
    match (a, b) {
        (
            NaturalPart::Number {
                digits: a_num,
                raw_len: a_raw,
            },
            NaturalPart::Number {
                digits: b_num,
                raw_len: b_raw,
            },
        ) => a_num
            .len()
            .cmp(&b_num.len())
            .then_with(|| a_num.cmp(b_num))
            .then_with(|| a_raw.cmp(b_raw)),
        (NaturalPart::Text(a_text), NaturalPart::Text(b_text)) => a_text.cmp(b_text),
        (NaturalPart::Number { .. }, NaturalPart::Text(_)) => Ordering::Less,
        (NaturalPart::Text(_), NaturalPart::Number { .. }) => Ordering::Greater,
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;
    fn tmp() -> Result<TempDir> {
        TempDir::new().map_err(|e| Error::io("tmp", e))
    }
    fn touch(dir: &Path, name: &str) -> Result<()> {
        let path = dir.join(name);
        fs::write(&path, b"x").map_err(|e| Error::io(path, e))
    }
    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_owned))
            .collect()
    }
    #[test]
    fn directories_are_scanned_in_natural_order() -> Result<()> {
        let dir = tmp()?;
        for name in ["rel10.xlsx", "rel2.xlsx", "REL3.xls", "~$rel1.xlsx", "rel4.txt", "outro1.xlsx"] {
            touch(dir.path(), name)?;
        }
        let files = collect_inputs(&[dir.path().to_path_buf()], Some("rel"))?;
        assert_eq!(names(&files), ["rel2.xlsx", "REL3.xls", "rel10.xlsx"]);
        let all = collect_inputs(&[dir.path().to_path_buf()], None)?;
        assert_eq!(all.len(), 4, "prefix is optional");
        Ok(())
    }
    #[test]
    fn leading_zeros_sort_after_equal_values() {
        let a = split_natural_parts("r2");
        let b = split_natural_parts("r02");
        assert_eq!(compare_natural_parts(&a, &b), Ordering::Less);
        let c = split_natural_parts("r9b");
        assert_eq!(compare_natural_parts(&c, &b), Ordering::Greater);
    }
    fn beneficiaries_workbook(path: &Path) -> Result<()> {
        let wrap = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Ranking de Beneficiários").map_err(wrap)?;
        sheet.write_string(3, 3, "12345").map_err(wrap)?;
        sheet
            .write_string(10, 3, "01/01/2024 até 31/01/2024")
            .map_err(wrap)?;
        sheet.write_string(14, 3, "Beneficiário").map_err(wrap)?;
        sheet.write_string(15, 3, "Jane").map_err(wrap)?;
        sheet.write_string(15, 9, "1,00").map_err(wrap)?;
        workbook.save(path).map_err(wrap)
    }
    #[test]
    fn a_failing_file_does_not_stop_the_batch() -> Result<()> {
        let dir = tmp()?;
        let good = dir.path().join("bom.xlsx");
        beneficiaries_workbook(&good)?;
        let unrelated = dir.path().join("outro.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&unrelated).map_err(|source| Error::Write {
            path: unrelated.clone(),
            source,
        })?;
        let store_path = dir.path().join("despesas.xlsx");
        let files = vec![dir.path().join("faltando.xlsx"), unrelated, good.clone(), good];
        let report = run_batch(
            ReportKind::Beneficiaries,
            &files,
            &store_path,
            &BatchOptions::default(),
        );
        let statuses: Vec<&FileStatus> = report.files.iter().map(|f| &f.status).collect();
        assert!(matches!(statuses.first(), Some(FileStatus::Failed { .. })), "missing file");
        assert_eq!(statuses.get(1), Some(&&FileStatus::Incompatible));
        assert_eq!(statuses.get(2), Some(&&FileStatus::Created { rows: 1 }));
        assert!(
            matches!(statuses.get(3), Some(FileStatus::RejectedDuplicate { .. })),
            "same period twice"
        );
        assert!(report.has_failures());
        assert_eq!(report.rows_written(), 1);
        Ok(())
    }
}
