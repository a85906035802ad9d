use crate::{
    error::{Error, Result},
    report::kinds::ReportKind,
};
use std::{
    fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
    process, thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
const RESERVATION_MAGIC: &[u8] = b"RPTMERGE_RESERVED_v1\n";
const STALE_RESERVATION_AGE: Duration = Duration::from_secs(60 * 60);
const MAX_CONFLICT_ATTEMPTS: u32 = 100_000;
const MAX_TEMP_ATTEMPTS: u32 = 1024;
pub fn store_path(store_dir: &Path, kind: ReportKind) -> PathBuf {
    store_dir.join(kind.spec().store_file)
}
/// `<stem>_backup_<today>.xlsx`, or `_1`, `_2`, ... when taken.
pub fn reserve_backup_path(store: &Path, today: &str) -> Result<PathBuf> {
    let parent = store.parent().unwrap_or_else(|| Path::new("."));
    let stem = store
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("store");
    let base = parent.join(format!("{stem}_backup_{today}.xlsx"));
    reserve_nonconflicting_path(&base)
}
pub fn cleanup_reservation_file(path: &Path) {
    let Ok(content) = fs::read(path) else {
        return;
    };
    if content == RESERVATION_MAGIC && fs::remove_file(path).is_err() {
        tracing::debug!(file = %path.display(), "reserva não removida");
    }
}
fn reserve_nonconflicting_path(path: &Path) -> Result<PathBuf> {
    ensure_parent_dir(path)?;
    let mut seq = 0u32;
    loop {
        let candidate = candidate_with_suffix(path, seq);
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut file) => {
                if let Err(e) = file
                    .write_all(RESERVATION_MAGIC)
                    .and_then(|()| file.flush())
                    .and_then(|()| file.sync_all())
                {
                    drop(file);
                    cleanup_reservation_file(&candidate);
                    return Err(Error::io(candidate, e));
                }
                return Ok(candidate);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if try_remove_stale_reservation(&candidate) {
                    continue;
                }
                seq = seq.saturating_add(1);
                if seq > MAX_CONFLICT_ATTEMPTS {
                    return Err(Error::io(
                        path,
                        io::Error::new(ErrorKind::AlreadyExists, "conflitos de nome demais"),
                    ));
                }
            }
            Err(e) => return Err(Error::io(candidate, e)),
        }
    }
}
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
}
fn try_remove_stale_reservation(path: &Path) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    let Ok(elapsed) = meta.modified().and_then(|m| m.elapsed().map_err(io::Error::other)) else {
        return false;
    };
    if elapsed < STALE_RESERVATION_AGE {
        return false;
    }
    let Ok(content) = fs::read(path) else {
        return false;
    };
    content == RESERVATION_MAGIC && fs::remove_file(path).is_ok()
}
fn candidate_with_suffix(path: &Path, seq: u32) -> PathBuf {
    if seq == 0 {
        return path.to_path_buf();
    }
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = path.extension().and_then(|s| s.to_str());
    let file_name = ext.map_or_else(
        || format!("{stem}_{seq}"),
        |ext| format!("{stem}_{seq}.{ext}"),
    );
    parent.join(file_name)
}
/// Hidden sibling of `dest` that keeps the `.xlsx` extension.
pub fn create_unique_temp_path(dest: &Path) -> Result<PathBuf> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("store");
    let pid = process::id();
    for seq in 0..MAX_TEMP_ATTEMPTS {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let candidate = parent.join(format!(".{stem}.tmp_{pid}_{nanos}_{seq}.xlsx"));
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                thread::sleep(Duration::from_micros(50));
            }
            Err(e) => return Err(Error::io(candidate, e)),
        }
    }
    Err(Error::io(
        dest,
        io::Error::new(ErrorKind::AlreadyExists, "caminho temporário indisponível"),
    ))
}
pub fn promote_temp_output(temp: &Path, dest: &Path) -> Result<()> {
    fs::rename(temp, dest).map_err(|e| Error::io(dest, e))?;
    if let Err(e) = fs::File::open(dest).and_then(|file| file.sync_all()) {
        tracing::warn!(file = %dest.display(), error = %e, "sincronização do arquivo falhou");
    }
    Ok(())
}
