use crate::report::kinds::ReportKind;
use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum Error {
    #[error("arquivo não encontrado: {}", .0.display())]
    NotFound(PathBuf),
    #[error("extensão não suportada (use .xls ou .xlsx): {}", .0.display())]
    UnsupportedExtension(PathBuf),
    #[error("arquivo vazio: {}", .0.display())]
    EmptyFile(PathBuf),
    #[error("falha ao abrir a planilha {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("falha ao gravar a planilha {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    #[error("erro de E/S em {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("verificação da planilha salva falhou: {} ({reason})", path.display())]
    Verify { path: PathBuf, reason: String },
    #[error("lote vazio: nenhum registro para gravar")]
    EmptyBatch,
    #[error("lote mistura tipos de relatório ({expected} e {found})")]
    MixedKinds {
        expected: ReportKind,
        found: ReportKind,
    },
    #[error("campo desconhecido para {kind}: {field}")]
    UnknownField { kind: ReportKind, field: String },
    #[error("limite do formato xlsx excedido: {0}")]
    Limits(String),
}
pub type Result<T> = std::result::Result<T, Error>;
impl Error {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
