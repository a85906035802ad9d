use crate::{
    batch::BatchOptions, config::Settings, path_policy, report::kinds::ReportKind,
    store::{MergeOptions, SaveMode},
};
use clap::Parser;
use std::path::PathBuf;
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rptmerge",
    version,
    about = "Extrai relatórios de planos de saúde (.xls/.xlsx) e consolida cada tipo em uma base xlsx sem duplicar competências."
)]
pub struct Args {
    /// Tipo de relatório
    #[arg(short, long, value_enum, required_unless_present = "list_kinds")]
    pub kind: Option<ReportKind>,
    /// Arquivos (.xls/.xlsx) ou pastas; pastas são lidas em ordem natural
    #[arg(value_name = "INPUT", required_unless_present = "list_kinds")]
    pub inputs: Vec<PathBuf>,
    /// Caminho explícito da base (padrão: <store-dir>/<arquivo do tipo>)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,
    /// Pasta das bases (padrão: RPTMERGE_STORE_DIR ou "databases")
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
    /// Só arquivos cujo nome começa com TEXT (sem diferenciar maiúsculas) nas pastas
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,
    /// Extrai e verifica duplicidade sem gravar nada
    #[arg(long, conflicts_with = "fast_save")]
    pub dry_run: bool,
    /// Não reabre a base salva para verificação
    #[arg(long)]
    pub fast_save: bool,
    /// Copia a base existente para <nome>_backup_<AAAA-MM-DD>.xlsx antes de regravar
    #[arg(long)]
    pub backup: bool,
    /// Processa arquivos reprovados na verificação estrutural
    #[arg(long)]
    pub force: bool,
    /// Lista os tipos, nomes de relatório e arquivos de base
    #[arg(long)]
    pub list_kinds: bool,
}
impl Args {
    pub const fn save_mode(&self) -> SaveMode {
        if self.dry_run {
            SaveMode::DryRun
        } else if self.fast_save {
            SaveMode::Fast
        } else {
            SaveMode::Verify
        }
    }
    pub fn store_path(&self, kind: ReportKind, settings: &Settings) -> PathBuf {
        self.store.clone().unwrap_or_else(|| {
            let dir = self.store_dir.as_deref().unwrap_or(&settings.store_dir);
            path_policy::store_path(dir, kind)
        })
    }
    pub fn batch_options(&self, settings: Settings) -> BatchOptions {
        BatchOptions {
            merge: MergeOptions {
                save_mode: self.save_mode(),
                backup: self.backup,
            },
            force: self.force,
            settings,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    #[test]
    fn kinds_accept_portuguese_names_and_english_aliases() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["rptmerge", "-k", "sinistralidade", "a.xlsx"])?;
        assert_eq!(args.kind, Some(ReportKind::LossRatio));
        let args = Args::try_parse_from(["rptmerge", "--kind", "diagnoses", "a.xlsx", "pasta"])?;
        assert_eq!(args.kind, Some(ReportKind::Diagnoses));
        assert_eq!(args.inputs.len(), 2, "files and folders");
        Ok(())
    }
    #[test]
    fn save_mode_follows_flags() -> Result<(), clap::Error> {
        let base = ["rptmerge", "-k", "exames", "a.xlsx"];
        let mode = |extra: &[&str]| {
            Args::try_parse_from(base.iter().chain(extra)).map(|a| a.save_mode())
        };
        assert_eq!(mode(&[])?, SaveMode::Verify);
        assert_eq!(mode(&["--fast-save"])?, SaveMode::Fast);
        assert_eq!(mode(&["--dry-run"])?, SaveMode::DryRun);
        assert!(mode(&["--dry-run", "--fast-save"]).is_err(), "conflicting flags");
        Ok(())
    }
    #[test]
    fn kind_and_inputs_are_required_unless_listing() -> Result<(), clap::Error> {
        assert!(Args::try_parse_from(["rptmerge", "a.xlsx"]).is_err(), "no kind");
        assert!(Args::try_parse_from(["rptmerge", "-k", "exames"]).is_err(), "no input");
        let args = Args::try_parse_from(["rptmerge", "--list-kinds"])?;
        assert!(args.list_kinds);
        Ok(())
    }
    #[test]
    fn store_path_prefers_explicit_then_dir_then_settings() -> Result<(), clap::Error> {
        let settings = Settings::default();
        let kind = ReportKind::Providers;
        let args = Args::try_parse_from(["rptmerge", "-k", "prestadores", "a.xlsx"])?;
        assert_eq!(
            args.store_path(kind, &settings),
            Path::new("databases").join("prestadores.xlsx")
        );
        let args = Args::try_parse_from([
            "rptmerge", "-k", "prestadores", "--store-dir", "saida", "a.xlsx",
        ])?;
        assert_eq!(args.store_path(kind, &settings), Path::new("saida").join("prestadores.xlsx"));
        let args = Args::try_parse_from([
            "rptmerge", "-k", "prestadores", "--store", "x/base.xlsx", "--store-dir", "saida", "a.xlsx",
        ])?;
        assert_eq!(args.store_path(kind, &settings), Path::new("x/base.xlsx"));
        Ok(())
    }
}
