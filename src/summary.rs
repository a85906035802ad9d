use crate::{
    batch::{BatchReport, FileStatus},
    report::kinds::ReportKind,
};
pub fn print_summary(report: &BatchReport) {
    let save_mode = report.options.merge.save_mode;
    println!("\n==== Resumo da consolidação ====");
    println!("- Tipo: {} ({})", report.kind, report.kind.spec().report_name);
    println!("- Base: {}", report.store.display());
    println!("- Arquivos processados: {}", report.files.len());
    for (i, file) in report.files.iter().enumerate() {
        println!(
            "  {}. {} | {} registro(s) | {}",
            i + 1,
            file.path.display(),
            file.records,
            status_label(&file.status)
        );
        if let Some(backup) = &file.backup {
            println!("     cópia de segurança: {}", backup.display());
        }
    }
    println!("- Linhas gravadas: {}", report.rows_written());
    println!(
        "- Duplicados rejeitados: {}",
        report.count(|s| matches!(s, FileStatus::RejectedDuplicate { .. }))
    );
    println!(
        "- Sem registros: {} | Incompatíveis: {} | Falhas: {}",
        report.count(|s| matches!(s, FileStatus::NoRecords)),
        report.count(|s| matches!(s, FileStatus::Incompatible)),
        report.count(|s| matches!(s, FileStatus::Failed { .. }))
    );
    if save_mode.is_dry_run() {
        println!("- Saída: (dry-run) nenhum arquivo gravado");
    } else if save_mode.verify_saved_file() {
        println!("- Verificação da gravação: ativa (padrão)");
    } else {
        println!("- Verificação da gravação: omitida (--fast-save)");
    }
    println!("================================\n");
}
pub fn status_label(status: &FileStatus) -> String {
    match status {
        FileStatus::Created { rows } => format!("base criada com {rows} linha(s)"),
        FileStatus::Appended { rows } => format!("{rows} linha(s) anexada(s)"),
        FileStatus::RejectedDuplicate { contract, period } => {
            format!("rejeitado: contrato {contract} / período {period} já existe na base")
        }
        FileStatus::NoRecords => "nenhum registro encontrado".to_owned(),
        FileStatus::Incompatible => "arquivo incompatível com o tipo (use --force)".to_owned(),
        FileStatus::Failed { message } => format!("falha: {message}"),
    }
}
pub fn print_kinds() {
    println!("{:<16} {:<32} BASE", "TIPO", "RELATÓRIO");
    for kind in ReportKind::ALL {
        let spec = kind.spec();
        println!("{:<16} {:<32} {}", kind.slug(), spec.report_name, spec.store_file);
    }
}
