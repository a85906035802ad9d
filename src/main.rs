use clap::Parser;
use rptmerge::{batch, cli::Args, config::Settings, error::Result, summary};
use std::{io, process::ExitCode};
use tracing_subscriber::EnvFilter;
const DEFAULT_LOG_FILTER: &str = "rptmerge=info";
fn main() -> ExitCode {
    let args = Args::parse();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();
    if args.list_kinds {
        summary::print_kinds();
        return ExitCode::SUCCESS;
    }
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[erro] {e}");
            ExitCode::FAILURE
        }
    }
}
fn run(args: &Args) -> Result<ExitCode> {
    let Some(kind) = args.kind else {
        eprintln!("[erro] informe o tipo de relatório (--kind)");
        return Ok(ExitCode::FAILURE);
    };
    let settings = Settings::from_env();
    let store = args.store_path(kind, &settings);
    let files = batch::collect_inputs(&args.inputs, args.prefix.as_deref())?;
    if files.is_empty() {
        eprintln!("[erro] nenhum arquivo de entrada encontrado");
        return Ok(ExitCode::FAILURE);
    }
    let report = batch::run_batch(kind, &files, &store, &args.batch_options(settings));
    summary::print_summary(&report);
    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
