use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use contact_list_cleaner::core::Processor;
use contact_list_cleaner::gui::PresetPicker;
use contact_list_cleaner::models::Config;

/// Limpa uma lista de contatos: normaliza os telefones e remove quem está
/// na Blocklist ou no Não Perturbe.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Planilha principal (xlsx/xls/csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Arquivo da Blocklist (telefones na segunda coluna)
    #[arg(short, long)]
    blocklist: Option<PathBuf>,

    /// Arquivo do Não Perturbe (telefones na segunda coluna)
    #[arg(short, long)]
    do_not_disturb: Option<PathBuf>,

    /// Destino do arquivo final (.xlsx ou .csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuração em JSON; os argumentos acima têm prioridade
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Não abre diálogos; caminho ausente encerra a execução
    #[arg(long)]
    no_dialog: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if self.input.is_some() {
            config.input = self.input;
        }
        if self.blocklist.is_some() {
            config.blocklist = self.blocklist;
        }
        if self.do_not_disturb.is_some() {
            config.do_not_disturb = self.do_not_disturb;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        if self.no_dialog {
            config.use_dialogs = false;
        }

        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut picker = PresetPicker::from_config(&config);
    let summary = Processor::new(config).run(&mut picker);

    if let Some(report) = &summary.report {
        tracing::info!(
            "Linhas restantes: {} de {} ({} removidas)",
            report.remaining_rows,
            report.loaded_rows,
            report.total_removed()
        );
    }
    match summary.save.saved_path() {
        Some(path) => tracing::info!("Arquivo final: {}", path.display()),
        None => tracing::warn!("Nenhum arquivo de dados foi gravado."),
    }
    if summary.log_written {
        tracing::info!("Log: {}", summary.log_path.display());
    }

    match summary.error {
        None => ExitCode::SUCCESS,
        Some(e) if e.is_cancellation() => ExitCode::from(2),
        Some(_) => ExitCode::FAILURE,
    }
}
