// --- Painel de Obras - arquivo principal ---

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use painel_obras::excel::{abrir_pasta, ler_obra};
use painel_obras::painel::{TopN, montar_painel};
use painel_obras::{PainelConfig, logging, run_server};

#[derive(Parser)]
#[command(name = "painel-obras", version, about = "Painel de obras a partir da planilha de acompanhamento")]
struct Cli {
    /// Arquivo de configuração (padrão: painel.toml, se existir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Caminho da planilha (sobrescreve a configuração)
    #[arg(short, long, global = true, env = "PAINEL_PLANILHA")]
    planilha: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sobe a API HTTP
    Serve {
        /// Endereço (ex. 0.0.0.0:8080)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Lista as obras da planilha
    Obras,
    /// Imprime o painel de uma obra em JSON
    Painel {
        obra: String,
        /// 5, 10 ou todas
        #[arg(short, long)]
        top: Option<TopN>,
    },
}

fn listar_obras(cfg: &PainelConfig) -> painel_obras::Result<()> {
    let pasta = abrir_pasta(cfg.caminho_planilha()?)?;
    for obra in pasta.obras() {
        println!("{}", obra);
    }
    Ok(())
}

fn imprimir_painel(cfg: &PainelConfig, obra: &str, top: Option<TopN>) -> painel_obras::Result<()> {
    let pasta = abrir_pasta(cfg.caminho_planilha()?)?;
    let blocos = ler_obra(pasta.grade(obra)?, cfg.linhas_vazias_fim);
    let painel = montar_painel(obra, &pasta.rotulo(), &blocos, top.unwrap_or(cfg.top_padrao));
    println!("{}", serde_json::to_string_pretty(&painel)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let mut cfg = match PainelConfig::carregar(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!(erro = %e, "configuração inválida");
            return ExitCode::FAILURE;
        }
    };
    if let Some(p) = cli.planilha {
        cfg.planilha = Some(p);
    }

    match cli.command {
        Command::Serve { bind } => {
            if let Some(b) = bind {
                cfg.bind = b;
            }
            match run_server(cfg).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(erro = %e, "servidor encerrado com erro");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Obras => finalizar(listar_obras(&cfg)),
        Command::Painel { obra, top } => finalizar(imprimir_painel(&cfg, &obra, top)),
    }
}

fn finalizar(res: painel_obras::Result<()>) -> ExitCode {
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(erro = %e, "falha");
            ExitCode::FAILURE
        }
    }
}
