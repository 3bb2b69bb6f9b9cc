// Biblioteca raiz do crate `painel_obras`.
// Leitura da planilha de obras (blocos localizados por cabeçalho), cálculo
// do painel e a API HTTP que o expõe.
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod logos;
pub mod models;
pub mod painel;
pub mod server;
pub mod server_handlers;

pub use config::PainelConfig;
pub use error::{PainelError, Result};
/// Executa o servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
