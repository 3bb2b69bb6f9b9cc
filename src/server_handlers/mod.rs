pub mod obras;
pub mod docs;

pub use obras::*;
pub use docs::*;

use actix_web::{HttpResponse, web};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::PainelConfig;
use crate::error::PainelError;
use crate::excel::{Pasta, abrir_pasta_cached};

/// Resposta JSON `{"error": ...}` com o status adequado ao erro
pub fn resposta_erro(e: &PainelError) -> HttpResponse {
    let corpo = json!({"error": e.to_string()});
    match e {
        PainelError::ObraNaoEncontrada(_) => HttpResponse::NotFound().json(corpo),
        PainelError::PlanilhaNaoEncontrada { .. } | PainelError::Planilha(_) | PainelError::Io(_) => {
            HttpResponse::ServiceUnavailable().json(corpo)
        }
        PainelError::Config(_) | PainelError::Json(_) => HttpResponse::InternalServerError().json(corpo),
    }
}

/// Pasta atual (do cache, relida se o arquivo mudou). A leitura do disco
/// roda no pool de bloqueio para não travar o worker.
pub(crate) async fn pasta_atual(cfg: &web::Data<PainelConfig>) -> Result<Arc<Pasta>, HttpResponse> {
    let cfg = cfg.clone();
    let lida = web::block(move || cfg.caminho_planilha().and_then(|p| abrir_pasta_cached(&p)))
        .await
        .map_err(|e| {
            error!(erro = %e, "leitura da planilha interrompida");
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        })?;
    lida.map_err(|e| {
        warn!(erro = %e, "planilha indisponível");
        resposta_erro(&e)
    })
}
