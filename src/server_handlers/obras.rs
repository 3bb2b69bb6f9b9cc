use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::PainelConfig;
use crate::excel::{ler_indicadores, ler_obra};
use crate::logos::{achar_logo, nome_seguro, tipo_mime};
use crate::painel::{TopN, montar_one_page, montar_painel};
use super::{pasta_atual, resposta_erro};

#[derive(Debug, Deserialize)]
pub struct PainelQuery {
    pub top: Option<String>,
}

/// GET /obras
pub async fn obras_handler(cfg: web::Data<PainelConfig>) -> impl Responder {
    let pasta = match pasta_atual(&cfg).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(json!({
        "arquivo": pasta.rotulo(),
        "obras": pasta.obras(),
    }))
}

/// GET /obras/{obra}/painel?top=5|10|todas
pub async fn painel_handler(
    cfg: web::Data<PainelConfig>,
    obra: web::Path<String>,
    query: web::Query<PainelQuery>,
) -> impl Responder {
    let top = match query.top.as_deref() {
        None => cfg.top_padrao,
        Some(t) => match t.parse::<TopN>() {
            Ok(t) => t,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": e})),
        },
    };

    let pasta = match pasta_atual(&cfg).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let grade = match pasta.grade(&obra) {
        Ok(g) => g,
        Err(e) => return resposta_erro(&e),
    };

    let blocos = ler_obra(grade, cfg.linhas_vazias_fim);
    debug!(obra = %obra, top = ?top, "montando painel");
    HttpResponse::Ok().json(montar_painel(&obra, &pasta.rotulo(), &blocos, top))
}

/// GET /obras/{obra}/blocos: blocos como lidos, sem cálculo
pub async fn blocos_handler(cfg: web::Data<PainelConfig>, obra: web::Path<String>) -> impl Responder {
    let pasta = match pasta_atual(&cfg).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match pasta.grade(&obra) {
        Ok(grade) => HttpResponse::Ok().json(ler_obra(grade, cfg.linhas_vazias_fim)),
        Err(e) => resposta_erro(&e),
    }
}

/// GET /obras/{obra}/indicadores (aba "one page")
pub async fn indicadores_handler(cfg: web::Data<PainelConfig>, obra: web::Path<String>) -> impl Responder {
    let pasta = match pasta_atual(&cfg).await {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match pasta.grade(&obra) {
        Ok(grade) => {
            let indicadores = ler_indicadores(grade);
            let one_page = montar_one_page(&obra, &indicadores);
            HttpResponse::Ok().json(json!({"indicadores": indicadores, "one_page": one_page}))
        }
        Err(e) => resposta_erro(&e),
    }
}

/// GET /obras/{obra}/logo
pub async fn logo_handler(cfg: web::Data<PainelConfig>, obra: web::Path<String>) -> impl Responder {
    if !nome_seguro(&obra) {
        return HttpResponse::BadRequest().json(json!({"error": format!("nome de obra inválido '{}'", obra)}));
    }
    let Some(path) = achar_logo(&obra, &cfg.logos_dir) else {
        return HttpResponse::NotFound().json(json!({"error": format!("sem logo para '{}'", obra)}));
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => HttpResponse::Ok().content_type(tipo_mime(&path)).body(bytes),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("falha ao ler logo: {}", e)})),
    }
}
