use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API do painel de obras. Lê a planilha (uma aba por obra) e devolve KPIs, séries mensais, Curva S e rankings de acréscimos/economias.",
        "endpoints": {
            "GET /obras": "arquivo carregado e lista de obras (abas LEIA-ME/README ignoradas)",
            "GET /obras/{obra}/painel?top=5|10|todas": "painel completo; 'top' limita as tabelas de acréscimos e economias",
            "GET /obras/{obra}/blocos": "blocos brutos: resumo, índice, financeiro, prazo, acréscimos, economias",
            "GET /obras/{obra}/indicadores": "indicadores chave/valor da aba one page",
            "GET /obras/{obra}/logo": "imagem da obra em logos_dir (png, jpg, jpeg, webp)",
        },
        "example": "/obras/OBRA%20A/painel?top=10",
        "note": "A planilha é relida automaticamente quando o arquivo muda; blocos ausentes aparecem vazios."
    });

    HttpResponse::Ok().json(help)
}
