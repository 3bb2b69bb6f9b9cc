use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use tracing::info;

use crate::config::PainelConfig;
use crate::server_handlers::{
    blocos_handler, help_handler, indicadores_handler, logo_handler, obras_handler, painel_handler,
};

/// Rotas da API; usado pelo servidor e pelos testes
pub fn configurar_rotas(cfg: &mut web::ServiceConfig) {
    cfg.route("/obras", web::get().to(obras_handler))
        .route("/obras/{obra}/painel", web::get().to(painel_handler))
        .route("/obras/{obra}/blocos", web::get().to(blocos_handler))
        .route("/obras/{obra}/indicadores", web::get().to(indicadores_handler))
        .route("/obras/{obra}/logo", web::get().to(logo_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: PainelConfig) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let dados = web::Data::new(config);
    info!(bind = %bind, "iniciando servidor em http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(dados.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configurar_rotas)
    })
    .bind(bind.as_str())?
    .run()
    .await
}
