use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use mentor_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("{}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    let state = AppState::new(config).map_err(|e| std::io::Error::other(e.to_string()))?;

    let document_path = state.config.document_path.clone();
    match state.document_service.get_document(&document_path).await {
        Some(document) => log::info!(
            "Document {} ready ({} pages)",
            document_path.display(),
            document.page_count
        ),
        None => log::warn!(
            "Document {} is not available yet; chat requests will retry loading it",
            document_path.display()
        ),
    }

    let host = state.config.web_server_host.clone();
    let port = state.config.web_server_port;
    log::info!("starting HTTP server on {}:{}", host, port);

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
