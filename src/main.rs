use actix_web::{middleware, web, App, HttpServer};
use altgen::config::Settings;
use altgen::server::routes;
use std::io;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::load()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    info!(
        port = settings.port,
        model = %settings.model,
        ollama = %settings.ollama_url,
        "starting alt text server"
    );

    let port = settings.port;
    let data = web::Data::new(settings);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .service(routes::generate_alt_text)
            .service(routes::health)
            .service(routes::ollama_status)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
