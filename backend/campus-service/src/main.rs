use actix_web::{web, App, HttpServer};
use anyhow::Context;
use campus_service::{config::Config, logging, routes, state::AppState};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    logging::init_tracing(config.logging.format);

    let bind_addr = config.bind_addr();
    tracing::info!(
        env = %config.app.env,
        email_domain = %config.directory.email_domain,
        %bind_addr,
        "starting campus-service"
    );

    let state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("failed to bind {bind_addr}"))?
    .run()
    .await
    .context("http server terminated")?;

    tracing::info!("campus-service stopped");
    Ok(())
}
