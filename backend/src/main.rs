//! Backend entry-point: loads settings, validates session configuration and
//! runs the HTTP server.

use actix_web::web;
use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use syndicate_desk::inbound::http::health::HealthState;
use syndicate_desk::server::{BuildMode, ServerConfig, create_server, session_settings};
use syndicate_desk::settings::AppSettings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let data_dir = Utf8PathBuf::from_path_buf(settings.data_dir()).map_err(|path| {
        std::io::Error::other(format!("data directory is not UTF-8: {}", path.display()))
    })?;
    let config = ServerConfig::new(session, settings.bind_addr(), data_dir);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
