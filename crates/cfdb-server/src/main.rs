use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;

use cfdb_core::{HostingSite, PublishConfig};
use cfdb_publish::GitHubContentsPublisher;
use cfdb_server::{configure, multipart_config, UploadService};

#[derive(Parser)]
#[command(name = "cfdb-server", version, about = "Creative File Database upload service")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    /// Largest accepted multipart body, in MiB.
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 50)]
    max_upload_mb: usize,
    /// Reject uploads that do not include a logo.
    #[arg(long, env = "REQUIRE_LOGO")]
    require_logo: bool,
}

fn main() {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        exit_with_error(&message);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = PublishConfig::from_env().map_err(|err| format!("ERROR: {}", err))?;
    let publisher = GitHubContentsPublisher::new(&config).map_err(|err| err.to_string())?;
    let service = web::Data::new(
        UploadService::new(publisher, HostingSite::from(&config)).require_logo(cli.require_logo),
    );
    log::info!("publishing uploads to {}", config.repository());

    // The blocking HTTP client inside the service is dropped here, outside
    // the async runtime, once the server has stopped.
    let shared = service.clone();
    actix_web::rt::System::new()
        .block_on(serve(cli, shared))
        .map_err(|err| format!("server error: {}", err))?;
    drop(service);
    Ok(())
}

async fn serve(
    cli: Cli,
    service: web::Data<UploadService<GitHubContentsPublisher>>,
) -> std::io::Result<()> {
    let limit = cli.max_upload_mb.saturating_mul(1024 * 1024);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(multipart_config(limit))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(configure::<GitHubContentsPublisher>)
    })
    .bind((cli.host.as_str(), cli.port))?;
    log::info!("server running on {}:{}", cli.host, cli.port);
    server.run().await
}

fn exit_with_error(message: &str) {
    log::error!("{}", message);
    std::process::exit(1);
}
