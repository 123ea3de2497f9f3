use actix_web::{web, App, HttpServer};
use backend::config::db::database_url;
use backend::db::connect_db;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::app_state::AppState;
use backend::telemetry;
use migration::{Migrator, MigratorTrait};
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via env_file or docker run --env-file
    // - Local dev: source env files manually (set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let app_state = match database_url() {
        Some(url) => {
            let db = match connect_db(&url).await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("Failed to connect to database: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = Migrator::up(&db, None).await {
                eprintln!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
            info!("database connected, migrations applied");
            AppState::new(db)
        }
        None => {
            warn!("DATABASE_URL not set; running memory-only, nothing will be persisted");
            AppState::without_db()
        }
    };

    info!(%host, port, "starting Mock Trial backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
