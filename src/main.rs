use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use interview_slots::config::{LoggingSettings, Settings};
use interview_slots::core::Matcher;
use interview_slots::models::ErrorResponse;
use interview_slots::routes::{self, matches::AppState};
use interview_slots::services::PostgresClient;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

fn bad_request(error: &str, message: String) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
    .into()
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("JSON payload error on {}: {}", req.path(), err);
    bad_request("invalid_json", format!("Invalid JSON: {}", err))
}

/// Handle query parameter errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Query payload error on {}: {}", req.path(), err);
    bad_request("invalid_query", format!("Invalid query parameters: {}", err))
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Path error on {}: {}", req.path(), err);
    bad_request("invalid_path", format!("Invalid path: {}", err))
}

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting interview slot matching service...");

    let postgres = match PostgresClient::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!(
        "PostgreSQL client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    let matcher = match Matcher::with_chunk_minutes(settings.matching.chunk_minutes) {
        Some(matcher) => matcher,
        None => {
            error!(
                "Invalid matching.chunk_minutes {}: expected a positive number of minutes",
                settings.matching.chunk_minutes
            );
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid matching.chunk_minutes: {}", settings.matching.chunk_minutes),
            ));
        }
    };

    info!("Matcher initialized with chunk length: {} minutes", settings.matching.chunk_minutes);

    let app_state = AppState { postgres, matcher };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
