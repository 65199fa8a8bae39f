use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use doctor_recommender::config::{LogFormat, LoggingSettings, Settings};
use doctor_recommender::core::{KeywordClassifier, RecommendationEngine};
use doctor_recommender::models::DoctorTable;
use doctor_recommender::routes::{self, recommend::AppState};
use doctor_recommender::services::NominatimGeocoder;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// LOG_LEVEL / LOG_FORMAT (and RUST_LOG) take precedence over the config file
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT")
        .map(|name| LogFormat::from_name(&name))
        .unwrap_or_else(|_| logging.log_format());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with_target(false)
        .with_level(true);

    match log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_logging(&settings.logging);

    info!("Starting doctor recommendation service...");
    info!("Configuration loaded successfully");

    // Loaded once; shared read-only by every worker
    let table = DoctorTable::load_csv(&settings.dataset.path).map_err(|e| {
        error!("Failed to load doctor dataset from {}: {}", settings.dataset.path, e);
        std::io::Error::other(format!("Dataset error: {}", e))
    })?;

    info!("Doctor table loaded ({} doctors)", table.len());

    let classifier = KeywordClassifier::new(settings.classifier.default_label.clone());
    let tiers = settings.radius_tiers();

    info!("Engine initialized with radius tiers {:?} km", tiers.as_slice());

    let engine = Arc::new(RecommendationEngine::new(
        Arc::new(table),
        settings.specialty_resolver(),
        tiers,
        Arc::new(classifier),
    ));

    let geocoder = Arc::new(NominatimGeocoder::from_settings(&settings.geocoder).map_err(|e| {
        error!("Failed to initialize geocoder: {}", e);
        std::io::Error::other(format!("Geocoder error: {}", e))
    })?);

    info!("Geocoder initialized ({})", settings.geocoder.endpoint);

    let app_state = AppState { engine, geocoder };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
