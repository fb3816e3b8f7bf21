//! Energy Advisor server binary: wiring and startup.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use energy_advisor::adapters::http::{agent_routes, AgentHandlers};
use energy_advisor::adapters::{
    AiDelegatedScoring, DeterministicScoring, InMemorySessionStore, NominatimGeocoder,
    OpenAiConfig, OpenAiTextGenerator, SummaryClient,
};
use energy_advisor::application::stages::{
    AnalysisStage, CalculationStage, DataCollectionStage, ReportStage,
};
use energy_advisor::application::Orchestrator;
use energy_advisor::config::{AppConfig, ScoringMode};
use energy_advisor::ports::{ScoringStrategy, SessionStore, TextGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_level)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Collaborator adapters
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAiTextGenerator::new(
        OpenAiConfig::new(config.ai.openai_api_key.clone().unwrap_or_default())
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    ));
    let geocoder = Arc::new(NominatimGeocoder::new(
        &config.geo.nominatim_url,
        config.geo.timeout(),
    ));
    let summary = Arc::new(SummaryClient::new(
        &config.geo.summary_url,
        config.geo.timeout(),
    ));

    let scoring: Arc<dyn ScoringStrategy> = match config.ai.scoring {
        ScoringMode::Deterministic => Arc::new(DeterministicScoring::new()),
        ScoringMode::Ai => Arc::new(AiDelegatedScoring::new(generator.clone())),
    };

    // Session store plus its eviction sweep
    let store = Arc::new(InMemorySessionStore::new());
    spawn_eviction_sweep(store.clone(), &config);

    let orchestrator = Arc::new(Orchestrator::new(
        store,
        DataCollectionStage::new(generator.clone(), geocoder, summary),
        AnalysisStage::new(scoring),
        CalculationStage::new(),
        ReportStage::new(generator),
    ));

    let app = Router::new()
        .nest("/api/agent", agent_routes(AgentHandlers::new(orchestrator)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    info!(%addr, "energy advisor listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn spawn_eviction_sweep(store: Arc<InMemorySessionStore>, config: &AppConfig) {
    let ttl_secs = config.session.ttl_secs;
    let sweep_interval = Duration::from_secs(config.session.sweep_interval_secs);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        // The first tick fires immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            store.evict_idle(ttl_secs).await;
        }
    });
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}
