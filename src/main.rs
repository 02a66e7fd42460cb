use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use estate_iq::catalog::ListingCatalog;
use estate_iq::config::AppConfig;
use estate_iq::error::AppError;
use estate_iq::search::SearchCriteria;
use estate_iq::telemetry;
use estate_iq::valuation::{api_router, ValuationRequest, ValuationService};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "RealEstate IQ",
    about = "Run the heuristic valuation service and tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Produce a valuation estimate for a target property
    Estimate(EstimateArgs),
    /// Browse the listing catalog
    Search(SearchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// Target city (canonical comparable key)
    #[arg(long)]
    city: String,
    /// Area in m²
    #[arg(long)]
    m2: f64,
    /// Floor level (0 = ground)
    #[arg(long, default_value_t = 0)]
    level: i32,
    /// Year built
    #[arg(long)]
    built: i32,
    #[arg(long, default_value = "In Good Condition")]
    condition: String,
    #[arg(long, default_value = "Apartment")]
    property_type: String,
    #[arg(long, default_value = "Central Heating")]
    heating: String,
    #[arg(long, default_value = "Unfurnished")]
    equipment: String,
    #[arg(long, default_value = "East")]
    orientation: String,
    /// Amenity flag, repeatable (e.g. --amenity Balcony --amenity Garage)
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Valuation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    valuation_date: Option<NaiveDate>,
    /// CSV listing catalog replacing the built-in seed data
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Pin the confidence sequence for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    city: Option<String>,
    /// Case-insensitive substring matched against listing titles
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    min_m2: Option<f64>,
    #[arg(long)]
    max_m2: Option<f64>,
    /// List only below-market deals instead of applying the filters
    #[arg(long)]
    undervalued: bool,
    /// CSV listing catalog replacing the built-in seed data
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Search(args) => run_search(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ListingCatalog, AppError> {
    match path {
        Some(path) => Ok(ListingCatalog::from_csv_path(path)?),
        None => Ok(ListingCatalog::seed()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(load_catalog(config.engine.catalog_csv.as_ref())?);
    let service = Arc::new(ValuationService::new(
        catalog.clone(),
        config.engine.valuation_config(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(api_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        listings = catalog.len(),
        "valuation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(args.catalog.as_ref())?);

    let valuation_config = config.engine.valuation_config();
    let service = match args.seed {
        Some(seed) => ValuationService::seeded(catalog, valuation_config, seed),
        None => ValuationService::new(catalog, valuation_config),
    };

    let request = ValuationRequest {
        city: args.city,
        m2: args.m2,
        level: args.level,
        built: args.built,
        condition: args.condition,
        property_type: args.property_type,
        heating: args.heating,
        equipment: args.equipment,
        orientation: args.orientation,
        amenities: args.amenities,
        coordinates: None,
    };

    let valuation_date = args
        .valuation_date
        .unwrap_or_else(|| Local::now().date_naive());
    let view = service.valuate(request, valuation_date)?;

    println!("Valuation estimate ({valuation_date})");
    println!(
        "City: {} ({} comparable listing(s))",
        view.city, view.comparables
    );
    println!(
        "Estimated price: {:.0} BAM ({:.0} BAM/m²)",
        view.estimated_price, view.estimated_price_per_m2
    );
    println!("Confidence: {}%", view.confidence);
    println!("Rating: {}", view.rating);

    Ok(())
}

fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_ref())?;

    let (heading, results) = if args.undervalued {
        (
            "Undervalued listings",
            estate_iq::search::undervalued_listings(catalog.listings()),
        )
    } else {
        let criteria = SearchCriteria {
            query: args.query,
            city: args.city,
            min_m2: args.min_m2,
            max_m2: args.max_m2,
        };
        (
            "Matching listings",
            estate_iq::search::search_listings(catalog.listings(), &criteria),
        )
    };

    if results.is_empty() {
        println!("{heading}: none");
        return Ok(());
    }

    println!("{heading}");
    for listing in &results {
        println!(
            "- {} | {} | {} m² | floor {} | built {} | {:.0} BAM ({:.0} BAM/m²)",
            listing.id,
            listing.title,
            listing.m2,
            listing.floor,
            listing.built,
            listing.price,
            listing.price_per_m2
        );
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
