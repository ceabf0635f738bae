use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tour_planner::config::AppConfig;
use tour_planner::maps::{MapsBackend, RetryPolicy, RetryingMaps};
use tour_planner::planner::{
    DEFAULT_MAX_STOPS, DEFAULT_MIN_STAY, ItineraryGenerator, PlannerConfig, TripRequest,
};
use tour_planner::report::render_text;
use tour_planner::web::{AppState, create_router};

#[derive(Parser)]
#[command(name = "tour-planner", version, about = "Plan multi-stop road trips")]
struct Cli {
    /// Google Maps API key (overrides GOOGLE_MAPS_API_KEY).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Serve places from a fixture file instead of calling Google Maps.
    #[arg(long, global = true)]
    mock_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one itinerary and print it.
    Plan(PlanArgs),
    /// Run the web server.
    Serve {
        /// Address to listen on (defaults to TOUR_PLANNER_BIND or 127.0.0.1:3000).
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[derive(Args)]
struct PlanArgs {
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: String,
    #[arg(long)]
    start_date: String,
    #[arg(long)]
    end_date: String,
    /// Comma-separated regions stops must fall within.
    #[arg(long)]
    locations: Option<String>,
    #[arg(long, default_value_t = DEFAULT_MAX_STOPS)]
    max_stops: usize,
    #[arg(long, default_value_t = DEFAULT_MIN_STAY)]
    min_stay: u32,
    /// Print the itinerary as JSON.
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tour_planner=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = AppConfig::from_env()
        .context("reading configuration")?
        .with_overrides(cli.api_key, cli.mock_data);

    let backend = config
        .maps_backend()
        .context("configuring the mapping backend")?;
    info!(backend = backend.name(), "mapping backend ready");

    let maps = RetryingMaps::new(backend, RetryPolicy::default());
    let planner_config = PlannerConfig::default().with_travel_mode(config.travel_mode);

    match cli.command {
        Command::Plan(args) => plan(&maps, &planner_config, args).await,
        Command::Serve { bind } => {
            let bind = bind.unwrap_or(config.bind);
            let state = AppState::new(maps, planner_config);
            let app = create_router(state, &config.static_dir);

            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("binding {bind}"))?;
            info!(bind = %bind, "tour planner listening");
            axum::serve(listener, app).await.context("serving HTTP")?;
            Ok(())
        }
    }
}

async fn plan(
    maps: &RetryingMaps<MapsBackend>,
    config: &PlannerConfig,
    args: PlanArgs,
) -> anyhow::Result<()> {
    let constraints = args
        .locations
        .as_deref()
        .map(|text| text.split(',').map(str::to_string).collect::<Vec<_>>())
        .unwrap_or_default();

    let request = TripRequest::new(args.start, args.end, args.start_date, args.end_date)
        .with_constraints(constraints)
        .with_max_stops(args.max_stops)
        .with_min_stay(args.min_stay);

    let itinerary = ItineraryGenerator::new(maps, config)
        .generate(&request)
        .await
        .context("generating itinerary")?;

    if args.json {
        let json = serde_json::to_string_pretty(&itinerary).context("encoding itinerary")?;
        println!("{json}");
    } else {
        println!("{}", render_text(&itinerary));
    }
    Ok(())
}
