use clap::Parser;
use docfinder::config::Config;
use docfinder::server;
use docfinder::tool::{find_doctors, run_search, FindDoctorsArgs, ToolOutcome, DEFAULT_RADIUS_KM};

/// DocFinder v0.3, nearby doctor search
///
/// Resolves a search origin from explicit coordinates, a city name, or
/// the caller's IP, then lists doctors around it with distance and rating.
///
/// Examples:
///   docfinder dentist --city Bangalore
///   docfinder cardiologist --lat 12.9716 --lng 77.5946 --radius-km 5
///   docfinder --city "New York" --json
///   docfinder --serve --port 8080
#[derive(Parser)]
#[command(name = "docfinder", version, about, long_about = None)]
struct Cli {
    /// Medical specialty (positional). Example: docfinder dentist
    #[arg(index = 1)]
    specialty: Option<String>,

    /// City to search in. Example: --city Bangalore
    #[arg(long)]
    city: Option<String>,

    /// Latitude (-90 to 90). Requires --lng.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180). Requires --lat.
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Search radius in kilometers (the upstream API caps at 50).
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius_km: u32,

    /// Emit the tool outcome as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Run the HTTP server instead of a one-shot search.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    // ── Configuration ───────────────────────────────────────────

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        runtime.block_on(server::start(&cli.host, cli.port, config));
        return;
    }

    // ── Validate coordinates ────────────────────────────────────

    check_coordinates(&cli);

    let args = FindDoctorsArgs {
        specialty: cli.specialty.clone(),
        city: cli.city.clone(),
        lat: cli.lat,
        lng: cli.lng,
        radius_km: cli.radius_km,
    };

    // ── Search ──────────────────────────────────────────────────

    if cli.json {
        // JSON to stdout, nothing else; errors stay inside the outcome.
        let outcome = find_doctors(&config, &args);
        println!("{}", serde_json::to_string_pretty(&outcome).unwrap());
        if matches!(outcome, ToolOutcome::Error { .. }) {
            std::process::exit(1);
        }
        return;
    }

    match run_search(&config, &args) {
        Ok(summary) => {
            // Location banner to stderr, listing to stdout.
            eprintln!("  {}", summary.location.display_line());
            println!("{}", summary.text);
        }
        Err(failure) => {
            eprintln!("Error: {}", failure.message);
            std::process::exit(1);
        }
    }
}

fn check_coordinates(cli: &Cli) {
    match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                eprintln!("Error: Invalid coordinates. Lat: -90..90, Lng: -180..180");
                std::process::exit(1);
            }
        }
        (Some(_), None) | (None, Some(_)) => {
            eprintln!("Error: --lat and --lng must be provided together.");
            std::process::exit(1);
        }
        (None, None) => {}
    }
}
