use coala_algo::config::Settings;
use coala_algo::models::{MatchGroupRequest, MatchGroupResponse};
use coala_algo::services::{generate_population, load_request, read_request};
use coala_algo::AlgoError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: coala-algo [REQUEST.json | -] [--print-config]";

fn init_logging(settings: &Settings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn run_match(settings: &Settings, request: MatchGroupRequest) -> MatchGroupResponse {
    let matcher = settings.matcher(request.weights);
    let seed = request.seed.or(settings.matching.seed);
    let desired_size = request.group_size(settings.matching.default_group_size);

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let pool = if request.pool.is_empty() {
        info!(
            size = settings.matching.synthetic_pool_size,
            "request has no pool, generating a synthetic population"
        );
        generate_population(&mut rng, settings.matching.synthetic_pool_size)
    } else {
        request.pool
    };

    let result = matcher.match_group(
        &request.me,
        &pool,
        desired_size,
        request.activity.as_deref(),
        request.gender_mode,
        &mut rng,
    );

    info!(
        group_size = result.group.len(),
        requested = desired_size,
        eligible = result.eligible_candidates,
        fallback = result.used_activity_fallback,
        filled = result.filled_from_pool,
        "group assembled"
    );

    MatchGroupResponse {
        requested_size: desired_size,
        shortfall: desired_size.saturating_sub(result.group.len()),
        eligible_candidates: result.eligible_candidates,
        used_activity_fallback: result.used_activity_fallback,
        filled_from_pool: result.filled_from_pool,
        group: result.group,
    }
}

fn run(settings: &Settings, args: &[String]) -> Result<(), AlgoError> {
    if args.iter().any(|a| a == "--print-config") {
        println!("{}", settings.to_toml()?);
        return Ok(());
    }

    let request = match args.first().map(String::as_str) {
        None | Some("-") => read_request(std::io::stdin().lock())?,
        Some(path) => load_request(path)?,
    };

    let response = run_match(settings, request);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&settings);
    info!("Starting Coala group matcher...");

    if let Err(e) = run(&settings, &args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
