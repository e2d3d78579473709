use clap::Parser;
use std::path::PathBuf;

use city_suggest::config::SuggestConfig;
use city_suggest::suggest::{RankingSession, ScoredCandidate};
use city_suggest::{server, telemetry};

/// City Suggest: fuzzy city-name autocomplete
///
/// Ranks built-in and external city candidates for a partially typed name.
///
/// Examples:
///   city-suggest lon
///   city-suggest "san fran" --explain
///   city-suggest --endpoint http://localhost:5000/api/cities "Portland, Oregon"
///   city-suggest --serve --port 8080
#[derive(Parser)]
#[command(name = "city-suggest", version, about, long_about = None)]
struct Cli {
    /// Query text. Example: city-suggest lon
    #[arg(index = 1)]
    query: Option<String>,

    /// External city-search endpoint (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Offline mode: only use the built-in city list.
    #[arg(long)]
    offline: bool,

    /// Config file (defaults to ~/.city-suggest/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show score, tier and source for each suggestion.
    #[arg(long)]
    explain: bool,

    /// Serve suggestions over HTTP instead of answering one query.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for --serve.
    #[arg(long, short = 'p', default_value_t = 3000)]
    port: u16,

    /// Log level (RUST_LOG takes precedence).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config = load_config(&cli);
    let session = config.build_session();

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: cannot start async runtime: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = runtime.block_on(server::start(&cli.host, cli.port, session)) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let query = match cli.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => q.to_string(),
        None => {
            eprintln!("Error: No query specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  city-suggest lon");
            eprintln!("  city-suggest \"san fran\" --explain");
            eprintln!("  city-suggest --serve --port 8080");
            std::process::exit(1);
        }
    };

    if cli.explain {
        let scored = session.explain(&query);
        eprint!("{}", render_explain(&session, &query, &scored));
        print_json(&scored);
    } else {
        let result = session.suggest(&query);
        for (i, c) in result.cities.iter().enumerate() {
            eprintln!("  {}. {} [{}]", i + 1, c.display, c.country);
        }
        if result.cities.is_empty() {
            eprintln!("  No suggestions for '{}'", query);
        }
        print_json(&result.cities);
    }
}

fn load_config(cli: &Cli) -> SuggestConfig {
    let loaded = match &cli.config {
        Some(path) => SuggestConfig::load_from(path),
        None => SuggestConfig::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default configuration");
        SuggestConfig::default()
    });

    if let Some(ref endpoint) = cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if cli.offline {
        config.offline = true;
    }
    config
}

fn render_explain(session: &RankingSession, query: &str, scored: &[ScoredCandidate]) -> String {
    let mut out = format!("  Top-{} candidates for '{}':\n", scored.len(), query);
    for (i, s) in scored.iter().enumerate() {
        let (_, tier) = session.scorer().score_tiered(&s.candidate.name, query);
        out.push_str(&format!(
            "    {}. {} [{}] score={:.1} tier={} source={}\n",
            i + 1,
            s.candidate.display,
            s.candidate.country,
            s.relevance_score,
            tier,
            s.source,
        ));
    }
    out
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize output: {}", e);
            std::process::exit(1);
        }
    }
}
