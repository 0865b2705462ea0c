use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use natref::config::{CONFIG_FILE, Config};
use natref::deeplink;
use natref::fetch::fetch_all;
use natref::init::init_config;
use natref::loader::{HttpTransport, load_index};
use natref::natives::{ALL, Criteria, HASH_NAME, NativeIndex};
use natref::signature::Language;
use natref::state::AppState;
use natref::view::{self, ViewOptions};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "natref")]
#[command(about = "Browse and search native API reference data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./natref.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List natives matching a query
    Search {
        /// Free-text query (empty matches everything)
        query: Option<String>,
        /// API set to show, or "all"
        #[arg(long, default_value = ALL)]
        apiset: String,
        /// Namespace to show, or "all"
        #[arg(long, default_value = ALL)]
        namespace: String,
        /// Print matches as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one native by key or permalink
    Show {
        /// Key (a 0x... hash or dataset key) or a permalink address
        target: String,
        /// Signature language: c, lua, js or cs
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print the permalink for a native
    Link {
        /// Hash of the native
        key: String,
    },
    /// List all namespaces
    Namespaces,
    /// Browse interactively
    Interactive {
        /// Start from this permalink
        #[arg(long)]
        open: Option<String>,
    },
    /// Download the remote datasets into their local paths
    Fetch,
    /// Initialize a new natref.toml configuration file
    Init {
        /// Overwrite existing natref.toml if present
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "natref=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(config: &Config) -> Result<NativeIndex, String> {
    let transport = HttpTransport::new().map_err(|e| e.to_string())?;
    load_index(&transport, &config.datasets).map_err(|e| format!("Failed to load natives: {}", e))
}

fn view_options(config: &Config, lang: Option<&str>) -> Result<ViewOptions, String> {
    let language = match lang {
        Some(tag) => tag.parse::<Language>()?,
        None => Language::from_tag(&config.language),
    };
    Ok(ViewOptions {
        language,
        theme: config.theme.clone(),
        list_limit: config.list_limit,
    })
}

fn new_state(config: &Config, index: NativeIndex) -> Result<AppState, String> {
    let location = url::Url::parse(&config.permalink_base)
        .map_err(|e| format!("Invalid permalink_base '{}': {}", config.permalink_base, e))?;
    Ok(AppState::new(
        index,
        location,
        Duration::from_millis(config.debounce_ms),
    ))
}

fn search(
    config: &Config,
    query: &str,
    apiset: &str,
    namespace: &str,
    json: bool,
) -> Result<(), String> {
    let index = load(config)?;
    let criteria = Criteria::new(query, apiset, namespace);
    let hits = index.filter(&criteria);

    if json {
        let out = serde_json::to_string_pretty(&hits).map_err(|e| e.to_string())?;
        println!("{}", out);
    } else {
        view::print_list(&hits, config.list_limit);
    }
    Ok(())
}

fn show(config: &Config, target: &str, lang: Option<&str>) -> Result<(), String> {
    let options = view_options(config, lang)?;
    let key = if target.contains("://") {
        match deeplink::decode_str(target).map_err(|e| e.to_string())? {
            Some(key) => key,
            None => return Err(format!("'{}' does not select a native", target)),
        }
    } else {
        target.to_string()
    };

    let mut state = new_state(config, load(config)?)?;
    state.select(&key);
    view::print_selection(&state, &options);
    Ok(())
}

fn link(config: &Config, key: &str) -> Result<(), String> {
    if !HASH_NAME.is_match(key) {
        return Err(format!("'{}' is not a 0x... hash and has no permalink", key));
    }
    let url = deeplink::permalink(&config.permalink_base, key).map_err(|e| e.to_string())?;
    println!("{}", url);
    Ok(())
}

fn interactive(config: &Config, open: Option<&str>) -> Result<(), String> {
    let mut options = view_options(config, None)?;
    let mut state = new_state(config, load(config)?)?;

    if let Some(address) = open {
        if let Some(key) = deeplink::decode_str(address).map_err(|e| e.to_string())? {
            state.select(&key);
        }
    }

    view::interactive(&mut state, &mut options)
}

fn fetch(config: &Config) -> Result<(), String> {
    let transport = HttpTransport::new().map_err(|e| e.to_string())?;
    let fetched = fetch_all(&transport, &config.datasets).map_err(|e| e.to_string())?;

    for item in fetched {
        println!(
            "  {} {} → {} ({} bytes, sha256 {})",
            "✓".green(),
            item.dataset.green(),
            item.path.display(),
            item.bytes,
            &item.sha256[..12]
        );
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref());

    let result = match cli.command {
        Commands::Search {
            query,
            apiset,
            namespace,
            json,
        } => search(
            &config,
            query.as_deref().unwrap_or_default(),
            &apiset,
            &namespace,
            json,
        ),
        Commands::Show { target, lang } => show(&config, &target, lang.as_deref()),
        Commands::Link { key } => link(&config, &key),
        Commands::Namespaces => load(&config).map(|index| view::print_namespaces(index.namespaces())),
        Commands::Interactive { open } => interactive(&config, open.as_deref()),
        Commands::Fetch => fetch(&config),
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
            init_config(&path, force)
        }
    };

    if let Err(e) = result {
        eprintln!("\n{} {}", "❌".red(), e.red());
        std::process::exit(1);
    }
}
