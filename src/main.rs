use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use atlas::api::{CountrySource, RestCountriesClient};
use atlas::cli::{self, Command, Context, Outcome};
use atlas::core::config::{self, CliOverrides};
use atlas::core::favorites::{FavoritesStore, FileStore};
use atlas::core::filter::FilterCriteria;
use atlas::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "atlas", version, about = "Terminal encyclopedia of countries")]
struct Args {
    /// Country data API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Favorites storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Keep favorites in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Log level written to atlas.log (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Filters as a query string, e.g. "region=Europe&sort=population-desc"
    #[arg(short, long, global = true)]
    query: Option<String>,

    /// Open the page of this country code on startup
    #[arg(short, long)]
    country: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            storage: args.storage,
            log_level: args.log_level,
        },
    );

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("Atlas starting up against {}", resolved.api_base_url);

    let source: Arc<dyn CountrySource> =
        Arc::new(RestCountriesClient::new(Some(resolved.api_base_url.clone())));
    let favorites = match (&resolved.storage_path, args.ephemeral) {
        (Some(path), false) => {
            let file = FileStore::new(path);
            log::info!("Favorites stored in {}", file.path().display());
            FavoritesStore::new(Arc::new(file))
        }
        _ => {
            log::info!("Favorites kept in memory for this run");
            FavoritesStore::in_memory()
        }
    };
    let criteria = FilterCriteria::from_query(
        args.query.as_deref().unwrap_or(&resolved.default_query),
    );

    match args.command {
        None => tui::run(
            source,
            favorites,
            criteria,
            resolved.ranking_size,
            args.country,
        ),
        Some(command) => {
            let ctx = Context {
                source: source.as_ref(),
                favorites: &favorites,
                criteria,
                ranking_size: resolved.ranking_size,
            };
            let outcome = cli::execute(command, ctx, &mut std::io::stdout().lock()).await?;
            if outcome == Outcome::NotFound {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
