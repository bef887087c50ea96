//! # Bookmark Menu CLI (`bkm`)
//!
//! The `bkm` binary operates a persisted bookmark menu: initialize the
//! store, reconcile the menu against a bookmark export for a keyword,
//! inspect entries, submit manual orderings, and propagate favicons.
//!
//! ## Usage
//!
//! ```bash
//! bkm --config ./config/bkm.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bkm init` | Create the SQLite store and its schema (idempotent) |
//! | `bkm status` | Show store health, configured source, and item count |
//! | `bkm sync <keyword>` | Reconcile the menu against the bookmark export |
//! | `bkm list` | Print the menu in display order |
//! | `bkm get <identity>` | Print one entry as JSON |
//! | `bkm reorder <token>...` | Apply a new manual ordering |
//! | `bkm favicon <url> <icon>` | Propagate an icon across the URL's domain |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bookmark_menu::config::{self, Config};
use bookmark_menu::icons;
use bookmark_menu::menu::Menu;
use bookmark_menu::models::MenuEntry;
use bookmark_menu::source::ExportFileSource;
use bookmark_menu::store::SqliteStore;

/// Bookmark Menu — a keyword-driven bookmark menu that survives re-sync.
#[derive(Parser)]
#[command(
    name = "bkm",
    about = "Bookmark Menu — reconcile a persisted, user-ordered bookmark menu against a bookmark export",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/bkm.toml")]
    config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the menu store.
    ///
    /// Creates the SQLite database file and the slot table. Idempotent —
    /// running it multiple times is safe.
    Init,

    /// Show store health, configured source, and current item count.
    Status,

    /// Reconcile the menu against the bookmark export for a keyword.
    ///
    /// Entries no longer present in the search results are pruned; new ones
    /// are appended; manual ordering and favicons survive.
    Sync {
        /// The search keyword.
        keyword: String,
    },

    /// Print the menu in display order.
    List,

    /// Print one entry as JSON.
    Get {
        /// Entry identity (the full hash).
        identity: String,
    },

    /// Apply a new manual ordering and save.
    ///
    /// Tokens are entry identities in the desired final order; auxiliary
    /// data may follow the identity after an underscore. Unknown identities
    /// are ignored.
    Reorder {
        /// Identity tokens in the desired order.
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Propagate a favicon across every entry sharing the URL's domain.
    Favicon {
        /// Any URL on the target domain.
        url: String,
        /// Favicon URI, or the name of a built-in icon.
        icon: String,
    },
}

async fn open_store(config: &Config) -> Result<Arc<SqliteStore>> {
    Ok(Arc::new(SqliteStore::open(&config.store.path).await?))
}

async fn load_menu(config: &Config) -> Result<Menu> {
    let store = open_store(config).await?;
    Menu::load(config.menu.name.clone(), store).await
}

fn export_source(config: &Config) -> Result<ExportFileSource> {
    let path = config
        .source
        .export
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No bookmark export configured. Set [source] export."))?;
    Ok(ExportFileSource::new("export", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let store = open_store(&cfg).await?;
            store.migrate().await?;
            println!("Store initialized successfully.");
        }
        Commands::Status => {
            let store_ok = cfg.store.path.exists();
            let export_status = match &cfg.source.export {
                Some(path) if path.exists() => ("OK", true),
                Some(_) => ("NOT FOUND", false),
                None => ("NOT CONFIGURED", false),
            };

            println!("{:<12} {:<16} HEALTHY", "COMPONENT", "STATUS");
            println!(
                "{:<12} {:<16} {}",
                "store",
                if store_ok { "OK" } else { "NOT INITIALIZED" },
                store_ok
            );
            println!("{:<12} {:<16} {}", "export", export_status.0, export_status.1);

            if store_ok {
                let menu = load_menu(&cfg).await?;
                println!("menu '{}': {} items", menu.name(), menu.count());
            }
        }
        Commands::Sync { keyword } => {
            let source = export_source(&cfg)?;
            let mut menu = load_menu(&cfg).await?;
            menu.reconcile(&source, &keyword).await?;
            println!("sync \"{}\"", keyword);
            println!("  menu items: {}", menu.count());
            println!("ok");
        }
        Commands::List => {
            let menu = load_menu(&cfg).await?;
            if menu.count() == 0 {
                println!("Menu is empty.");
                return Ok(());
            }
            println!("{:<6} {:<32} {:<24} IDENTITY", "ORDER", "TITLE", "DOMAIN");
            for item in menu.items() {
                println!(
                    "{:<6} {:<32} {:<24} {}",
                    item.order,
                    item.title.chars().take(32).collect::<String>(),
                    item.domain.chars().take(24).collect::<String>(),
                    &item.identity[..12]
                );
            }
        }
        Commands::Get { identity } => {
            let menu = load_menu(&cfg).await?;
            match menu.find_by_id(&identity) {
                Some(entry) => println!("{}", serde_json::to_string_pretty(entry)?),
                None => println!("No entry with identity {}", identity),
            }
        }
        Commands::Reorder { tokens } => {
            let mut menu = load_menu(&cfg).await?;
            menu.reorder(&tokens).await?;
            println!("reordered {} items", menu.count());
        }
        Commands::Favicon { url, icon } => {
            let favicon = icons::builtin(&icon).map(str::to_string).unwrap_or(icon);
            let probe = MenuEntry::new("", &url, Vec::new())?.with_favicon(favicon);
            let mut menu = load_menu(&cfg).await?;
            menu.update_favicon(&probe).await?;
            println!("favicon updated for domain {}", probe.domain);
        }
    }

    Ok(())
}
