use castoff::collage::{ComposeOptions, compose};
use castoff::imaging::{NormalizeParams, normalize_image};
use castoff::item::{ItemDraft, parse_item_date};
use castoff::naming::collage_filename;
use castoff::store::ItemStore;
use castoff::{config, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "castoff")]
#[command(about = "A journal of discarded things")]
#[command(long_about = "\
A journal of discarded things

Each entry pairs a photo of something you let go with the day it left, a
short reason (50 characters max), and optionally how it was disposed of.
The photo is normalized to a 512x512 square on the way in, so the journal
file is compact and every export is reproducible.

The whole journal lives in one SQLite file (--store, default castoff.db).
Copy that file and you have a complete backup.

Typical session:

  castoff add --image shoe.jpg --date 2024-01-05 --reason \"worn out\"
  castoff add --image lamp.png --date 2024-02-11 --reason outgrown --method donated
  castoff list
  castoff collage --out ./exports

The collage tiles every entry oldest-first under a title band showing the
date range, and is written as <prefix>-<N>items-<millis>.png.

Run 'castoff gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Journal database file
    #[arg(long, default_value = "castoff.db", global = true)]
    store: PathBuf,

    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Log at debug level instead of warn
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a discarded item
    Add {
        /// Path to the item's photo (any common raster format)
        #[arg(long)]
        image: PathBuf,
        /// The day it was discarded, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Why it was let go (50 characters max)
        #[arg(long)]
        reason: String,
        /// How it was disposed of (donated, recycled, trashed, ...)
        #[arg(long)]
        method: Option<String>,
    },
    /// Delete an item by id (no error if the id does not exist)
    Remove { id: i64 },
    /// List every recorded item, oldest first
    List {
        /// Emit a JSON array of item summaries instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compose all items into one collage image
    Collage {
        /// Directory to write the artifact into
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Override the configured header title for this export
        #[arg(long)]
        title: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    match cli.command {
        Command::Add {
            image,
            date,
            reason,
            method,
        } => {
            let source = std::fs::read(&image)?;
            let normalized = normalize_image(&source, NormalizeParams::default())?;
            let date = parse_item_date(&date)?;
            let draft = ItemDraft {
                image: normalized,
                date,
                reason,
                disposal_method: method,
            };
            draft.validate()?;

            let store = ItemStore::open(&cli.store)?;
            let id = store.add(&draft)?;
            output::print_add(id, date, draft.image.len());
        }
        Command::Remove { id } => {
            let store = ItemStore::open(&cli.store)?;
            store.delete(id)?;
            output::print_remove(id);
        }
        Command::List { json } => {
            let store = ItemStore::open(&cli.store)?;
            let items = store.list_all()?;
            if json {
                println!("{}", output::format_list_json(&items)?);
            } else {
                output::print_list(&items);
            }
        }
        Command::Collage { out, title } => {
            let config = config::load_config(&cli.config_dir)?;
            init_thread_pool(&config.processing);

            let store = ItemStore::open(&cli.store)?;
            let items = store.list_all()?;

            let mut options = ComposeOptions::from_config(&config);
            if let Some(title) = title {
                options.title = title;
            }
            let collage = compose(&items, &options)?;

            let name = collage_filename(
                &config.collage.prefix,
                items.len(),
                chrono::Utc::now().timestamp_millis(),
            );
            std::fs::create_dir_all(&out)?;
            let path = out.join(name);
            std::fs::write(&path, &collage.png)?;
            output::print_collage(&path, items.len(), &collage);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Start stderr logging: `warn` by default, `debug` with `--verbose`,
/// `RUST_LOG` wins over both. The returned handle must live until exit.
fn init_logging(verbose: bool) -> Result<flexi_logger::LoggerHandle, Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { "warn" };
    let handle = flexi_logger::Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}

/// Initialize the rayon thread pool used for collage cell decodes.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
