//! Vaultport CLI
//!
//! Runs a full import against the in-memory reference store and dumps the
//! resulting journals as JSON, which is useful for previewing what a vault
//! will look like before wiring a real host store.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use vaultport::{ImportSettings, MemoryStore, VaultImporter};

/// Vaultport - import an Obsidian vault into a journal store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the vault directory
    #[arg(env = "VAULTPORT_VAULT_PATH")]
    vault: PathBuf,

    /// Settings file (JSON); flags below override its values
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Host folder to place every imported document under
    #[arg(long)]
    root_folder: Option<String>,

    /// Mirror the vault's top-level directory as a host folder
    #[arg(long, action = clap::ArgAction::SetTrue)]
    create_root_folder: bool,

    /// Split documents into one page per level-1 heading
    #[arg(long, action = clap::ArgAction::SetTrue)]
    header_to_page: bool,

    /// Upload non-markdown files and rewrite references to them
    #[arg(long, action = clap::ArgAction::SetTrue)]
    import_non_markdown: bool,

    /// Destination directory for uploaded assets
    #[arg(long)]
    media_folder: Option<String>,

    /// Build an Index journal listing every imported note
    #[arg(long, action = clap::ArgAction::SetTrue)]
    index: bool,

    /// Append a references section to notes linked from elsewhere
    #[arg(long, action = clap::ArgAction::SetTrue)]
    backlinks: bool,

    /// Write the resulting journals as JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => ImportSettings::load(path)?,
        None => ImportSettings::default(),
    };
    settings.vault_path = args.vault;
    if args.root_folder.is_some() {
        settings.root_folder_name = args.root_folder;
    }
    if args.create_root_folder {
        settings.create_root_folder = true;
    }
    if args.header_to_page {
        settings.header_to_page = true;
    }
    if args.import_non_markdown {
        settings.import_non_markdown = true;
    }
    if let Some(media_folder) = args.media_folder {
        settings.media_folder = media_folder;
    }
    if args.index {
        settings.create_index_file = true;
    }
    if args.backlinks {
        settings.create_backlinks = true;
    }

    log::info!("Vaultport v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(MemoryStore::new());
    let importer = VaultImporter::new(settings, store.clone());
    let report = importer.run().await?;

    log::info!(
        "{} notes created, {} updated, {} skipped, {} assets uploaded, {} links rewritten",
        report.notes_created,
        report.notes_updated,
        report.notes_skipped,
        report.assets_uploaded,
        report.links_replaced
    );

    let journals = store.journals().await;
    let dump = serde_json::json!({
        "report": report,
        "journals": journals,
    });
    let rendered = serde_json::to_string_pretty(&dump)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
