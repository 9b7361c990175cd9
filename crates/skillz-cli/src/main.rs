//! Skillz - browse a skill catalog and stitch loadouts
//!
//! - `skillz prepare` builds the served `skills.json` from the skills directory
//! - `skillz tree` / `skillz graph` inspect the loaded catalog
//! - `skillz loadout <id>...` stitches selected documents into one text
//! - `skillz layout` freezes node positions into a layout map
//! - `skillz serve` starts the HTTP server

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use skillz_core::Settings;

mod commands;
mod output;
mod serve;
mod source;

use source::CatalogSource;

/// Skillz - skill catalog loadouts
#[derive(Parser)]
#[command(name = "skillz")]
#[command(about = "Browse a skill catalog and stitch loadouts", long_about = None)]
struct Cli {
    /// Read the catalog from this directory (holding `skills.json` and `skills/`)
    #[arg(long, global = true, conflicts_with = "url")]
    root: Option<PathBuf>,

    /// Fetch the catalog from this origin over HTTP
    #[arg(long, global = true)]
    url: Option<String>,

    /// Origin substituted for `${baseUrl}` in documents
    #[arg(long, global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write `<public_dir>/skills.json` from the manifest and skills directory
    ///
    /// Skill nodes get their `skillPath` from the directory scan. Without a
    /// usable manifest, one is generated from the directory layout.
    Prepare,

    /// Print the catalog as an indented outline
    Tree,

    /// Print the positioned graph as JSON
    Graph,

    /// Select nodes (with their subtrees) and print the stitched export
    Loadout {
        /// Node ids to click, in order
        #[arg(required = true)]
        ids: Vec<String>,

        /// Write the export to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also copy the export to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Export a layout map
    ///
    /// From a JSON array of `{id, position: {x, y}}` nodes, or, without
    /// `--nodes`, from the current graph (freezing computed positions).
    Layout {
        #[arg(long)]
        nodes: Option<PathBuf>,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Start the skillz HTTP server
    ///
    /// `--root DIR` serves `DIR` as the public directory and `DIR/skills`
    /// as the skills directory. `--url` is rejected.
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_logging(serve: bool) {
    let builder = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::INFO.into()),
    );

    // Server logs go to stdout; everywhere else stdout carries command output
    if serve {
        builder.init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(matches!(cli.command, Commands::Serve { .. }));

    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd).await?;
    if let Some(origin) = &cli.origin {
        settings.origin = origin.clone();
    }

    if let Commands::Serve { port } = cli.command {
        serve::apply_source(&mut settings, cli.root, cli.url.as_deref())?;
        if let Some(port) = port {
            settings.port = port;
        }
        return serve::run(settings).await;
    }

    // a remote catalog is its own origin unless told otherwise
    if let (None, Some(url)) = (&cli.origin, &cli.url) {
        settings.origin = url.trim_end_matches('/').to_string();
    }
    let source = CatalogSource::resolve(cli.root, cli.url, &settings);

    match cli.command {
        Commands::Prepare => commands::prepare(&settings),
        Commands::Tree => commands::tree(&source, &settings).await,
        Commands::Graph => commands::graph(&source, &settings).await,
        Commands::Loadout { ids, out, copy } => {
            commands::loadout(&source, &settings, &ids, out.as_deref(), copy).await
        }
        Commands::Layout { nodes, out } => {
            commands::layout(&source, &settings, nodes.as_deref(), out.as_deref()).await
        }
        Commands::Serve { .. } => unreachable!(),
    }
}
