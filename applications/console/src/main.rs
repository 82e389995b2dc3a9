/// Cadence - console music player
use anyhow::Context;
use cadence_console::{
    commands::{parse_command, HELP},
    load_library, ConsoleConfig, LogMedia, Session, SessionSettings, TextRenderer,
};
use cadence_playback::filter;
use cadence_storage::{FileStore, PlaylistStore};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence console music player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Library file, overriding the configured one
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Play,
    /// Print library tracks matching a query
    Search {
        /// Matched against title and artist
        query: String,
    },
    /// List saved playlists
    Playlists,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the player view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cadence_console=info,cadence_playback=info,cadence_storage=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(library) = cli.library {
        config.library_path = library;
    }

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(&config)?,
        Commands::Search { query } => search(&config, &query)?,
        Commands::Playlists => list_playlists(&config)?,
    }

    Ok(())
}

fn open_playlists(config: &ConsoleConfig) -> anyhow::Result<PlaylistStore<FileStore>> {
    let backend = FileStore::open(&config.playlist_dir).with_context(|| {
        format!("opening playlist directory {}", config.playlist_dir.display())
    })?;
    Ok(PlaylistStore::open(backend)?)
}

fn play(config: &ConsoleConfig) -> anyhow::Result<()> {
    let library = load_library(config)
        .with_context(|| format!("loading library {}", config.library_path.display()))?;
    let playlists = open_playlists(config)?;

    tracing::info!("Starting Cadence session");

    let mut session = Session::new(
        library,
        playlists,
        LogMedia::new(),
        TextRenderer::new(io::stdout()),
        SessionSettings::from(config),
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = line.trim();
        if command == "quit" || command == "exit" {
            break;
        }
        if command == "help" {
            writeln!(stdout, "{HELP}")?;
        }

        match parse_command(command) {
            Ok(Some(event)) => session.dispatch(event),
            Ok(None) => {}
            Err(message) => writeln!(stdout, "! {message}")?,
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    tracing::info!("Session ended");
    Ok(())
}

fn search(config: &ConsoleConfig, query: &str) -> anyhow::Result<()> {
    let library = load_library(config)?;
    let mut stdout = io::stdout().lock();

    for track in filter(library.tracks(), query) {
        writeln!(stdout, "{}\t{} - {}", track.id, track.title, track.artist)?;
    }
    Ok(())
}

fn list_playlists(config: &ConsoleConfig) -> anyhow::Result<()> {
    let playlists = open_playlists(config)?;
    let mut stdout = io::stdout().lock();

    if playlists.is_empty() {
        writeln!(stdout, "No playlists yet")?;
    }
    for playlist in playlists.list() {
        writeln!(stdout, "{} ({} tracks)", playlist.name, playlist.tracks.len())?;
        for track in &playlist.tracks {
            writeln!(stdout, "  {}\t{} - {}", track.id, track.title, track.artist)?;
        }
    }
    Ok(())
}
