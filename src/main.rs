//! Turbl - CLI
//!
//! Five-letter word guessing game with a TUI, a plain text mode, and a small
//! relay that tells other players when a game starts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use turbl::{
    commands::run_simple,
    config::Settings,
    output::{BellPlayer, CuePlayer, LoggingPlayer},
    relay::{RelayClient, RelayServer},
    wordlists::{ANSWERS, WordList, embedded_dictionary, loader::words_from_slice},
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "TURBL_LOG";

#[derive(Parser)]
#[command(
    name = "turbl",
    about = "Guess the five-letter word in five attempts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'all' (default, answers plus allowed guesses), 'answers', or path to file
    #[arg(short = 'w', long, global = true, default_value = "all")]
    wordlist: String,

    /// JSON settings file (timings, classification rule, keyboard, messages, sounds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (the TUI logs nowhere else)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play {
        /// Join the relay at this address: announce every new game and show when others start one
        #[arg(long)]
        relay: Option<String>,

        /// Ring the terminal bell on errors and at the end of a game
        #[arg(long)]
        bell: bool,
    },

    /// Simple text mode, one word per line
    Simple,

    /// Run the start-game relay server
    Relay {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:3000")]
        listen: String,
    },
}

/// Build the dictionary selected with the -w flag
///
/// - "all": answers are targets, answers plus allowed words are accepted
/// - "answers": answers are both targets and the only accepted guesses
/// - "<path>": answers are targets, plus every word in the file is accepted
fn load_dictionary(wordlist_mode: &str) -> Result<WordList> {
    use turbl::wordlists::loader::load_from_file;

    let dictionary = match wordlist_mode {
        "all" => embedded_dictionary()?,
        "answers" => WordList::new(words_from_slice(ANSWERS), Vec::new())?,
        path => {
            let custom_words = load_from_file(path)
                .with_context(|| format!("failed to load wordlist {path}"))?;
            WordList::new(words_from_slice(ANSWERS), custom_words)?
        }
    };

    tracing::info!(
        targets = dictionary.target_count(),
        accepted = dictionary.accepted_count(),
        "dictionary ready"
    );
    Ok(dictionary)
}

/// Install the tracing subscriber
///
/// With a log file everything goes there. Otherwise the TUI stays silent and
/// the other modes log to stderr.
fn init_logging(log_file: Option<&Path>, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .compact()
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        relay: None,
        bell: false,
    });

    init_logging(
        cli.log_file.as_deref(),
        matches!(command, Commands::Play { .. }),
    )?;
    let settings = Settings::load(cli.config.as_deref())?;

    match command {
        Commands::Play { relay, bell } => {
            let dictionary = load_dictionary(&cli.wordlist)?;
            run_play_command(&dictionary, &settings, relay, bell)
        }
        Commands::Simple => {
            let dictionary = load_dictionary(&cli.wordlist)?;
            run_simple_command(&dictionary, &settings)
        }
        Commands::Relay { listen } => run_relay_command(&listen),
    }
}

fn run_play_command(
    dictionary: &WordList,
    settings: &Settings,
    relay: Option<String>,
    bell: bool,
) -> Result<()> {
    use turbl::interactive::{App, run_tui};

    let player: Box<dyn CuePlayer> = if bell {
        Box::new(BellPlayer::stdout(settings.cues.clone()))
    } else {
        Box::new(LoggingPlayer::new(settings.cues.clone()))
    };
    let app = App::new(dictionary, settings, player, relay.map(RelayClient::new))?;
    run_tui(app)
}

fn run_simple_command(dictionary: &WordList, settings: &Settings) -> Result<()> {
    let mut player = LoggingPlayer::new(settings.cues.clone());
    run_simple(dictionary, settings, io::stdin().lock(), &mut player)
}

fn run_relay_command(listen: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let server = RelayServer::bind(listen).await?;
        server.run().await
    })
}
