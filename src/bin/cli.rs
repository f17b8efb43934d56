//! DuoKV CLI
//!
//! Interactive driver for an in-process `Store<String, String>`.
//! Reads one command per line from stdin, using the command log grammar.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use duokv::persistor::CommandLogReader;
use duokv::{Command, Config, Store, SyncStrategy};
use tracing_subscriber::{fmt, EnvFilter};

/// DuoKV CLI
#[derive(Parser, Debug)]
#[command(name = "duokv-cli")]
#[command(about = "Interactive shell for the DuoKV in-process store")]
#[command(version)]
struct Args {
    /// Root directory for the command log (defaults to $HOME)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Relative directory path below the root
    #[arg(short = 'p', long, default_value = "Desktop")]
    dir_path: String,

    /// Name of the log directory
    #[arg(short = 'n', long, default_value = "DUOKV_PERSISTOR")]
    dir_name: String,

    /// Write every mutation to the command log
    #[arg(short, long)]
    log: bool,

    /// fsync the log after every line
    #[arg(long)]
    fsync: bool,

    /// Replay the existing command log before reading commands
    #[arg(long)]
    replay: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,duokv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Config::builder()
        .dir_path(&args.dir_path)
        .dir_name(&args.dir_name)
        .logging(args.log)
        .sync_strategy(if args.fsync {
            SyncStrategy::EveryWrite
        } else {
            SyncStrategy::Flush
        });
    if let Some(root) = &args.root {
        builder = builder.root_dir(root);
    }

    let mut store: Store<String, String> = match Store::with_config(builder.build()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to create store: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("DuoKV CLI v{}", duokv::VERSION);
    tracing::info!("Command log: {}", store.log_path().display());

    if args.replay {
        replay_log(&mut store);
    }

    if let Err(e) = run_shell(&mut store) {
        tracing::error!("Shell error: {}", e);
        std::process::exit(1);
    }
}

/// Apply the configured log file to the empty store
fn replay_log(store: &mut Store<String, String>) {
    let path = store.log_path();
    if !path.exists() {
        tracing::info!("No command log at {}, nothing to replay", path.display());
        return;
    }

    let result = CommandLogReader::open(&path).and_then(|reader| store.replay(reader));
    match result {
        Ok(stats) => tracing::info!(
            "Replayed {} commands ({} rejected)",
            stats.commands_applied,
            stats.commands_rejected
        ),
        Err(e) => tracing::error!("Replay failed: {}", e),
    }
}

/// Read-eval-print loop over stdin
fn run_shell(store: &mut Store<String, String>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "duokv> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = input
            .parse::<Command<String, String>>()
            .and_then(|command| store.execute(command));

        match reply {
            Ok(reply) => writeln!(stdout, "{}", reply)?,
            Err(e) if e.is_committed() => writeln!(stdout, "(committed, not logged) {}", e)?,
            Err(e) => writeln!(stdout, "(error) {}", e)?,
        }
    }

    Ok(())
}
