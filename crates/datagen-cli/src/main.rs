mod logging;
mod repl;
mod workspace;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use datagen_generate::{GenerationError, RecordEngine};
use thiserror::Error;

use logging::{LoggingError, init_logging};
use repl::Repl;
use workspace::{WorkspaceError, load_or_create_settings};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid command pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "datagen", version, about = "Synthetic record generator")]
struct Cli {
    /// Settings file; created with defaults when missing.
    #[arg(long, default_value = "datagen.toml")]
    config: PathBuf,
    /// Seed for reproducible batches.
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter directive, e.g. `info` or `datagen_generate=debug`.
    #[arg(long)]
    log_level: Option<String>,
    /// Write JSON logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Run a single command and exit, e.g. `datagen generate 5 students`.
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut settings = load_or_create_settings(&cli.config)?;
    if let Some(seed) = cli.seed {
        settings.generation.seed = Some(seed);
    }
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
    }
    if let Some(file) = cli.log_file {
        settings.logging.file = Some(file);
    }
    init_logging(&settings.logging)?;

    let engine = RecordEngine::new(settings.generation.to_options());
    tracing::info!(
        config = %cli.config.display(),
        seed = engine.seed(),
        today = %engine.today(),
        "datagen started"
    );

    let mut repl = Repl::new(engine)?;
    let mut stdout = io::stdout().lock();

    if !cli.command.is_empty() {
        let line = cli.command.join(" ");
        repl.execute(&line, &mut stdout)?;
        return Ok(());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl.execute("help", &mut stdout)?;
    }
    repl.run(stdin.lock(), &mut stdout)?;
    tracing::info!(
        records = repl.session().batch().map_or(0, |batch| batch.len()),
        "datagen finished"
    );
    Ok(())
}
