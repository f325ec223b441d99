pub mod util;
pub mod interpreter;
pub mod repl;

use std::path::PathBuf;
use std::sync::Once;
use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Source file to execute; starts an interactive session if omitted")]
    pub file: Option<PathBuf>,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{} could not be parsed", .0.display())]
    Parse(PathBuf),
}

static TRACING_INIT: Once = Once::new();

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over
/// `verbose`. Later calls do nothing.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
            .with(filter)
            .init();
    });
}

pub fn run(config: Config) -> Result<(), Error> {
    let stdout = std::io::stdout();

    match config.file {
        Some(path) => {
            let source = std::fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), "executing file");

            if !repl::execute(&source, stdout.lock())? {
                return Err(Error::Parse(path));
            }
        },
        None => {
            println!("This is the Monkey programming language!");
            println!("Feel free to type in commands");

            repl::start(std::io::stdin().lock(), stdout.lock())?;
        },
    }

    Ok(())
}
