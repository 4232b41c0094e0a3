//! # unibasic
//!
//! BASIC, PILOT and Logo in one line-oriented interpreter.
//!
//! ```text
//! unibasic                  # interactive editor
//! unibasic lesson.bas       # load a program, then edit
//! unibasic --run lesson.bas # run a program and exit
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unibasic::mach::Config;

#[derive(Parser, Debug)]
#[command(name = "unibasic", version)]
#[command(about = "BASIC, PILOT and Logo in one interpreter")]
struct Args {
    /// Program file to load at startup
    program: Option<PathBuf>,

    /// Run the program and exit
    #[arg(short, long, requires = "program")]
    run: bool,

    /// Seed for RND and GAME: commands
    #[arg(long, env = "UNIBASIC_SEED")]
    seed: Option<u64>,

    /// Directory for STORAGE: commands
    #[arg(long, env = "UNIBASIC_STORAGE")]
    storage: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(storage) = args.storage {
        config.storage_dir = storage;
    }
    unibasic::term::main(config, args.program, args.run);
}
