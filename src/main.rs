use std::{fs, process::ExitCode};

use clap::Parser;
use ember::{execute, format_source};
use tracing::debug;

/// ember runs scripts written in a small embeddable scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells ember to read the script from the file named by CONTENTS.
    #[arg(short, long)]
    file: bool,

    /// Prints the script in canonical form instead of running it.
    #[arg(long)]
    format: bool,

    /// Pipe mode prints the exported value, or the value of the last
    /// statement, once the script finishes.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, when it is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                        .with_writer(std::io::stderr))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };
    debug!(format = args.format, pipe_mode = args.pipe_mode, "starting");

    if args.format {
        return match format_source(&script) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    match execute(&script) {
        Ok(value) => {
            if args.pipe_mode
               && let Some(v) = value
            {
                println!("{v}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
