//! Debug driver: resolve a buffer's completion context and print it as
//! JSON, the way an editor integration would consume it.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phpinpoint", version, about = "Resolve the completion context of a PHP buffer truncated at the cursor")]
struct Args {
    /// PHP source file to analyse; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Byte offset of the cursor; the buffer is truncated here first.
    /// Without it the whole input is treated as ending at the cursor.
    #[arg(long)]
    cursor: Option<usize>,

    /// Print compact JSON on a single line.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut buffer = String::new();
    match &args.file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => buffer = content,
            Err(err) => {
                eprintln!("phpinpoint: {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => {
            if let Err(err) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("phpinpoint: stdin: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(cursor) = args.cursor {
        let mut end = cursor.min(buffer.len());
        // Back off to a char boundary so truncation never splits a UTF-8
        // sequence.
        while end > 0 && !buffer.is_char_boundary(end) {
            end -= 1;
        }
        buffer.truncate(end);
    }

    let context = phpinpoint::parse(&buffer);
    let rendered = if args.compact {
        serde_json::to_string(&context)
    } else {
        serde_json::to_string_pretty(&context)
    };
    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("phpinpoint: serialize: {}", err);
            ExitCode::FAILURE
        }
    }
}
