use std::{fs, path::PathBuf};

use clap::Parser;
use propscript::{interpreter::evaluator::core::Context, serialize};

/// propscript runs procedural-generation scripts: lex, parse, execute, and
/// optionally emit the compiled object form.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treats the input as a compiled object file instead of source code.
    #[arg(short, long)]
    precompiled: bool,

    /// Writes the compiled object form of the script to the given path
    /// after parsing.
    #[arg(short, long)]
    emit: Option<PathBuf>,

    /// The script to run.
    script: PathBuf,
}

fn main() {
    let args = Args::parse();

    let ast = if args.precompiled {
        let mut file = fs::File::open(&args.script).unwrap_or_else(|e| {
                                                       eprintln!("Failed to open '{}': {e}",
                                                                 args.script.display());
                                                       std::process::exit(1);
                                                   });
        serialize::load_ast(&mut file).unwrap_or_else(|e| {
                                          eprintln!("Failed to load '{}': {e}",
                                                    args.script.display());
                                          std::process::exit(1);
                                      })
    } else {
        let source = fs::read_to_string(&args.script).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      args.script.display());
            std::process::exit(1);
        });

        propscript::compile_source(&source).unwrap_or_else(|e| {
                                               eprintln!("{e}");
                                               std::process::exit(1);
                                           })
    };

    if let Some(path) = &args.emit {
        let result =
            fs::File::create(path).and_then(|mut file| serialize::save_ast(&ast, &mut file));
        if let Err(e) = result {
            eprintln!("Failed to write '{}': {e}", path.display());
            std::process::exit(1);
        }
    }

    let mut context = Context::new();
    if let Err(e) = context.execute(&ast) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
