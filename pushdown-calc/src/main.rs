//! Command-line interface for the calculator.
//!
//! Feeds the engine one character at a time, exactly as an interactive host
//! would, and reports lexical or syntax errors with a nonzero exit status.
//! The `exit` statement in the input ends the process quietly.

use clap::{Parser as ClapParser, Subcommand};
use pushdown::Engine;
use pushdown_calc::{CalcContext, CalcGrammar, CalcValue};
use std::io::Read;
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates statements given on the command line
    Eval {
        /// Statements, separated by `;`
        stmts: String,
    },
    /// Evaluates statements read from a file (`-` for standard input)
    Run {
        /// Input file with calculator statements
        #[arg(short, long)]
        input: String,
    },
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
}

fn run(source: &str) -> ExitCode {
    let mut context = CalcContext::default();
    let mut engine = Engine::<CalcGrammar>::new();

    for ch in source.chars() {
        if let Err(err) = engine.feed(&mut context, ch) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }
    let value = match engine.finish(&mut context) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    log::debug!(
        "scanned {:?}, parsed {:?}",
        engine.scan_stats(),
        engine.parse_stats()
    );
    for (name, bound) in context.vars.iter() {
        log::debug!("{name} = {bound}");
    }

    if !context.done {
        match value {
            CalcValue::Number(n) => println!("{n}"),
            other => println!("{other:?}"),
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Commands::Eval { stmts } => run(&stmts),
        Commands::Run { input } => {
            let source = match read_input(&input) {
                Ok(source) => source,
                Err(err) => {
                    eprintln!("can't read {input:?}: {err}");
                    return ExitCode::FAILURE;
                }
            };
            run(&source)
        }
    }
}
