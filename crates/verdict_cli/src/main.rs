//! `verdict`, a static design-rule linter for a Verilog subset.
//!
//! One invocation analyses one source file containing one module:
//! lex → parse (arena-backed AST) → lint → report. The violation report
//! goes to stdout; fatal syntax errors print one line to stderr.
//!
//! Exit codes: 0 for any completed analysis (with or without violations),
//! 1 for usage errors, unreadable input, or parse failures.

#![warn(missing_docs)]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use verdict_common::Interner;
use verdict_diagnostics::DiagnosticSink;
use verdict_lint::ModuleLinter;
use verdict_source::{FileId, SourceDb};

/// Static Verilog design-rule linter.
#[derive(Parser, Debug)]
#[command(name = "verdict", version, about = "Static Verilog design-rule linter")]
struct Cli {
    /// The Verilog source file to analyze.
    file: PathBuf,

    /// Print the token stream before analysis.
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed module as JSON before analysis.
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    // Usage errors exit 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(1);
        }
    };
    process::exit(run(&cli));
}

/// Runs the full pipeline, returning the process exit code.
fn run(cli: &Cli) -> i32 {
    let mut source_db = SourceDb::new();
    let file = match source_db.load_file(&cli.file) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("error: cannot read '{}': {err}", cli.file.display());
            return 1;
        }
    };
    let interner = Interner::new();
    let source = source_db.get_file(file).content.as_str();

    if cli.dump_tokens {
        dump_tokens(source, file);
    }

    let parsed = match verdict_parser::parse(source, file, &interner) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    if cli.dump_ast {
        match serde_json::to_string_pretty(&parsed) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot serialize AST: {err}");
                return 1;
            }
        }
    }

    let sink = DiagnosticSink::new();
    let mut linter = ModuleLinter::new(&source_db, &interner, &parsed.arena, &sink);
    linter.analyze_module(&parsed.module);

    let diagnostics = sink.diagnostics();
    if let Err(err) = verdict_lint::print_report(&diagnostics) {
        eprintln!("error: cannot write report: {err}");
        return 1;
    }
    0
}

/// Prints each token as `Kind -> "text"`, one per line.
fn dump_tokens(source: &str, file: FileId) {
    for token in verdict_parser::lexer::lex(source, file) {
        if token.is_end() {
            break;
        }
        let text = &source[token.span.start as usize..token.span.end as usize];
        println!("{:?} -> \"{text}\"", token.kind);
    }
}
