mod repl;

use std::fs;
use std::path::PathBuf;

use clap::Parser as CliParser;
use owo_colors::OwoColorize;

use brisk_interpreter::Interpreter;
use brisk_lexer::Lexer;
use brisk_parser::Parser;
use brisk_syntax::error::Error;

#[derive(CliParser, Debug)]
#[command(name = "brisk", about = "Run brisk programs", version)]
struct Cli {
    /// Source file to run; the REPL starts when omitted
    script: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let path = match cli.script {
        Some(p) => p,
        None => {
            repl::start_repl();
            return;
        }
    };

    let src = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Could not read {}: {}", path.display(), e).red()
            );
            std::process::exit(1);
        }
    };

    let mut parser = Parser::new(Lexer::new(&src));
    let program = match parser.parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error("Syntax Error", &src, &e);
            std::process::exit(1);
        }
    };

    let mut interpreter = Interpreter::new();
    if let Err(e) = interpreter.run(&program) {
        render_error("Runtime Error", &src, &e);
        std::process::exit(1);
    }
}

/// One-line diagnostic plus the offending source line with a caret
/// marker when the error knows its position.
pub(crate) fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let Some(line) = err.line {
        if line >= 1 {
            if let Some(src_line) = source.lines().nth(line - 1) {
                eprintln!("  {}", src_line.bright_black());
                let col = err.col.unwrap_or(1);
                let mut marker = String::new();
                if col > 1 {
                    marker.push_str(&" ".repeat(col - 1));
                }
                marker.push('^');
                eprintln!("  {}", marker.red());
            } else {
                eprintln!("  on line {}", line);
            }
        }
    }
}
