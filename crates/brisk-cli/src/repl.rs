use std::io::{self, Write};

use owo_colors::OwoColorize;

use brisk_interpreter::{EnvRef, Environment, Interpreter, Value};
use brisk_lexer::Lexer;
use brisk_parser::Parser;
use brisk_syntax::token::TokenKind;

pub fn start_repl() {
    println!(
        "{}",
        "brisk REPL. Type :help for help, :quit to exit."
            .bold()
            .green()
    );

    let mut interpreter = Interpreter::new();
    let mut env = Environment::new_root();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "brisk> " } else { " ...> " };
        print!("{}", prompt.cyan());
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => break,
        };
        if n == 0 {
            // EOF
            println!();
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => break,
                ":help" | ":h" => {
                    print_help();
                    continue;
                }
                ":vars" => {
                    print_vars(&env);
                    continue;
                }
                ":funcs" => {
                    print_funcs(&env);
                    continue;
                }
                ":reset" => {
                    env = Environment::new_root();
                    println!("{}", "State reset.".yellow());
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        let mut parser = Parser::new(Lexer::new(&buffer));
        match parser.parse_program() {
            Ok(program) => match interpreter.run_with_env(&program, &env) {
                Ok(Some(val)) if val != Value::Null => {
                    println!("{}", val.to_string().bright_blue());
                }
                Ok(_) => {}
                Err(e) => crate::render_error("Runtime Error", &buffer, &e),
            },
            Err(e) => crate::render_error("Syntax Error", &buffer, &e),
        }

        buffer.clear();
    }
    println!("Goodbye.");
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}   Show this help", ":help".yellow());
    println!("  {}   Exit the REPL", ":quit".yellow());
    println!("  {}   List top-level variables", ":vars".yellow());
    println!("  {}  List defined functions", ":funcs".yellow());
    println!("  {}  Clear all state", ":reset".yellow());
    println!("Type code to evaluate. Multi-line input is buffered until braces balance.");
}

fn print_vars(env: &EnvRef) {
    let mut vars = env.borrow().vars_snapshot();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (k, v) in vars {
        println!("{} = {}", k.yellow(), v.to_string().bright_blue());
    }
}

fn print_funcs(env: &EnvRef) {
    let names = env.borrow().function_names();
    if names.is_empty() {
        println!("{}", "<no functions>".dimmed());
        return;
    }
    for n in names {
        println!("{}", n.yellow());
    }
}

/// An entry is complete once parentheses and braces balance; until then
/// further lines are buffered.
fn is_complete(input: &str) -> bool {
    let tokens = Lexer::new(input).tokenize();
    let mut paren = 0i32;
    let mut brace = 0i32;
    for tk in &tokens {
        match tk.kind {
            TokenKind::LParen => paren += 1,
            TokenKind::RParen => paren -= 1,
            TokenKind::LBrace => brace += 1,
            TokenKind::RBrace => brace -= 1,
            _ => {}
        }
    }
    paren <= 0 && brace <= 0
}
