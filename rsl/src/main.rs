use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use console::style;
use rsl::{parse_args, Config, Error, Interpreter, Mode, Source, Stdout, USAGE};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (config, mode) = match parse_args(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{}: {}\n\n{}", style("error").red().bold(), err, USAGE);
            process::exit(2);
        }
    };

    match mode {
        Mode::Help => println!("{}", USAGE),
        Mode::Version => println!("rsl {}", env!("CARGO_PKG_VERSION")),
        Mode::File(path) => run_file(config, &path),
        Mode::Repl => repl(config),
    }
}

fn run_file(config: Config, path: &Path) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!(
                "{}: cannot read {}: {}",
                style("error").red().bold(),
                path.display(),
                err
            );
            process::exit(1);
        }
    };

    let name = path.display().to_string();
    let source = Source::new(&name, &content);
    let mut interpreter = Interpreter::new(config, Stdout);
    if let Err(err) = interpreter.run(source) {
        report(&source, &err);
        process::exit(1);
    }
}

fn repl(config: Config) {
    println!("{} {}", style("rsl").bold(), env!("CARGO_PKG_VERSION"));
    println!("Type !quit! to exit.");

    let mut interpreter = Interpreter::new(config, Stdout);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!(" -> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // end of input
            Ok(_) => {}
            Err(err) => {
                eprintln!("{}: {}", style("error").red().bold(), err);
                break;
            }
        }
        if input.trim() == "!quit!" {
            break;
        }

        let source = Source::new("<repl>", &input);
        match interpreter.run(source) {
            Ok(Some(value)) => println!("{}", style(value).dim()),
            Ok(None) => {}
            Err(err) => report(&source, &err),
        }
    }
}

/// Prints a classified error and, for syntax errors, where it happened.
fn report(source: &Source<'_>, err: &Error) {
    let class = format!("error[{}]", err.class());
    eprintln!("{}: {}", style(class).red().bold(), err);
    if let Some(span) = err.span() {
        let (line, col) = source.line_col(span.start);
        eprintln!(
            "  {} {}:{}:{}",
            style("-->").blue().bold(),
            source.name,
            line,
            col
        );
    }
}
