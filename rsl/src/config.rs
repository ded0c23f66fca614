//! Interpreter settings and command line parsing.

use std::path::PathBuf;

use rsl_parser::parser::DEFAULT_MAX_DEPTH;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: rsl [OPTIONS] [FILE]

Runs FILE, or starts an interactive session when no FILE is given.

Options:
    --dump-ast         Print the parsed program to stderr before running it
    --max-depth <N>    Maximum nesting of expressions and block invocations
    -V, --version      Print version information
    -h, --help         Print this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Limit for nested parsing and evaluation, shared by the parser and the evaluator.
    pub max_depth: usize,
    /// Pretty-print every parsed program to stderr.
    pub dump_ast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            dump_ast: false,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Repl,
    File(PathBuf),
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` requires a value")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for `{option}`")]
    InvalidValue { option: &'static str, value: String },
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Parses the command line arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<(Config, Mode), ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::default();
    let mut file = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok((config, Mode::Help)),
            "-V" | "--version" => return Ok((config, Mode::Version)),
            "--dump-ast" => config.dump_ast = true,
            "--max-depth" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--max-depth"))?;
                config.max_depth = match value.parse() {
                    Ok(depth) if depth > 0 => depth,
                    _ => {
                        return Err(ArgsError::InvalidValue {
                            option: "--max-depth",
                            value,
                        })
                    }
                };
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(ArgsError::UnknownOption(arg))
            }
            _ if file.is_none() => file = Some(PathBuf::from(arg)),
            _ => return Err(ArgsError::UnexpectedArgument(arg)),
        }
    }

    let mode = file.map_or(Mode::Repl, Mode::File);
    Ok((config, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<(Config, Mode), ArgsError> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]), Ok((Config::default(), Mode::Repl)));
    }

    #[test]
    fn test_file_and_options() {
        let (config, mode) = parse(&["--dump-ast", "--max-depth", "64", "prog.rsl"]).unwrap();
        assert_eq!(
            config,
            Config {
                max_depth: 64,
                dump_ast: true
            }
        );
        assert_eq!(mode, Mode::File(PathBuf::from("prog.rsl")));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap().1, Mode::Help);
        assert_eq!(parse(&["prog.rsl", "--version"]).unwrap().1, Mode::Version);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse(&["--max-depth"]),
            Err(ArgsError::MissingValue("--max-depth"))
        );
        assert_eq!(
            parse(&["--max-depth", "0"]),
            Err(ArgsError::InvalidValue {
                option: "--max-depth",
                value: "0".to_string()
            })
        );
        assert_eq!(
            parse(&["--fast"]),
            Err(ArgsError::UnknownOption("--fast".to_string()))
        );
        assert_eq!(
            parse(&["a.rsl", "b.rsl"]),
            Err(ArgsError::UnexpectedArgument("b.rsl".to_string()))
        );
    }
}
