//! rsl: a small expression language with `let` bindings, `print` and blocks passed by name.

mod config;
mod error;

pub use config::{parse_args, ArgsError, Config, Mode, USAGE};
pub use error::Error;
pub use rsl_eval::{OutputSink, Stdout, Value};
pub use rsl_source::Source;

use rsl_eval::Evaluator;
use rsl_parser::parser::Parser;
use tracing::debug;

/// Parses and evaluates programs against one persistent root scope.
pub struct Interpreter<O> {
    evaluator: Evaluator<O>,
    config: Config,
}

impl<O: OutputSink> Interpreter<O> {
    pub fn new(config: Config, output: O) -> Self {
        Self {
            evaluator: Evaluator::new(output).with_max_depth(config.max_depth),
            config,
        }
    }

    /// Parses `source` and runs it.
    ///
    /// Nothing is evaluated if parsing fails. If evaluation fails, statements before the failing
    /// one have already produced their output and bindings.
    /// Returns the value of the last statement when it is a bare expression.
    pub fn run(&mut self, source: Source<'_>) -> Result<Option<Value>, Error> {
        let program = Parser::new(source)
            .with_max_depth(self.config.max_depth)
            .parse_program()?;
        debug!(name = source.name, stmts = program.stmts.len(), "parsed program");

        if self.config.dump_ast {
            eprintln!("{:#?}", program);
        }

        Ok(self.evaluator.eval_program(&program)?)
    }

    pub fn output(&self) -> &O {
        self.evaluator.output()
    }

    pub fn into_output(self) -> O {
        self.evaluator.into_output()
    }
}

/// Runs `source` as one program and returns everything it printed.
pub fn interpret(source: &str) -> Result<Vec<String>, Error> {
    let mut interpreter = Interpreter::new(Config::default(), Vec::new());
    interpreter.run(source.into())?;
    Ok(interpreter.into_output())
}
