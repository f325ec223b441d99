use std::io::{self, BufRead, Write};
use crate::interpreter::environment::{Env, Environment};
use crate::interpreter::error::ParseError;
use crate::interpreter::evaluator::Evaluator;
use crate::interpreter::parser::parse;

pub const PROMPT: &str = ">> ";

/// Reads one program per line from `input` until it is exhausted, printing
/// each result to `output`. All lines share one global environment.
pub fn start(input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    tracing::info!("starting repl session");

    let evaluator = Evaluator::default();
    let env = Environment::new_global();

    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        run_source(&evaluator, &line?, &env, &mut output)?;

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    writeln!(output)
}

/// Runs a whole source file in a fresh environment. Returns `false` if it
/// did not parse.
pub fn execute(source: &str, mut output: impl Write) -> io::Result<bool> {
    run_source(&Evaluator::default(), source, &Environment::new_global(), &mut output)
}

fn run_source(evaluator: &Evaluator, source: &str, env: &Env, output: &mut impl Write) -> io::Result<bool> {
    let parsed = parse(source);

    if !parsed.errors.is_empty() {
        print_parse_errors(&parsed.errors, output)?;
        return Ok(false);
    }

    let value = evaluator.eval(&parsed.program, env);
    writeln!(output, "{}", value.inspect())?;

    Ok(true)
}

fn print_parse_errors(errors: &[ParseError], output: &mut impl Write) -> io::Result<()> {
    for error in errors {
        writeln!(output, "\t{}", error)?;
    }

    Ok(())
}
