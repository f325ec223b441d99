use std::process::ExitCode;
use clap::Parser as ClapParser;
use monkey_lang::Config;

fn main() -> ExitCode {
    let config: Config = Config::parse();
    monkey_lang::init_tracing(config.verbose);

    match monkey_lang::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        },
    }
}
