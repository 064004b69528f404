use clap::Parser;
use rotor::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
