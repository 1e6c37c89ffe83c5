//! Command-line interface for generating uniform polytopes from Coxeter
//! diagrams.

mod cli;
mod report;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install()?;
    env_logger::builder().init();

    cli::exec(args.subcommand)
}
