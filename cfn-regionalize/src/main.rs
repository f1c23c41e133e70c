use anyhow::Result;
use cfn_regionalize::{commands::regionalize::Target, Cli, Commands};
use clap::Parser;
use tracing_log::AsTrace;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
  let cli = Cli::parse();
  let subscriber = FmtSubscriber::builder()
    .with_max_level(cli.verbose.log_level_filter().as_trace())
    .without_time()
    .with_ansi(!cli.no_color)
    .finish();
  tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

  match &cli.command {
    Commands::Arns(input) => input.regionalize(Target::Arns),
    Commands::ConsoleUrls(input) => input.regionalize(Target::ConsoleUrls),
  }
}
