use clap::{Parser, Subcommand};

mod codes;

#[derive(Debug, Parser)]
#[command(name = "promocodes-app", about = "Promo codes CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Codes(codes::CodesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Codes(command) => codes::run(command).await,
        }
    }
}
