use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;

use commands::{execute_math_command, execute_serve_command, MathCommands, ServeArgs};

#[derive(Parser)]
#[command(name = "userkit")]
#[command(about = "Userkit - user storage service and arithmetic helpers")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the user API over HTTP
    Serve(ServeArgs),
    /// Run an arithmetic helper
    Math {
        #[command(subcommand)]
        command: MathCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Serve(args) => execute_serve_command(args).await,
        Commands::Math { command } => {
            println!("{}", execute_math_command(command)?);
            Ok(())
        }
    }
}
