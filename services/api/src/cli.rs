use crate::demo::{print_level_policy, run_demo, DemoArgs, LevelsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use devroster::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "devroster",
    about = "Serve and inspect the developer roster from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the experience-year bounds in effect for each level
    Levels(LevelsArgs),
    /// Walk one developer through create, edit and retirement
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Levels(args) => print_level_policy(args),
        Command::Demo(args) => run_demo(args),
    }
}
