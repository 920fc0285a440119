use crate::demo::{run_demo, run_locations, run_show, DemoArgs, LocationsArgs, ShowArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wc_vax::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "WC Vax",
    about = "Find vaccine providers by vaccine type, from the terminal or over HTTP",
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
    /// List providers visible under a vaccine filter
    Locations(LocationsArgs),
    /// Show the detail card for one provider
    Show(ShowArgs),
    /// Walk through map and list filtering with the bundled catalog
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
    /// Load the catalog from a CSV or JSON file instead of the bundled list
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Locations(args) => run_locations(args),
        Command::Show(args) => run_show(args),
        Command::Demo(args) => run_demo(args),
    }
}
