use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hk_veg_restaurants::Catalog;
use log::LevelFilter;
mod commands;

const DEFAULT_DATA_PATH: &str = "data/hk_veg_restaurants_data.csv";

#[derive(Parser)]
#[command(name = "hk-veg")]
#[command(about = "Browse Hong Kong vegetarian restaurants by region and district")]
#[command(version)]
struct Cli {
    /// Restaurant listing CSV to load
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[command(subcommand)]
    subcommand: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every region with its number of districts
    ListRegions(commands::list_regions::Args),
    /// List the districts found under each region
    ListDistricts(commands::list_districts::Args),
    /// Print the restaurants matching a region/district selection
    Search(commands::search::Args),
    /// Write an HTML page with the table, the map and a contact form
    RenderPage(commands::render_page::Args),
}

/// Prints a parse failure. Help and version requests are not failures.
fn report_parse_error(err: &clap::Error) -> commands::ExitCode {
    let _ = err.print();
    if err.exit_code() == 0 {
        commands::ExitCode::Ok
    } else {
        commands::ExitCode::FaultOrArgsError
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<commands::ExitCode> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return Ok(report_parse_error(&err)),
    };
    let catalog = Catalog::new(cli.data);

    Ok(match cli.subcommand {
        Commands::ListRegions(args) => commands::list_regions::main(args, &catalog).await?,
        Commands::ListDistricts(args) => commands::list_districts::main(args, &catalog).await?,
        Commands::Search(args) => commands::search::main(args, &catalog).await?,
        Commands::RenderPage(args) => commands::render_page::main(args, &catalog).await?,
    })
}
