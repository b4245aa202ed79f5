use anyhow::Context;
use hk_veg_restaurants::{Catalog, Projection, project_with, render};

use super::ExitCode;
use super::selection::SelectionArgs;
use super::view::MapArgs;

#[derive(clap::Args)]
pub struct Args {
    #[command(flatten)]
    selection: SelectionArgs,

    #[command(flatten)]
    map: MapArgs,

    /// Prints the table and map views in JSON format
    #[arg(long)]
    json: bool,
}

pub async fn main(args: Args, catalog: &Catalog) -> anyhow::Result<ExitCode> {
    let dataset = catalog
        .ensure_loaded()
        .await
        .context("Loading restaurant data")?;

    let selection = args.selection.to_selection(dataset.index());
    let found = dataset.search(&selection);
    let projection = project_with(&found, &args.map.to_options());

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&projection).context("Serializing search results")?
        );
    }

    match &projection {
        Projection::NoResults => {
            if !args.json {
                eprintln!("{}", projection.summary());
            }
            Ok(ExitCode::RequestUnsatisfied)
        }
        Projection::Results { table, .. } => {
            if !args.json {
                println!("{}", projection.summary());
                print!("{}", render::table_text(table));
            }
            Ok(ExitCode::Ok)
        }
    }
}
