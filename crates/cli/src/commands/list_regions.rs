use anyhow::Context;
use hk_veg_restaurants::Catalog;
use hk_veg_restaurants::render::pad;

use super::ExitCode;

const REGION_WIDTH: usize = 6;
const COUNT_WIDTH: usize = 9;

#[derive(clap::Args)]
pub struct Args {
    /// Hide regions that have no restaurants
    #[arg(long)]
    pub non_empty: bool,
}

pub async fn main(args: Args, catalog: &Catalog) -> anyhow::Result<ExitCode> {
    let dataset = catalog
        .ensure_loaded()
        .await
        .context("Loading restaurant data")?;

    println!(
        "{} | {} | {}",
        pad("Region", REGION_WIDTH),
        pad("Districts", COUNT_WIDTH),
        "Restaurants"
    );
    for (region, districts) in dataset.index().regions() {
        let restaurants = dataset
            .records()
            .iter()
            .filter(|record| record.region == region)
            .count();
        if args.non_empty && restaurants == 0 {
            continue;
        }
        println!(
            "{} | {} | {}",
            pad(region.as_ref(), REGION_WIDTH),
            pad(&districts.len().to_string(), COUNT_WIDTH),
            restaurants
        );
    }

    Ok(ExitCode::Ok)
}
