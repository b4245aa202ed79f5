use anyhow::Context;
use hk_veg_restaurants::render::pad;
use hk_veg_restaurants::{Catalog, Region};

use super::ExitCode;

// Region names are two CJK characters, so "Region" is the widest cell.
const REGION_WIDTH: usize = 6;

#[derive(clap::Args)]
pub struct Args {
    /// Only list the districts of this region
    #[arg(short, long)]
    pub region: Option<Region>,
}

pub async fn main(args: Args, catalog: &Catalog) -> anyhow::Result<ExitCode> {
    let dataset = catalog
        .ensure_loaded()
        .await
        .context("Loading restaurant data")?;

    println!("{} | {}", pad("Region", REGION_WIDTH), "District");
    for (region, districts) in dataset.index().regions() {
        if args.region.is_some_and(|wanted| wanted != region) {
            continue;
        }
        for district in districts {
            println!("{} | {}", pad(region.as_ref(), REGION_WIDTH), district);
        }
    }

    Ok(ExitCode::Ok)
}
