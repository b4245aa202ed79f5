use std::path::PathBuf;

use anyhow::Context;
use hk_veg_restaurants::render::{self, ContactForm, PageContext};
use hk_veg_restaurants::{Catalog, project_with};
use log::info;

use super::ExitCode;
use super::selection::SelectionArgs;
use super::view::MapArgs;

#[derive(clap::Args)]
pub struct Args {
    /// Where to write the HTML page
    #[arg(short, long)]
    out: PathBuf,

    /// Form relay endpoint the contact form posts to. Omit to leave the form out.
    #[arg(long)]
    contact_endpoint: Option<String>,

    #[command(flatten)]
    selection: SelectionArgs,

    #[command(flatten)]
    map: MapArgs,
}

pub async fn main(args: Args, catalog: &Catalog) -> anyhow::Result<ExitCode> {
    let dataset = catalog
        .ensure_loaded()
        .await
        .context("Loading restaurant data")?;

    let selection = args.selection.to_selection(dataset.index());
    let found = dataset.search(&selection);
    let projection = project_with(&found, &args.map.to_options());

    let contact = args
        .contact_endpoint
        .map(|endpoint| ContactForm { endpoint });
    let html = render::page_html(&PageContext {
        projection: &projection,
        contact: contact.as_ref(),
    })
    .context("Rendering page")?;

    tokio::fs::write(&args.out, html)
        .await
        .with_context(|| format!("Writing page to {}", args.out.display()))?;
    info!("Wrote {} ({})", args.out.display(), projection.summary());

    if projection.is_empty() {
        Ok(ExitCode::RequestUnsatisfied)
    } else {
        Ok(ExitCode::Ok)
    }
}
