use std::str::FromStr;

use hk_veg_restaurants::{Region, RegionIndex, Selection};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

lazy_static! {
    static ref RE_DISTRICT_CHOICE: Regex = Regex::new(r"^\s*([^=]+?)\s*=\s*(.*?)\s*$").unwrap();
}

/// Districts chosen for one region, as given by `--district <region>=<d1>,<d2>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictChoice {
    pub region: Region,
    pub districts: Vec<String>,
}

pub fn parse_district_choice(raw: &str) -> Result<DistrictChoice, String> {
    let caps = RE_DISTRICT_CHOICE
        .captures(raw)
        .ok_or_else(|| format!("expected <region>=<district>[,<district>...], got {raw:?}"))?;

    let region =
        Region::from_str(&caps[1]).map_err(|_| format!("unknown region: {}", &caps[1]))?;
    let districts = caps[2]
        .split(',')
        .map(str::trim)
        .filter(|district| !district.is_empty())
        .map(str::to_string)
        .collect();

    Ok(DistrictChoice { region, districts })
}

#[derive(clap::Args)]
pub struct SelectionArgs {
    /// Choose every region and every district
    #[arg(long, conflicts_with_all = ["region", "district"])]
    pub all: bool,

    /// Choose a region. Without a matching --district it contributes nothing.
    #[arg(short, long)]
    pub region: Vec<Region>,

    /// Choose districts of a region, e.g. --district 港島=中環,灣仔
    #[arg(short, long, value_parser = parse_district_choice)]
    pub district: Vec<DistrictChoice>,
}

impl SelectionArgs {
    pub fn to_selection(&self, index: &RegionIndex) -> Selection {
        if self.all {
            return Selection::all(index);
        }

        let selection = self
            .region
            .iter()
            .fold(Selection::new(), |selection, region| {
                selection.choose(*region, Vec::<String>::new())
            });

        self.district.iter().fold(selection, |selection, choice| {
            for district in &choice.districts {
                if !index.contains(choice.region, district) {
                    warn!("No district {} under {}", district, choice.region);
                }
            }
            selection.choose(choice.region, choice.districts.iter().cloned())
        })
    }
}
