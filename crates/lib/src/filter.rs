use std::collections::{BTreeMap, BTreeSet};

use crate::{Region, RegionIndex, RestaurantRecord};

/// The user's choice of regions and, per chosen region, of districts.
///
/// A region is chosen once it has an entry, even an empty one. Choosing a
/// region without districts selects nothing from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    regions: BTreeMap<Region, BTreeSet<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every region and every district the index offers.
    pub fn all(index: &RegionIndex) -> Self {
        index
            .regions()
            .fold(Self::new(), |selection, (region, districts)| {
                selection.choose(region, districts.iter().cloned())
            })
    }

    /// Chooses `region` and adds `districts` to its chosen set.
    #[must_use]
    pub fn choose<I, S>(mut self, region: Region, districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions
            .entry(region)
            .or_default()
            .extend(districts.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn is_chosen(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    /// Chosen districts of `region`, or `None` when the region is not chosen.
    pub fn districts(&self, region: Region) -> Option<&BTreeSet<String>> {
        self.regions.get(&region)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.regions.keys().copied()
    }
}

/// Records matching `selection`, concatenated in region enumeration order and
/// in source order within a region.
pub fn filter<'a>(
    records: &'a [RestaurantRecord],
    selection: &Selection,
) -> Vec<&'a RestaurantRecord> {
    Region::all()
        .iter()
        .filter_map(|region| selection.districts(*region).map(|chosen| (*region, chosen)))
        .flat_map(|(region, chosen)| {
            records
                .iter()
                .filter(move |record| record.region == region && chosen.contains(&record.district))
        })
        .collect()
}
