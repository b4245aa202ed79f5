use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Region, RestaurantRecord};

/// Districts found under each region, in first-seen order. Every region has
/// an entry, even when no record belongs to it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegionIndex {
    districts: BTreeMap<Region, Vec<String>>,
}

impl RegionIndex {
    pub fn build(records: &[RestaurantRecord]) -> Self {
        let mut districts: BTreeMap<Region, Vec<String>> = Region::all()
            .iter()
            .map(|region| (*region, Vec::new()))
            .collect();

        for record in records {
            let known = districts.entry(record.region).or_default();
            if !known.contains(&record.district) {
                known.push(record.district.clone());
            }
        }

        Self { districts }
    }

    /// Districts of `region`; empty when the region has no records.
    pub fn districts(&self, region: Region) -> &[String] {
        self.districts
            .get(&region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Regions and their districts, in enumeration order.
    pub fn regions(&self) -> impl Iterator<Item = (Region, &[String])> {
        self.districts
            .iter()
            .map(|(region, districts)| (*region, districts.as_slice()))
    }

    pub fn contains(&self, region: Region, district: &str) -> bool {
        self.districts(region).iter().any(|known| known == district)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: Region, district: &str) -> RestaurantRecord {
        RestaurantRecord {
            region,
            district: district.to_string(),
            name: format!("{district}素食"),
            cuisine: String::new(),
            veg_type: String::new(),
            address: String::new(),
            latitude: 22.3,
            longitude: 114.2,
            info_url: String::new(),
            phone: None,
            remarks: None,
        }
    }

    #[test]
    fn every_region_has_an_entry() {
        let index = RegionIndex::build(&[]);
        let regions: Vec<Region> = index.regions().map(|(region, _)| region).collect();
        assert_eq!(regions, Region::all());
        assert!(index.districts(Region::OutlyingIslands).is_empty());
    }

    #[test]
    fn districts_are_distinct_in_first_seen_order() {
        let records = [
            record(Region::Kowloon, "油麻地"),
            record(Region::HongKongIsland, "中環"),
            record(Region::Kowloon, "旺角"),
            record(Region::Kowloon, "油麻地"),
            record(Region::HongKongIsland, "灣仔"),
        ];
        let index = RegionIndex::build(&records);
        assert_eq!(index.districts(Region::Kowloon), ["油麻地", "旺角"]);
        assert_eq!(index.districts(Region::HongKongIsland), ["中環", "灣仔"]);
        assert!(index.districts(Region::NewTerritories).is_empty());
    }

    #[test]
    fn district_membership_is_per_region() {
        let index = RegionIndex::build(&[record(Region::NewTerritories, "沙田")]);
        assert!(index.contains(Region::NewTerritories, "沙田"));
        assert!(!index.contains(Region::Kowloon, "沙田"));
    }
}
