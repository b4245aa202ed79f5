use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// Top-level Hong Kong area. The declaration order is the fixed order used
/// when iterating regions or concatenating per-region results.
#[derive(
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    #[serde(rename = "港島")]
    #[strum(to_string = "港島", serialize = "hk-island", serialize = "hong-kong-island")]
    HongKongIsland,
    #[serde(rename = "九龍")]
    #[strum(to_string = "九龍", serialize = "kowloon")]
    Kowloon,
    #[serde(rename = "新界")]
    #[strum(to_string = "新界", serialize = "new-territories", serialize = "nt")]
    NewTerritories,
    #[serde(rename = "離島")]
    #[strum(to_string = "離島", serialize = "islands", serialize = "outlying-islands")]
    OutlyingIslands,
}

impl Region {
    /// Every region, in enumeration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::HongKongIsland,
            Self::Kowloon,
            Self::NewTerritories,
            Self::OutlyingIslands,
        ]
    }
}

/// One normalized row of the restaurant data set.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub region: Region,
    /// Sub-area name, unique only within `region`.
    pub district: String,
    pub name: String,
    pub cuisine: String,
    pub veg_type: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Review-site link, may be empty.
    pub info_url: String,
    /// `"XXXX XXXX"` form, or `None` when the source cell was empty.
    pub phone: Option<String>,
    /// `None` when the source cell was empty or a NaN marker.
    pub remarks: Option<String>,
}

impl RestaurantRecord {
    /// Remarks worth showing to the user, if any.
    #[must_use]
    pub fn visible_remarks(&self) -> Option<&str> {
        self.remarks.as_deref().filter(|remarks| !remarks.is_empty())
    }
}
