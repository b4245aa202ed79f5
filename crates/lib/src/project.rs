use log::warn;
use serde::Serialize;

use crate::{Region, RestaurantRecord};

/// Initial zoom level of the map.
pub const INITIAL_ZOOM: u8 = 11;
/// Added to the mean latitude when centring the map.
pub const CENTER_LAT_OFFSET: f64 = 0.0;
/// Subtracted from the mean longitude when centring the map.
pub const CENTER_LON_OFFSET: f64 = 0.0;
/// Popup width in pixels, used as both minimum and maximum.
pub const POPUP_WIDTH: u32 = 300;

pub const NO_RESULTS_WARNING: &str = "找不到餐廳！";

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Marker appearance; the same for every restaurant.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub color: &'static str,
    pub icon: &'static str,
    pub prefix: &'static str,
}

pub const MARKER_STYLE: MarkerStyle = MarkerStyle {
    color: "green",
    icon: "utensils",
    prefix: "fa",
};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub lat_offset: f64,
    pub lon_offset: f64,
    pub zoom: u8,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            lat_offset: CENTER_LAT_OFFSET,
            lon_offset: CENTER_LON_OFFSET,
            zoom: INITIAL_ZOOM,
        }
    }
}

/// Table column headers, in column order.
pub const TABLE_HEADERS: [&str; 7] = [
    "香港地區",
    "地區",
    "餐廳名稱",
    "素食種類",
    "地址",
    "電話",
    "備註",
];

/// One table row. Cuisine, coordinates and the review link stay out of the
/// table; the popups still show cuisine.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableRow<'a> {
    pub region: Region,
    pub district: &'a str,
    pub name: &'a str,
    pub veg_type: &'a str,
    pub address: &'a str,
    pub phone: Option<&'a str>,
    pub remarks: Option<&'a str>,
}

impl TableRow<'_> {
    /// Cells in [`TABLE_HEADERS`] order, missing values as empty strings.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.region.as_ref(),
            self.district,
            self.name,
            self.veg_type,
            self.address,
            self.phone.unwrap_or_default(),
            self.remarks.unwrap_or_default(),
        ]
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TableView<'a> {
    pub rows: Vec<TableRow<'a>>,
}

/// Popup content, independent of any markup.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Popup<'a> {
    pub district: &'a str,
    pub name: &'a str,
    pub cuisine: &'a str,
    pub veg_type: &'a str,
    pub address: &'a str,
    /// Map search link for the restaurant position.
    pub map_link: String,
    /// Review-site link; `None` when the record has none.
    pub info_link: Option<&'a str>,
    pub phone: Option<&'a str>,
    /// Only set when the record carries non-empty remarks.
    pub remarks: Option<&'a str>,
}

impl Popup<'_> {
    pub fn header(&self) -> String {
        format!("{} - {}", self.district, self.name)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker<'a> {
    pub position: LatLng,
    pub title: &'a str,
    pub popup: Popup<'a>,
    pub style: MarkerStyle,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MapView<'a> {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<Marker<'a>>,
}

/// What a front end should draw for one filtered record set.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Projection<'a> {
    NoResults,
    Results {
        table: TableView<'a>,
        map: MapView<'a>,
    },
}

impl Projection<'_> {
    pub fn len(&self) -> usize {
        match self {
            Projection::NoResults => 0,
            Projection::Results { table, .. } => table.rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::NoResults)
    }

    /// Result count line, or the warning shown when nothing matched.
    pub fn summary(&self) -> String {
        match self {
            Projection::NoResults => NO_RESULTS_WARNING.to_string(),
            Projection::Results { table, .. } => {
                format!("（找到{}個結果）", table.rows.len())
            }
        }
    }
}

pub fn project<'a>(records: &[&'a RestaurantRecord]) -> Projection<'a> {
    project_with(records, &MapOptions::default())
}

pub fn project_with<'a>(
    records: &[&'a RestaurantRecord],
    options: &MapOptions,
) -> Projection<'a> {
    let Some(mean) = mean_position(records) else {
        warn!("project: no restaurants matched the selection");
        return Projection::NoResults;
    };

    let table = TableView {
        rows: records.iter().copied().map(table_row).collect(),
    };
    let map = MapView {
        center: LatLng {
            latitude: mean.latitude + options.lat_offset,
            longitude: mean.longitude - options.lon_offset,
        },
        zoom: options.zoom,
        markers: records.iter().copied().map(marker).collect(),
    };

    Projection::Results { table, map }
}

/// Mean position of `records`; `None` for an empty slice.
fn mean_position(records: &[&RestaurantRecord]) -> Option<LatLng> {
    if records.is_empty() {
        return None;
    }
    let count = records.len() as f64;
    let (lat_sum, lon_sum) = records.iter().fold((0.0, 0.0), |(lat, lon), record| {
        (lat + record.latitude, lon + record.longitude)
    });
    Some(LatLng {
        latitude: lat_sum / count,
        longitude: lon_sum / count,
    })
}

fn table_row(record: &RestaurantRecord) -> TableRow<'_> {
    TableRow {
        region: record.region,
        district: &record.district,
        name: &record.name,
        veg_type: &record.veg_type,
        address: &record.address,
        phone: record.phone.as_deref(),
        remarks: record.remarks.as_deref(),
    }
}

pub fn map_search_link(position: LatLng) -> String {
    format!(
        "{MAP_SEARCH_URL}{},{}",
        position.latitude, position.longitude
    )
}

fn marker(record: &RestaurantRecord) -> Marker<'_> {
    let position = LatLng {
        latitude: record.latitude,
        longitude: record.longitude,
    };
    let info_link = Some(record.info_url.trim()).filter(|url| !url.is_empty());

    Marker {
        position,
        title: &record.name,
        popup: Popup {
            district: &record.district,
            name: &record.name,
            cuisine: &record.cuisine,
            veg_type: &record.veg_type,
            address: &record.address,
            map_link: map_search_link(position),
            info_link,
            phone: record.phone.as_deref(),
            remarks: record.visible_remarks(),
        },
        style: MARKER_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, name: &str, latitude: f64, longitude: f64) -> RestaurantRecord {
        RestaurantRecord {
            region: Region::HongKongIsland,
            district: district.to_string(),
            name: name.to_string(),
            cuisine: "中菜".to_string(),
            veg_type: "全素".to_string(),
            address: "中環士丹利街10號".to_string(),
            latitude,
            longitude,
            info_url: "https://www.openrice.com/r-1".to_string(),
            phone: Some("2810 1234".to_string()),
            remarks: None,
        }
    }

    #[test]
    fn empty_input_signals_no_results() {
        let projection = project(&[]);
        assert_eq!(projection, Projection::NoResults);
        assert!(projection.is_empty());
        assert_eq!(projection.summary(), NO_RESULTS_WARNING);
    }

    #[test]
    fn centres_map_on_mean_position() {
        let a = record("中環", "甲", 22.0, 114.0);
        let b = record("灣仔", "乙", 22.4, 114.4);
        let Projection::Results { map, table } = project(&[&a, &b]) else {
            panic!("expected results");
        };
        assert!((map.center.latitude - 22.2).abs() < 1e-9);
        assert!((map.center.longitude - 114.2).abs() < 1e-9);
        assert_eq!(map.zoom, INITIAL_ZOOM);
        assert_eq!(map.markers.len(), 2);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn applies_centre_offsets() {
        let a = record("中環", "甲", 22.0, 114.0);
        let options = MapOptions {
            lat_offset: 0.5,
            lon_offset: 0.25,
            zoom: 13,
        };
        let Projection::Results { map, .. } = project_with(&[&a], &options) else {
            panic!("expected results");
        };
        assert!((map.center.latitude - 22.5).abs() < 1e-9);
        assert!((map.center.longitude - 113.75).abs() < 1e-9);
        assert_eq!(map.zoom, 13);
    }

    #[test]
    fn table_rows_drop_map_only_fields() {
        let a = record("中環", "甲", 22.28, 114.15);
        let Projection::Results { table, .. } = project(&[&a]) else {
            panic!("expected results");
        };
        assert_eq!(
            table.rows[0].cells(),
            ["港島", "中環", "甲", "全素", "中環士丹利街10號", "2810 1234", ""]
        );
        let json = serde_json::to_value(&table.rows[0]).unwrap();
        assert!(json.get("cuisine").is_none());
        assert!(json.get("latitude").is_none());
        assert!(json.get("infoUrl").is_none());
    }

    #[test]
    fn popup_carries_links_and_optional_remarks() {
        let mut a = record("中環", "甲", 22.28, 114.15);
        let b = record("灣仔", "乙", 22.27, 114.17);
        a.remarks = Some("逢星期一休息".to_string());
        a.info_url = String::new();

        let Projection::Results { map, .. } = project(&[&a, &b]) else {
            panic!("expected results");
        };
        let first = &map.markers[0].popup;
        assert_eq!(first.header(), "中環 - 甲");
        assert_eq!(first.cuisine, "中菜");
        assert_eq!(
            first.map_link,
            "https://www.google.com/maps/search/?api=1&query=22.28,114.15"
        );
        assert_eq!(first.info_link, None);
        assert_eq!(first.remarks, Some("逢星期一休息"));

        let second = &map.markers[1].popup;
        assert_eq!(second.info_link, Some("https://www.openrice.com/r-1"));
        assert_eq!(second.remarks, None);
        assert_eq!(map.markers[1].style, MARKER_STYLE);
    }

    #[test]
    fn summary_counts_results() {
        let a = record("中環", "甲", 22.28, 114.15);
        assert_eq!(project(&[&a]).summary(), "（找到1個結果）");
    }
}
