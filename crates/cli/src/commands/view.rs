use hk_veg_restaurants::{CENTER_LAT_OFFSET, CENTER_LON_OFFSET, INITIAL_ZOOM, MapOptions};

#[derive(clap::Args)]
pub struct MapArgs {
    /// Initial map zoom level
    #[arg(long, default_value_t = INITIAL_ZOOM)]
    pub zoom: u8,

    /// Added to the mean latitude when centring the map
    #[arg(long, default_value_t = CENTER_LAT_OFFSET, allow_hyphen_values = true)]
    pub lat_offset: f64,

    /// Subtracted from the mean longitude when centring the map
    #[arg(long, default_value_t = CENTER_LON_OFFSET, allow_hyphen_values = true)]
    pub lon_offset: f64,
}

impl MapArgs {
    pub fn to_options(&self) -> MapOptions {
        MapOptions {
            lat_offset: self.lat_offset,
            lon_offset: self.lon_offset,
            zoom: self.zoom,
        }
    }
}
