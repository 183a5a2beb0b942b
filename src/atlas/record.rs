/// One volcano as decoded from the record source. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub name: String,
    pub country: String,
    pub volcano_type: String,
    pub type_category: String,
    pub status: String,
    pub last_eruption: String,
}

impl PointRecord {
    /// Records with a non-finite coordinate or elevation are neither drawn nor hit tested.
    pub fn is_plottable(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.elevation.is_finite()
    }

    pub fn elevation_label(&self) -> String {
        format!("{}m", self.elevation)
    }
}
