use std::{f64::consts::FRAC_PI_4, sync::Arc};

use geoutils::Location;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

use crate::Port;

static WEB_MERCATOR_EARTH_RADIUS: f64 = 6_378_137.0;
static WEB_MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Answers whether a position lies within the search area of a port.
///
/// Any coordinate system handling needed to answer the question lives behind this
/// trait, the temporal processing only ever sees the resulting matches.
pub trait Geofence: Send + Sync {
    fn contains(&self, port: &Port, latitude: f64, longitude: f64) -> bool;

    /// All ports whose search area contains the position, in the order they were given.
    fn ports_containing<'a>(
        &self,
        latitude: f64,
        longitude: f64,
        ports: &'a [Port],
    ) -> Vec<&'a Port> {
        ports
            .iter()
            .filter(|p| self.contains(p, latitude, longitude))
            .collect()
    }
}

impl<F> Geofence for F
where
    F: Fn(&Port, f64, f64) -> bool + Send + Sync,
{
    fn contains(&self, port: &Port, latitude: f64, longitude: f64) -> bool {
        self(port, latitude, longitude)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeofenceKind {
    #[default]
    Haversine,
    WebMercator,
}

impl GeofenceKind {
    pub fn geofence(self) -> Arc<dyn Geofence> {
        match self {
            GeofenceKind::Haversine => Arc::new(HaversineGeofence),
            GeofenceKind::WebMercator => Arc::new(WebMercatorGeofence),
        }
    }
}

/// Great-circle distance from the port location.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineGeofence;

impl Geofence for HaversineGeofence {
    fn contains(&self, port: &Port, latitude: f64, longitude: f64) -> bool {
        let center = Location::new(port.latitude, port.longitude);
        let position = Location::new(latitude, longitude);
        center.haversine_distance_to(&position).meters() <= port.radius_meters
    }
}

/// Planar distance between positions projected to web mercator (EPSG:3857) metres.
///
/// Projected distances grow with latitude, so the effective search area shrinks
/// away from the equator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercatorGeofence;

impl WebMercatorGeofence {
    pub fn project(latitude: f64, longitude: f64) -> (f64, f64) {
        let latitude = latitude.clamp(-WEB_MERCATOR_MAX_LATITUDE, WEB_MERCATOR_MAX_LATITUDE);
        let x = WEB_MERCATOR_EARTH_RADIUS * longitude.to_radians();
        let y = WEB_MERCATOR_EARTH_RADIUS * (FRAC_PI_4 + latitude.to_radians() / 2.0).tan().ln();
        (x, y)
    }
}

impl Geofence for WebMercatorGeofence {
    fn contains(&self, port: &Port, latitude: f64, longitude: f64) -> bool {
        let (px, py) = Self::project(port.latitude, port.longitude);
        let (x, y) = Self::project(latitude, longitude);
        (x - px).hypot(y - py) <= port.radius_meters
    }
}
