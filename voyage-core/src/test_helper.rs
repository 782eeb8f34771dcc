use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::*;

pub const NEW_YORK: (f64, f64) = (40.7, -74.0);
pub const LOS_ANGELES: (f64, f64) = (33.7, -118.2);
pub const OPEN_SEA: (f64, f64) = (35.0, -100.0);

pub const PORT_SPEED: f64 = 0.5;
pub const SEA_SPEED: f64 = 10.0;

/// Fixed origin all test timestamps are offset from.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

pub fn hour(h: i64) -> DateTime<Utc> {
    base_time() + Duration::hours(h)
}

/// `n` pings one hour apart at a fixed position, starting at `start_hour`.
pub fn hourly_pings(
    mmsi: i32,
    (latitude, longitude): (f64, f64),
    speed_over_ground: f64,
    start_hour: i64,
    n: i64,
) -> Vec<Ping> {
    (start_hour..start_hour + n)
        .map(|h| Ping::test_new(mmsi, h, (latitude, longitude), speed_over_ground))
        .collect()
}

/// New York for three hours, at sea for three hours, then Los Angeles for three hours.
pub fn new_york_to_los_angeles(mmsi: i32) -> Vec<Ping> {
    let mut pings = hourly_pings(mmsi, NEW_YORK, PORT_SPEED, 0, 3);
    pings.extend(hourly_pings(mmsi, OPEN_SEA, SEA_SPEED, 3, 3));
    pings.extend(hourly_pings(mmsi, LOS_ANGELES, PORT_SPEED, 6, 3));
    pings
}

pub fn test_ports() -> Vec<Port> {
    vec![Port::test_new_york(), Port::test_los_angeles()]
}

impl Mmsi {
    pub fn test_new(mmsi: i32) -> Self {
        Self::new(mmsi)
    }
}

impl Ping {
    pub fn test_new(
        mmsi: i32,
        h: i64,
        (latitude, longitude): (f64, f64),
        speed_over_ground: f64,
    ) -> Self {
        Self {
            mmsi: Mmsi::new(mmsi),
            timestamp: hour(h),
            latitude,
            longitude,
            speed_over_ground,
        }
    }

    pub fn test_at_sea(mmsi: i32, h: i64) -> Self {
        Self::test_new(mmsi, h, OPEN_SEA, SEA_SPEED)
    }
}

impl RawPing {
    pub fn test_default() -> Self {
        Self {
            mmsi: Some("111".to_string()),
            base_date_time: Some("2025-01-01T00:00:00".to_string()),
            latitude: Some(NEW_YORK.0.to_string()),
            longitude: Some(NEW_YORK.1.to_string()),
            sog: Some(PORT_SPEED.to_string()),
        }
    }
}

impl Port {
    pub fn test_new_york() -> Self {
        Self::new("NewYorkPort", NEW_YORK.0, NEW_YORK.1, 10.0)
    }

    pub fn test_los_angeles() -> Self {
        Self::new("LosAngelesPort", LOS_ANGELES.0, LOS_ANGELES.1, 10.0)
    }
}

impl CandidateMatch {
    pub fn test_new(mmsi: i32, h: i64, port_name: &str) -> Self {
        Self {
            mmsi: Mmsi::new(mmsi),
            timestamp: hour(h),
            port_name: port_name.to_string(),
        }
    }
}

impl Visit {
    pub fn test_new(mmsi: i32, port_name: &str, entry_hour: i64, exit_hour: i64) -> Self {
        Self::new(Mmsi::new(mmsi), port_name, hour(entry_hour), hour(exit_hour))
    }
}

impl LabeledPing {
    pub fn test_at_port(mmsi: i32, h: i64, port_name: &str) -> Self {
        Self::at_port(
            Ping::test_new(mmsi, h, NEW_YORK, PORT_SPEED),
            port_name.to_string(),
        )
    }

    pub fn test_at_sea(mmsi: i32, h: i64) -> Self {
        Self::at_sea(Ping::test_at_sea(mmsi, h), None, None)
    }
}
