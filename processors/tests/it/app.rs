use std::fs;

use crate::helper::*;
use processors::{
    Error,
    settings::{Environment, Settings},
    table::{LABELED_PINGS_FILE, OVERLAPS_FILE, PORT_CALL_COUNTS_FILE, VISITS_FILE, VOYAGES_FILE},
};
use voyage_core::{
    ConfigurationError, PingField, Port, PortDefinition, RawPing, ValidationError,
    test_helper::*,
};

#[tokio::test]
async fn test_app_writes_all_tables() {
    test(|helper| async move {
        helper.write_pings(&new_york_to_los_angeles(111));
        helper.write_ports(&test_ports());

        let output = helper.run_app().await.unwrap();
        assert_eq!(output.voyages.len(), 1);

        let voyages = fs::read_to_string(helper.output_file(VOYAGES_FILE)).unwrap();
        assert_eq!(
            voyages.lines().collect::<Vec<_>>(),
            vec![
                "voyage_id,mmsi,departure_port,departure_time,arrival_port,arrival_time,duration_hours,ping_count",
                "0,111,NewYorkPort,2025-01-01T02:00:00Z,LosAngelesPort,2025-01-01T06:00:00Z,4.0,3",
            ]
        );

        let visits = fs::read_to_string(helper.output_file(VISITS_FILE)).unwrap();
        assert_eq!(visits.lines().count(), 3);

        let labeled = fs::read_to_string(helper.output_file(LABELED_PINGS_FILE)).unwrap();
        assert_eq!(labeled.lines().count(), 10);

        let counts = fs::read_to_string(helper.output_file(PORT_CALL_COUNTS_FILE)).unwrap();
        assert_eq!(
            counts.lines().collect::<Vec<_>>(),
            vec![
                "port_name,port_call_count",
                "NewYorkPort,1",
                "LosAngelesPort,1"
            ]
        );

        let overlaps: serde_json::Value =
            serde_json::from_slice(&fs::read(helper.output_file(OVERLAPS_FILE)).unwrap()).unwrap();
        assert_eq!(overlaps, serde_json::json!([]));
    })
    .await;
}

#[tokio::test]
async fn test_app_rejects_batch_with_missing_field() {
    test(|helper| async move {
        helper.write_raw_pings([
            RawPing::test_default(),
            RawPing {
                sog: None,
                ..RawPing::test_default()
            },
        ]);
        helper.write_ports(&test_ports());

        let err = helper.run_app().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation {
                source: ValidationError::MissingPingField { index: 1, .. },
                ..
            }
        ));
        assert!(!helper.output_exists());
    })
    .await;
}

#[tokio::test]
async fn test_app_rejects_non_numeric_coordinate_as_invalid_field() {
    test(|helper| async move {
        helper.write_raw_pings([
            RawPing::test_default(),
            RawPing {
                latitude: Some("abc".into()),
                ..RawPing::test_default()
            },
        ]);
        helper.write_ports(&test_ports());

        let err = helper.run_app().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation {
                source: ValidationError::InvalidPingField {
                    index: 1,
                    field: PingField::Latitude,
                    ..
                },
                ..
            }
        ));
    })
    .await;
}

#[tokio::test]
async fn test_app_rejects_invalid_thresholds_before_reading_input() {
    test(|mut helper| async move {
        helper.settings.proximity.max_speed_knots = -1.0;

        let err = helper.run_app().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Configuration {
                source: ConfigurationError::NonPositive { .. },
                ..
            }
        ));
    })
    .await;
}

#[tokio::test]
async fn test_app_accepts_dms_ports_with_default_radius() {
    test(|mut helper| async move {
        helper.gap_threshold_hours(12);
        helper.write_pings(&new_york_to_los_angeles(111));
        helper.write_port_definitions([
            PortDefinition {
                port_name: Some("NewYorkPort".into()),
                latitude: Some("40°42'00\"N".into()),
                longitude: Some("74°00'00\"W".into()),
                radius_nm: None,
            },
            PortDefinition {
                port_name: Some("LosAngelesPort".into()),
                latitude: Some("33.7".into()),
                longitude: Some("-118.2".into()),
                radius_nm: Some("5.0".into()),
            },
        ]);

        let output = helper.run_app().await.unwrap();

        assert_eq!(output.visits.len(), 2);
        assert_eq!(output.voyages[0].departure_port, "NewYorkPort");
    })
    .await;
}

#[tokio::test]
async fn test_app_rejects_duplicate_ports() {
    test(|helper| async move {
        helper.write_pings(&new_york_to_los_angeles(111));
        helper.write_ports(&[Port::test_new_york(), Port::test_new_york()]);

        let err = helper.run_app().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation {
                source: ValidationError::DuplicatePort { .. },
                ..
            }
        ));
    })
    .await;
}

#[tokio::test]
async fn test_app_reports_missing_input_file() {
    test(|helper| async move {
        let err = helper.run_app().await.unwrap_err();
        assert!(matches!(err, Error::Csv { .. }));
    })
    .await;
}

#[test]
fn test_settings_load_from_test_config() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.environment, Environment::Test);
    assert!(settings.proximity_config().is_ok());
    assert!(settings.segmenter_config().is_ok());
    assert!(settings.minimum_stay().is_ok());
}
