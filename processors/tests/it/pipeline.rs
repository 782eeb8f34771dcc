use std::sync::Arc;

use crate::helper::*;
use processors::*;
use voyage_core::{test_helper::*, *};

#[tokio::test]
async fn test_new_york_to_los_angeles_produces_one_voyage() {
    test(|helper| async move {
        let output = helper
            .run_pipeline(new_york_to_los_angeles(111), &test_ports())
            .await;

        assert_eq!(output.visits.len(), 2);
        assert_eq!(output.visits[0].port_name, "NewYorkPort");
        assert_eq!(output.visits[0].entry_time, hour(0));
        assert_eq!(output.visits[0].exit_time, hour(2));
        assert_eq!(output.visits[1].port_name, "LosAngelesPort");
        assert_eq!(output.visits[1].entry_time, hour(6));
        assert_eq!(output.visits[1].exit_time, hour(8));

        assert_eq!(output.voyages.len(), 1);
        let voyage = &output.voyages[0];
        assert_eq!(voyage.voyage_id, VoyageId::new(0));
        assert_eq!(voyage.departure_port, "NewYorkPort");
        assert_eq!(voyage.departure_time, hour(2));
        assert_eq!(voyage.arrival_port, "LosAngelesPort");
        assert_eq!(voyage.arrival_time, hour(6));
        assert_eq!(voyage.duration_hours, 4.0);
        assert_eq!(voyage.ping_count, 3);

        assert_eq!(output.labeled_pings.len(), 9);
        for ping in &output.labeled_pings[3..6] {
            assert_eq!(ping.current_port, None);
            assert_eq!(ping.origin_port.as_deref(), Some("NewYorkPort"));
            assert_eq!(ping.destination_port.as_deref(), Some("LosAngelesPort"));
            assert_eq!(ping.voyage_id, Some(VoyageId::new(0)));
        }
        assert!(output.overlaps.is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_pings_at_port_are_never_en_route() {
    test(|helper| async move {
        let output = helper
            .run_pipeline(new_york_to_los_angeles(111), &test_ports())
            .await;

        let at_port: Vec<_> = output
            .labeled_pings
            .iter()
            .filter(|p| p.current_port.is_some())
            .collect();
        assert_eq!(at_port.len(), 6);
        assert!(at_port.iter().all(|p| p.origin_port.is_none()
            && p.destination_port.is_none()
            && p.voyage_id.is_none()));
    })
    .await;
}

#[tokio::test]
async fn test_gap_larger_than_threshold_splits_visit() {
    test(|mut helper| async move {
        let pings = vec![
            Ping::test_new(111, 0, NEW_YORK, PORT_SPEED),
            Ping::test_new(111, 48, NEW_YORK, PORT_SPEED),
        ];

        helper.gap_threshold_hours(24);
        let output = helper.run_pipeline(pings.clone(), &test_ports()).await;
        assert_eq!(output.visits.len(), 2);
        assert!(output.visits.iter().all(|v| v.duration_hours == 0.0));

        helper.gap_threshold_hours(72);
        let output = helper.run_pipeline(pings, &test_ports()).await;
        assert_eq!(output.visits.len(), 1);
        assert_eq!(output.visits[0].duration_hours, 48.0);
    })
    .await;
}

#[tokio::test]
async fn test_visits_to_the_same_port_form_a_voyage() {
    test(|mut helper| async move {
        let mut pings = vec![
            Ping::test_new(111, 0, NEW_YORK, PORT_SPEED),
            Ping::test_at_sea(111, 24),
        ];
        pings.push(Ping::test_new(111, 48, NEW_YORK, PORT_SPEED));

        helper.gap_threshold_hours(24);
        let output = helper.run_pipeline(pings, &test_ports()).await;

        assert_eq!(output.voyages.len(), 1);
        assert_eq!(output.voyages[0].departure_port, "NewYorkPort");
        assert_eq!(output.voyages[0].arrival_port, "NewYorkPort");
        assert_eq!(output.voyages[0].ping_count, 1);
    })
    .await;
}

#[tokio::test]
async fn test_overlapping_visits_are_reported_and_skipped() {
    test(|helper| async move {
        let ports = vec![
            Port::new("Alpha", NEW_YORK.0, NEW_YORK.1, 10.0),
            Port::new("Beta", NEW_YORK.0, NEW_YORK.1, 10.0),
            Port::test_los_angeles(),
        ];

        let output = helper
            .run_pipeline(new_york_to_los_angeles(111), &ports)
            .await;

        assert_eq!(output.visits.len(), 3);
        assert_eq!(output.overlaps.len(), 1);
        assert_eq!(output.overlaps[0].departure_port, "Alpha");
        assert_eq!(output.overlaps[0].arrival_port, "Beta");

        assert_eq!(output.voyages.len(), 1);
        assert_eq!(output.voyages[0].departure_port, "Beta");
        assert_eq!(output.voyages[0].arrival_port, "LosAngelesPort");
        assert_eq!(output.voyages[0].voyage_id, VoyageId::new(0));
    })
    .await;
}

#[tokio::test]
async fn test_vessel_with_single_visit_has_no_voyage() {
    test(|helper| async move {
        let mut pings = hourly_pings(111, NEW_YORK, PORT_SPEED, 0, 3);
        pings.extend(hourly_pings(111, OPEN_SEA, SEA_SPEED, 3, 3));

        let output = helper.run_pipeline(pings, &test_ports()).await;

        assert_eq!(output.visits.len(), 1);
        assert!(output.voyages.is_empty());
        let last = output.labeled_pings.last().unwrap();
        assert_eq!(last.origin_port.as_deref(), Some("NewYorkPort"));
        assert_eq!(last.destination_port, None);
        assert_eq!(last.voyage_id, None);
    })
    .await;
}

#[tokio::test]
async fn test_fast_pings_inside_port_are_not_visits() {
    test(|helper| async move {
        let pings = hourly_pings(111, NEW_YORK, SEA_SPEED, 0, 5);

        let output = helper.run_pipeline(pings, &test_ports()).await;

        assert!(output.visits.is_empty());
        assert!(output.labeled_pings.iter().all(|p| p.is_at_sea()));
    })
    .await;
}

#[tokio::test]
async fn test_voyage_ids_follow_vessel_order_for_any_worker_count() {
    test(|mut helper| async move {
        let mut pings = Vec::new();
        for mmsi in [555, 111, 333, 222, 444] {
            pings.extend(new_york_to_los_angeles(mmsi));
        }

        helper.workers(1);
        let single = helper.run_pipeline(pings.clone(), &test_ports()).await;
        helper.workers(8);
        let parallel = helper.run_pipeline(pings, &test_ports()).await;

        assert_eq!(single, parallel);
        let order: Vec<_> = parallel
            .voyages
            .iter()
            .map(|v| (v.voyage_id.into_inner(), v.mmsi.into_inner()))
            .collect();
        assert_eq!(order, vec![(0, 111), (1, 222), (2, 333), (3, 444), (4, 555)]);
    })
    .await;
}

#[tokio::test]
async fn test_pipeline_matches_sequential_components() {
    test(|mut helper| async move {
        let mut pings = new_york_to_los_angeles(222);
        pings.extend(new_york_to_los_angeles(111));
        pings.extend(hourly_pings(111, NEW_YORK, PORT_SPEED, 30, 2));
        pings.push(Ping::test_at_sea(333, 1));

        let settings = &helper.settings;
        let filter = ProximityFilter::new(
            settings.proximity.geofence.geofence(),
            settings.proximity_config().unwrap(),
        );
        let candidates = filter.candidates(&pings, &test_ports());
        let visits = VisitSegmenter::new(settings.segmenter_config().unwrap()).segment(&candidates);
        let labeled = PingLabeler.label(&pings, &visits);
        let (labeled, table) = VoyageBuilder.build(labeled, &visits);

        helper.workers(3);
        let output = helper.run_pipeline(pings, &test_ports()).await;

        assert_eq!(output.visits, visits);
        assert_eq!(output.labeled_pings, labeled);
        assert_eq!(output.voyages, table.voyages);
        assert_eq!(output.overlaps, table.overlaps);
        assert_eq!(output.voyages.len(), 3);
    })
    .await;
}

#[tokio::test]
async fn test_port_calls_respect_minimum_stay() {
    test(|helper| async move {
        let mut pings = new_york_to_los_angeles(111);
        pings.push(Ping::test_new(222, 0, LOS_ANGELES, PORT_SPEED));

        let output = helper.run_pipeline(pings, &test_ports()).await;

        assert_eq!(
            output.port_calls,
            vec![
                PortCall {
                    mmsi: Mmsi::test_new(111),
                    port_name: "LosAngelesPort".into(),
                },
                PortCall {
                    mmsi: Mmsi::test_new(111),
                    port_name: "NewYorkPort".into(),
                },
            ]
        );
        assert!(
            output
                .port_call_counts
                .iter()
                .all(|c| c.port_call_count == 1)
        );
    })
    .await;
}

#[tokio::test]
async fn test_custom_geofence_predicate() {
    test(|helper| async move {
        let euclidean: Arc<dyn Geofence> = Arc::new(|port: &Port, latitude: f64, longitude: f64| {
            (port.latitude - latitude).hypot(port.longitude - longitude) < 0.01
        });
        let pipeline = VoyagePipeline::new(
            euclidean,
            helper.settings.proximity_config().unwrap(),
            helper.settings.segmenter_config().unwrap(),
            helper.settings.minimum_stay().unwrap(),
            2,
        );

        let output = pipeline
            .run(new_york_to_los_angeles(111), &test_ports())
            .await
            .unwrap();

        assert_eq!(output.visits.len(), 2);
        assert_eq!(output.voyages.len(), 1);
    })
    .await;
}
