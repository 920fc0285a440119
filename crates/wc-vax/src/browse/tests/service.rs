use super::common::*;
use std::sync::Arc;

use crate::browse::region::{MapRegion, DEFAULT_CENTER};
use crate::browse::repository::RepositoryError;
use crate::browse::screen::{BrowseError, FilterAction, Screen};
use crate::browse::service::{BrowseService, BrowseServiceError};
use crate::browse::session::SessionId;
use crate::catalog::{Catalog, Coordinate, LocationId, VaccineType};

fn toggle(vaccine: VaccineType) -> FilterAction {
    FilterAction::Toggle { vaccine }
}

#[test]
fn open_session_starts_with_every_type_on_both_screens() {
    let (service, repository) = build_service();
    let session = service.open_session().expect("session opens");

    assert_eq!(repository.len(), 1);
    assert!(session.session_id.0.starts_with("session-"));
    assert!(session.map.filters.is_all());
    assert!(session.list.filters.is_all());
    assert_eq!(session.map.visible_count, 10);
    assert_eq!(session.list.visible_count, 10);
    assert_eq!(
        session.map.region,
        Some(MapRegion::default_region(DEFAULT_CENTER))
    );
    assert!(session.list.region.is_none());
}

#[test]
fn map_and_list_filters_are_independent() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;

    service
        .apply_filter(&id, Screen::Map, FilterAction::Clear)
        .expect("clear map");
    let map = service
        .apply_filter(&id, Screen::Map, toggle(VaccineType::Pfizer))
        .expect("toggle pfizer");
    assert_eq!(map.visible_count, 1);
    assert_eq!(map.locations[0].title, "Reid Health-Richmond");

    let list = service.screen_view(&id, Screen::List).expect("list view");
    assert!(list.filters.is_all());
    assert_eq!(list.visible_count, 10);
}

#[test]
fn deselecting_moderna_keeps_locations_that_also_offer_jj() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;

    let list = service
        .apply_filter(&id, Screen::List, toggle(VaccineType::Moderna))
        .expect("toggle moderna");
    let titles: Vec<&str> = list.locations.iter().map(|loc| loc.title.as_str()).collect();
    assert!(!titles.contains(&"Meijer"));
    assert!(titles.contains(&"Midtown MediCenter Pharmacy"));
    assert_eq!(list.visible_count, 9);

    let restored = service
        .apply_filter(&id, Screen::List, toggle(VaccineType::Moderna))
        .expect("toggle moderna back");
    assert!(restored.filters.is_all());
    assert_eq!(restored.visible_count, 10);
}

#[test]
fn selection_survives_until_filters_change() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;
    let walgreens = LocationId::from("loc-006");

    let map = service
        .select_location(&id, &walgreens)
        .expect("select walgreens");
    let selected = map.selected.expect("detail shown");
    assert_eq!(selected.title, "Walgreens");
    assert_eq!(selected.vaccines.len(), 2);
    assert_eq!(selected.vaccines[0].status, "In Stock");
    let walgreens_coordinate = Coordinate::new(39.8316, -84.85104);
    assert_eq!(map.region, Some(MapRegion::for_selection(walgreens_coordinate)));

    let map = service.screen_view(&id, Screen::Map).expect("map view");
    assert!(map.selected.is_some());

    let map = service
        .apply_filter(&id, Screen::Map, FilterAction::SelectAll)
        .expect("select all");
    assert!(map.selected.is_none());
}

#[test]
fn selecting_a_filtered_out_location_is_rejected() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;
    service
        .apply_filter(&id, Screen::Map, FilterAction::Clear)
        .expect("clear");

    let error = service
        .select_location(&id, &LocationId::from("loc-001"))
        .expect_err("hidden location");
    assert!(matches!(
        error,
        BrowseServiceError::Browse(BrowseError::NotVisible(_))
    ));
}

#[test]
fn first_position_fix_centers_once() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;

    let first = Coordinate::new(39.8301, -84.8902);
    let update = service.report_position(&id, first).expect("first fix");
    assert!(update.recentered);
    assert_eq!(update.map.region, Some(MapRegion::centered_on(first)));

    let second = Coordinate::new(39.81, -85.16);
    let update = service.report_position(&id, second).expect("second fix");
    assert!(!update.recentered);
    assert_eq!(update.map.region, Some(MapRegion::centered_on(first)));
    assert_eq!(update.map.user_position, Some(second));

    let update = service.recenter(&id).expect("recenter");
    assert!(update.recentered);
    assert_eq!(update.map.region, Some(MapRegion::centered_on(second)));
}

#[test]
fn unavailable_position_falls_back_to_default_region() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;

    let update = service.position_unavailable(&id).expect("fallback");
    assert!(!update.recentered);
    assert_eq!(
        update.map.region,
        Some(MapRegion::default_region(DEFAULT_CENTER))
    );
    assert_eq!(update.map.visible_count, 10);

    let update = service.recenter(&id).expect("recenter");
    assert!(!update.recentered);
}

#[test]
fn configured_default_center_is_used() {
    let center = Coordinate::new(39.8167, -85.155);
    let service = BrowseService::new(
        Arc::new(Catalog::builtin()),
        Arc::new(MemoryRepository::default()),
        center,
    );
    let session = service.open_session().expect("session opens");
    assert_eq!(session.map.region, Some(MapRegion::default_region(center)));
}

#[test]
fn location_detail_respects_screen_filters() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;
    let meijer = LocationId::from("loc-004");

    service
        .apply_filter(&id, Screen::List, toggle(VaccineType::Moderna))
        .expect("toggle");
    assert!(matches!(
        service.location_detail(&id, Screen::List, &meijer),
        Err(BrowseServiceError::Browse(BrowseError::NotVisible(_)))
    ));

    let detail = service
        .location_detail(&id, Screen::Map, &meijer)
        .expect("visible on map");
    assert_eq!(detail.address, "3100 E Main St, Richmond, IN 47374");
    assert_eq!(detail.phone_number.as_deref(), Some("7659621200"));
}

#[test]
fn unknown_session_is_not_found() {
    let (service, _) = build_service();
    let error = service
        .screen_view(&SessionId("session-missing".to_string()), Screen::Map)
        .expect_err("missing session");
    assert!(matches!(
        error,
        BrowseServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn repository_failures_surface_as_errors() {
    let service = BrowseService::new(
        Arc::new(Catalog::builtin()),
        Arc::new(UnavailableRepository),
        DEFAULT_CENTER,
    );
    assert!(matches!(
        service.open_session(),
        Err(BrowseServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[test]
fn concurrent_toggles_on_one_session_are_all_applied() {
    // Odd round count leaves both types selected when no toggle is lost.
    const ROUNDS: usize = 1001;

    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;
    service
        .apply_filter(&id, Screen::List, FilterAction::Clear)
        .expect("clear list");

    std::thread::scope(|scope| {
        for vaccine in [VaccineType::Moderna, VaccineType::Pfizer] {
            let service = &service;
            let id = &id;
            scope.spawn(move || {
                for _ in 0..ROUNDS {
                    service
                        .apply_filter(id, Screen::List, toggle(vaccine))
                        .expect("toggle applies");
                }
            });
        }
    });

    let list = service.screen_view(&id, Screen::List).expect("list view");
    assert_eq!(
        list.filters.iter().collect::<Vec<_>>(),
        [VaccineType::Moderna, VaccineType::Pfizer]
    );
}

#[test]
fn failed_gesture_leaves_session_unchanged() {
    let (service, _) = build_service();
    let id = service.open_session().expect("session opens").session_id;
    service
        .report_position(&id, Coordinate::new(39.85, -84.88))
        .expect("first fix");

    service
        .report_position(&id, Coordinate::new(120.0, -84.88))
        .expect_err("out of range");

    let map = service.screen_view(&id, Screen::Map).expect("map view");
    assert_eq!(map.user_position, Some(Coordinate::new(39.85, -84.88)));
}

#[test]
fn gestures_on_unknown_session_are_not_found() {
    let (service, repository) = build_service();
    let error = service
        .apply_filter(
            &SessionId("session-missing".to_string()),
            Screen::List,
            FilterAction::Clear,
        )
        .expect_err("missing session");
    assert!(matches!(
        error,
        BrowseServiceError::Repository(RepositoryError::NotFound)
    ));
    assert_eq!(repository.len(), 0);
}
