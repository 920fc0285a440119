use std::sync::Arc;
use wc_vax::catalog::{
    visible_locations, Catalog, Coordinate, FilterSet, LocationFilterStore, LocationId,
    VaccineLocation, VaccineType,
};

fn location(id: &str, vaccines: &[VaccineType]) -> VaccineLocation {
    VaccineLocation {
        id: LocationId::from(id),
        coordinate: Coordinate::new(39.84, -84.89),
        title: id.to_string(),
        vaccines: vaccines.to_vec(),
        phone_number: None,
        address: None,
    }
}

fn scenario() -> Arc<Catalog> {
    let catalog = Catalog::new(vec![
        location("A", &[VaccineType::Moderna, VaccineType::JohnsonJohnson]),
        location("B", &[VaccineType::Pfizer]),
        location("C", &[]),
    ])
    .expect("valid catalog");
    Arc::new(catalog)
}

fn ids(visible: &[&VaccineLocation]) -> Vec<String> {
    visible.iter().map(|loc| loc.id.to_string()).collect()
}

fn every_filter_set() -> Vec<FilterSet> {
    (0..1u8 << VaccineType::ALL.len())
        .map(|mask| {
            VaccineType::ALL
                .into_iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, vaccine)| vaccine)
                .collect()
        })
        .collect()
}

#[test]
fn visible_subset_preserves_catalog_order_for_every_filter() {
    let catalog = Catalog::builtin();
    for filters in every_filter_set() {
        let visible = visible_locations(catalog.locations(), &filters);
        let positions: Vec<usize> = visible
            .iter()
            .map(|loc| {
                catalog
                    .locations()
                    .iter()
                    .position(|candidate| candidate.id == loc.id)
                    .expect("visible entry comes from catalog")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(visible
            .iter()
            .all(|loc| loc.vaccines.iter().any(|v| filters.contains(*v))));
    }
}

#[test]
fn store_walks_through_the_filter_scenario() {
    let mut store = LocationFilterStore::new(scenario());
    assert_eq!(ids(&store.visible()), ["A", "B"]);

    store.clear();
    store.toggle(VaccineType::Moderna);
    assert_eq!(ids(&store.visible()), ["A"]);

    store.toggle(VaccineType::Moderna);
    store.toggle(VaccineType::Pfizer);
    store.toggle(VaccineType::JohnsonJohnson);
    assert_eq!(ids(&store.visible()), ["A", "B"]);

    store.clear();
    assert!(store.visible().is_empty());

    store.select_all();
    assert_eq!(store.filters(), &FilterSet::all());
}

#[test]
fn toggling_moderna_off_keeps_a_while_jj_is_selected() {
    let mut store = LocationFilterStore::new(scenario());
    store.toggle(VaccineType::Moderna);
    assert_eq!(ids(&store.visible()), ["A", "B"]);

    store.toggle(VaccineType::JohnsonJohnson);
    assert_eq!(ids(&store.visible()), ["B"]);
}

#[test]
fn independent_stores_share_a_catalog_but_not_filters() {
    let catalog = scenario();
    let mut map = LocationFilterStore::new(catalog.clone());
    let list = LocationFilterStore::new(catalog);

    map.clear();
    assert!(map.visible().is_empty());
    assert_eq!(ids(&list.visible()), ["A", "B"]);
}

#[test]
fn builtin_pfizer_and_jj_filters() {
    let catalog = Catalog::builtin();

    let pfizer: FilterSet = [VaccineType::Pfizer].into_iter().collect();
    let visible = visible_locations(catalog.locations(), &pfizer);
    assert_eq!(ids(&visible), ["loc-003"]);

    let jj: FilterSet = [VaccineType::JohnsonJohnson].into_iter().collect();
    let visible = visible_locations(catalog.locations(), &jj);
    assert_eq!(visible.len(), 9);
    assert!(visible.iter().all(|loc| loc.title != "Meijer"));
}
