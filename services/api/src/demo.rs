use crate::infra::{load_config_and_catalog, parse_vaccine};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use wc_vax::browse::{FilterAction, ListScreen, MapRegion, MapScreen};
use wc_vax::catalog::{
    summaries, visible_locations, Catalog, Coordinate, FilterSet, LocationDetail, LocationId,
    VaccineLocation, VaccineType,
};
use wc_vax::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct LocationsArgs {
    /// Vaccine type to include (repeatable). Defaults to every type.
    #[arg(long, value_parser = parse_vaccine)]
    pub(crate) vaccine: Vec<VaccineType>,
    /// Deselect every vaccine type (prints an empty list).
    #[arg(long, conflicts_with = "vaccine")]
    pub(crate) none: bool,
    /// CSV or JSON catalog to read instead of the bundled list
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Emit the visible locations as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl LocationsArgs {
    fn filters(&self) -> FilterSet {
        if self.none {
            FilterSet::empty()
        } else if self.vaccine.is_empty() {
            FilterSet::all()
        } else {
            self.vaccine.iter().copied().collect()
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Location identifier, e.g. loc-001
    pub(crate) location_id: String,
    /// CSV or JSON catalog to read instead of the bundled list
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV or JSON catalog to read instead of the bundled list
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Simulated first position fix as "latitude,longitude"
    #[arg(long, value_parser = parse_position)]
    pub(crate) position: Option<Coordinate>,
}

pub(crate) fn run_locations(args: LocationsArgs) -> Result<(), AppError> {
    let (_, catalog) = load_config_and_catalog(args.catalog.clone())?;
    let filters = args.filters();
    let visible = visible_locations(catalog.locations(), &filters);

    if args.json {
        match serde_json::to_string_pretty(&summaries(visible)) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Location payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!("Filters: {}", describe_filters(&filters));
    if visible.is_empty() {
        println!("No locations match the selected vaccines");
        return Ok(());
    }
    for location in visible {
        render_row(location);
    }
    Ok(())
}

pub(crate) fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let (_, catalog) = load_config_and_catalog(args.catalog)?;
    let id = LocationId(args.location_id);
    let location = catalog
        .find(&id)
        .ok_or_else(|| AppError::LocationNotFound(id.clone()))?;
    render_detail(&LocationDetail::from(location));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (config, catalog) = load_config_and_catalog(args.catalog)?;
    let catalog = Arc::new(catalog);
    let mut list = ListScreen::new(catalog.clone());
    let mut map = MapScreen::new(catalog.clone(), config.map.default_center);

    println!("WC Vax demo ({} providers)", catalog.len());

    println!("\nList screen");
    render_list(&list);

    list.apply(FilterAction::Clear);
    list.apply(FilterAction::Toggle {
        vaccine: VaccineType::Pfizer,
    });
    println!("\nList screen after selecting only Pfizer");
    render_list(&list);

    list.apply(FilterAction::SelectAll);
    println!(
        "\nList screen after Select All: {} locations",
        list.visible().len()
    );

    println!("\nMap screen");
    println!("  Region: {}", describe_region(&map.region()));
    match args.position {
        Some(position) => match map.apply_position_fix(position) {
            Ok(true) => println!("  Centered on first fix {}", position),
            Ok(false) => println!("  Position {} recorded", position),
            Err(err) => println!("  Position rejected: {}", err),
        },
        None => {
            map.position_unavailable();
            println!("  Location services unavailable, keeping the default region");
        }
    }
    println!("  Region: {}", describe_region(&map.region()));
    println!(
        "  Markers: {} (list filters are independent: {})",
        map.visible().len(),
        describe_filters(list.filters())
    );

    map.apply(FilterAction::Toggle {
        vaccine: VaccineType::Moderna,
    });
    println!(
        "\nMap after hiding Moderna: {} markers",
        map.visible().len()
    );

    let first = map.visible().first().map(|location| location.id.clone());
    if let Some(id) = first {
        match map.select(&id) {
            Ok(location) => {
                println!("  Selected {}", location.title);
                render_detail(&LocationDetail::from(location));
            }
            Err(err) => println!("  Selection failed: {}", err),
        }
        println!("  Region: {}", describe_region(&map.region()));
        map.dismiss_detail();
    }

    if map.recenter() {
        println!("\nRecentered on {}", describe_region(&map.region()));
    } else {
        println!("\nRecenter skipped: no known position");
    }

    Ok(())
}

fn render_list(list: &ListScreen) {
    println!("  Filters: {}", describe_filters(list.filters()));
    let visible = list.visible();
    if visible.is_empty() {
        println!("  No locations match the selected vaccines");
    }
    for location in visible {
        render_row(location);
    }
}

fn render_row(location: &VaccineLocation) {
    println!(
        "  - [{}] {} | {} | {}",
        location.id,
        location.title,
        location.subtitle(),
        location.address_label()
    );
}

fn render_detail(detail: &LocationDetail) {
    println!("{}", detail.title);
    println!("  Address: {}", detail.address);
    if let Some(phone) = &detail.phone_number {
        println!("  Phone: {}", phone);
    }
    println!("  Coordinates: {:.6}, {:.6}", detail.latitude, detail.longitude);
    println!("  Vaccines:");
    for badge in &detail.vaccines {
        println!("    {} ({}) - {}", badge.label, badge.color, badge.status);
    }
}

fn describe_filters(filters: &FilterSet) -> String {
    if filters.is_empty() {
        return "none".to_string();
    }
    filters
        .iter()
        .map(VaccineType::label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_region(region: &MapRegion) -> String {
    format!(
        "{} (span {:.2} x {:.2})",
        region.center, region.span.latitude_delta, region.span.longitude_delta
    )
}

fn parse_position(raw: &str) -> Result<Coordinate, String> {
    let (latitude, longitude) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected 'latitude,longitude', got '{raw}'"))?;
    let latitude = latitude
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid latitude '{latitude}' ({err})"))?;
    let longitude = longitude
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid longitude '{longitude}' ({err})"))?;
    Ok(Coordinate::new(latitude, longitude))
}
