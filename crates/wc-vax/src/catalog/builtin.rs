use super::domain::VaccineType::{self, JohnsonJohnson, Moderna, Pfizer};
use super::domain::{Coordinate, LocationId, VaccineLocation};

struct Provider {
    latitude: f64,
    longitude: f64,
    title: &'static str,
    vaccines: &'static [VaccineType],
    phone_number: &'static str,
    address: &'static str,
}

// Wayne County, Indiana providers shipped with the app.
const PROVIDERS: [Provider; 10] = [
    Provider {
        latitude: 39.828500,
        longitude: -84.890140,
        title: "Midtown MediCenter Pharmacy",
        vaccines: &[Moderna, JohnsonJohnson],
        phone_number: "7659628000",
        address: "1401 Chester Blvd, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.828650,
        longitude: -84.893540,
        title: "Wayne County Health Department",
        vaccines: &[Moderna, JohnsonJohnson],
        phone_number: "7659357650",
        address: "401 E Main St, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.862750,
        longitude: -84.883750,
        title: "Reid Health-Richmond",
        vaccines: &[Moderna, Pfizer, JohnsonJohnson],
        phone_number: "7659833561",
        address: "1100 Reid Pkwy, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.868110,
        longitude: -84.885950,
        title: "Meijer",
        vaccines: &[Moderna],
        phone_number: "7659621200",
        address: "3100 E Main St, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.826670,
        longitude: -84.853290,
        title: "Walmart",
        vaccines: &[JohnsonJohnson],
        phone_number: "7659398311",
        address: "4300 S 7th St, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.831600,
        longitude: -84.851040,
        title: "Walgreens",
        vaccines: &[Moderna, JohnsonJohnson],
        phone_number: "7659622631",
        address: "901 National Rd W, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.829300,
        longitude: -84.850660,
        title: "Kroger Pharmacy",
        vaccines: &[Moderna, JohnsonJohnson],
        phone_number: "7659628900",
        address: "2350 Chester Blvd, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.862360,
        longitude: -84.889590,
        title: "CVS Pharmacy-Richmond",
        vaccines: &[JohnsonJohnson],
        phone_number: "7659668400",
        address: "1201 E Main St, Richmond, IN 47374",
    },
    Provider {
        latitude: 39.816650,
        longitude: -85.154970,
        title: "CVS Pharmacy-Cambridge City",
        vaccines: &[JohnsonJohnson],
        phone_number: "7654785100",
        address: "110 S Foote St, Cambridge City, IN 47327",
    },
    Provider {
        latitude: 39.813690,
        longitude: -85.171120,
        title: "MediCenter Pharmacy Alt.",
        vaccines: &[JohnsonJohnson],
        phone_number: "7654785678",
        address: "Cambridge City Health Center, IN 47327",
    },
];

pub(crate) fn locations() -> Vec<VaccineLocation> {
    PROVIDERS
        .iter()
        .enumerate()
        .map(|(position, provider)| VaccineLocation {
            id: LocationId::from_position(position),
            coordinate: Coordinate::new(provider.latitude, provider.longitude),
            title: provider.title.to_string(),
            vaccines: provider.vaccines.to_vec(),
            phone_number: Some(provider.phone_number.to_string()),
            address: Some(provider.address.to_string()),
        })
        .collect()
}
