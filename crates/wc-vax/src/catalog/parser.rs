use super::domain::{LocationId, VaccineType};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One catalog entry as read from an asset, before ids are assigned.
#[derive(Debug, Clone)]
pub(crate) struct LocationRecord {
    pub(crate) id: Option<LocationId>,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) title: String,
    pub(crate) vaccines: Vec<VaccineType>,
    pub(crate) phone_number: Option<String>,
    pub(crate) address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    latitude: f64,
    longitude: f64,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    vaccines: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(default)]
    id: Option<String>,
    latitude: f64,
    longitude: f64,
    title: String,
    #[serde(default)]
    vaccines: Vec<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

pub(crate) fn parse_csv_records<R: Read>(reader: R) -> Result<Vec<LocationRecord>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row?;
        let vaccines = match row.vaccines.as_deref() {
            Some(list) => parse_vaccines(&row.title, list.split(';'))?,
            None => Vec::new(),
        };

        records.push(LocationRecord {
            id: row.id.map(LocationId),
            latitude: row.latitude,
            longitude: row.longitude,
            title: row.title,
            vaccines,
            phone_number: row.phone_number,
            address: row.address,
        });
    }

    Ok(records)
}

pub(crate) fn parse_json_records<R: Read>(reader: R) -> Result<Vec<LocationRecord>, CatalogError> {
    let rows: Vec<JsonRow> = serde_json::from_reader(reader)?;

    rows.into_iter()
        .map(|row| {
            let vaccines = parse_vaccines(&row.title, row.vaccines.iter().map(String::as_str))?;
            Ok(LocationRecord {
                id: row.id.filter(|id| !id.trim().is_empty()).map(LocationId),
                latitude: row.latitude,
                longitude: row.longitude,
                title: row.title,
                vaccines,
                phone_number: non_blank(row.phone_number),
                address: non_blank(row.address),
            })
        })
        .collect()
}

fn parse_vaccines<'a, I>(title: &str, names: I) -> Result<Vec<VaccineType>, CatalogError>
where
    I: Iterator<Item = &'a str>,
{
    let mut vaccines = Vec::new();
    for name in names.map(str::trim).filter(|name| !name.is_empty()) {
        let vaccine = name
            .parse::<VaccineType>()
            .map_err(|source| CatalogError::UnknownVaccine {
                title: title.to_string(),
                source,
            })?;
        if !vaccines.contains(&vaccine) {
            vaccines.push(vaccine);
        }
    }
    Ok(vaccines)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
