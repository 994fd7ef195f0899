use serde::Deserialize;
use std::{io, path::Path};

/// One row of a route table file: `route_code,stop_sequence,stop_name`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteStop {
    pub route_code: String,
    pub stop_sequence: u32,
    pub stop_name: String,
}

pub fn deserialize_from_reader<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: serde::de::DeserializeOwned,
    R: io::Read,
{
    csv::Reader::from_reader(reader).deserialize().collect()
}

pub fn deserialize_from_path<T, P>(path: P) -> Result<Vec<T>, csv::Error>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    csv::Reader::from_path(path)?.deserialize().collect()
}
