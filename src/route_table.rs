use itertools::Itertools;
use log::{debug, info, warn};
use std::{collections::HashMap, path::Path, str::FromStr, sync::Arc};

use crate::{data::*, error::TableError, records};

/// Route table compiled into the binary.
pub const DEFAULT_ROUTES_CSV: &str = include_str!("../data/routes.csv");

/// Immutable mapping from route code to its ordered stops. Stops with the same
/// name are the same `Arc<Stop>` across routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    pub stops: HashMap<String, Arc<Stop>>,
    pub routes: HashMap<RouteCode, Vec<Arc<Stop>>>,
}

impl RouteTable {
    pub fn embedded() -> Result<Self, TableError> {
        let rows = records::deserialize_from_reader::<records::RouteStop, _>(
            DEFAULT_ROUTES_CSV.as_bytes(),
        )?;
        let table = Self::try_from(rows)?;
        info!("Loaded {} embedded routes", table.routes.len());
        Ok(table)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let rows = records::deserialize_from_path::<records::RouteStop, _>(&path)?;
        let table = Self::try_from(rows)?;
        info!(
            "Loaded {} routes from {}",
            table.routes.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub fn get(&self, code: &RouteCode) -> Option<&[Arc<Stop>]> {
        self.routes.get(code).map(Vec::as_slice)
    }

    pub fn codes(&self) -> Vec<&RouteCode> {
        self.routes.keys().sorted().collect()
    }

    /// Looks up a single code. Codes missing from the table resolve to a route
    /// without stops rather than an error.
    pub fn resolve(&self, code: RouteCode) -> ResolvedRoute {
        let stops = match self.get(&code) {
            Some(stops) => stops.to_vec(),
            None => {
                warn!("Route {} is not in the route table", code);
                Vec::default()
            }
        };

        ResolvedRoute { code, stops }
    }

    pub fn resolve_all(&self, codes: Vec<RouteCode>) -> Vec<ResolvedRoute> {
        codes.into_iter().map(|code| self.resolve(code)).collect()
    }
}

impl TryFrom<Vec<records::RouteStop>> for RouteTable {
    type Error = TableError;

    fn try_from(rows: Vec<records::RouteStop>) -> Result<Self, Self::Error> {
        let mut table = RouteTable::default();

        for (route_code, mut rows) in rows
            .into_iter()
            .map(|row| (row.route_code.to_owned(), row))
            .into_group_map()
        {
            let code = RouteCode::from_str(&route_code)?;

            rows.sort_by_key(|row| row.stop_sequence);
            if let Some((row, _)) = rows
                .iter()
                .tuple_windows()
                .find(|(a, b)| a.stop_sequence == b.stop_sequence)
            {
                return Err(TableError::DuplicateStopSequence {
                    route_code,
                    stop_sequence: row.stop_sequence,
                });
            }

            let stops = rows
                .into_iter()
                .map(|row| {
                    let name = row.stop_name;
                    Arc::clone(
                        table
                            .stops
                            .entry(name.to_owned())
                            .or_insert_with(|| Arc::new(Stop { name })),
                    )
                })
                .collect::<Vec<_>>();

            debug!("Route {} has {} stops", code, stops.len());
            table.routes.insert(code, stops);
        }

        Ok(table)
    }
}
