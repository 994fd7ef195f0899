use regex::Regex;
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use crate::error::{FinderError, TableError};

static ROUTE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9]{2}[A-Z]$").expect("route code regex is valid"));

static QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[0-9]{2}[A-Z](,[0-9]{2}[A-Z])*$").expect("query regex is valid")
});

/// Two ASCII digits followed by one uppercase ASCII letter, e.g. `01A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteCode(String);

impl RouteCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(code: &str) -> bool {
        ROUTE_CODE_REGEX.is_match(code)
    }
}

impl FromStr for RouteCode {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(TableError::InvalidRouteCode {
                route_code: s.to_owned(),
            })
        }
    }
}

impl fmt::Display for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True iff `query` is a comma separated, non-empty list of route codes.
/// Whitespace and stray commas are rejected.
pub fn is_valid_query(query: &str) -> bool {
    QUERY_REGEX.is_match(query)
}

/// Splits a submission into its route codes, keeping order and duplicates.
pub fn parse_query(query: &str) -> Result<Vec<RouteCode>, FinderError> {
    if !is_valid_query(query) {
        return Err(FinderError::InvalidFormat {
            input: query.to_owned(),
        });
    }

    Ok(query
        .split(',')
        .map(|code| RouteCode(code.to_owned()))
        .collect())
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Stop {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub code: RouteCode,
    pub stops: Vec<Arc<Stop>>,
}

impl ResolvedRoute {
    #[cfg(test)]
    pub fn stop_names(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.name.as_str()).collect()
    }
}

/// Route indices (positions within one submission) that contain each stop.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SharedStops(pub HashMap<Arc<Stop>, BTreeSet<usize>>);

impl SharedStops {
    pub fn from_routes(routes: &[ResolvedRoute]) -> Self {
        let mut shared = Self::default();

        for (route_index, route) in routes.iter().enumerate() {
            for stop in &route.stops {
                shared
                    .0
                    .entry(Arc::clone(stop))
                    .or_default()
                    .insert(route_index);
            }
        }

        shared
    }

    pub fn routes_for(&self, stop: &Stop) -> Option<&BTreeSet<usize>> {
        self.0.get(stop)
    }

    pub fn is_shared(&self, stop: &Stop) -> bool {
        self.routes_for(stop)
            .is_some_and(|route_indices| route_indices.len() > 1)
    }

    pub fn highlight(&self, stop: &Stop, route_index: usize) -> Highlight {
        match self.routes_for(stop) {
            Some(route_indices) if route_indices.len() > 1 => {
                if route_indices.first() == Some(&route_index) {
                    Highlight::Primary
                } else {
                    Highlight::Secondary
                }
            }
            _ => Highlight::Default,
        }
    }
}

/// Styling of one stop occurrence. The lowest route index holding a shared
/// stop gets `Primary`, every later one gets `Secondary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Default,
    Primary,
    Secondary,
}

impl Highlight {
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Highlight::Default => None,
            Highlight::Primary => Some("yellow"),
            Highlight::Secondary => Some("green"),
        }
    }
}
