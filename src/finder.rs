use log::debug;
use std::sync::Arc;

use crate::{data::*, error::FinderError, route_table::RouteTable};

/// Form state for route lookups: the current query plus the outcome of the
/// last submission. Only one of `routes` and `error` is ever populated.
#[derive(Debug)]
pub struct RouteFinder {
    pub table: Arc<RouteTable>,

    input: String,
    routes: Vec<ResolvedRoute>,
    error: Option<FinderError>,
}

impl RouteFinder {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            input: String::default(),
            routes: Vec::default(),
            error: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn submit(&mut self) -> Result<&[ResolvedRoute], FinderError> {
        self.routes.clear();
        self.error = None;

        debug!("Submitting {:?}", self.input);
        let codes = parse_query(&self.input).inspect_err(|err| {
            self.error = Some(err.clone());
        })?;

        self.routes = self.table.resolve_all(codes);
        let shared = self.shared_stops();
        debug!(
            "Resolved {} routes with {} shared stops",
            self.routes.len(),
            shared.0.keys().filter(|stop| shared.is_shared(stop)).count()
        );
        Ok(&self.routes)
    }

    pub fn routes(&self) -> &[ResolvedRoute] {
        &self.routes
    }

    pub fn error(&self) -> Option<&FinderError> {
        self.error.as_ref()
    }

    /// Recomputed from the current routes on every call.
    pub fn shared_stops(&self) -> SharedStops {
        SharedStops::from_routes(&self.routes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeSet;

    fn finder() -> RouteFinder {
        RouteFinder::new(Arc::new(RouteTable::embedded().unwrap()))
    }

    fn stop(name: &str) -> Stop {
        Stop {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_single_route() {
        let mut finder = finder();
        finder.set_input("01A");
        let routes = finder.submit().unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].code.as_str(), "01A");
        assert_eq!(
            routes[0].stop_names(),
            vec!["Alpha", "Bravo", "Charlie", "Echo", "Golf"]
        );
        assert_eq!(finder.error(), None);
    }

    #[test]
    fn test_two_routes_share_stops() {
        let mut finder = finder();
        finder.set_input("01A,02B");
        finder.submit().unwrap();
        let shared = finder.shared_stops();

        for name in ["Alpha", "Echo", "Golf"] {
            assert_eq!(
                shared.routes_for(&stop(name)),
                Some(&BTreeSet::from([0, 1]))
            );
        }
        for name in ["Bravo", "Charlie", "Delta", "Foxtrot"] {
            assert!(!shared.is_shared(&stop(name)), "{name} is not shared");
        }
        assert_eq!(shared.highlight(&stop("Alpha"), 0), Highlight::Primary);
        assert_eq!(shared.highlight(&stop("Alpha"), 1), Highlight::Secondary);
    }

    #[test]
    fn test_unknown_code_is_not_an_error() {
        let mut finder = finder();
        finder.set_input("99Z");
        let routes = finder.submit().unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].code.as_str(), "99Z");
        assert!(routes[0].stops.is_empty());
        assert_eq!(finder.error(), None);
    }

    #[test]
    fn test_invalid_input_sets_error_and_no_routes() {
        for input in ["", "01A,", "01a", "01A, 02B"] {
            let mut finder = finder();
            finder.set_input(input);

            assert_eq!(
                finder.submit().unwrap_err(),
                FinderError::InvalidFormat {
                    input: input.to_string()
                }
            );
            assert!(finder.routes().is_empty());
            assert!(finder.error().is_some());
        }
    }

    #[test]
    fn test_invalid_submission_clears_previous_routes() {
        let mut finder = finder();
        finder.set_input("01A,02B");
        finder.submit().unwrap();
        assert_eq!(finder.routes().len(), 2);

        finder.set_input("01A,,02B");
        assert!(finder.submit().is_err());
        assert!(finder.routes().is_empty());
        assert!(finder.shared_stops().0.is_empty());

        finder.set_input("XYZ");
        assert!(finder.submit().is_err());
        assert!(finder.routes().is_empty());
    }

    #[test]
    fn test_valid_submission_clears_previous_error() {
        let mut finder = finder();
        finder.set_input("bad");
        assert!(finder.submit().is_err());

        finder.set_input("03C");
        finder.submit().unwrap();
        assert_eq!(finder.error(), None);
        assert_eq!(finder.routes().len(), 1);
        assert_eq!(finder.input(), "03C");
    }
}
