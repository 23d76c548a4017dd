//! Trolley and stop registry.
//!
//! Two maps kept in step: trolley -> its route, stop -> trolleys serving it
//! (in creation order). Routes are immutable once registered.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

/// Rejected registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrolleyError {
    #[error("Trolley {0} already exists")]
    AlreadyExists(String),
    #[error("Trolley {0} needs at least one stop")]
    EmptyRoute(String),
}

/// Answer to "which trolleys serve this stop".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopLookup<'a> {
    /// No stop has been registered at all.
    NoStops,
    /// The stop is unknown.
    Unknown,
    /// Trolleys serving the stop, in creation order.
    Served(&'a [String]),
}

/// Answer to "what are the transfers along this trolley's route".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteLookup<'a> {
    /// No trolley has been registered at all.
    NoTrolleys,
    /// The trolley is unknown.
    Unknown,
    /// Each stop of the route with the other trolleys serving it.
    Transfers(Vec<(&'a str, Vec<&'a str>)>),
}

/// Bidirectional trolley/stop index.
#[derive(Debug, Clone, Default)]
pub struct TrolleyRegistry {
    trolleys: BTreeMap<String, Vec<String>>,
    stops: BTreeMap<String, Vec<String>>,
}

impl TrolleyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a trolley with its route.
    pub fn create(&mut self, name: &str, route: &[&str]) -> Result<(), TrolleyError> {
        if route.is_empty() {
            return Err(TrolleyError::EmptyRoute(name.to_string()));
        }
        if self.trolleys.contains_key(name) {
            return Err(TrolleyError::AlreadyExists(name.to_string()));
        }

        for stop in route {
            let serving = self.stops.entry((*stop).to_string()).or_default();
            // a route visiting a stop twice still lists the trolley once
            if !serving.iter().any(|t| t == name) {
                serving.push(name.to_string());
            }
        }
        self.trolleys.insert(
            name.to_string(),
            route.iter().map(|s| (*s).to_string()).collect(),
        );
        debug!(trolley = name, stops = route.len(), "trolley registered");
        Ok(())
    }

    /// Trolleys passing through `stop`.
    pub fn trolleys_at(&self, stop: &str) -> StopLookup<'_> {
        if self.stops.is_empty() {
            return StopLookup::NoStops;
        }
        match self.stops.get(stop) {
            Some(serving) => StopLookup::Served(serving),
            None => StopLookup::Unknown,
        }
    }

    /// Route of `trolley` with transfer options at each stop.
    pub fn transfers(&self, trolley: &str) -> RouteLookup<'_> {
        if self.trolleys.is_empty() {
            return RouteLookup::NoTrolleys;
        }
        let Some(route) = self.trolleys.get(trolley) else {
            return RouteLookup::Unknown;
        };

        let transfers = route
            .iter()
            .map(|stop| {
                let others: Vec<&str> = self
                    .stops
                    .get(stop)
                    .into_iter()
                    .flatten()
                    .filter(|t| *t != trolley)
                    .map(String::as_str)
                    .collect();
                (stop.as_str(), others)
            })
            .collect();
        RouteLookup::Transfers(transfers)
    }

    /// All trolleys ordered by name, with their routes.
    pub fn all(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.trolleys
            .iter()
            .map(|(name, route)| (name.as_str(), route.as_slice()))
    }

    /// Whether a trolley is registered.
    pub fn has_trolley(&self, name: &str) -> bool {
        self.trolleys.contains_key(name)
    }

    /// Whether any trolley serves `stop`.
    pub fn has_stop(&self, stop: &str) -> bool {
        self.stops.contains_key(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrolleyRegistry {
        let mut reg = TrolleyRegistry::new();
        reg.create("t1", &["Central", "Park", "Depot"]).unwrap();
        reg.create("t2", &["Park", "Harbor"]).unwrap();
        reg.create("t0", &["Harbor", "Central"]).unwrap();
        reg
    }

    #[test]
    fn test_empty_registry() {
        let reg = TrolleyRegistry::new();
        assert_eq!(reg.trolleys_at("Park"), StopLookup::NoStops);
        assert_eq!(reg.transfers("t1"), RouteLookup::NoTrolleys);
        assert_eq!(reg.all().count(), 0);
    }

    #[test]
    fn test_trolleys_at_keeps_creation_order() {
        let reg = sample();
        match reg.trolleys_at("Central") {
            StopLookup::Served(t) => assert_eq!(t, ["t1", "t0"]),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(reg.trolleys_at("Nowhere"), StopLookup::Unknown);
    }

    #[test]
    fn test_transfers() {
        let reg = sample();
        let RouteLookup::Transfers(route) = reg.transfers("t1") else {
            panic!("t1 should exist");
        };
        assert_eq!(
            route,
            vec![
                ("Central", vec!["t0"]),
                ("Park", vec!["t2"]),
                ("Depot", vec![]),
            ]
        );
        assert_eq!(reg.transfers("t9"), RouteLookup::Unknown);
    }

    #[test]
    fn test_all_sorted_by_name() {
        let reg = sample();
        let names: Vec<&str> = reg.all().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn test_create_rejections() {
        let mut reg = sample();
        assert_eq!(
            reg.create("t1", &["Elsewhere"]),
            Err(TrolleyError::AlreadyExists("t1".into()))
        );
        assert!(!reg.has_stop("Elsewhere"));
        assert_eq!(
            reg.create("t5", &[]),
            Err(TrolleyError::EmptyRoute("t5".into()))
        );
        assert!(!reg.has_trolley("t5"));
    }

    #[test]
    fn test_repeated_stop_listed_once() {
        let mut reg = TrolleyRegistry::new();
        reg.create("loop", &["A", "B", "A"]).unwrap();
        assert_eq!(reg.trolleys_at("A"), StopLookup::Served(&["loop".to_string()]));
    }
}
