use crate::accumulator::{AirlineName, DelayAccumulator};
use crate::minutes::Minutes;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type AirportCode = Arc<str>;

/// Payload of one index node: an airport and the airlines reported there.
#[derive(Clone, Debug, PartialEq)]
pub struct AirportEntry {
    code: AirportCode,
    airlines: BTreeMap<AirlineName, DelayAccumulator>,
}

impl AirportEntry {
    pub fn new(code: AirportCode) -> AirportEntry {
        AirportEntry {
            code,
            airlines: BTreeMap::new(),
        }
    }

    pub fn code(&self) -> &AirportCode {
        &self.code
    }

    /// Finds the accumulator for `name`, creating an empty one on first sight.
    pub fn airline_mut(&mut self, name: &str) -> &mut DelayAccumulator {
        self.airlines
            .entry(Arc::from(name))
            .or_insert_with_key(|name| DelayAccumulator::new(name.clone()))
    }

    /// Airlines in ascending name order.
    pub fn airlines(&self) -> impl Iterator<Item = &DelayAccumulator> {
        self.airlines.values()
    }

    pub fn total_minutes(&self) -> Minutes {
        self.airlines.values().map(|a| a.total()).sum()
    }
}

impl fmt::Display for AirportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
