use crate::minutes::Minutes;
use std::sync::Arc;

pub type AirlineName = Arc<str>;

/// Running delay total for one airline at one airport.
#[derive(Clone, Debug, PartialEq)]
pub struct DelayAccumulator {
    name: AirlineName,
    total: Minutes,
}

impl DelayAccumulator {
    pub fn new(name: AirlineName) -> DelayAccumulator {
        DelayAccumulator {
            name,
            total: Minutes::default(),
        }
    }

    pub fn name(&self) -> &AirlineName {
        &self.name
    }

    pub fn total(&self) -> Minutes {
        self.total
    }

    /// Adds `minutes` to the total. Zero and negative values are accepted as-is.
    pub fn add(&mut self, minutes: i64) {
        self.total += minutes;
    }
}
