mod tree;

pub use tree::AirportIndex;
