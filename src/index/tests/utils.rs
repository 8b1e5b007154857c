use crate::airport::AirportEntry;
use crate::index::AirportIndex;
use crate::record::DelayRecord;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub type Snapshot = Vec<(String, Vec<(String, i64)>)>;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn delay(airport: &str, airline: &str, minutes: i64) -> DelayRecord {
    DelayRecord {
        airport: id(airport),
        airline: id(airline),
        minutes,
    }
}

pub fn insert_all(index: &mut AirportIndex, codes: &[&str]) {
    codes.iter().for_each(|code| index.insert(code));
}

pub fn codes(index: &AirportIndex) -> Vec<String> {
    index.iter().map(|ap| ap.code().to_string()).collect()
}

/// Flattens a traversal into plain owned data for comparisons.
pub fn snapshot(index: &AirportIndex) -> Snapshot {
    index
        .iter()
        .map(|ap| {
            (
                ap.code().to_string(),
                ap.airlines()
                    .map(|a| (a.name().to_string(), a.total().0))
                    .collect(),
            )
        })
        .collect()
}

pub fn arb_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ATL".to_string()),
        Just("DEN".to_string()),
        Just("JFK".to_string()),
        Just("ORD".to_string()),
        Just("SFO".to_string()),
        "[A-Z]{3}",
    ]
}

pub fn arb_airline() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Alaska".to_string()),
        Just("Delta".to_string()),
        Just("United".to_string()),
        Just("JetBlue".to_string()),
    ]
}

pub fn lookup<'a>(index: &'a AirportIndex, code: &str) -> Option<&'a AirportEntry> {
    index.iter().find(|ap| &**ap.code() == code)
}
