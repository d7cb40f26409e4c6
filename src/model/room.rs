use serde::Serialize;
use std::collections::BTreeMap;

/// Nightly price table keyed by room type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomRates {
    rates: BTreeMap<String, u64>,
}

impl RoomRates {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        RoomRates { rates: pairs.into_iter().collect() }
    }

    pub fn get(&self, room_type: &str) -> Option<u64> {
        self.rates.get(room_type).copied()
    }

    /// Unknown room types are priced at 0.
    pub fn price_for(&self, room_type: &str) -> u64 {
        self.get(room_type).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for RoomRates {
    fn default() -> Self {
        RoomRates::from_pairs([
            ("ac".to_string(), 2000),
            ("nonac".to_string(), 1000),
        ])
    }
}
