use std::collections::HashMap;

use super::model::{GeoPoint, StationCoordinate};

/// Coordinates of the main UK stations appearing in the ticket data.
pub const UK_STATIONS: &[StationCoordinate] = &[
    station("London Euston", 51.5281, -0.1337),
    station("London Kings Cross", 51.5308, -0.1238),
    station("London Paddington", 51.5154, -0.1754),
    station("London St Pancras", 51.5315, -0.1263),
    station("Manchester Piccadilly", 53.4774, -2.2304),
    station("Liverpool Lime Street", 53.4070, -2.9779),
    station("Birmingham New Street", 52.4778, -1.8986),
    station("York", 53.9576, -1.0930),
    station("Reading", 51.4580, -0.9732),
    station("Oxford", 51.7548, -1.2683),
    station("Edinburgh Waverley", 55.9521, -3.1890),
    station("Bristol Temple Meads", 51.4490, -2.5810),
];

const fn station(name: &'static str, latitude: f64, longitude: f64) -> StationCoordinate {
    StationCoordinate {
        name,
        latitude,
        longitude,
    }
}

/// Lookup table: station name → coordinates. Names are unique, matching is
/// exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct StationTable {
    by_name: HashMap<&'static str, GeoPoint>,
}

impl StationTable {
    pub fn new(stations: &[StationCoordinate]) -> Self {
        let by_name = stations.iter().map(|s| (s.name, s.point())).collect();
        StationTable { by_name }
    }

    /// The built-in table of UK stations.
    pub fn uk() -> Self {
        Self::new(UK_STATIONS)
    }

    pub fn lookup(&self, name: &str) -> Option<GeoPoint> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uk_table_has_unique_names() {
        let table = StationTable::uk();
        assert_eq!(table.len(), UK_STATIONS.len());
    }

    #[test]
    fn lookup_is_exact() {
        let table = StationTable::uk();
        let york = table.lookup("York").unwrap();
        assert_eq!(york, GeoPoint { lat: 53.9576, lon: -1.0930 });
        assert!(table.lookup("york").is_none());
        assert!(table.lookup("York ").is_none());
        assert!(table.lookup("Leeds").is_none());
    }
}
