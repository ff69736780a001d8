use super::model::{Column, EnrichedRecord, GeoPoint, TicketDataset};
use super::stations::StationTable;

/// Attach departure and arrival coordinates to every record.
///
/// Left outer join on station name: records whose station is unknown keep
/// `None` for that side and are never dropped. A side is skipped entirely
/// when the dataset has no column for it.
pub fn geo_join(dataset: &TicketDataset, stations: &StationTable) -> Vec<EnrichedRecord> {
    let join_departure = dataset.columns.contains(Column::DepartureStation);
    let join_arrival = dataset.columns.contains(Column::ArrivalDestination);

    dataset
        .records
        .iter()
        .map(|ticket| {
            let departure = if join_departure {
                ticket
                    .departure_station
                    .as_deref()
                    .and_then(|name| stations.lookup(name))
            } else {
                None
            };
            let arrival = if join_arrival {
                ticket
                    .arrival_destination
                    .as_deref()
                    .and_then(|name| stations.lookup(name))
            } else {
                None
            };
            EnrichedRecord {
                ticket: ticket.clone(),
                departure,
                arrival,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Map projections
// ---------------------------------------------------------------------------

/// A journey with both ends located.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub from: GeoPoint,
    pub to: GeoPoint,
}

/// Departure coordinates of every record that has them.
pub fn departure_points<'a, I>(records: I) -> Vec<GeoPoint>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    records.into_iter().filter_map(|r| r.departure).collect()
}

/// Routes of every record whose departure and arrival are both located.
pub fn routes<'a, I>(records: I) -> Vec<Route>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    records
        .into_iter()
        .filter_map(|r| match (r.departure, r.arrival) {
            (Some(from), Some(to)) => Some(Route { from, to }),
            _ => None,
        })
        .collect()
}
