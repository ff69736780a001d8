use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Column – the known columns of the ticket sales file
// ---------------------------------------------------------------------------

/// A column the dashboard knows how to use.
///
/// The source file may carry any subset of these (plus columns we ignore);
/// which ones were actually present is tracked by [`ColumnSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    PurchaseType,
    TicketClass,
    DepartureStation,
    ArrivalDestination,
    Price,
    JourneyStatus,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::PurchaseType,
        Column::TicketClass,
        Column::DepartureStation,
        Column::ArrivalDestination,
        Column::Price,
        Column::JourneyStatus,
    ];

    /// Header name as it appears in the CSV file.
    pub fn header(self) -> &'static str {
        match self {
            Column::PurchaseType => "Purchase Type",
            Column::TicketClass => "Ticket Class",
            Column::DepartureStation => "Departure Station",
            Column::ArrivalDestination => "Arrival Destination",
            Column::Price => "Price",
            Column::JourneyStatus => "Journey Status",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// The set of known columns present in a loaded file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSet {
    bits: u8,
}

impl ColumnSet {
    pub fn all() -> Self {
        Column::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, column: Column) {
        self.bits |= 1 << column as u8;
    }

    pub fn contains(&self, column: Column) -> bool {
        self.bits & (1 << column as u8) != 0
    }

    /// Known columns that the file did not have, in declaration order.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.contains(*c))
            .collect()
    }
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        let mut set = ColumnSet::default();
        for column in iter {
            set.insert(column);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// TicketRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single ticket sale. Every field is optional: the cell may be empty or
/// the whole column may be missing from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    #[serde(rename = "Purchase Type", default)]
    pub purchase_type: Option<String>,
    #[serde(rename = "Ticket Class", default)]
    pub ticket_class: Option<String>,
    #[serde(rename = "Departure Station", default)]
    pub departure_station: Option<String>,
    #[serde(rename = "Arrival Destination", default)]
    pub arrival_destination: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "deserialize_price")]
    pub price: Option<f64>,
    #[serde(rename = "Journey Status", default)]
    pub journey_status: Option<String>,
}

impl TicketRecord {
    /// Text value of a string column. `Price` is numeric and always `None` here.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::PurchaseType => self.purchase_type.as_deref(),
            Column::TicketClass => self.ticket_class.as_deref(),
            Column::DepartureStation => self.departure_station.as_deref(),
            Column::ArrivalDestination => self.arrival_destination.as_deref(),
            Column::JourneyStatus => self.journey_status.as_deref(),
            Column::Price => None,
        }
    }

    /// Price usable in sums and means: present and not NaN.
    pub fn known_price(&self) -> Option<f64> {
        self.price.filter(|p| !p.is_nan())
    }
}

/// Cell texts read as "no value" in a numeric column, the same set pandas
/// uses by default.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Price cell: empty, a null token or NaN is `None`; any other non-number
/// is an error.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let cell = raw.trim();
    if cell.is_empty() || NULL_TOKENS.contains(&cell) {
        return Ok(None);
    }
    let price: f64 = cell
        .parse()
        .map_err(|_| de::Error::custom(format!("Price '{cell}' is not a number")))?;
    Ok(Some(price).filter(|p| !p.is_nan()))
}

// ---------------------------------------------------------------------------
// TicketDataset – the complete loaded file
// ---------------------------------------------------------------------------

/// The parsed file: rows in file order plus what the header looked like.
#[derive(Debug, Clone, Default)]
pub struct TicketDataset {
    pub records: Vec<TicketRecord>,
    /// Header row exactly as found, including columns we don't use.
    pub headers: Vec<String>,
    /// Which known columns the header contained.
    pub columns: ColumnSet,
}

impl TicketDataset {
    /// Build a dataset in memory. The header is derived from `columns`.
    pub fn from_records(records: Vec<TicketRecord>, columns: ColumnSet) -> Self {
        let headers = Column::ALL
            .into_iter()
            .filter(|c| columns.contains(*c))
            .map(|c| c.header().to_string())
            .collect();
        TicketDataset {
            records,
            headers,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// WGS84 latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A station of the static coordinate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationCoordinate {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl StationCoordinate {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.latitude,
            lon: self.longitude,
        }
    }
}

/// A ticket record joined with the coordinates of both ends of the journey.
/// A side is `None` when the station is unknown or the column is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub ticket: TicketRecord,
    pub departure: Option<GeoPoint>,
    pub arrival: Option<GeoPoint>,
}

impl EnrichedRecord {
    /// A record with no coordinates attached yet.
    pub fn bare(ticket: TicketRecord) -> Self {
        EnrichedRecord {
            ticket,
            departure: None,
            arrival: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_set_tracks_membership() {
        let set: ColumnSet = [Column::Price, Column::TicketClass].into_iter().collect();
        assert!(set.contains(Column::Price));
        assert!(set.contains(Column::TicketClass));
        assert!(!set.contains(Column::JourneyStatus));
        assert_eq!(set.missing().len(), 4);
        assert!(ColumnSet::all().missing().is_empty());
    }

    #[test]
    fn headers_round_trip_through_column_lookup() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("price"), None);
    }

    #[test]
    fn in_memory_dataset_lists_present_headers_in_order() {
        let columns: ColumnSet = [Column::Price, Column::PurchaseType].into_iter().collect();
        let ds = TicketDataset::from_records(Vec::new(), columns);
        assert_eq!(ds.headers, vec!["Purchase Type", "Price"]);
        assert!(ds.is_empty());
    }
}
