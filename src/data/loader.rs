use std::io::Read;
use std::path::Path;

use super::error::DataError;
use super::model::{Column, ColumnSet, TicketDataset, TicketRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the ticket sales CSV at `path`.
///
/// The first row is the header. Columns are matched by exact header name;
/// unknown columns are ignored and known ones may be missing. Empty cells
/// become `None`. Anything that stops the file from being read in full
/// (missing file, bad UTF-8, ragged rows, a non-numeric `Price`) is reported
/// as [`DataError::DataUnavailable`] and no rows are returned.
pub fn load_csv(path: &Path) -> Result<TicketDataset, DataError> {
    let reader = csv::Reader::from_path(path).map_err(|e| DataError::unavailable(path, e))?;
    let dataset = read_dataset(reader).map_err(|e| DataError::unavailable(path, e))?;

    log::info!(
        "Loaded {} ticket records from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.headers
    );
    for column in dataset.columns.missing() {
        log::warn!("Column '{column}' not found in {}; its figures will be empty", path.display());
    }

    Ok(dataset)
}

/// Load ticket records from any reader holding CSV text.
pub fn load_reader<R: Read>(rdr: R) -> Result<TicketDataset, csv::Error> {
    read_dataset(csv::Reader::from_reader(rdr))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn read_dataset<R: Read>(mut reader: csv::Reader<R>) -> Result<TicketDataset, csv::Error> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns: ColumnSet = headers.iter().filter_map(|h| Column::from_header(h)).collect();

    let records = reader
        .deserialize::<TicketRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TicketDataset {
        records,
        headers,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Transaction ID,Purchase Type,Ticket Class,Departure Station,Arrival Destination,Price,Journey Status
a1,Online,Standard,London Euston,York,50,On Time
a2,Station,First Class,York,London Euston,30,Delayed
a3,Online,Standard,Leeds,,,Cancelled
";

    #[test]
    fn reads_rows_in_order_and_ignores_unknown_columns() {
        let ds = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.headers[0], "Transaction ID");
        assert_eq!(ds.columns, ColumnSet::all());
        assert_eq!(ds.records[0].departure_station.as_deref(), Some("London Euston"));
        assert_eq!(ds.records[1].price, Some(30.0));
        assert_eq!(ds.records[1].journey_status.as_deref(), Some("Delayed"));
    }

    #[test]
    fn empty_cells_become_none() {
        let ds = load_reader(SAMPLE.as_bytes()).unwrap();
        let last = &ds.records[2];
        assert_eq!(last.arrival_destination, None);
        assert_eq!(last.price, None);
        assert_eq!(last.journey_status.as_deref(), Some("Cancelled"));
    }

    #[test]
    fn missing_columns_are_tracked_not_fatal() {
        let ds = load_reader("Departure Station,Price\nYork,12.5\n".as_bytes()).unwrap();
        assert!(ds.columns.contains(Column::Price));
        assert!(!ds.columns.contains(Column::JourneyStatus));
        assert_eq!(ds.records[0].journey_status, None);
        assert_eq!(ds.records[0].price, Some(12.5));
    }

    #[test]
    fn null_tokens_and_nan_prices_read_as_missing() {
        let text = "Departure Station,Price\nYork,10\nYork,NaN\nYork,NA\nOxford,N/A\nOxford,null\nOxford, 5 \n";
        let ds = load_reader(text.as_bytes()).unwrap();
        let prices: Vec<Option<f64>> = ds.records.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![Some(10.0), None, None, None, None, Some(5.0)]);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = load_reader("Price\nfree\n".as_bytes());
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let path = Path::new("definitely/not/here/railway.csv");
        let err = load_csv(path).unwrap_err();
        let DataError::DataUnavailable { path: reported, .. } = &err;
        assert_eq!(reported, path);
        assert!(err.to_string().contains("railway.csv"));
    }
}
