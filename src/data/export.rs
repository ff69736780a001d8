use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::AggregateResult;
use super::model::EnrichedRecord;

/// One exported row: the ticket columns followed by the joined coordinates.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Purchase Type")]
    purchase_type: Option<&'a str>,
    #[serde(rename = "Ticket Class")]
    ticket_class: Option<&'a str>,
    #[serde(rename = "Departure Station")]
    departure_station: Option<&'a str>,
    #[serde(rename = "Arrival Destination")]
    arrival_destination: Option<&'a str>,
    #[serde(rename = "Price")]
    price: Option<f64>,
    #[serde(rename = "Journey Status")]
    journey_status: Option<&'a str>,
    #[serde(rename = "Departure_Lat")]
    departure_lat: Option<f64>,
    #[serde(rename = "Departure_Lon")]
    departure_lon: Option<f64>,
    #[serde(rename = "Arrival_Lat")]
    arrival_lat: Option<f64>,
    #[serde(rename = "Arrival_Lon")]
    arrival_lon: Option<f64>,
}

impl<'a> From<&'a EnrichedRecord> for ExportRow<'a> {
    fn from(r: &'a EnrichedRecord) -> Self {
        let t = &r.ticket;
        ExportRow {
            purchase_type: t.purchase_type.as_deref(),
            ticket_class: t.ticket_class.as_deref(),
            departure_station: t.departure_station.as_deref(),
            arrival_destination: t.arrival_destination.as_deref(),
            price: t.price,
            journey_status: t.journey_status.as_deref(),
            departure_lat: r.departure.map(|p| p.lat),
            departure_lon: r.departure.map(|p| p.lon),
            arrival_lat: r.arrival.map(|p| p.lat),
            arrival_lon: r.arrival.map(|p| p.lon),
        }
    }
}

/// Write records as CSV with a header row. Missing values are empty cells.
pub fn write_records_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, record) in records.into_iter().enumerate() {
        wtr.serialize(ExportRow::from(record))
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn export_records_csv<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_records_csv(BufWriter::new(file), records)
        .with_context(|| format!("exporting records to {}", path.display()))
}

/// Write the aggregates as pretty-printed JSON.
pub fn write_summary_json<W: Write>(mut writer: W, aggregates: &AggregateResult) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, aggregates).context("serializing summary")?;
    writer.flush().context("flushing summary output")?;
    Ok(())
}

pub fn export_summary_json(path: &Path, aggregates: &AggregateResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_summary_json(BufWriter::new(file), aggregates)
        .with_context(|| format!("exporting summary to {}", path.display()))
}
