use std::path::{Path, PathBuf};

use railway_dashboard::data::aggregate::StationRevenue;
use railway_dashboard::data::export::write_records_csv;
use railway_dashboard::data::filter::{FilterCriteria, FILTER_COLUMNS};
use railway_dashboard::data::loader::{load_csv, load_reader};
use railway_dashboard::data::model::{Column, ColumnSet};
use railway_dashboard::data::stations::StationTable;
use railway_dashboard::data::{DataError, Pipeline};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn pipeline(name: &str) -> Pipeline {
    let dataset = load_csv(&fixture(name)).expect("fixture should load");
    Pipeline::new(dataset, &StationTable::uk())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[test]
fn unfiltered_scenario_kpis() {
    let p = pipeline("scenario.csv");
    let out = p.run(&FilterCriteria::new());
    let agg = &out.aggregates;

    assert_eq!(out.records.len(), 3);
    assert_eq!(agg.total_trips, 3);
    assert_eq!(agg.total_revenue, 100.0);
    assert_eq!(round2(agg.average_price), 33.33);
    assert_eq!(agg.delayed_count, 2);
    assert_eq!(round2(agg.delayed_percentage), 66.67);
    assert_eq!(
        agg.departure_revenue,
        vec![
            StationRevenue { station: "London Euston".into(), revenue: 70.0 },
            StationRevenue { station: "York".into(), revenue: 30.0 },
        ]
    );
}

#[test]
fn filter_by_departure_york() {
    let p = pipeline("scenario.csv");
    let criteria = FilterCriteria::new().with(Column::DepartureStation, ["York"]);
    let out = p.run(&criteria);

    assert_eq!(out.records.len(), 1);
    assert_eq!(out.indices, vec![1]);
    assert_eq!(out.aggregates.total_revenue, 30.0);
    assert_eq!(out.aggregates.delayed_percentage, 100.0);
}

#[test]
fn filtered_output_respects_every_selection_and_order() {
    let p = pipeline("scenario.csv");
    let criteria = FilterCriteria::new()
        .with(Column::PurchaseType, ["Online"])
        .with(Column::TicketClass, ["Standard", "First Class"]);
    let out = p.run(&criteria);

    assert_eq!(out.indices, vec![0, 2]);
    for record in &out.records {
        for column in FILTER_COLUMNS {
            if let Some(selected) = criteria.selection(column) {
                let value = record.ticket.text(column).expect("filtered column has a value");
                assert!(selected.contains(value));
            }
        }
    }
}

#[test]
fn revenue_matches_rollup_sum() {
    let p = pipeline("scenario.csv");
    for criteria in [
        FilterCriteria::new(),
        FilterCriteria::new().with(Column::PurchaseType, ["Online"]),
        FilterCriteria::new().with(Column::TicketClass, ["Standard"]),
    ] {
        let agg = p.run(&criteria).aggregates;
        let rollup_sum: f64 = agg.departure_revenue.iter().map(|s| s.revenue).sum();
        assert_eq!(agg.total_revenue, rollup_sum);
        assert!((0.0..=100.0).contains(&agg.delayed_percentage));
        assert!(agg.departure_revenue.len() <= 10);
    }
}

#[test]
fn unknown_station_keeps_record_with_null_coordinates() {
    let p = pipeline("partial_columns.csv");
    let out = p.run(&FilterCriteria::new().with(Column::DepartureStation, ["Durham"]));

    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].departure, None);
    assert_eq!(out.records[0].arrival, None);

    let oxford = p.run(&FilterCriteria::new().with(Column::DepartureStation, ["Oxford"]));
    assert!(oxford.records.iter().all(|r| r.departure.is_some()));
}

#[test]
fn missing_columns_degrade_without_error() {
    let p = pipeline("partial_columns.csv");
    let agg = p.run(&FilterCriteria::new()).aggregates;

    assert!(!p.columns().contains(Column::Price));
    assert_eq!(agg.total_trips, 3);
    assert_eq!(agg.total_revenue, 0.0);
    assert_eq!(agg.average_price, 0.0);
    assert_eq!(agg.delayed_percentage, 0.0);
    assert!(agg.departure_revenue.is_empty());
    assert!(agg.price_by_class.is_empty());
    assert!(agg.status_distribution.is_empty());
}

#[test]
fn empty_dataset_is_all_zero() {
    let p = pipeline("header_only.csv");
    assert!(p.is_empty());
    let agg = p.run(&FilterCriteria::new()).aggregates;

    assert_eq!(agg.total_revenue, 0.0);
    assert_eq!(agg.average_price, 0.0);
    assert_eq!(agg.delayed_percentage, 0.0);
    assert!(agg.departure_revenue.is_empty());
    assert!(agg.arrival_revenue.is_empty());
}

#[test]
fn null_price_cells_are_skipped_by_every_figure() {
    let p = pipeline("null_prices.csv");
    let agg = p.run(&FilterCriteria::new()).aggregates;

    assert_eq!(agg.total_trips, 4);
    assert_eq!(agg.total_revenue, 15.0);
    assert_eq!(agg.average_price, 7.5);
    assert_eq!(
        agg.departure_revenue,
        vec![
            StationRevenue { station: "York".into(), revenue: 10.0 },
            StationRevenue { station: "Oxford".into(), revenue: 5.0 },
        ]
    );
    let rollup_sum: f64 = agg.departure_revenue.iter().map(|s| s.revenue).sum();
    assert_eq!(agg.total_revenue, rollup_sum);
}

#[test]
fn malformed_file_is_unavailable() {
    let err = load_csv(&fixture("malformed.csv")).unwrap_err();
    let DataError::DataUnavailable { path, .. } = &err;
    assert!(path.ends_with("malformed.csv"));
}

#[test]
fn missing_file_is_unavailable() {
    assert!(matches!(
        load_csv(&fixture("nope.csv")),
        Err(DataError::DataUnavailable { .. })
    ));
}

#[test]
fn exported_rows_load_back() {
    let p = pipeline("scenario.csv");
    let out = p.run(&FilterCriteria::new().with(Column::DepartureStation, ["London Euston"]));

    let mut buf: Vec<u8> = Vec::new();
    write_records_csv(&mut buf, out.records.iter().copied()).unwrap();
    let reloaded = load_reader(buf.as_slice()).unwrap();

    assert_eq!(reloaded.columns, ColumnSet::all());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.headers.len(), 10);
    assert_eq!(reloaded.records[1].price, Some(20.0));
}
