use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Column, ColumnSet, EnrichedRecord, TicketRecord};

/// Journey status counted as a delay. Matched exactly; other late statuses
/// (e.g. "Cancelled") are not counted.
pub const DELAYED_STATUS: &str = "Delayed";

/// Number of stations kept in each revenue rollup.
pub const TOP_STATIONS: usize = 10;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRevenue {
    pub station: String,
    pub revenue: f64,
}

/// Raw prices of one ticket class, for the box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPrices {
    pub class: String,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Everything the KPI cards and charts need, recomputed on every filter change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResult {
    pub total_revenue: f64,
    pub average_price: f64,
    pub delayed_count: usize,
    pub delayed_percentage: f64,
    pub total_trips: usize,
    /// Top departure stations by revenue, highest first.
    pub departure_revenue: Vec<StationRevenue>,
    /// Top arrival stations by revenue, highest first.
    pub arrival_revenue: Vec<StationRevenue>,
    /// Prices grouped by ticket class, classes in sorted order.
    pub price_by_class: Vec<ClassPrices>,
    /// Record count per journey status, most frequent first.
    pub status_distribution: Vec<StatusCount>,
}

impl AggregateResult {
    /// Number of distinct journey statuses in the set.
    pub fn distinct_statuses(&self) -> usize {
        self.status_distribution.len()
    }

    /// Combined revenue of the stations in the arrival rollup.
    pub fn top_arrival_total(&self) -> f64 {
        self.arrival_revenue.iter().map(|s| s.revenue).sum()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute KPIs and rollups over a (filtered) set of records.
///
/// `columns` says which columns the source file had; any figure whose column
/// is missing comes out as zero or empty. Never fails.
pub fn aggregate<'a, I>(records: I, columns: ColumnSet) -> AggregateResult
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let tickets: Vec<&TicketRecord> = records.into_iter().map(|r| &r.ticket).collect();
    let has_price = columns.contains(Column::Price);
    let has_status = columns.contains(Column::JourneyStatus);

    let total_trips = tickets.len();

    let (total_revenue, average_price) = if has_price {
        let prices: Vec<f64> = tickets.iter().filter_map(|t| t.known_price()).collect();
        let total: f64 = prices.iter().sum();
        let mean = if prices.is_empty() {
            0.0
        } else {
            total / prices.len() as f64
        };
        (total, mean)
    } else {
        (0.0, 0.0)
    };

    let delayed_count = if has_status {
        tickets
            .iter()
            .filter(|t| t.journey_status.as_deref() == Some(DELAYED_STATUS))
            .count()
    } else {
        0
    };
    let delayed_percentage = if total_trips == 0 {
        0.0
    } else {
        delayed_count as f64 / total_trips as f64 * 100.0
    };

    let departure_revenue = if has_price && columns.contains(Column::DepartureStation) {
        revenue_by(&tickets, Column::DepartureStation, TOP_STATIONS)
    } else {
        Vec::new()
    };
    let arrival_revenue = if has_price && columns.contains(Column::ArrivalDestination) {
        revenue_by(&tickets, Column::ArrivalDestination, TOP_STATIONS)
    } else {
        Vec::new()
    };

    let price_by_class = if has_price && columns.contains(Column::TicketClass) {
        prices_by_class(&tickets)
    } else {
        Vec::new()
    };

    let status_distribution = if has_status {
        status_counts(&tickets)
    } else {
        Vec::new()
    };

    AggregateResult {
        total_revenue,
        average_price,
        delayed_count,
        delayed_percentage,
        total_trips,
        departure_revenue,
        arrival_revenue,
        price_by_class,
        status_distribution,
    }
}

/// Sum prices per station, highest first, keep `top_n`. Groups start in
/// station-name order and the sort is stable, so ties stay alphabetical.
fn revenue_by(tickets: &[&TicketRecord], station: Column, top_n: usize) -> Vec<StationRevenue> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for t in tickets {
        if let Some(name) = t.text(station) {
            *groups.entry(name).or_insert(0.0) += t.known_price().unwrap_or(0.0);
        }
    }

    let mut rollup: Vec<StationRevenue> = groups
        .into_iter()
        .map(|(name, revenue)| StationRevenue {
            station: name.to_string(),
            revenue,
        })
        .collect();
    rollup.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rollup.truncate(top_n);
    rollup
}

fn prices_by_class(tickets: &[&TicketRecord]) -> Vec<ClassPrices> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for t in tickets {
        if let (Some(class), Some(price)) = (t.ticket_class.as_deref(), t.known_price()) {
            groups.entry(class).or_default().push(price);
        }
    }
    groups
        .into_iter()
        .map(|(class, prices)| ClassPrices {
            class: class.to_string(),
            prices,
        })
        .collect()
}

fn status_counts(tickets: &[&TicketRecord]) -> Vec<StatusCount> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for status in tickets.iter().filter_map(|t| t.journey_status.as_deref()) {
        *groups.entry(status).or_insert(0) += 1;
    }
    let mut counts: Vec<StatusCount> = groups
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary plus Tukey whiskers (1.5 × IQR) and outliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` when there are no (non-NaN) values.
    pub fn from_values(values: &[f64]) -> Option<BoxStats> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - 1.5 * iqr;
        let hi_fence = q3 + 1.5 * iqr;

        let lower_whisker = sorted.iter().copied().find(|v| *v >= lo_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|v| *v <= hi_fence).unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Some(BoxStats {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear-interpolation quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(dep: &str, arr: &str, class: &str, price: Option<f64>, status: &str) -> EnrichedRecord {
        EnrichedRecord::bare(TicketRecord {
            departure_station: Some(dep.to_string()),
            arrival_destination: Some(arr.to_string()),
            ticket_class: Some(class.to_string()),
            price,
            journey_status: Some(status.to_string()),
            ..Default::default()
        })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn kpis_skip_missing_prices() {
        let recs = vec![
            rec("York", "Oxford", "Standard", Some(10.0), "On Time"),
            rec("York", "Oxford", "Standard", None, "Delayed"),
            rec("York", "Oxford", "Standard", Some(20.0), "Cancelled"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        assert_eq!(agg.total_trips, 3);
        assert!(close(agg.total_revenue, 30.0));
        assert!(close(agg.average_price, 15.0));
        assert_eq!(agg.delayed_count, 1);
        assert!(close(agg.delayed_percentage, 100.0 / 3.0));
    }

    #[test]
    fn nan_price_counts_as_missing() {
        let recs = vec![
            rec("York", "Leeds", "Standard", Some(10.0), "On Time"),
            rec("York", "Leeds", "Standard", Some(f64::NAN), "On Time"),
            rec("Oxford", "Leeds", "Standard", Some(5.0), "On Time"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        assert!(close(agg.total_revenue, 15.0));
        assert!(close(agg.average_price, 7.5));
        assert_eq!(
            agg.departure_revenue,
            vec![
                StationRevenue { station: "York".into(), revenue: 10.0 },
                StationRevenue { station: "Oxford".into(), revenue: 5.0 },
            ]
        );
        assert_eq!(agg.price_by_class[0].prices, vec![10.0, 5.0]);
    }

    #[test]
    fn delay_match_is_exact() {
        let recs = vec![
            rec("York", "Oxford", "Standard", Some(1.0), "delayed"),
            rec("York", "Oxford", "Standard", Some(1.0), "Delayed "),
            rec("York", "Oxford", "Standard", Some(1.0), "Delayed"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        assert_eq!(agg.delayed_count, 1);
    }

    #[test]
    fn missing_columns_degrade_to_zero() {
        let recs = vec![rec("York", "Oxford", "Standard", Some(10.0), "Delayed")];
        let columns: ColumnSet = [Column::DepartureStation, Column::TicketClass]
            .into_iter()
            .collect();
        let agg = aggregate(&recs, columns);
        assert_eq!(agg.total_trips, 1);
        assert_eq!(agg.total_revenue, 0.0);
        assert_eq!(agg.average_price, 0.0);
        assert_eq!(agg.delayed_count, 0);
        assert_eq!(agg.delayed_percentage, 0.0);
        assert!(agg.departure_revenue.is_empty());
        assert!(agg.arrival_revenue.is_empty());
        assert!(agg.price_by_class.is_empty());
        assert!(agg.status_distribution.is_empty());
    }

    #[test]
    fn rollup_is_top_ten_non_increasing() {
        let recs: Vec<EnrichedRecord> = (0..15)
            .map(|i| rec(&format!("Station {i:02}"), "York", "Standard", Some(i as f64), "On Time"))
            .collect();
        let agg = aggregate(&recs, ColumnSet::all());
        assert_eq!(agg.departure_revenue.len(), TOP_STATIONS);
        assert!(agg
            .departure_revenue
            .windows(2)
            .all(|w| w[0].revenue >= w[1].revenue));
        assert_eq!(agg.departure_revenue[0].station, "Station 14");
        assert_eq!(agg.arrival_revenue.len(), 1);
        assert!(close(agg.top_arrival_total(), (0..15).sum::<i32>() as f64));
    }

    #[test]
    fn rollup_ties_keep_group_order() {
        let recs = vec![
            rec("York", "Oxford", "Standard", Some(5.0), "On Time"),
            rec("Bath", "Oxford", "Standard", Some(5.0), "On Time"),
            rec("Leeds", "Oxford", "Standard", Some(9.0), "On Time"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        let names: Vec<&str> = agg.departure_revenue.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(names, ["Leeds", "Bath", "York"]);
    }

    #[test]
    fn status_ties_are_alphabetical_after_count() {
        let recs = vec![
            rec("York", "Oxford", "Standard", Some(1.0), "On Time"),
            rec("York", "Oxford", "Standard", Some(1.0), "On Time"),
            rec("York", "Oxford", "Standard", Some(1.0), "On Time"),
            rec("York", "Oxford", "Standard", Some(1.0), "Delayed"),
            rec("York", "Oxford", "Standard", Some(1.0), "Cancelled"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        let order: Vec<(&str, usize)> = agg
            .status_distribution
            .iter()
            .map(|s| (s.status.as_str(), s.count))
            .collect();
        assert_eq!(order, [("On Time", 3), ("Cancelled", 1), ("Delayed", 1)]);
    }

    #[test]
    fn arrival_rollup_orders_by_revenue() {
        let recs = vec![
            rec("York", "Reading", "Standard", Some(15.0), "On Time"),
            rec("York", "Oxford", "Standard", Some(40.0), "On Time"),
            rec("York", "Bath", "Standard", Some(15.0), "On Time"),
            rec("York", "Reading", "Standard", Some(10.0), "On Time"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        assert_eq!(
            agg.arrival_revenue,
            vec![
                StationRevenue { station: "Oxford".into(), revenue: 40.0 },
                StationRevenue { station: "Reading".into(), revenue: 25.0 },
                StationRevenue { station: "Bath".into(), revenue: 15.0 },
            ]
        );
        assert!(close(agg.top_arrival_total(), 80.0));
    }

    #[test]
    fn groups_prices_and_statuses() {
        let recs = vec![
            rec("York", "Oxford", "Standard", Some(10.0), "On Time"),
            rec("York", "Oxford", "First Class", Some(40.0), "Delayed"),
            rec("York", "Oxford", "Standard", Some(12.0), "On Time"),
            rec("York", "Oxford", "Standard", None, "Cancelled"),
        ];
        let agg = aggregate(&recs, ColumnSet::all());
        assert_eq!(
            agg.price_by_class,
            vec![
                ClassPrices { class: "First Class".into(), prices: vec![40.0] },
                ClassPrices { class: "Standard".into(), prices: vec![10.0, 12.0] },
            ]
        );
        assert_eq!(agg.status_distribution[0], StatusCount { status: "On Time".into(), count: 2 });
        assert_eq!(agg.distinct_statuses(), 3);
    }

    #[test]
    fn empty_set_is_all_zero() {
        let agg = aggregate(&Vec::<EnrichedRecord>::new(), ColumnSet::all());
        assert_eq!(agg, AggregateResult::default());
    }

    #[test]
    fn box_stats_quartiles_and_outliers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.outliers, vec![100.0]);

        let stats = BoxStats::from_values(&[10.0, 20.0]).unwrap();
        assert!(close(stats.q1, 12.5));
        assert!(close(stats.median, 15.0));
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
