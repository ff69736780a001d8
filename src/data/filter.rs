use std::collections::{BTreeMap, BTreeSet};

use super::model::{Column, EnrichedRecord};

/// Columns the user can filter on, in the order the side panel shows them.
pub const FILTER_COLUMNS: [Column; 4] = [
    Column::PurchaseType,
    Column::TicketClass,
    Column::DepartureStation,
    Column::ArrivalDestination,
];

pub fn is_filterable(column: Column) -> bool {
    FILTER_COLUMNS.contains(&column)
}

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: column → set of selected values.
/// A column that is absent or has an empty set is not filtered (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    selected: BTreeMap<Column, BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style selection, handy for tests and scripted filters.
    pub fn with<I, S>(mut self, column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.select(column, value);
        }
        self
    }

    /// Add a value to a column's selection. Only [`FILTER_COLUMNS`] can be
    /// filtered; selections on other columns are ignored.
    pub fn select(&mut self, column: Column, value: impl Into<String>) {
        if !is_filterable(column) {
            log::warn!("Ignoring filter on non-filterable column '{column}'");
            return;
        }
        self.selected.entry(column).or_default().insert(value.into());
    }

    /// Flip a single value; returns whether it is now selected. Always
    /// `false` for columns outside [`FILTER_COLUMNS`].
    pub fn toggle(&mut self, column: Column, value: &str) -> bool {
        if !is_filterable(column) {
            log::warn!("Ignoring filter on non-filterable column '{column}'");
            return false;
        }
        let set = self.selected.entry(column).or_default();
        if set.remove(value) {
            false
        } else {
            set.insert(value.to_string());
            true
        }
    }

    pub fn is_selected(&self, column: Column, value: &str) -> bool {
        self.selected
            .get(&column)
            .is_some_and(|set| set.contains(value))
    }

    pub fn selection(&self, column: Column) -> Option<&BTreeSet<String>> {
        self.selected.get(&column).filter(|set| !set.is_empty())
    }

    pub fn clear(&mut self, column: Column) {
        self.selected.remove(&column);
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// True when no column constrains anything.
    pub fn is_empty(&self) -> bool {
        self.selected.values().all(BTreeSet::is_empty)
    }

    /// A record passes when, for every column with a non-empty selection,
    /// its value for that column is one of the selected values. A missing
    /// value never matches an active selection.
    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        self.selected
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .all(|(column, set)| {
                record
                    .ticket
                    .text(*column)
                    .is_some_and(|value| set.contains(value))
            })
    }
}

/// Return indices of records that pass all active filters, in input order.
pub fn filtered_indices(records: &[EnrichedRecord], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Return the records that pass all active filters, in input order.
pub fn filter_records<'a>(
    records: &'a [EnrichedRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a EnrichedRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

// ---------------------------------------------------------------------------
// Filter options: what the multiselect widgets offer
// ---------------------------------------------------------------------------

/// Distinct non-null values of each filterable column, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    values: BTreeMap<Column, Vec<String>>,
}

impl FilterOptions {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let mut values = BTreeMap::new();
        for column in FILTER_COLUMNS {
            let mut seen = BTreeSet::new();
            let mut ordered = Vec::new();
            for value in records.iter().filter_map(|r| r.ticket.text(column)) {
                if seen.insert(value) {
                    ordered.push(value.to_string());
                }
            }
            values.insert(column, ordered);
        }
        FilterOptions { values }
    }

    pub fn values(&self, column: Column) -> &[String] {
        self.values.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }
}
