use super::aggregate::{aggregate, AggregateResult};
use super::filter::{filtered_indices, FilterCriteria, FilterOptions};
use super::geo::geo_join;
use super::model::{ColumnSet, EnrichedRecord, TicketDataset};
use super::stations::StationTable;

/// The loaded, geo-joined dataset. Read-only once built; every user
/// interaction goes through [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    records: Vec<EnrichedRecord>,
    columns: ColumnSet,
    options: FilterOptions,
}

/// What one run hands to the presentation layer.
#[derive(Debug, Clone)]
pub struct PipelineOutput<'a> {
    /// Positions of the surviving records in [`Pipeline::records`].
    pub indices: Vec<usize>,
    pub records: Vec<&'a EnrichedRecord>,
    pub aggregates: AggregateResult,
}

impl Pipeline {
    pub fn new(dataset: TicketDataset, stations: &StationTable) -> Self {
        let records = geo_join(&dataset, stations);
        let located = records.iter().filter(|r| r.departure.is_some()).count();
        log::info!(
            "Geo-joined {} records against {} stations ({} with a known departure station)",
            records.len(),
            stations.len(),
            located
        );
        let options = FilterOptions::from_records(&records);
        Pipeline {
            records,
            columns: dataset.columns,
            options,
        }
    }

    /// Filter, then aggregate the survivors.
    pub fn run(&self, criteria: &FilterCriteria) -> PipelineOutput<'_> {
        let indices = filtered_indices(&self.records, criteria);
        let records: Vec<&EnrichedRecord> = indices.iter().map(|&i| &self.records[i]).collect();
        let aggregates = aggregate(records.iter().copied(), self.columns);
        log::debug!(
            "Pipeline run: {} of {} records pass {:?}",
            records.len(),
            self.records.len(),
            criteria
        );
        PipelineOutput {
            indices,
            records,
            aggregates,
        }
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    /// Values offered by the filter widgets.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
