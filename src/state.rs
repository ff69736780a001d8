use std::path::Path;

use anyhow::Result;
use railway_dashboard::config::DashboardConfig;
use railway_dashboard::data::aggregate::AggregateResult;
use railway_dashboard::data::export;
use railway_dashboard::data::filter::FilterCriteria;
use railway_dashboard::data::model::{Column, EnrichedRecord};
use railway_dashboard::data::Pipeline;

use crate::color::{ColorMap, STATUS_PALETTE};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Geo-joined dataset, fixed for the lifetime of the app.
    pub pipeline: Pipeline,

    /// Per-column filter selections.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// KPIs and rollups of the visible records (cached).
    pub aggregates: AggregateResult,

    /// Colours per journey status, built from the whole dataset so they
    /// don't shift as filters change.
    pub status_colors: ColorMap,

    /// Colours per ticket class.
    pub class_colors: ColorMap,

    pub show_points: bool,
    pub show_routes: bool,
    pub table_rows: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: &DashboardConfig) -> Self {
        let criteria = FilterCriteria::new();
        let (visible_indices, aggregates) = {
            let output = pipeline.run(&criteria);
            (output.indices, output.aggregates)
        };

        let status_colors = ColorMap::with_base(
            aggregates
                .status_distribution
                .iter()
                .map(|s| s.status.as_str()),
            &STATUS_PALETTE,
        );
        let class_colors = ColorMap::new(aggregates.price_by_class.iter().map(|c| c.class.as_str()));

        Self {
            pipeline,
            criteria,
            visible_indices,
            aggregates,
            status_colors,
            class_colors,
            show_points: config.show_points,
            show_routes: config.show_routes,
            table_rows: config.table_rows,
            status_message: None,
        }
    }

    /// Recompute visible records and aggregates after a filter change.
    pub fn refilter(&mut self) {
        let output = self.pipeline.run(&self.criteria);
        self.visible_indices = output.indices;
        self.aggregates = output.aggregates;
    }

    /// Records passing the current filters, in file order.
    pub fn visible_records(&self) -> impl Iterator<Item = &EnrichedRecord> + '_ {
        let records = self.pipeline.records();
        self.visible_indices.iter().map(move |&i| &records[i])
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: Column, value: &str) {
        self.criteria.toggle(column, value);
        self.refilter();
    }

    /// Drop the filter on one column.
    pub fn clear_filter(&mut self, column: Column) {
        self.criteria.clear(column);
        self.refilter();
    }

    pub fn clear_all_filters(&mut self) {
        self.criteria.clear_all();
        self.refilter();
    }

    pub fn export_records(&mut self, path: &Path) {
        let result = export::export_records_csv(path, self.visible_records());
        self.report_export(result, path, "records");
    }

    pub fn export_summary(&mut self, path: &Path) {
        let result = export::export_summary_json(path, &self.aggregates);
        self.report_export(result, path, "summary");
    }

    fn report_export(&mut self, result: Result<()>, path: &Path, what: &str) {
        match result {
            Ok(()) => {
                log::info!("Exported {what} to {}", path.display());
                self.status_message = Some(format!("Exported {what} to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export {what}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
