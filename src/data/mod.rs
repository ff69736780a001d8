/// Data layer: core types, loading, geo-join, filtering and aggregation.
///
/// Architecture:
/// ```text
///   railway.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TicketDataset (or DataUnavailable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   geo     │  join station coordinates → Vec<EnrichedRecord>
///   └──────────┘
///        │                         ┐
///        ▼                         │
///   ┌──────────┐                   │
///   │  filter   │  FilterCriteria  │  Pipeline::run,
///   └──────────┘                   │  once per filter change
///        │                         │
///        ▼                         │
///   ┌───────────┐                  │
///   │ aggregate  │  KPIs + rollups │
///   └───────────┘                  ┘
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod stations;

pub use error::DataError;
pub use pipeline::{Pipeline, PipelineOutput};
