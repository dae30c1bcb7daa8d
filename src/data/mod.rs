/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   ocean_plastic_pollution_data_cleaned.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse once → Arc<ObservationTable>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region ∈ S_region ∧ type ∈ S_type → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  Σ weight per region, Σ weight per month
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
