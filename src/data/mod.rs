/// Data layer: column domains, loading, criteria and filtering.
///
/// Architecture:
/// ```text
///  preprocessed_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ResponseTable (cached once per DataSource)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐        ┌──────────┐
///   │ ResponseTable  │◀──────│ criteria  │  labels → validated codes (schema)
///   └───────────────┘        └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality predicates → FilteredResult (row indices)
///   └──────────┘
///        │
///        ▼
///   count · rows · text projection · distribution
/// ```

pub mod criteria;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
