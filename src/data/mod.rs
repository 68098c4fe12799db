/// Data layer: record types, loading, and table views.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → StudentDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ StudentDataset │  Vec<StudentRecord>, unique ids
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  name search + column sort → visible rows
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
