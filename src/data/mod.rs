/// Data layer: film records, loading, filtering, and export.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet / http(s)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → FilmDataset (validated, options derived)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ FilmDataset  │  Vec<Film>, countries, year bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + country → sorted indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  write a view back out as csv / json / parquet
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
