//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  bundled iris.csv / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse table → IrisDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ IrisDataset │  Vec<Record>, column and species views
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  selected species → visible record indices
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
