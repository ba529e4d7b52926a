/// Data layer: residual tables, parsing, and axis statistics.
///
/// Architecture:
/// ```text
///   residuals.dat (one or more)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read files, parse in parallel → Vec<FileResult>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  text → ParsedTable (Time + named columns, NaN for gaps)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  summary  │  min residual (power of ten), max iteration
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod summary;
