pub mod chained;
pub mod error;
pub mod implicit;
pub mod reconcile;
pub mod series;

// Flat public surface for domain types and functions.
pub use chained::RateCoverage;
pub use error::{ErrorKind, IndexError};
pub use reconcile::{reconcile, summarize};
pub use series::{
    DerivedPoint, DerivedSeries, InflationRateRecord, NominalRecord, ReconciliationRow,
    ReconciliationSummary, ReconstructedSeries, YearRecord,
};
