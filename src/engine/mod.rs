// src/engine/mod.rs

//! Pure transformations from fetched collections to what the screens show.
//! Nothing here performs I/O.

pub mod aggregate;
pub mod paginate;
pub mod reconcile;
pub mod sort;

pub use aggregate::Totals;
pub use paginate::{PAGE_SIZE, Paginator};
pub use reconcile::{PairingStrategy, reconcile};
pub use sort::{SortColumn, SortDirection, SortKey, Sorter};
