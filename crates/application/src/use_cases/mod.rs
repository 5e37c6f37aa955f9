//! Use cases (application services)
//!
//! Each use case orchestrates domain logic and port interactions.

mod collections;
mod environments;
mod execute_request;
mod history;
mod transfer;

#[cfg(test)]
pub(crate) mod test_support;

pub use collections::{CollectionService, NewCollection};
pub use environments::{EnvironmentRecord, EnvironmentService, NewEnvironment};
pub use execute_request::{ExecuteRequest, ExecuteRequestInput};
pub use history::{DEFAULT_PAGE_SIZE, HistoryQuery, HistoryService};
pub use transfer::{ExportCollection, ImportCollection, ImportReport};
