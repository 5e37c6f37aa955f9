//! Courier Application - Use cases and ports
//!
//! This crate holds the application logic of the request tester: the
//! ports implemented by infrastructure adapters, the variable resolver,
//! the collection/environment/history services and the request executor.

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use use_cases::{
    CollectionService, EnvironmentRecord, EnvironmentService, ExecuteRequest, ExecuteRequestInput,
    ExportCollection, HistoryQuery, HistoryService, ImportCollection, ImportReport, NewCollection,
    NewEnvironment,
};
