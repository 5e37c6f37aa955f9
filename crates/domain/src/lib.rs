//! Courier Domain - Core business types
//!
//! This crate defines the data model of the Courier request tester:
//! environments, collections of saved requests, the bounded execution
//! history and the request/response shapes used by the executor.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod environment;
pub mod error;
pub mod history;
pub mod id;
pub mod request;
pub mod response;

pub use collection::{
    Collection, CollectionPatch, CollectionsDocument, NewRequestItem, RequestItem,
    RequestItemPatch,
};
pub use environment::{Environment, EnvironmentPatch, EnvironmentSet};
pub use error::{DomainError, DomainResult};
pub use history::{DEFAULT_HISTORY_LIMIT, HistoryItem, HistoryPage, HistoryResponse, RequestHistory};
pub use id::{Id, generate_id};
pub use request::{HttpMethod, OrderedMap, RequestBody, RequestSpec};
pub use response::{ExecutionResult, ResponseSpec};
