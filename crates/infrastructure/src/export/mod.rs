//! Export infrastructure.

mod postman;

pub use postman::{POSTMAN_SCHEMA, PostmanExporter};
