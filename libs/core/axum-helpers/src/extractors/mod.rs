//! Extractors whose rejections are envelope responses.
//!
//! Parser details are logged, never returned to the client.

pub mod envelope_json;
pub mod envelope_query;
pub mod uuid_path;

pub use envelope_json::EnvelopeJson;
pub use envelope_query::EnvelopeQuery;
pub use uuid_path::UuidPath;
