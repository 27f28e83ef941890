//! Protobuf messages and tonic clients for the services this workspace calls.
//!
//! Sources live in `proto/`; `src/generated` holds the buf output.

mod generated;

pub use generated::usuario;
