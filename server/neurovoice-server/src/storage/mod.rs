//! Storage for the recordings API
//!
//! One JSON array file plus a directory of uploaded audio blobs. A
//! placeholder, not a database.

pub mod flat_file;

pub use flat_file::{RecordingStore, StoreError};
