//! Session Store for SlangDecoder: per-session dictionaries, user additions
//! and write-back to the backing CSV.

pub mod manager;
pub mod persist;
pub mod session;

pub use manager::SessionManager;
pub use persist::{merge_last_wins, CsvFileSink, SlangSink};
pub use session::*;
