//! Shared types, error taxonomy and configuration for SlangDecoder.

pub mod config;
pub mod error;
pub mod types;

pub use config::SlangDecoderConfig;
pub use error::{Result, SdError};
pub use types::{
    clean_field, strip_punctuation, MatchPolicy, SlangDictionary, SlangEntry, DENYLIST,
    HEADER_SENTINEL,
};

#[cfg(test)]
mod tests;
