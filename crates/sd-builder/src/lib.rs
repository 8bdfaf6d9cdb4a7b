//! Dictionary Builder — raw headerless CSV → canonical slang dictionary.
//!
//! Cleaning order:
//! 1. Shape check (≥2 columns, keep the first two)
//! 2. Header-row detection (sentinel first row dropped)
//! 3. Dedup on cleaned slang, first occurrence wins
//! 4. Lowercase + trim both columns, blank keys dropped
//! 5. Denylist filter
//! 6. Materialize the mapping

pub mod builder;
pub mod cache;
pub mod source;

pub use builder::{
    build, build_from_path, build_with_report, BuildOutput, BuildReport,
    LengthBucket,
};
pub use cache::{DictionaryCache, SourceIdentity};
pub use source::{parse_table, read_table, write_table, RawTable};
