// src/extractors/mod.rs
pub mod patterns;
pub mod period;
pub mod statement;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use statement::{
    ExtractionReport,
    ExtractionWarning,
    LineOutcome,
    SkipReason,
    StatementExtraction,
    StatementLineExtractor,
};
