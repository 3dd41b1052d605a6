pub mod output_resolver;
pub mod report;

pub use output_resolver::{normalize_extension, OutputResolver, OutputTarget, DEFAULT_EXTENSION};
pub use report::ExtractionReport;
