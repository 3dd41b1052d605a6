pub mod probe_data;
pub mod stream;

pub use stream::{Catalog, SubtitleStream};
