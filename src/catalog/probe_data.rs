use crate::catalog::Catalog;
use crate::error::Result;
use serde::Deserialize;

/// Top-level document printed by
/// `ffprobe -select_streams s -show_entries stream=index:stream_tags=language:stream_tags=title -print_format json`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProbeDocument {
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    tags: ProbeTags,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeTags {
    language: Option<String>,
    title: Option<String>,
}

impl From<ProbeDocument> for Catalog {
    fn from(document: ProbeDocument) -> Self {
        Catalog::from_tags(
            document
                .streams
                .into_iter()
                .map(|stream| (stream.tags.language, stream.tags.title)),
        )
    }
}

impl Catalog {
    /// Parse raw ffprobe stdout into a catalog.
    pub fn from_probe_output(output: &[u8]) -> Result<Self> {
        let document: ProbeDocument = serde_json::from_slice(output)?;
        Ok(document.into())
    }
}
