use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const NOT_AVAILABLE: &str = "N/A";

/// One subtitle stream of the input container, addressed by its position
/// among the subtitle streams (not the container-wide stream index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleStream {
    pub index: usize,
    pub language: Option<String>,
    pub title: Option<String>,
}

impl SubtitleStream {
    pub fn language_or_na(&self) -> &str {
        self.language.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn title_or_na(&self) -> &str {
        self.title.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

impl fmt::Display for SubtitleStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {} (language: {})",
            self.title_or_na(),
            self.language_or_na()
        )
    }
}

/// Ordered subtitle streams as reported by the probe.
///
/// Indices are always `0..len()` in order; the only way to build a catalog is
/// from the tag pairs, so positions cannot drift from indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    streams: Vec<SubtitleStream>,
}

impl Catalog {
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, Option<String>)>,
    {
        let streams = tags
            .into_iter()
            .enumerate()
            .map(|(index, (language, title))| SubtitleStream {
                index,
                language,
                title,
            })
            .collect();

        Self { streams }
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SubtitleStream> {
        self.streams.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubtitleStream> {
        self.streams.iter()
    }

    pub fn first_with_language(&self, language: &str) -> Option<&SubtitleStream> {
        self.streams
            .iter()
            .find(|s| s.language.as_deref() == Some(language))
    }

    pub fn first_with_title(&self, title: &str) -> Option<&SubtitleStream> {
        self.streams
            .iter()
            .find(|s| s.title.as_deref() == Some(title))
    }

    /// Occurrences of each present language tag. Absent tags are not counted.
    pub fn language_counts(&self) -> HashMap<&str, usize> {
        count_values(self.streams.iter().filter_map(|s| s.language.as_deref()))
    }

    /// Occurrences of each present title tag. Absent tags are not counted.
    pub fn title_counts(&self) -> HashMap<&str, usize> {
        count_values(self.streams.iter().filter_map(|s| s.title.as_deref()))
    }
}

fn count_values<'a, I>(values: I) -> HashMap<&'a str, usize>
where
    I: Iterator<Item = &'a str>,
{
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}
