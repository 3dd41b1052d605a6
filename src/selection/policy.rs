//! Subtitle stream selection.
//!
//! Resolution is pure: it only looks at the catalog and the request, so every
//! rule can be exercised with synthetic catalogs. When no rule resolves a
//! stream the caller gets [`Selection::NeedsInteractive`] and is expected to
//! ask the user.

use crate::catalog::Catalog;
use crate::error::{Result, SubExtractError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user asked for a stream to be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
    ByLanguage(String),
    ByTitle(String),
    Auto,
    Interactive,
}

impl SelectionRequest {
    /// Builds the request from the individual selectors, honouring
    /// `language > title > auto > interactive`.
    pub fn from_selectors(language: Option<&str>, title: Option<&str>, auto: bool) -> Self {
        if let Some(language) = language {
            SelectionRequest::ByLanguage(language.to_string())
        } else if let Some(title) = title {
            SelectionRequest::ByTitle(title.to_string())
        } else if auto {
            SelectionRequest::Auto
        } else {
            SelectionRequest::Interactive
        }
    }
}

/// Ordered preference lists consulted by [`SelectionRequest::Auto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoPreferences {
    pub title_preferences: Vec<String>,
    pub language_preferences: Vec<String>,
}

impl Default for AutoPreferences {
    fn default() -> Self {
        Self {
            title_preferences: vec![
                "English [SDH]".to_string(),
                "English".to_string(),
                "Greek".to_string(),
            ],
            language_preferences: vec!["eng".to_string(), "gre".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    SingleStream,
    Language,
    Title,
    AutoTitle,
    AutoLanguage,
    Interactive,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SelectionReason::SingleStream => "only subtitle stream",
            SelectionReason::Language => "matched --language",
            SelectionReason::Title => "matched --title",
            SelectionReason::AutoTitle => "preferred title",
            SelectionReason::AutoLanguage => "preferred language",
            SelectionReason::Interactive => "chosen interactively",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Resolved { index: usize, reason: SelectionReason },
    NeedsInteractive,
}

/// Resolve which stream to extract.
///
/// Rules are tried in order and the first applicable one wins:
/// an empty catalog fails, a single stream is always taken, then explicit
/// language, explicit title, automatic preferences, and finally interactive.
pub fn select(
    catalog: &Catalog,
    request: &SelectionRequest,
    preferences: &AutoPreferences,
) -> Result<Selection> {
    match catalog.len() {
        0 => return Err(SubExtractError::NoSubtitles),
        1 => {
            return Ok(Selection::Resolved {
                index: 0,
                reason: SelectionReason::SingleStream,
            })
        }
        _ => {}
    }

    match request {
        SelectionRequest::ByLanguage(language) => catalog
            .first_with_language(language)
            .map(|stream| Selection::Resolved {
                index: stream.index,
                reason: SelectionReason::Language,
            })
            .ok_or_else(|| SubExtractError::LanguageNotFound(language.clone())),
        SelectionRequest::ByTitle(title) => catalog
            .first_with_title(title)
            .map(|stream| Selection::Resolved {
                index: stream.index,
                reason: SelectionReason::Title,
            })
            .ok_or_else(|| SubExtractError::TitleNotFound(title.clone())),
        SelectionRequest::Auto => Ok(select_auto(catalog, preferences)),
        SelectionRequest::Interactive => Ok(Selection::NeedsInteractive),
    }
}

fn select_auto(catalog: &Catalog, preferences: &AutoPreferences) -> Selection {
    let title_counts = catalog.title_counts();
    for title in &preferences.title_preferences {
        if title_counts.get(title.as_str()) == Some(&1) {
            if let Some(stream) = catalog.first_with_title(title) {
                tracing::debug!(title = %title, index = stream.index, "auto selection by title");
                return Selection::Resolved {
                    index: stream.index,
                    reason: SelectionReason::AutoTitle,
                };
            }
        }
    }

    let language_counts = catalog.language_counts();
    for language in &preferences.language_preferences {
        if language_counts.get(language.as_str()) == Some(&1) {
            if let Some(stream) = catalog.first_with_language(language) {
                tracing::debug!(language = %language, index = stream.index, "auto selection by language");
                return Selection::Resolved {
                    index: stream.index,
                    reason: SelectionReason::AutoLanguage,
                };
            }
        }
    }

    tracing::debug!("no unique preferred title or language, deferring to the user");
    Selection::NeedsInteractive
}
