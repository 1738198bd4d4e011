//! Lexicon-backed entity recognizer.
//!
//! A model file lists surface forms per entity label:
//!
//! ```json
//! {
//!   "name": "art-catalog-fr",
//!   "language": "fr",
//!   "entities": {
//!     "PER": ["Claude Monet", "Berthe Morisot"],
//!     "WORK_OF_ART": ["Impression, soleil levant"]
//!   }
//! }
//! ```
//!
//! Matching is case-sensitive, anchored on word boundaries, and prefers the
//! longest form starting at a given position. Matches never overlap.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{Error, Result};

use super::{Annotation, Annotator, EntityLabel, EntitySpan, SentenceSegmenter};

const REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    entities: BTreeMap<String, Vec<String>>,
}

/// Entity recognizer built from a list of known names and titles.
#[derive(Debug, Clone)]
pub struct LexiconModel {
    name: String,
    language: Option<String>,
    matcher: Option<Regex>,
    labels: HashMap<String, EntityLabel>,
    segmenter: SentenceSegmenter,
}

impl LexiconModel {
    /// Load a model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Model(format!("{}: {}", path.display(), e)))?;
        let model = Self::from_json(&json)?;
        log::info!(
            "Loaded model '{}' from {} ({} entries)",
            model.name,
            path.display(),
            model.len()
        );
        Ok(model)
    }

    /// Parse a model from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(json)
            .map_err(|e| Error::Model(format!("invalid model: {}", e)))?;

        let entries = file.entities.into_iter().flat_map(|(label, forms)| {
            let label = EntityLabel::parse(&label);
            forms.into_iter().map(move |form| (label.clone(), form))
        });
        let mut model = Self::from_entries(
            file.name.unwrap_or_else(|| "lexicon".to_string()),
            entries,
        )?;
        model.language = file.language;
        Ok(model)
    }

    /// Build a model from `(label, surface form)` pairs.
    ///
    /// When a surface form is listed under several labels, the first wins.
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EntityLabel, String)>,
    {
        let mut labels: HashMap<String, EntityLabel> = HashMap::new();
        for (label, form) in entries {
            let form = form.trim().to_string();
            if form.is_empty() {
                continue;
            }
            if let Some(existing) = labels.get(&form) {
                if *existing != label {
                    log::warn!(
                        "'{}' is listed as both {} and {}; keeping {}",
                        form,
                        existing,
                        label,
                        existing
                    );
                }
                continue;
            }
            labels.insert(form, label);
        }

        Ok(Self {
            name: name.into(),
            language: None,
            matcher: build_matcher(labels.keys())?,
            labels,
            segmenter: SentenceSegmenter::new(),
        })
    }

    /// Language declared by the model file, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Number of surface forms known to the model.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the model knows no entities.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn entities(&self, text: &str) -> Vec<EntitySpan> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        matcher
            .find_iter(text)
            .filter_map(|m| {
                let label = self.labels.get(m.as_str())?;
                Some(EntitySpan {
                    start: m.start(),
                    end: m.end(),
                    text: m.as_str().to_string(),
                    label: label.clone(),
                })
            })
            .collect()
    }
}

impl Annotator for LexiconModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn annotate(&self, text: &str) -> Annotation {
        Annotation {
            entities: self.entities(text),
            sentences: self.segmenter.segment(text),
        }
    }
}

/// One alternation over all forms, longest first so that leftmost-first
/// matching picks the longest form at each position.
fn build_matcher<'a, I>(forms: I) -> Result<Option<Regex>>
where
    I: Iterator<Item = &'a String>,
{
    let mut forms: Vec<&String> = forms.collect();
    if forms.is_empty() {
        return Ok(None);
    }
    forms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternatives: Vec<String> = forms
        .iter()
        .map(|form| {
            let starts_word = form.chars().next().is_some_and(is_word_char);
            let ends_word = form.chars().last().is_some_and(is_word_char);
            format!(
                "{}{}{}",
                if starts_word { r"\b" } else { "" },
                regex::escape(form),
                if ends_word { r"\b" } else { "" }
            )
        })
        .collect();

    RegexBuilder::new(&alternatives.join("|"))
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map(Some)
        .map_err(|e| Error::Model(format!("cannot compile lexicon: {}", e)))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
