//! Artwork information classifier.
//!
//! Entities tagged as persons become artists, works of art become titles.
//! Every sentence is then checked against two keyword lists, dates and
//! techniques. Both checks always run, so one sentence can land in both.

use std::path::Path;

use crate::model::{ArtworkInfo, Category, Classification};
use crate::nlp::{Annotation, Annotator, EntityLabel, LexiconModel};

/// Keyword lists for the sentence pass. Keywords are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRules {
    dates: Vec<String>,
    techniques: Vec<String>,
}

impl KeywordRules {
    /// Build rules from custom keyword lists.
    pub fn new<D, T>(dates: D, techniques: T) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let lower = |k: &str| k.trim().to_lowercase();
        Self {
            dates: dates.into_iter().map(|k| lower(k.as_ref())).collect(),
            techniques: techniques.into_iter().map(|k| lower(k.as_ref())).collect(),
        }
    }

    /// English keywords.
    pub fn english() -> Self {
        Self::new(
            ["date", "year", "created in"],
            ["technique", "oil", "watercolor", "acrylic"],
        )
    }

    /// French keywords.
    pub fn french() -> Self {
        Self::new(
            ["date", "année", "créé en"],
            ["technique", "huile", "aquarelle", "acrylique"],
        )
    }

    /// Preset for a language code or name (`en`, `english`, `fr`, `french`).
    pub fn for_language(language: &str) -> Option<Self> {
        match language.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Self::english()),
            "fr" | "fra" | "fre" | "french" | "français" => Some(Self::french()),
            _ => None,
        }
    }

    pub fn date_keywords(&self) -> &[String] {
        &self.dates
    }

    pub fn technique_keywords(&self) -> &[String] {
        &self.techniques
    }

    fn matches(keywords: &[String], lowered: &str) -> bool {
        keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for KeywordRules {
    fn default() -> Self {
        Self::english()
    }
}

/// Whether an annotation model is loaded.
pub enum ModelState {
    Available(Box<dyn Annotator>),
    Unavailable,
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelState::Available(model) => write!(f, "Available({})", model.name()),
            ModelState::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Buckets text into artists, titles, dates and techniques.
#[derive(Debug)]
pub struct ArtworkClassifier {
    model: ModelState,
    rules: KeywordRules,
}

impl ArtworkClassifier {
    /// Create a classifier from a model state and keyword rules.
    pub fn new(model: ModelState, rules: KeywordRules) -> Self {
        Self { model, rules }
    }

    /// Classifier backed by an annotator, with English keywords.
    pub fn with_annotator<A: Annotator + 'static>(annotator: A) -> Self {
        Self::new(
            ModelState::Available(Box::new(annotator)),
            KeywordRules::default(),
        )
    }

    /// Classifier without a model. Every call returns the degraded result.
    pub fn unavailable() -> Self {
        Self::new(ModelState::Unavailable, KeywordRules::default())
    }

    /// Load a lexicon model from `path`.
    ///
    /// A missing path or a model that fails to load yields a classifier in
    /// degraded mode; the failure is logged, not returned.
    pub fn from_model_path(path: Option<&Path>, rules: KeywordRules) -> Self {
        let model = match path {
            Some(path) => match LexiconModel::load(path) {
                Ok(model) => ModelState::Available(Box::new(model)),
                Err(e) => {
                    log::warn!("Model not found, artwork classification is limited: {}", e);
                    ModelState::Unavailable
                }
            },
            None => {
                log::warn!("No model configured, artwork classification is limited");
                ModelState::Unavailable
            }
        };
        Self::new(model, rules)
    }

    /// Replace the keyword rules.
    pub fn with_rules(mut self, rules: KeywordRules) -> Self {
        self.rules = rules;
        self
    }

    /// Keyword rules applied to sentences.
    pub fn rules(&self) -> &KeywordRules {
        &self.rules
    }

    /// Check if a model is loaded.
    pub fn is_available(&self) -> bool {
        matches!(self.model, ModelState::Available(_))
    }

    /// Name of the loaded model.
    pub fn model_name(&self) -> Option<&str> {
        match &self.model {
            ModelState::Available(model) => Some(model.name()),
            ModelState::Unavailable => None,
        }
    }

    /// Classify a text.
    pub fn classify(&self, text: &str) -> Classification {
        match &self.model {
            ModelState::Available(model) => {
                let annotation = model.annotate(text);
                Classification::Info(bucket(&annotation, &self.rules))
            }
            ModelState::Unavailable => Classification::Unavailable,
        }
    }
}

/// Sort an annotation into artwork categories.
pub fn bucket(annotation: &Annotation, rules: &KeywordRules) -> ArtworkInfo {
    let mut info = ArtworkInfo::new();

    for entity in &annotation.entities {
        match entity.label {
            EntityLabel::Person => info.insert(Category::Artists, entity.text.as_str()),
            EntityLabel::WorkOfArt => info.insert(Category::Titles, entity.text.as_str()),
            _ => continue,
        };
    }

    for sentence in &annotation.sentences {
        let lowered = sentence.text.to_lowercase();
        if KeywordRules::matches(&rules.dates, &lowered) {
            info.insert(Category::Dates, sentence.text.as_str());
        }
        if KeywordRules::matches(&rules.techniques, &lowered) {
            info.insert(Category::Techniques, sentence.text.as_str());
        }
    }

    log::debug!(
        "Classified {} entities and {} sentences into {} entries",
        annotation.entities.len(),
        annotation.sentences.len(),
        info.len()
    );
    info
}
