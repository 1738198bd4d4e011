//! Text annotation: named-entity spans and sentence spans.
//!
//! The classifier only depends on the [`Annotator`] trait. [`LexiconModel`]
//! is the bundled implementation, driven by a JSON model file.

mod lexicon;
mod sentence;

pub use lexicon::LexiconModel;
pub use sentence::SentenceSegmenter;

/// Entity type assigned by an annotator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    /// A person's name (`PERSON`, or `PER` in some label sets)
    Person,
    /// Title of a book, song, painting... (`WORK_OF_ART`)
    WorkOfArt,
    /// Companies, museums, institutions (`ORG`)
    Organization,
    /// Non-political locations (`LOC`)
    Location,
    /// Countries, cities, states (`GPE`)
    GeopoliticalEntity,
    /// Absolute or relative dates (`DATE`)
    Date,
    /// Anything else in a closed label set (`MISC`)
    Misc,
    /// A label outside the vocabulary above
    Other(String),
}

impl EntityLabel {
    /// Parse a label as written in model files.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => EntityLabel::Person,
            "WORK_OF_ART" => EntityLabel::WorkOfArt,
            "ORG" => EntityLabel::Organization,
            "LOC" => EntityLabel::Location,
            "GPE" => EntityLabel::GeopoliticalEntity,
            "DATE" => EntityLabel::Date,
            "MISC" => EntityLabel::Misc,
            _ => EntityLabel::Other(label.trim().to_string()),
        }
    }

    /// Canonical label name.
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::WorkOfArt => "WORK_OF_ART",
            EntityLabel::Organization => "ORG",
            EntityLabel::Location => "LOC",
            EntityLabel::GeopoliticalEntity => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Misc => "MISC",
            EntityLabel::Other(label) => label,
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged range of the input text. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub label: EntityLabel,
}

/// One sentence of the input text. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Output of an annotator for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub entities: Vec<EntitySpan>,
    pub sentences: Vec<SentenceSpan>,
}

/// A pretrained model that segments text into entities and sentences.
pub trait Annotator {
    /// Model name for logs and reports.
    fn name(&self) -> &str;

    /// Annotate a text.
    fn annotate(&self, text: &str) -> Annotation;
}
