/// One word of the vocabulary list, immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    pub word: String,
    /// Open-ended grammatical category ("noun", "verb", "indefinite article", ...).
    pub part_of_speech: String,
    /// CEFR tier, "A1" through "C2" in practice.
    pub level: String,
    pub thai: Option<String>,
    pub us: Pronunciation,
    pub uk: Pronunciation,
    /// Part of the entry contract; the card view does not render these.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pronunciation {
    /// Audio clip reference, a URL or a local path.
    pub mp3: String,
    pub ogg: String,
    /// Phonetic transcription, e.g. "/wɜːrd/".
    pub phonetic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Us,
    Uk,
}

impl Accent {
    pub fn other(self) -> Self {
        match self {
            Accent::Us => Accent::Uk,
            Accent::Uk => Accent::Us,
        }
    }

    /// BCP 47 tag used for speech synthesis.
    pub fn locale(self) -> &'static str {
        match self {
            Accent::Us => "en-US",
            Accent::Uk => "en-GB",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Accent::Us => "US",
            Accent::Uk => "UK",
        }
    }
}

impl VocabularyEntry {
    pub fn pronunciation(&self, accent: Accent) -> &Pronunciation {
        match accent {
            Accent::Us => &self.us,
            Accent::Uk => &self.uk,
        }
    }
}
