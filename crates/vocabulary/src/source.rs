use std::path::Path;

use serde::Deserialize;

use crate::entry::{Pronunciation, VocabularyEntry};
use crate::VocabularyError;

// The list is produced externally (Oxford 5000 scrape); each record wraps
// the entry proper in a `value` object next to a numeric id.
#[derive(Debug, Deserialize)]
struct WireRecord {
    #[allow(dead_code)]
    id: Option<u64>,
    value: WireEntry,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    word: String,
    #[allow(dead_code)]
    href: Option<String>,
    #[serde(rename = "type")]
    part_of_speech: String,
    level: String,
    thai: Option<String>,
    us: WireAudio,
    uk: WireAudio,
    phonetics: WirePhonetics,
    #[serde(default)]
    examples: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireAudio {
    mp3: String,
    ogg: String,
}

#[derive(Debug, Deserialize)]
struct WirePhonetics {
    us: String,
    uk: String,
}

impl From<WireEntry> for VocabularyEntry {
    fn from(wire: WireEntry) -> Self {
        Self {
            word: wire.word,
            part_of_speech: wire.part_of_speech,
            level: wire.level,
            thai: wire.thai,
            us: Pronunciation {
                mp3: wire.us.mp3,
                ogg: wire.us.ogg,
                phonetic: wire.phonetics.us,
            },
            uk: Pronunciation {
                mp3: wire.uk.mp3,
                ogg: wire.uk.ogg,
                phonetic: wire.phonetics.uk,
            },
            examples: wire.examples,
        }
    }
}

pub(crate) fn parse_entries(bytes: &[u8]) -> Result<Vec<VocabularyEntry>, VocabularyError> {
    let records: Vec<WireRecord> =
        serde_json::from_slice(bytes).map_err(VocabularyError::Parse)?;
    if records.is_empty() {
        return Err(VocabularyError::Empty);
    }
    Ok(records
        .into_iter()
        .map(|record| record.value.into())
        .collect())
}

pub(crate) async fn fetch_entries(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<VocabularyEntry>, VocabularyError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(VocabularyError::Fetch)?;
    let status = response.status();
    if !status.is_success() {
        return Err(VocabularyError::Status(status));
    }
    let bytes = response.bytes().await.map_err(VocabularyError::Fetch)?;
    parse_entries(&bytes)
}

pub(crate) fn read_entries(path: &Path) -> Result<Vec<VocabularyEntry>, VocabularyError> {
    let bytes = std::fs::read(path).map_err(VocabularyError::Read)?;
    parse_entries(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 1,
            "value": {
                "word": "abandon",
                "href": "https://www.oxfordlearnersdictionaries.com/definition/english/abandon_1",
                "type": "verb",
                "level": "B2",
                "thai": "ละทิ้ง",
                "us": { "mp3": "https://audio.example/abandon_us.mp3", "ogg": "https://audio.example/abandon_us.ogg" },
                "uk": { "mp3": "https://audio.example/abandon_uk.mp3", "ogg": "https://audio.example/abandon_uk.ogg" },
                "phonetics": { "us": "/əˈbændən/", "uk": "/əˈbændən/" },
                "examples": ["The baby had been abandoned by its mother."]
            }
        }
    ]"#;

    #[test]
    fn parses_a_full_record() {
        let entries = parse_entries(SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.word, "abandon");
        assert_eq!(entry.part_of_speech, "verb");
        assert_eq!(entry.level, "B2");
        assert_eq!(entry.thai.as_deref(), Some("ละทิ้ง"));
        assert_eq!(entry.us.mp3, "https://audio.example/abandon_us.mp3");
        assert_eq!(entry.uk.phonetic, "/əˈbændən/");
        assert_eq!(entry.examples.len(), 1);
    }

    #[test]
    fn thai_translation_is_optional() {
        let json = r#"[{"value": {
            "word": "the", "type": "definite article", "level": "A1",
            "us": {"mp3": "the_us.mp3", "ogg": "the_us.ogg"},
            "uk": {"mp3": "the_uk.mp3", "ogg": "the_uk.ogg"},
            "phonetics": {"us": "/ðə/", "uk": "/ðə/"},
            "examples": []
        }}]"#;
        let entries = parse_entries(json.as_bytes()).unwrap();
        assert_eq!(entries[0].thai, None);
    }

    #[test]
    fn unknown_categories_pass_through() {
        // The word list is open-ended; unfamiliar type/level values are kept
        // verbatim and only fall back to a default style at render time.
        let json = r#"[{"value": {
            "word": "ought to", "type": "modal verb", "level": "D1",
            "us": {"mp3": "a.mp3", "ogg": "a.ogg"},
            "uk": {"mp3": "b.mp3", "ogg": "b.ogg"},
            "phonetics": {"us": "/ɔːt/", "uk": "/ɔːt/"},
            "examples": []
        }}]"#;
        let entries = parse_entries(json.as_bytes()).unwrap();
        assert_eq!(entries[0].part_of_speech, "modal verb");
        assert_eq!(entries[0].level, "D1");
    }

    #[test]
    fn missing_examples_default_to_empty() {
        let json = r#"[{"value": {
            "word": "word", "type": "noun", "level": "A1",
            "us": {"mp3": "a.mp3", "ogg": "a.ogg"},
            "uk": {"mp3": "b.mp3", "ogg": "b.ogg"},
            "phonetics": {"us": "/wɜːrd/", "uk": "/wɜːd/"}
        }}]"#;
        let entries = parse_entries(json.as_bytes()).unwrap();
        assert!(entries[0].examples.is_empty());
    }

    #[test]
    fn empty_array_is_a_load_failure() {
        let error = parse_entries(b"[]").unwrap_err();
        assert!(matches!(error, VocabularyError::Empty));
    }

    #[test]
    fn malformed_json_is_a_load_failure() {
        let error = parse_entries(b"{not json").unwrap_err();
        assert!(matches!(error, VocabularyError::Parse(_)));
    }
}
