//! Structured output conversion.
//!
//! Instructs the model to emit text in a specific parseable shape, then
//! decodes that text into a fixed-field record. The conversion is a single
//! best-effort pass: fenced code blocks are tolerated, but there is no repair
//! round trip.

use crate::error::OutputError;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::marker::PhantomData;

/// Converts freeform model text into a typed record.
///
/// The converter carries the JSON schema of the target record. `format()`
/// produces the instruction block appended to the user prompt, and
/// `convert()` decodes the model's reply.
#[derive(Debug, Clone)]
pub struct OutputConverter<T> {
    schema: JsonValue,
    _output: PhantomData<T>,
}

impl<T: DeserializeOwned> OutputConverter<T> {
    /// Creates a converter for the record described by `schema`.
    #[must_use]
    pub fn new(schema: JsonValue) -> Self {
        Self {
            schema,
            _output: PhantomData,
        }
    }

    /// Returns the format instruction to append to the user prompt.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "Your response should be in JSON format.\n\
             Do not include any explanations, only provide a RFC8259 compliant \
             JSON response following this format without deviation.\n\
             Do not include markdown code blocks in your response.\n\
             Here is the JSON Schema instance your output must adhere to:\n\
             ```{}```",
            self.schema
        )
    }

    /// Decodes model output into the record.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::ParseFailed`] if the text does not decode into
    /// the expected shape.
    pub fn convert(&self, text: &str) -> Result<T, OutputError> {
        let stripped = strip_fences(text);
        serde_json::from_str(stripped).map_err(|e| OutputError::ParseFailed {
            reason: e.to_string(),
            text: text.to_string(),
        })
    }
}

/// Removes a surrounding markdown code fence, if present.
///
/// Models frequently wrap JSON in ```json fences despite instructions not to.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Song {
        title: String,
        artist: String,
        album: String,
        year: i32,
    }

    fn converter() -> OutputConverter<Song> {
        OutputConverter::new(serde_json::json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "artist": { "type": "string" },
                "album": { "type": "string" },
                "year": { "type": "integer" }
            },
            "required": ["title", "artist", "album", "year"]
        }))
    }

    fn wrecking_ball() -> Song {
        Song {
            title: "Wrecking Ball".to_string(),
            artist: "Miley Cyrus".to_string(),
            album: "Bangerz".to_string(),
            year: 2013,
        }
    }

    #[test]
    fn format_embeds_schema() {
        let format = converter().format();
        assert!(format.contains("JSON format"));
        assert!(format.contains("\"title\""));
        assert!(format.contains("\"year\""));
    }

    #[test]
    fn converts_conformant_output() {
        let text = r#"{"title":"Wrecking Ball","artist":"Miley Cyrus","album":"Bangerz","year":2013}"#;
        let song = converter().convert(text).expect("conformant fixture");
        assert_eq!(song, wrecking_ball());
    }

    #[test]
    fn converts_fenced_output() {
        let text = "```json\n{\"title\":\"Wrecking Ball\",\"artist\":\"Miley Cyrus\",\"album\":\"Bangerz\",\"year\":2013}\n```";
        let song = converter().convert(text).expect("fenced fixture");
        assert_eq!(song, wrecking_ball());
    }

    #[test]
    fn conversion_is_deterministic() {
        let text = r#"{"title":"Wrecking Ball","artist":"Miley Cyrus","album":"Bangerz","year":2013}"#;
        let c = converter();
        let first = c.convert(text).expect("first pass");
        let second = c.convert(text).expect("second pass");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_nonconformant_output() {
        let err = converter()
            .convert("The top song was Wrecking Ball by Miley Cyrus.")
            .expect_err("prose is not a record");
        let OutputError::ParseFailed { text, .. } = err;
        assert!(text.contains("Wrecking Ball"));
    }

    #[test]
    fn rejects_missing_field() {
        let text = r#"{"title":"Wrecking Ball","artist":"Miley Cyrus","year":2013}"#;
        assert!(converter().convert(text).is_err());
    }
}
