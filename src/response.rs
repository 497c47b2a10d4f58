use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// One element of a `choices`/`outputs` sequence. Sibling fields (stop
/// reasons, token counts) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TextSegment {
    pub text: String,
}

#[derive(Deserialize)]
struct ChoicesShape {
    choices: Vec<TextSegment>,
}

#[derive(Deserialize)]
struct OutputsShape {
    outputs: Vec<TextSegment>,
}

#[derive(Deserialize)]
struct GenerationShape {
    generation: String,
}

/// Recognized response layouts. Bedrock model families disagree on where the
/// generated text lives; classification checks top-level keys in this fixed
/// priority order, first match wins.
#[derive(Debug)]
pub enum ResponseShape {
    Choices(Vec<TextSegment>),
    Outputs(Vec<TextSegment>),
    Generation(String),
    Unrecognized(Value),
}

/// Extractor result: generated text, or — when no shape matched — a
/// pretty-printed dump of the whole body. The dump is a best-effort
/// presentation path, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Text(String),
    FullBody(String),
}

impl ResponseShape {
    /// Classify a raw body. A matched top-level key whose content fails its
    /// typed parse is a malformed response, never a fallthrough to a later
    /// priority or to the dump.
    pub fn decode(raw: Value) -> Result<Self> {
        if raw.get("choices").is_some() {
            let shape: ChoicesShape = serde_json::from_value(raw)
                .map_err(|e| Error::unexpected(format!("malformed \"choices\" response: {e}")))?;
            return Ok(Self::Choices(shape.choices));
        }
        if raw.get("outputs").is_some() {
            let shape: OutputsShape = serde_json::from_value(raw)
                .map_err(|e| Error::unexpected(format!("malformed \"outputs\" response: {e}")))?;
            return Ok(Self::Outputs(shape.outputs));
        }
        if raw.get("generation").is_some() {
            let shape: GenerationShape = serde_json::from_value(raw)
                .map_err(|e| Error::unexpected(format!("malformed \"generation\" response: {e}")))?;
            return Ok(Self::Generation(shape.generation));
        }
        Ok(Self::Unrecognized(raw))
    }

    /// Project the generated text out of a decoded shape.
    pub fn extract(self) -> Result<Extracted> {
        match self {
            Self::Choices(segments) => first_text(segments, "choices"),
            Self::Outputs(segments) => first_text(segments, "outputs"),
            Self::Generation(text) => Ok(Extracted::Text(text)),
            Self::Unrecognized(raw) => {
                let dump = serde_json::to_string_pretty(&raw)
                    .map_err(|e| Error::unexpected(format!("render response dump: {e}")))?;
                Ok(Extracted::FullBody(dump))
            }
        }
    }
}

fn first_text(segments: Vec<TextSegment>, key: &str) -> Result<Extracted> {
    segments
        .into_iter()
        .next()
        .map(|s| Extracted::Text(s.text))
        .ok_or_else(|| Error::unexpected(format!("\"{key}\" response contained no entries")))
}

/// Decode and extract in one step.
pub fn extract_text(raw: Value) -> Result<Extracted> {
    ResponseShape::decode(raw)?.extract()
}
