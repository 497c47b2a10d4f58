use crate::config::RequestConfig;
use serde::Serialize;

/// Wire payload for `invoke-model`. Serialized field names are exactly the
/// JSON keys Bedrock text models expect.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPayload {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl RequestPayload {
    /// Build from a rendered prompt and the configured knobs. Out-of-range
    /// knobs are clamped into their domains: `max_tokens` >= 1, `temperature`
    /// and `top_p` in [0, 1].
    pub fn new(prompt: String, config: &RequestConfig) -> Self {
        Self {
            prompt,
            max_tokens: config.max_tokens.max(1),
            temperature: config.temperature.clamp(0.0, 1.0),
            top_p: config.top_p.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_through_unclamped() {
        let payload = RequestPayload::new("p".into(), &RequestConfig::default());
        assert_eq!(payload.max_tokens, 1024);
        assert!((payload.temperature - 0.7).abs() < f64::EPSILON);
        assert!((payload.top_p - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_knobs_are_clamped() {
        let config = RequestConfig {
            max_tokens: 0,
            temperature: 1.5,
            top_p: -0.2,
        };
        let payload = RequestPayload::new("p".into(), &config);
        assert_eq!(payload.max_tokens, 1);
        assert!((payload.temperature - 1.0).abs() < f64::EPSILON);
        assert!(payload.top_p.abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_with_bedrock_wire_names() {
        let payload = RequestPayload::new("hello".into(), &RequestConfig::default());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["prompt"], "hello");
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["top_p"], 0.9);
    }
}
