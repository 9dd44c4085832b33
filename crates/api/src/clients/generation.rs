//! Client for the OpenAI-compatible generation provider.
//!
//! Covers caption generation (chat completions) and image generation
//! (social graphics, thumbnails). Request bodies are built by pure
//! functions so they can be unit tested without a live provider.

use serde::{Deserialize, Serialize};
use serde_json::json;

use inflio_core::platform::Platform;

/// Errors from the generation provider.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No API key is configured.
    #[error("Generation provider is not configured")]
    MissingKey,

    /// The HTTP request itself failed (connect, DNS, timeout).
    #[error("Generation request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("Generation provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered 2xx but the body did not have the
    /// expected shape.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// A generated caption with optional hashtags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCaption {
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Client for an OpenAI-compatible API.
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GenerationClient {
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a caption for `platform` from a content summary.
    ///
    /// The prompt asks for JSON; if the model answers with plain text
    /// the whole answer is used as the caption.
    pub async fn generate_caption(
        &self,
        platform: Platform,
        content_summary: &str,
        tone: Option<&str>,
    ) -> Result<GeneratedCaption, GenerationError> {
        let key = self.api_key.as_deref().ok_or(GenerationError::MissingKey)?;
        let body = caption_request_body(platform, content_summary, tone);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| GenerationError::Malformed("missing choices[0].message.content".into()))?;

        Ok(parse_caption_content(content))
    }

    /// Generate `count` images from a prompt. Returns provider URLs.
    pub async fn generate_images(
        &self,
        prompt: &str,
        count: u8,
    ) -> Result<Vec<String>, GenerationError> {
        let key = self.api_key.as_deref().ok_or(GenerationError::MissingKey)?;
        let body = image_request_body(prompt, count);

        let response = self
            .http
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let urls = payload["data"]
            .as_array()
            .ok_or_else(|| GenerationError::Malformed("missing data array".into()))?
            .iter()
            .filter_map(|entry| entry["url"].as_str().map(String::from))
            .collect();

        Ok(urls)
    }
}

/// Build the chat-completion request body for a caption.
pub fn caption_request_body(
    platform: Platform,
    content_summary: &str,
    tone: Option<&str>,
) -> serde_json::Value {
    let limits = platform.limits();
    let tone = tone.unwrap_or("engaging");
    let system = format!(
        "You write social media captions for {}. Stay under {} characters. \
         Answer with JSON: {{\"caption\": \"...\", \"hashtags\": [\"tag\", ...]}} \
         with at most {} hashtags.",
        platform.as_str(),
        limits.caption_max,
        limits.hashtag_max,
    );
    let user = format!("Tone: {tone}. Content: {content_summary}");

    json!({
        "model": "gpt-4o-mini",
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ],
        "temperature": 0.7,
    })
}

/// Build the image-generation request body.
pub fn image_request_body(prompt: &str, count: u8) -> serde_json::Value {
    json!({
        "model": "dall-e-3",
        "prompt": prompt,
        "n": count,
        "size": "1024x1024",
    })
}

/// Parse a model answer into a caption. Accepts either the requested
/// JSON shape or plain text.
pub fn parse_caption_content(content: &str) -> GeneratedCaption {
    if let Ok(parsed) = serde_json::from_str::<GeneratedCaption>(content.trim()) {
        return parsed;
    }
    GeneratedCaption {
        caption: content.trim().to_string(),
        hashtags: Vec::new(),
    }
}

/// Deterministic caption used when the provider is unavailable.
///
/// Truncated to the platform's caption limit so the result is always
/// postable as-is.
pub fn fallback_caption(platform: Platform, content_summary: &str) -> GeneratedCaption {
    let limits = platform.limits();
    let caption: String = content_summary
        .trim()
        .chars()
        .take(limits.caption_max)
        .collect();
    GeneratedCaption {
        caption,
        hashtags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_body_includes_platform_limits() {
        let body = caption_request_body(Platform::X, "a launch video", None);
        let system = body["messages"][0]["content"].as_str().unwrap();
        assert!(system.contains("280"));
        assert!(system.contains("x"));
    }

    #[test]
    fn caption_body_carries_tone() {
        let body = caption_request_body(Platform::Linkedin, "quarterly recap", Some("formal"));
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with("Tone: formal"));
    }

    #[test]
    fn parse_accepts_json_answer() {
        let parsed =
            parse_caption_content(r#"{"caption": "Big news!", "hashtags": ["launch"]}"#);
        assert_eq!(parsed.caption, "Big news!");
        assert_eq!(parsed.hashtags, vec!["launch"]);
    }

    #[test]
    fn parse_falls_back_to_plain_text() {
        let parsed = parse_caption_content("Just a plain caption");
        assert_eq!(parsed.caption, "Just a plain caption");
        assert!(parsed.hashtags.is_empty());
    }

    #[test]
    fn fallback_caption_respects_platform_limit() {
        let long = "x".repeat(500);
        let caption = fallback_caption(Platform::X, &long);
        assert_eq!(caption.caption.chars().count(), 280);
        assert!(caption.hashtags.is_empty());
    }

    #[test]
    fn image_body_carries_count() {
        let body = image_request_body("sunset skyline", 3);
        assert_eq!(body["n"], 3);
        assert_eq!(body["prompt"], "sunset skyline");
    }
}
