//! Gemini provider using the generateContent API.
//!
//! Images travel as inline base64 parts; the first inline image part in the
//! response wins. Gemini sometimes answers with prose instead of an image,
//! which surfaces as a distinct error carrying the model's text.

use super::{EditResult, Provider, SourceImage};
use crate::error::ProviderError;
use crate::format::ImageFormat;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini image provider.
pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    image_size: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<String>, model: &str, image_size: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            model: model.to_string(),
            image_size: image_size.to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/models/{}:generateContent", self.model)
    }

    fn require_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured {
                provider: "gemini".to_string(),
                env_var: "GEMINI_API_KEY".to_string(),
            })
    }

    /// Send parts to generateContent and extract the resulting image.
    async fn invoke(&self, parts: Vec<Part>) -> Result<EditResult, ProviderError> {
        let api_key = self.require_key()?;

        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts }],
            generation_config: GenerationConfig {
                response_modalities: &["IMAGE", "TEXT"],
                image_config: ImageConfig {
                    image_size: self.image_size.clone(),
                },
            },
        };

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Request {
                provider: "gemini".to_string(),
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let payload: GenerateContentResponse =
            resp.json().await.map_err(|e| ProviderError::Request {
                provider: "gemini".to_string(),
                message: format!("Failed to parse response: {e}"),
                status_code: None,
            })?;

        extract_image(payload, &self.model)
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                provider: "gemini".to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            ProviderError::Request {
                provider: "gemini".to_string(),
                message: format!("Request failed: {e}"),
                status_code: None,
            }
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: &'static [&'static str],
    image_config: ImageConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    image_size: String,
}

/// One content part. The request and response shapes match, so a single
/// type serves both directions.
#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(
        rename = "inlineData",
        alias = "inline_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    inline_data: Option<InlineData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    data: String,
}

impl Part {
    fn image(data: &[u8], mime_type: &str) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(data),
            }),
            text: None,
        }
    }

    fn text(text: &str) -> Self {
        Self {
            inline_data: None,
            text: Some(text.to_string()),
        }
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Pull the first inline image out of a response.
///
/// Text parts are collected so a prose-only answer can be surfaced to the
/// user instead of a bare "no image" failure.
fn extract_image(
    response: GenerateContentResponse,
    model: &str,
) -> Result<EditResult, ProviderError> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default();

    let mut texts = Vec::new();
    for part in parts {
        if let Some(inline) = part.inline_data {
            let image_data = base64::engine::general_purpose::STANDARD
                .decode(&inline.data)
                .map_err(|e| ProviderError::Request {
                    provider: "gemini".to_string(),
                    message: format!("Invalid base64 image payload: {e}"),
                    status_code: None,
                })?;
            return Ok(EditResult {
                image_data,
                mime_type: inline.mime_type,
                provider: "gemini".to_string(),
                model: Some(model.to_string()),
            });
        }
        if let Some(text) = part.text {
            texts.push(text);
        }
    }

    if !texts.is_empty() {
        return Err(ProviderError::TextResponse {
            provider: "gemini".to_string(),
            text: texts.join(" "),
        });
    }

    Err(ProviderError::NoImage {
        provider: "gemini".to_string(),
    })
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn edit(
        &self,
        image: &[u8],
        prompt: &str,
        mime_type: Option<&str>,
    ) -> Result<EditResult, ProviderError> {
        let mime = match mime_type {
            Some(mime) => mime.to_string(),
            None => ImageFormat::detect(image)
                .map(|f| f.mime_type())
                .unwrap_or("image/png")
                .to_string(),
        };
        self.invoke(vec![Part::image(image, &mime), Part::text(prompt)])
            .await
    }

    async fn generate(&self, prompt: &str) -> Result<EditResult, ProviderError> {
        self.invoke(vec![Part::text(prompt)]).await
    }

    async fn combine(
        &self,
        images: &[SourceImage],
        prompt: &str,
    ) -> Result<EditResult, ProviderError> {
        let mut parts: Vec<Part> = images
            .iter()
            .map(|image| Part::image(&image.data, image.resolved_mime()))
            .collect();
        parts.push(Part::text(prompt));
        self.invoke(parts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(
            api_key.map(String::from),
            "gemini-3-pro-image-preview",
            "1K",
            Duration::from_secs(30),
        )
    }

    #[test]
    fn test_is_configured() {
        assert!(provider(Some("key-1234")).is_configured());
        assert!(!provider(None).is_configured());
        // Empty keys count as missing
        assert!(!provider(Some("")).is_configured());
    }

    #[test]
    fn test_endpoint_includes_model() {
        let p = provider(Some("k"));
        assert_eq!(
            p.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-pro-image-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let p = provider(None);
        let err = p.generate("a red square").await.unwrap_err();
        match err {
            ProviderError::NotConfigured { env_var, .. } => {
                assert_eq!(env_var, "GEMINI_API_KEY");
            }
            other => panic!("Expected NotConfigured, got: {other}"),
        }
    }

    #[test]
    fn test_request_shape_uses_camel_case() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part::image(&[1, 2, 3], "image/png"), Part::text("hello")],
            }],
            generation_config: GenerationConfig {
                response_modalities: &["IMAGE", "TEXT"],
                image_config: ImageConfig {
                    image_size: "2K".to_string(),
                },
            },
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE", "TEXT"])
        );
        assert_eq!(value["generationConfig"]["imageConfig"]["imageSize"], "2K");
        // Images precede the text part
        let parts = &value["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["text"], "hello");
        assert!(parts[0].get("text").is_none());
    }

    #[test]
    fn test_extract_image_from_camel_case_response() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(payload).unwrap();
        let result = extract_image(response, "gemini-3-pro-image-preview").unwrap();
        assert_eq!(result.image_data, vec![1, 2, 3]);
        assert_eq!(result.mime_type, "image/png");
        assert_eq!(result.provider, "gemini");
        assert_eq!(result.model.as_deref(), Some("gemini-3-pro-image-preview"));
    }

    #[test]
    fn test_extract_image_accepts_snake_case_response() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inline_data": { "mime_type": "image/jpeg", "data": "AQID" } }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(payload).unwrap();
        let result = extract_image(response, "m").unwrap();
        assert_eq!(result.mime_type, "image/jpeg");
    }

    #[test]
    fn test_extract_image_text_only_response() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "I cannot edit" },
                        { "text": "this image." }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(payload).unwrap();
        let err = extract_image(response, "m").unwrap_err();
        match err {
            ProviderError::TextResponse { text, .. } => {
                assert_eq!(text, "I cannot edit this image.");
            }
            other => panic!("Expected TextResponse, got: {other}"),
        }
    }

    #[test]
    fn test_extract_image_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        let err = extract_image(response, "m").unwrap_err();
        assert!(matches!(err, ProviderError::NoImage { .. }));
    }

    #[test]
    fn test_extract_image_invalid_base64() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "!!!not-base64!!!" } }
                    ]
                }
            }]
        });
        let response: GenerateContentResponse = serde_json::from_value(payload).unwrap();
        let err = extract_image(response, "m").unwrap_err();
        assert!(matches!(err, ProviderError::Request { .. }));
    }
}
