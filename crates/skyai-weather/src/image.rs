use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::instrument;

use crate::gemini::{GeminiClient, GenerateContentRequest, InlineData};
use crate::prompt::image_prompt;
use crate::types::WeatherError;

const DEFAULT_MIME_TYPE: &str = "image/png";

/// Asks the image model for a decorative background.
#[derive(Debug, Clone)]
pub struct ImageGenerator {
    client: GeminiClient,
    model: String,
    aspect_ratio: String,
}

impl ImageGenerator {
    pub fn new(
        client: GeminiClient,
        model: impl Into<String>,
        aspect_ratio: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            aspect_ratio: aspect_ratio.into(),
        }
    }

    /// Background for `condition` as a `data:` URI, or `None` on any failure.
    #[instrument(skip(self), fields(model = %self.model))]
    pub async fn generate(&self, condition: &str) -> Option<String> {
        match self.try_generate(condition).await {
            Ok(Some(uri)) => {
                tracing::info!("Generated background image ({} bytes)", uri.len());
                Some(uri)
            }
            Ok(None) => {
                tracing::debug!("Image response carried no inline image");
                None
            }
            Err(e) => {
                tracing::warn!("Image generation failed: {}", e);
                None
            }
        }
    }

    pub async fn try_generate(&self, condition: &str) -> Result<Option<String>, WeatherError> {
        let request = GenerateContentRequest::from_prompt(image_prompt(condition))
            .with_aspect_ratio(self.aspect_ratio.clone());

        let response = self.client.generate_content(&self.model, &request).await?;
        let uri = response.inline_data().find_map(to_data_uri);
        Ok(uri)
    }
}

/// Encode an inline part as a data URI, skipping payloads that are not valid base64.
fn to_data_uri(inline: &InlineData) -> Option<String> {
    let data = inline.data.trim();
    if data.is_empty() || STANDARD.decode(data).is_err() {
        return None;
    }
    let mime = inline
        .mime_type
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE);
    Some(format!("data:{mime};base64,{data}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_uses_mime_type() {
        let inline = InlineData {
            mime_type: Some("image/jpeg".into()),
            data: "aGVsbG8=".into(),
        };
        assert_eq!(
            to_data_uri(&inline).as_deref(),
            Some("data:image/jpeg;base64,aGVsbG8=")
        );
    }

    #[test]
    fn test_data_uri_defaults_to_png() {
        let inline = InlineData {
            mime_type: None,
            data: "aGVsbG8=".into(),
        };
        assert_eq!(
            to_data_uri(&inline).as_deref(),
            Some("data:image/png;base64,aGVsbG8=")
        );
    }

    #[test]
    fn test_invalid_base64_is_skipped() {
        let inline = InlineData {
            mime_type: None,
            data: "not base64 !!".into(),
        };
        assert!(to_data_uri(&inline).is_none());
    }
}
