use tracing::instrument;

use crate::extract::{parse_weather_response, sources_from_grounding};
use crate::gemini::{GeminiClient, GenerateContentRequest};
use crate::mock::simulated_weather_data;
use crate::prompt::weather_prompt;
use crate::types::{Coordinates, WeatherData, WeatherError};

/// Asks the text model for a grounded weather report.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: GeminiClient,
    model: String,
    language: String,
}

impl WeatherFetcher {
    pub fn new(client: GeminiClient, model: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            language: language.into(),
        }
    }

    /// Weather at `coords`. Never fails: any error yields the simulated
    /// mock dataset.
    #[instrument(skip(self), fields(model = %self.model))]
    pub async fn fetch(&self, coords: Coordinates) -> WeatherData {
        match self.try_fetch(coords).await {
            Ok(data) => {
                tracing::info!(
                    "Fetched weather for {} ({} sources)",
                    data.location,
                    data.sources.len()
                );
                data
            }
            Err(e) => {
                tracing::warn!("Gemini error, using mock data: {}", e);
                simulated_weather_data()
            }
        }
    }

    /// The live pipeline without the fallback.
    pub async fn try_fetch(&self, coords: Coordinates) -> Result<WeatherData, WeatherError> {
        let request =
            GenerateContentRequest::from_prompt(weather_prompt(coords, &self.language))
                .with_google_search();

        let response = self.client.generate_content(&self.model, &request).await?;
        let text = response.text().ok_or(WeatherError::EmptyResponse)?;
        let sources = sources_from_grounding(response.grounding_chunks());

        parse_weather_response(&text, sources)
    }
}
