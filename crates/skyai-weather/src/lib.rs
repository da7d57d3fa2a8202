//! Weather acquisition for SkyAI
//!
//! Asks a Gemini text model for a search-grounded weather report and an
//! image model for a matching background, with a static fallback whenever
//! the live path fails.

pub mod extract;
pub mod fetcher;
pub mod gemini;
pub mod image;
pub mod location;
pub mod mock;
pub mod prompt;
pub mod theme;
pub mod types;

pub use fetcher::WeatherFetcher;
pub use gemini::GeminiClient;
pub use image::ImageGenerator;
pub use location::{FixedLocation, IpLocator, LocationProvider, NoLocation, SystemLocator};
pub use mock::{is_simulated, mock_weather_data, simulated_weather_data};
pub use theme::{select_theme, Theme};
pub use types::*;
