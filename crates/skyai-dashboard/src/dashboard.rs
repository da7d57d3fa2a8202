//! Dashboard state container.
//!
//! Owns the weather pipeline (locate, fetch, paint) and publishes its
//! progress as immutable [`DashboardSnapshot`]s. Only one load runs at a
//! time; see [`OpState`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use skyai_core::{AppError, Config, ConfigError, LocationProviderKind, OpState};
use skyai_weather::{
    Coordinates, FixedLocation, GeminiClient, GeolocationState, ImageGenerator, IpLocator,
    LocationProvider, NoLocation, SystemLocator, WeatherFetcher,
};

use crate::state::DashboardSnapshot;

/// Behaviour switches that do not belong to the pipeline services.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardOptions {
    /// Drop the previous background when a new image cannot be generated.
    pub clear_background_on_failure: bool,
}

/// Result of asking the dashboard to (re)load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Completed,
    /// Another mount or refresh is in flight; nothing was sent.
    AlreadyRunning,
    /// Refresh requested before the first mount.
    NotMounted,
    Unmounted,
}

pub struct Dashboard {
    fetcher: WeatherFetcher,
    images: ImageGenerator,
    options: DashboardOptions,
    op: Mutex<OpState>,
    coordinates: Mutex<Option<Coordinates>>,
    snapshot: RwLock<Arc<DashboardSnapshot>>,
}

impl Dashboard {
    pub fn new(fetcher: WeatherFetcher, images: ImageGenerator, options: DashboardOptions) -> Self {
        Self {
            fetcher,
            images,
            options,
            op: Mutex::new(OpState::Idle),
            coordinates: Mutex::new(None),
            snapshot: RwLock::new(Arc::new(DashboardSnapshot::default())),
        }
    }

    /// Build the dashboard and its Gemini services from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api_key = config
            .gemini
            .api_key
            .clone()
            .filter(|_| config.gemini.is_configured());

        let client = GeminiClient::new(api_key, Duration::from_secs(config.gemini.timeout_secs))?
            .with_base_url(config.gemini.base_url.as_str());

        let fetcher = WeatherFetcher::new(
            client.clone(),
            config.gemini.text_model.as_str(),
            config.weather.language.as_str(),
        );
        let images = ImageGenerator::new(
            client,
            config.gemini.image_model.as_str(),
            config.weather.aspect_ratio.as_str(),
        );

        Ok(Self::new(
            fetcher,
            images,
            DashboardOptions {
                clear_background_on_failure: config.weather.clear_background_on_failure,
            },
        ))
    }

    /// Current snapshot. Cheap; clones an `Arc`.
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Coordinates the last load used, if any.
    pub fn coordinates(&self) -> Option<Coordinates> {
        *self.coordinates.lock()
    }

    pub fn is_unmounted(&self) -> bool {
        *self.op.lock() == OpState::Unmounted
    }

    /// First load: locate the user, then fetch weather and a background.
    ///
    /// A failed lookup is recorded in the snapshot and the load continues
    /// with Seoul.
    pub async fn mount<L: LocationProvider>(&self, locator: &L) -> LoadOutcome {
        {
            let mut op = self.op.lock();
            if *op == OpState::Unmounted {
                return LoadOutcome::Unmounted;
            }
            if !op.can_start_mount() {
                return LoadOutcome::AlreadyRunning;
            }
            *op = OpState::BusyMount;
        }
        let _guard = LoadGuard { dashboard: self };

        self.publish(|s| s.geo = GeolocationState::loading());

        let geo = match locator.locate().await {
            Ok(coords) => {
                tracing::info!("Location acquired: {}", coords);
                GeolocationState::located(coords)
            }
            Err(e) => {
                tracing::warn!("Location unavailable, using Seoul: {}", e);
                GeolocationState::failed(e.to_string())
            }
        };
        let coords = geo.coordinates().unwrap_or(Coordinates::SEOUL);
        *self.coordinates.lock() = Some(coords);

        if self.is_unmounted() {
            return LoadOutcome::Unmounted;
        }
        self.publish(|s| s.geo = geo);

        self.load(coords).await
    }

    /// Re-run the weather and image requests with the last coordinates.
    ///
    /// Rejected, not queued, while another load is in flight.
    pub async fn refresh(&self) -> LoadOutcome {
        let coords = {
            let mut op = self.op.lock();
            if *op == OpState::Unmounted {
                return LoadOutcome::Unmounted;
            }
            if !op.can_start_refresh() {
                tracing::debug!("Refresh ignored, load already running");
                return LoadOutcome::AlreadyRunning;
            }
            let Some(coords) = *self.coordinates.lock() else {
                return LoadOutcome::NotMounted;
            };
            *op = OpState::BusyRefresh;
            coords
        };
        let _guard = LoadGuard { dashboard: self };

        self.publish(|s| s.refreshing = true);
        self.load(coords).await
    }

    /// Tear down. Later mounts and refreshes are refused and a load still
    /// in flight stops publishing.
    pub fn unmount(&self) {
        let mut op = self.op.lock();
        *op = op.on_unmount();
        tracing::info!("Dashboard unmounted");
    }

    async fn load(&self, coords: Coordinates) -> LoadOutcome {
        let weather = self.fetcher.fetch(coords).await;
        if self.is_unmounted() {
            return LoadOutcome::Unmounted;
        }
        let condition = weather.condition.clone();
        self.publish(|s| s.weather = Some(weather));

        let background = self.images.generate(&condition).await;
        if self.is_unmounted() {
            return LoadOutcome::Unmounted;
        }
        let clear = self.options.clear_background_on_failure;
        self.publish(|s| match background {
            Some(uri) => s.background = Some(uri),
            None if clear => s.background = None,
            None => {}
        });

        LoadOutcome::Completed
    }

    /// Replace the snapshot with an edited copy.
    fn publish(&self, edit: impl FnOnce(&mut DashboardSnapshot)) {
        let mut current = self.snapshot.write();
        let mut next = DashboardSnapshot::clone(&current);
        edit(&mut next);
        *current = Arc::new(next);
    }
}

/// Returns the op state to idle and clears the refreshing flag when a load
/// ends, including when its future is dropped.
struct LoadGuard<'a> {
    dashboard: &'a Dashboard,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        {
            let mut op = self.dashboard.op.lock();
            *op = op.on_load_done();
        }
        self.dashboard.publish(|s| s.refreshing = false);
    }
}

/// Location provider chosen by `[location]` in the config.
pub fn build_locator(config: &Config) -> Result<SystemLocator, AppError> {
    let location = &config.location;
    match location.provider {
        LocationProviderKind::Ip => IpLocator::with_base_url(location.ip_lookup_url.as_str())
            .map(SystemLocator::Ip)
            .map_err(AppError::from),
        LocationProviderKind::Fixed => match (location.latitude, location.longitude) {
            (Some(lat), Some(lon)) => Ok(SystemLocator::Fixed(FixedLocation(Coordinates::new(
                lat, lon,
            )))),
            _ => Err(AppError::Config(ConfigError::MissingSetting(
                "location.latitude/location.longitude".to_string(),
            ))),
        },
        LocationProviderKind::Disabled => Ok(SystemLocator::Unsupported(NoLocation)),
    }
}
