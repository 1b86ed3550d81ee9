//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/workbench/config.toml` (XDG) or platform config dir
//! 2. Project config: `.workbench.toml`
//! 3. Environment variables: `WORKBENCH_*`, nested with `__`
//!    (e.g. `WORKBENCH_CAMERA__MAX_SCALE=3`)
//!
//! Every value has a default, so an empty configuration is valid.
//!
//! ```toml
//! [camera]
//! default_scale = 0.6
//! wheel_zoom_in = 1.1
//! wheel_zoom_out = 0.9
//!
//! [drag]
//! threshold = 5.0
//!
//! [source]
//! endpoint = "https://example.com/api/field-notes"
//! ```

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl ConfigError {
    /// Build an error for a value that parsed but is out of range.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self(Box::new(figment::Error::from(message.into())))
    }
}

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub layout: LayoutConfig,
    pub connections: ConnectionConfig,
    pub drag: DragConfig,
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub viewport: ViewportConfig,
}

/// Pan/zoom camera limits and zoom steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Scale applied on startup and on reset.
    pub default_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Multiplicative step for one wheel tick toward the user.
    pub wheel_zoom_in: f32,
    /// Multiplicative step for one wheel tick away from the user.
    pub wheel_zoom_out: f32,
    /// Step used by the zoom-in/zoom-out controls (divided for zoom-out).
    pub button_zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_scale: 0.6,
            min_scale: 0.2,
            max_scale: 2.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            button_zoom_step: 1.3,
        }
    }
}

/// Radial cluster layout constants, in canvas units.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance from the canvas origin to every cluster center.
    pub cluster_radius: f32,
    /// Base spacing between items of one cluster.
    pub item_spacing: f32,
    /// Maximum random offset per axis.
    pub jitter: f32,
    pub card_width: f32,
    pub card_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cluster_radius: 350.0,
            item_spacing: 120.0,
            jitter: 20.0,
            card_width: 220.0,
            card_height: 140.0,
        }
    }
}

/// Connection curve geometry and visual weight.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Perpendicular offset of the curve control point.
    pub curvature: f32,
    pub base_opacity: f32,
    /// Opacity added per shared tag.
    pub opacity_per_tag: f32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            curvature: 30.0,
            base_opacity: 0.3,
            opacity_per_tag: 0.2,
        }
    }
}

/// Click-vs-drag disambiguation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Canvas units the pointer must travel along either axis before a press becomes a drag.
    pub threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 5.0 }
    }
}

/// Where artifacts are fetched from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Field-notes endpoint.
    pub endpoint: String,
    /// Local JSON file used instead of the endpoint when set.
    pub file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/field-notes".to_string(),
            file: None,
            timeout_secs: 10,
        }
    }
}

/// Persisted position overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key-value files. Defaults to the platform data dir.
    pub dir: Option<PathBuf>,
    /// Key under which all overrides are stored.
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: "workbench-positions".to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolved storage directory: configured value or `<data dir>/workbench`.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|p| p.join("workbench"))
                .unwrap_or_else(|| PathBuf::from(".workbench"))
        })
    }
}

/// Initial window size in logical pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// The layered provider stack used by [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(".workbench.toml"))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("WORKBENCH_").split("__"))
    }

    /// Extract and validate a config from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.min_scale > 0.0) {
            return Err(ConfigError::invalid("camera.min_scale must be positive"));
        }
        if camera.min_scale > camera.max_scale {
            return Err(ConfigError::invalid(
                "camera.min_scale must not exceed camera.max_scale",
            ));
        }
        for (name, step) in [
            ("camera.wheel_zoom_in", camera.wheel_zoom_in),
            ("camera.wheel_zoom_out", camera.wheel_zoom_out),
            ("camera.button_zoom_step", camera.button_zoom_step),
        ] {
            if !(step > 0.0) {
                return Err(ConfigError::invalid(format!("{name} must be positive")));
            }
        }
        if !(self.drag.threshold >= 0.0) {
            return Err(ConfigError::invalid("drag.threshold must not be negative"));
        }
        if !(self.layout.card_width > 0.0 && self.layout.card_height > 0.0) {
            return Err(ConfigError::invalid("layout card size must be positive"));
        }
        Ok(())
    }

    /// User config path: ~/.config/workbench/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("workbench").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("workbench").join("config.toml"))
            .unwrap_or_default()
    }
}
