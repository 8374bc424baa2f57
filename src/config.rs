use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A wedge colour written as `#RRGGBB` (the `#` is optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct SegmentColor(Srgb<u8>);

impl SegmentColor {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Components as cairo expects them.
    pub fn to_f64(self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl FromStr for SegmentColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for SegmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

/// Non-empty list of wedge colours, applied cyclically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<SegmentColor>", into = "Vec<SegmentColor>")]
pub struct Palette(Vec<SegmentColor>);

impl Palette {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> SegmentColor {
        self.0[index % self.0.len()]
    }
}

impl TryFrom<Vec<SegmentColor>> for Palette {
    type Error = ConfigError;

    fn try_from(colors: Vec<SegmentColor>) -> Result<Self, Self::Error> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self(colors))
    }
}

impl From<Palette> for Vec<SegmentColor> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DEFAULT_PALETTE.to_vec())
    }
}

const DEFAULT_PALETTE: [SegmentColor; 16] = [
    SegmentColor::rgb(0xFF, 0x57, 0x33),
    SegmentColor::rgb(0x33, 0xFF, 0x57),
    SegmentColor::rgb(0x33, 0x57, 0xFF),
    SegmentColor::rgb(0xF3, 0x33, 0xFF),
    SegmentColor::rgb(0xFF, 0x33, 0xA1),
    SegmentColor::rgb(0x33, 0xFF, 0xF5),
    SegmentColor::rgb(0xF5, 0xFF, 0x33),
    SegmentColor::rgb(0xFF, 0x8C, 0x33),
    SegmentColor::rgb(0x8C, 0x33, 0xFF),
    SegmentColor::rgb(0x33, 0xFF, 0x8C),
    SegmentColor::rgb(0xFF, 0x33, 0x80),
    SegmentColor::rgb(0x80, 0x33, 0xFF),
    SegmentColor::rgb(0x33, 0xA1, 0xFF),
    SegmentColor::rgb(0xA1, 0xFF, 0x33),
    SegmentColor::rgb(0xEF, 0x44, 0x44),
    SegmentColor::rgb(0x10, 0xB9, 0x81),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinConfig {
    pub duration_ms: u64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self { duration_ms: 4000 }
    }
}

impl SpinConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfettiConfig {
    pub count: usize,
    pub lifetime_ms: u64,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            count: 50,
            lifetime_ms: 5000,
        }
    }
}

impl ConfettiConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub confetti: ConfettiConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Palette must contain at least one colour")]
    EmptyPalette,
    #[error("Invalid colour '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "spinwheel", "spinwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("SPINWHEEL").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_deserialization() {
        let cases = vec![
            ("\"#FF5733\"", SegmentColor::rgb(0xFF, 0x57, 0x33)),
            ("\"ff5733\"", SegmentColor::rgb(0xFF, 0x57, 0x33)),
            ("\"#10b981\"", SegmentColor::rgb(0x10, 0xB9, 0x81)),
        ];

        for (json, expected) in cases {
            let deserialized: SegmentColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        assert!(serde_json::from_str::<SegmentColor>("\"#XYZ123\"").is_err());
        assert!(serde_json::from_str::<SegmentColor>("\"red\"").is_err());
    }

    #[test]
    fn test_color_display_round_trips() {
        let color = SegmentColor::rgb(0x0A, 0xB9, 0xFF);
        assert_eq!(color.to_string(), "#0AB9FF");
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#0AB9FF\"");
    }

    #[test]
    fn test_empty_palette_rejected() {
        let result = serde_json::from_str::<Config>(r#"{ "palette": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.palette.len(), 16);
        assert_eq!(config.spin.duration(), Duration::from_secs(4));
        assert_eq!(config.confetti.count, 50);
        assert_eq!(config.confetti.lifetime(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = serde_json::from_str(
            r##"{ "palette": ["#000000", "#FFFFFF"], "spin": { "duration_ms": 1500 } }"##,
        )
        .unwrap();

        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.palette.get(3), SegmentColor::rgb(0xFF, 0xFF, 0xFF));
        assert_eq!(config.spin.duration_ms, 1500);
        assert_eq!(config.confetti, ConfettiConfig::default());
    }

    #[test]
    fn test_default_config_file_parses() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: Config = s.try_deserialize().unwrap();
        assert_eq!(config, Config::default());
    }
}
