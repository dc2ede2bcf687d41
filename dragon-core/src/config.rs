use crate::{
    dragon::HeadRect,
    surface::{Sprite, SpriteSpec},
};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Deepest fractal a config may ask for. Depth 12 is already ~2.8M dragons;
/// every extra level multiplies that by four.
pub const MAX_DEPTH_LIMIT: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of depth buckets, root included.
    pub max_depth: usize,
    pub root_center: Vec2,
    pub root_size: Vec2,
    /// Logical drawing surface size in pixels.
    pub canvas_size: Vec2,
    /// Seconds between timer-driven redraws.
    pub refresh_interval_secs: f64,
    /// Stroke the parent links under the sprites.
    pub stroke_links: bool,
    /// World position of the top-left corner of the foreground body sprite.
    pub foreground_origin: Vec2,
    pub sprites: SpriteConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub asset_dir: PathBuf,
    pub head: SpriteSpec,
    pub body: SpriteSpec,
    pub connector: SpriteSpec,
}

impl Default for Config {
    fn default() -> Self {
        let sprites = SpriteConfig::default();
        Self {
            max_depth: 9,
            root_center: Vec2::new(625.0, 340.0),
            root_size: Vec2::new(300.0, 300.0),
            canvas_size: Vec2::new(1280.0, 720.0),
            refresh_interval_secs: 1.0,
            stroke_links: false,
            foreground_origin: Vec2::new(520.0, 720.0 - sprites.body.size.y),
            sprites,
        }
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("img"),
            head: SpriteSpec::new("head.png", Vec2::new(320.0, 320.0)),
            body: SpriteSpec::new("body.png", Vec2::new(166.0, 292.0)),
            connector: SpriteSpec::new("small-body.png", Vec2::new(193.0, 60.0)),
        }
    }
}

impl SpriteConfig {
    pub fn spec(&self, sprite: Sprite) -> &SpriteSpec {
        match sprite {
            Sprite::Head => &self.head,
            Sprite::Body => &self.body,
            Sprite::Connector => &self.connector,
        }
    }

    pub fn path(&self, sprite: Sprite) -> PathBuf {
        self.asset_dir.join(&self.spec(sprite).file)
    }
}

impl Config {
    pub fn root_head(&self) -> HeadRect {
        HeadRect::new(self.root_center, self.root_size)
    }

    /// `max_depth` clamped to [`MAX_DEPTH_LIMIT`], for configs built in code
    /// without going through [`Config::validate`].
    pub fn generation_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid("max_depth must be at most 12"));
        }
        if !(self.canvas_size.x > 0.0 && self.canvas_size.y > 0.0) {
            return Err(ConfigError::Invalid("canvas_size must be positive"));
        }
        if !(self.root_size.x > 0.0 && self.root_size.y > 0.0) {
            return Err(ConfigError::Invalid("root_size must be positive"));
        }
        if !(self.refresh_interval_secs > 0.0) {
            return Err(ConfigError::Invalid("refresh_interval_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let cfg = Config::default();
        assert_eq!(cfg.max_depth, 9);
        assert_eq!(cfg.canvas_size, Vec2::new(1280.0, 720.0));
        assert_eq!(cfg.foreground_origin, Vec2::new(520.0, 428.0));
        assert_eq!(cfg.sprites.connector.size, Vec2::new(193.0, 60.0));
        assert!(!cfg.stroke_links);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            max_depth = 4
            stroke_links = true

            [sprites]
            asset_dir = "assets"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.max_depth, 4);
        assert!(cfg.stroke_links);
        assert_eq!(cfg.root_size, Vec2::new(300.0, 300.0));
        assert_eq!(cfg.sprites.path(Sprite::Head), PathBuf::from("assets").join("head.png"));
    }

    #[test]
    fn rejects_non_positive_refresh_interval() {
        let err = Config::from_toml_str("refresh_interval_secs = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn rejects_excessive_max_depth() {
        let err = Config::from_toml_str("max_depth = 16").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");

        let at_limit = Config::from_toml_str(&format!("max_depth = {MAX_DEPTH_LIMIT}")).unwrap();
        assert_eq!(at_limit.max_depth, MAX_DEPTH_LIMIT);
    }

    #[test]
    fn reports_parse_errors() {
        let err = Config::from_toml_str("max_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
    }
}
