//! Application configuration.

use std::path::PathBuf;

use crate::gfx::{color::Color, rendering::DEFAULT_MAX_PIXEL_RATIO};

/// Startup settings for [`crate::GlimpseApp`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Initial logical inner size of the window
    pub window_size: (f64, f64),
    /// Models resolve to `<asset_root>/models/<name>.obj`
    pub asset_root: PathBuf,
    /// Model to load at startup; `None` skips loading
    pub model: Option<String>,
    pub max_pixel_ratio: f64,
    /// Background colour as `0xRRGGBB` sRGB
    pub clear_color: u32,
    pub show_overlay: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Glimpse".to_string(),
            window_size: (1280.0, 800.0),
            asset_root: PathBuf::from("."),
            model: Some("model".to_string()),
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            clear_color: 0x888888,
            show_overlay: true,
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn with_model(mut self, model: Option<&str>) -> Self {
        self.model = model.map(str::to_string);
        self
    }

    pub fn with_max_pixel_ratio(mut self, ratio: f64) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    pub fn with_clear_color(mut self, hex: u32) -> Self {
        self.clear_color = hex;
        self
    }

    pub fn with_overlay(mut self, show: bool) -> Self {
        self.show_overlay = show;
        self
    }

    pub fn clear_color(&self) -> Color {
        Color::from_hex(self.clear_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.max_pixel_ratio, 2.0);
        assert_eq!(config.clear_color, 0x888888);
        assert_eq!(config.model.as_deref(), Some("model"));
        assert!(config.show_overlay);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::default()
            .with_title("demo")
            .with_model(None)
            .with_asset_root("/srv/assets")
            .with_overlay(false);
        assert_eq!(config.title, "demo");
        assert!(config.model.is_none());
        assert_eq!(config.asset_root, PathBuf::from("/srv/assets"));
        assert!(!config.show_overlay);
    }
}
