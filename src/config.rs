use serde::Deserialize;
use std::path::Path;

use crate::error::SiteError;

/// How the loading gate is fed
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LoadingConfig {
    /// Count real image `load`/`error` events
    Assets,
    /// Fixed-interval counter
    #[serde(rename_all = "camelCase")]
    Simulated {
        step: u32,
        target: u32,
        interval_ms: u32,
    },
}

impl Default for LoadingConfig {
    fn default() -> Self {
        LoadingConfig::Assets
    }
}

/// DOM selectors the runtime looks up at startup
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub canvas: String,
    pub loading_screen: String,
    pub loading_bar: String,
    pub loading_text: String,
    pub content: String,
    pub leadership_grid: String,
    pub features_grid: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            canvas: ".webgl-canvas".to_string(),
            loading_screen: ".loading-screen".to_string(),
            loading_bar: ".loading-bar".to_string(),
            loading_text: ".loading-text".to_string(),
            content: ".content".to_string(),
            leadership_grid: ".leadership-grid".to_string(),
            features_grid: ".features-grid".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Per-frame scroll damping factor, must be in (0, 1)
    pub scroll_damping: f32,
    /// Distance below which smoothed scroll snaps onto its target (px)
    pub scroll_snap_epsilon: f32,
    pub camera_base_depth: f32,
    /// Extra camera depth per viewport height scrolled
    pub camera_depth_per_viewport: f32,
    pub camera_fov_y_deg: f32,
    pub plane_size: f32,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    /// Clear color used when the shader background is unavailable
    pub fallback_color: [f32; 3],
    pub max_pixel_ratio: f64,
    /// Duration of the loading screen fade-out
    pub fade_out_ms: u32,
    pub loading: LoadingConfig,
    pub selectors: Selectors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_damping: 0.1,
            scroll_snap_epsilon: 0.01,
            camera_base_depth: 5.0,
            camera_depth_per_viewport: 10.0,
            camera_fov_y_deg: 75.0,
            plane_size: 2.0,
            color_a: [0.0, 0.8, 1.0],
            color_b: [0.0, 0.4, 1.0],
            fallback_color: [0.0, 0.6, 1.0],
            max_pixel_ratio: 2.0,
            fade_out_ms: 1000,
            loading: LoadingConfig::default(),
            selectors: Selectors::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self, SiteError> {
        let config: SiteConfig = serde_json::from_str(text).map_err(SiteError::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SiteError::config(format!("reading {}: {e}", path.as_ref().display()))
        })?;
        Self::from_json(&text)
    }

    /// Parse `text` if present, falling back to defaults on any problem
    pub fn from_json_or_default(text: Option<&str>) -> Self {
        match text {
            Some(text) => Self::from_json(text).unwrap_or_else(|e| {
                tracing::warn!("ignoring site config: {e}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), SiteError> {
        if !(self.scroll_damping > 0.0 && self.scroll_damping < 1.0) {
            return Err(SiteError::config(format!(
                "scrollDamping must be in (0, 1), got {}",
                self.scroll_damping
            )));
        }
        if !(self.scroll_snap_epsilon > 0.0) {
            return Err(SiteError::config("scrollSnapEpsilon must be positive"));
        }
        if !(self.camera_fov_y_deg > 0.0 && self.camera_fov_y_deg < 180.0) {
            return Err(SiteError::config("cameraFovYDeg must be in (0, 180)"));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(SiteError::config("maxPixelRatio must be at least 1"));
        }
        for (name, value) in [
            ("cameraBaseDepth", self.camera_base_depth),
            ("cameraDepthPerViewport", self.camera_depth_per_viewport),
            ("planeSize", self.plane_size),
        ] {
            if !value.is_finite() {
                return Err(SiteError::config(format!("{name} must be finite, got {value}")));
            }
        }
        if !(self.plane_size > 0.0) {
            return Err(SiteError::config("planeSize must be positive"));
        }
        for (name, rgb) in [
            ("colorA", self.color_a),
            ("colorB", self.color_b),
            ("fallbackColor", self.fallback_color),
        ] {
            if rgb.iter().any(|c| !c.is_finite()) {
                return Err(SiteError::config(format!("{name} must be finite")));
            }
        }
        if let LoadingConfig::Simulated { step, target, interval_ms } = self.loading {
            if step == 0 || target == 0 || interval_ms == 0 {
                return Err(SiteError::config("simulated loading needs non-zero step, target and interval"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = SiteConfig::from_json(
            r##"{ "scrollDamping": 0.05, "selectors": { "canvas": "#bg" } }"##,
        )
        .unwrap();
        assert_eq!(config.scroll_damping, 0.05);
        assert_eq!(config.selectors.canvas, "#bg");
        assert_eq!(config.selectors.loading_bar, ".loading-bar");
        assert_eq!(config.camera_base_depth, 5.0);
    }

    #[test]
    fn test_simulated_loading_parses() {
        let config = SiteConfig::from_json(
            r#"{ "loading": { "kind": "simulated", "step": 5, "target": 100, "intervalMs": 50 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.loading,
            LoadingConfig::Simulated { step: 5, target: 100, interval_ms: 50 }
        );
    }

    #[test]
    fn test_rejects_out_of_range_damping() {
        for bad in ["0.0", "1.0", "1.5", "-0.2"] {
            let json = format!(r#"{{ "scrollDamping": {bad} }}"#);
            assert!(matches!(SiteConfig::from_json(&json), Err(SiteError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn test_rejects_non_finite_camera_and_colors() {
        for json in [
            r#"{ "cameraBaseDepth": 1e39 }"#,
            r#"{ "cameraDepthPerViewport": -1e39 }"#,
            r#"{ "planeSize": 1e39 }"#,
            r#"{ "colorA": [0.0, 1e39, 1.0] }"#,
            r#"{ "fallbackColor": [0.0, 0.6, -1e39] }"#,
        ] {
            assert!(matches!(SiteConfig::from_json(json), Err(SiteError::Config(_))), "{json}");
        }

        let mut config = SiteConfig::default();
        config.camera_base_depth = f32::NAN;
        assert!(config.validate().is_err());
        config.camera_base_depth = 5.0;
        config.color_b = [0.0, f32::INFINITY, 1.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let config = SiteConfig::from_json_or_default(Some("{ not json"));
        assert_eq!(config, SiteConfig::default());
    }
}
