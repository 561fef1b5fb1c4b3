//! Runtime settings, read once at startup from `settings.json`.
//!
//! The struct is immutable after loading and is handed by reference to the
//! camera and the frame loop.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// Things that can go wrong while reading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read settings: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub screen_width: usize,
    pub screen_height: usize,
    pub v_sync: bool,

    /// Horizontal field of view, degrees.
    pub field_of_view: f32,
    /// Angular distance between two neighbouring rays, degrees.
    pub render_ray_increment: f32,
    /// Rays give up after this many cells.
    pub render_distance: f32,

    pub player_start_x: f32,
    pub player_start_y: f32,
    /// Radians, 0 = +X, growing towards +Y.
    pub player_start_angle: f32,

    /// Cells per second.
    pub speed_modifier: f32,
    /// Radians per mouse pixel per second.
    pub rotation_modifier: f32,
    pub player_distance_to_projection_plane: f32,

    pub level_path: String,
    pub texture_paths: Vec<String>,

    #[serde(default = "default_ceiling")]
    pub ceiling_color: u32,
    #[serde(default = "default_floor")]
    pub floor_color: u32,
    #[serde(default = "default_true")]
    pub side_shading: bool,
    /// Radians per second when turning with the arrow keys.
    #[serde(default = "default_key_turn")]
    pub key_turn_speed: f32,
    #[serde(default = "default_title")]
    pub window_title: String,
}

fn default_ceiling() -> u32 {
    0xFF_38_38_38
}
fn default_floor() -> u32 {
    0xFF_70_70_70
}
fn default_true() -> bool {
    true
}
fn default_key_turn() -> f32 {
    2.0
}
fn default_title() -> String {
    "mini-fps".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 960,
            screen_height: 600,
            v_sync: true,
            field_of_view: 60.0,
            render_ray_increment: 0.1,
            render_distance: 32.0,
            player_start_x: 1.5,
            player_start_y: 1.5,
            player_start_angle: 0.0,
            speed_modifier: 2.5,
            rotation_modifier: 0.15,
            player_distance_to_projection_plane: 1.0,
            level_path: "level.png".to_string(),
            texture_paths: vec!["brick.png".to_string()],
            ceiling_color: default_ceiling(),
            floor_color: default_floor(),
            side_shading: true,
            key_turn_speed: default_key_turn(),
            window_title: default_title(),
        }
    }
}

impl Settings {
    /// Read, parse and validate a settings file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the projection maths cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &str, v: f32| -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be > 0, got {v}")))
            }
        };

        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size {}x{} is empty",
                self.screen_width, self.screen_height
            )));
        }
        positive("fieldOfView", self.field_of_view)?;
        positive("renderRayIncrement", self.render_ray_increment)?;
        positive("renderDistance", self.render_distance)?;
        positive(
            "playerDistanceToProjectionPlane",
            self.player_distance_to_projection_plane,
        )?;
        if self.field_of_view >= 360.0 {
            return Err(ConfigError::Invalid(format!(
                "fieldOfView must be below 360, got {}",
                self.field_of_view
            )));
        }
        if self.render_ray_increment > self.field_of_view {
            return Err(ConfigError::Invalid(
                "renderRayIncrement is larger than fieldOfView".into(),
            ));
        }
        if !self.player_start_x.is_finite() || !self.player_start_y.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "player start ({}, {}) is not a finite position",
                self.player_start_x, self.player_start_y
            )));
        }
        if self.texture_paths.is_empty() {
            return Err(ConfigError::Invalid("texturePaths is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "screenWidth": 800,
        "screenHeight": 600,
        "vSync": false,
        "fieldOfView": 66,
        "renderRayIncrement": 0.11,
        "renderDistance": 20,
        "playerStartX": 2.5,
        "playerStartY": 3.5,
        "playerStartAngle": 1.57,
        "speedModifier": 3,
        "rotationModifier": 0.2,
        "playerDistanceToProjectionPlane": 1.2,
        "levelPath": "maps/one.png",
        "texturePaths": ["a.png", "b.png"]
    }"#;

    #[test]
    fn parses_camel_case_file_with_defaults() {
        let s = Settings::from_json(SAMPLE).unwrap();
        assert_eq!(s.screen_width, 800);
        assert!(!s.v_sync);
        assert_eq!(s.level_path, "maps/one.png");
        assert_eq!(s.texture_paths.len(), 2);
        assert!((s.player_distance_to_projection_plane - 1.2).abs() < 1e-6);
        // optional keys
        assert_eq!(s.ceiling_color, 0xFF_38_38_38);
        assert!(s.side_shading);
        assert_eq!(s.window_title, "mini-fps");
    }

    #[test]
    fn shipped_settings_parse() {
        let s = Settings::from_json(include_str!("../assets/settings.json")).unwrap();
        assert_eq!(s.level_path, "level.png");
        assert_eq!(s.texture_paths.len(), 4);
    }

    #[test]
    fn default_is_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_increment() {
        let mut s = Settings::default();
        s.render_ray_increment = 0.0;
        assert!(matches!(s.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_increment_wider_than_fov() {
        let mut s = Settings::default();
        s.render_ray_increment = 90.0;
        assert!(matches!(s.validate(), Err(ConfigError::Invalid(_))));
    }

    fn invalid(s: &Settings) -> bool {
        matches!(s.validate(), Err(ConfigError::Invalid(_)))
    }

    #[test]
    fn rejects_empty_screen() {
        let mut s = Settings::default();
        s.screen_width = 0;
        assert!(invalid(&s));
        let mut s = Settings::default();
        s.screen_height = 0;
        assert!(invalid(&s));
    }

    #[test]
    fn rejects_empty_texture_list() {
        let mut s = Settings::default();
        s.texture_paths.clear();
        assert!(invalid(&s));
    }

    #[test]
    fn rejects_full_circle_fov() {
        let mut s = Settings::default();
        s.field_of_view = 360.0;
        assert!(invalid(&s));
        s.field_of_view = 359.0;
        assert!(!invalid(&s));
    }

    #[test]
    fn rejects_non_positive_distances() {
        for v in [0.0, -1.0, f32::NAN] {
            let mut s = Settings::default();
            s.render_distance = v;
            assert!(invalid(&s), "renderDistance {v}");
            let mut s = Settings::default();
            s.player_distance_to_projection_plane = v;
            assert!(invalid(&s), "plane distance {v}");
        }
    }

    #[test]
    fn rejects_non_finite_start() {
        let mut s = Settings::default();
        s.player_start_x = f32::INFINITY;
        assert!(invalid(&s));
    }

    #[test]
    fn missing_key_is_parse_error() {
        let err = Settings::from_json(r#"{ "screenWidth": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
