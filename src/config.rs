//! Viewer configuration
//!
//! Every tuning constant of the camera and animation lives here as a
//! default that can be overridden from a `hexwalk.toml` file; the
//! algorithms never hardcode these values.

use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees
    pub fovy_degrees: f32,
    /// Near clip plane distance
    pub znear: f32,
    /// Far clip plane distance
    pub zfar: f32,
    /// Half extent of the walkable floor; the camera stays strictly inside
    pub floor_half_extent: f32,
    /// Yaw applied per rotate command, in radians
    pub turn_step: f32,
    /// Distance covered per move command
    pub move_step: f32,
    /// World-object spin in degrees per second
    pub spin_rate: f32,
    /// Scale from the accumulated spin angle to the light rotation phase
    pub light_phase_scale: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 90.0,
            znear: 0.001,
            zfar: 1000.0,
            floor_half_extent: 10.0,
            turn_step: 0.174,
            move_step: 0.5,
            spin_rate: 100.0,
            light_phase_scale: 0.01,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Loads the config file if present; a missing or malformed file falls
    /// back to the defaults so the viewer always starts.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring {}: {err}", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_builtin_constants() {
        let config = ViewerConfig::default();
        assert_eq!(config.fovy_degrees, 90.0);
        assert_eq!(config.znear, 0.001);
        assert_eq!(config.zfar, 1000.0);
        assert_eq!(config.floor_half_extent, 10.0);
        assert_eq!(config.turn_step, 0.174);
        assert_eq!(config.move_step, 0.5);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: ViewerConfig = toml::from_str("turn_step = 0.3\nmove_step = 1.0").unwrap();
        assert_eq!(config.turn_step, 0.3);
        assert_eq!(config.move_step, 1.0);
        assert_eq!(config.fovy_degrees, 90.0);
        assert_eq!(config.floor_half_extent, 10.0);
    }
}
