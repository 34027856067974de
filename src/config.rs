use core::f32::consts::PI;

use libm::tanf;
use serde::{Deserialize, Serialize};

use crate::color::{Rgba, SKY};
use crate::constants::{DEFAULT_FOV_DEGREES, SCREEN_HEIGHT, SCREEN_WIDTH, TEX_WALL};
use crate::grid::TextureId;

/// Renderer and debug switches. Every toggle lives here so independent
/// worlds and renderers can run side by side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: usize,
    pub screen_height: usize,
    pub fov_degrees: f32,
    /// Darken walls and floors with distance.
    pub fake_light: bool,
    pub max_light_distance: f32,
    /// Tint the frame after a pickup or a hit.
    pub screen_flash: bool,
    /// Enemies never notice the player.
    pub passive: bool,
    pub seed: u64,
    /// Used for wall tiles that carry no texture of their own.
    pub default_wall_texture: TextureId,
    pub sky_texture: Option<TextureId>,
    pub sky_color: Rgba,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fov_degrees: DEFAULT_FOV_DEGREES,
            fake_light: false,
            max_light_distance: 10.0,
            screen_flash: true,
            passive: false,
            seed: 11,
            default_wall_texture: TEX_WALL,
            sky_texture: None,
            sky_color: SKY,
        }
    }
}

impl Config {
    /// Length of the camera plane for the configured field of view.
    pub fn plane_length(&self) -> f32 {
        let half_fov = self.fov_degrees.clamp(1.0, 179.0) * PI / 360.0;
        tanf(half_fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_ninety_degree_view_has_a_unit_plane() {
        let config = Config {
            fov_degrees: 90.0,
            ..Config::default()
        };
        assert!((config.plane_length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"passive":true,"sky_texture":9,"screen_width":320}"#).unwrap();
        assert!(config.passive);
        assert_eq!(config.sky_texture, Some(TextureId(9)));
        assert_eq!(config.screen_width, 320);
        assert_eq!(config.screen_height, SCREEN_HEIGHT);
        assert!(config.screen_flash);
    }
}
