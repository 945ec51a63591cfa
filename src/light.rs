use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Point light radiating uniformly in all directions.
///
/// Position is not stored here; a light is placed by the scene node that
/// owns it, so the same parameter block can be shared by a whole rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// Light color, 0.0-1.0 per channel.
    pub color: Vec3,
    pub intensity: f32,
    /// Falloff cutoff; 0.0 means the light reaches everywhere.
    pub distance: f32,
    /// Falloff exponent.
    pub decay: f32,
}

impl PointLight {
    pub fn new(color: Vec3, intensity: f32, distance: f32, decay: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            decay,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            distance: 0.0,
            decay: 2.0,
        }
    }
}

/// Converts a packed `0xRRGGBB` color into 0.0-1.0 channel components.
pub fn color_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32;
    let g = ((hex >> 8) & 0xff) as f32;
    let b = (hex & 0xff) as f32;
    Vec3::new(r / 255.0, g / 255.0, b / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_scales_channels() {
        assert_eq!(color_from_hex(0xffffff), Vec3::ONE);
        assert_eq!(color_from_hex(0x000000), Vec3::ZERO);
        let teal = color_from_hex(0x298ec1);
        assert!((teal.x - 41.0 / 255.0).abs() < f32::EPSILON);
        assert!((teal.y - 142.0 / 255.0).abs() < f32::EPSILON);
        assert!((teal.z - 193.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn default_light_reaches_everywhere() {
        let light = PointLight::default();
        assert_eq!(light.distance, 0.0);
        assert_eq!(light.decay, 2.0);
    }
}
