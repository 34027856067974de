use serde::{Deserialize, Serialize};

/// A straight (non-premultiplied) RGBA pixel. Alpha 0 is treated as a hole
/// when compositing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
pub const SKY: Rgba = Rgba::opaque(4, 162, 219);
pub const AMMO_FLASH: Rgba = Rgba::opaque(255, 220, 64);
pub const HEALTH_FLASH: Rgba = Rgba::opaque(32, 186, 81);
pub const SOUL_FLASH: Rgba = Rgba::opaque(64, 128, 255);
pub const KEY_FLASH: Rgba = Rgba::opaque(255, 255, 255);
pub const HURT_FLASH: Rgba = Rgba::opaque(255, 0, 0);
pub const MAP_FLOOR: Rgba = Rgba::opaque(40, 40, 40);
pub const MAP_WALL: Rgba = Rgba::opaque(255, 0, 0);
pub const MAP_DOOR: Rgba = Rgba::opaque(0, 0, 255);
pub const MAP_PLAYER: Rgba = Rgba::opaque(0, 255, 0);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba::new(r, g, b, 255)
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Halves the colour channels, keeping alpha.
    pub fn halved(self) -> Rgba {
        Rgba::new(self.r / 2, self.g / 2, self.b / 2, self.a)
    }

    /// Darkens linearly with distance, reaching black at `max_distance`.
    pub fn fake_light(self, distance: f32, max_distance: f32) -> Rgba {
        let value = (max_distance - distance).max(0.0);
        let percent = if max_distance > 0.0 { value / max_distance } else { 0.0 };
        let shade = |c: u8| (c as f32 * percent) as u8;
        Rgba::new(shade(self.r), shade(self.g), shade(self.b), self.a)
    }

    /// Mixes `self` over `other`; `amount` 1.0 is all `self`.
    pub fn blend(self, other: Rgba, amount: f32) -> Rgba {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * amount + b as f32 * (1.0 - amount)) as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_light_fades_to_black() {
        let c = Rgba::opaque(200, 100, 50);
        assert_eq!(c.fake_light(0.0, 10.0), c);
        assert_eq!(c.fake_light(5.0, 10.0), Rgba::opaque(100, 50, 25));
        assert_eq!(c.fake_light(20.0, 10.0), BLACK);
    }

    #[test]
    fn halved_keeps_alpha() {
        assert_eq!(Rgba::new(10, 20, 31, 255).halved(), Rgba::new(5, 10, 15, 255));
    }
}
