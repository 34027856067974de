use core::ops::{Add, Mul, Neg, Sub};

use heapless::Vec;
use libm::{cosf, floorf, sinf, sqrtf};
use serde::{Deserialize, Serialize};

/// A point or direction in world space, measured in tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Vector {
        Vector { x, y }
    }

    pub fn scale(self, factor: f32) -> Vector {
        Vector::new(self.x * factor, self.y * factor)
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        distance(self.x, self.y)
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(self) -> Vector {
        let length = self.length();
        if length == 0.0 {
            return Vector::ZERO;
        }
        Vector::new(self.x / length, self.y / length)
    }

    pub fn rotate(self, angle: f32) -> Vector {
        let (sin, cos) = (sinf(angle), cosf(angle));
        Vector::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotated a quarter turn; for a facing of (1, 0) this is (0, 1).
    pub fn perpendicular(self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    pub fn distance_squared(self, other: Vector) -> f32 {
        (other - self).length_squared()
    }

    /// The tile this point falls in.
    pub fn tile(self) -> (i32, i32) {
        (floorf(self.x) as i32, floorf(self.y) as i32)
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;
    fn mul(self, factor: f32) -> Vector {
        self.scale(factor)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

pub fn distance(a: f32, b: f32) -> f32 {
    sqrtf((a * a) + (b * b))
}

pub fn within(a: Vector, b: Vector, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

pub fn get_index(x: usize, y: usize, width: usize) -> usize {
    x + y * width
}

/// Drops every item `keep` rejects, shuffling survivors down in place.
/// Survivors keep their relative order.
pub fn compact<T, const N: usize>(items: &mut Vec<T, N>, mut keep: impl FnMut(&T) -> bool) {
    let mut write = 0;
    for read in 0..items.len() {
        if keep(&items[read]) {
            items.swap(write, read);
            write += 1;
        }
    }
    items.truncate(write);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_keeps_direction_and_zero() {
        let v = Vector::new(3.0, 4.0).normalize();
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y - 0.8).abs() < 1e-6);
        assert_eq!(Vector::ZERO.normalize(), Vector::ZERO);
    }

    #[test]
    fn tile_floors_negative_coordinates() {
        assert_eq!(Vector::new(-0.5, 2.7).tile(), (-1, 2));
    }

    #[test]
    fn perpendicular_points_to_the_right_of_screen() {
        assert_eq!(Vector::new(1.0, 0.0).perpendicular(), Vector::new(0.0, 1.0));
    }

    #[test]
    fn compact_preserves_survivor_order() {
        let mut items: Vec<u8, 8> = Vec::new();
        for n in [1, 2, 3, 4, 5, 6] {
            items.push(n).unwrap();
        }
        compact(&mut items, |n| n % 2 == 0);
        assert_eq!(&items[..], &[2, 4, 6]);

        compact(&mut items, |_| false);
        assert!(items.is_empty());
    }
}
