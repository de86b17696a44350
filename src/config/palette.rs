//! Scene colors and the weighted ornament palettes
//!
//! Colors are normalized sRGB. Palette weights are expressed by repetition:
//! a color listed four times is four times as likely to be drawn.

use rand::Rng;
use crate::math::Vec3;

pub const EMERALD_LIGHT: Vec3 = Vec3::new(4.0 / 255.0, 79.0 / 255.0, 42.0 / 255.0);
pub const GOLD: Vec3 = Vec3::new(1.0, 215.0 / 255.0, 0.0);
pub const ACCENT_RED: Vec3 = Vec3::new(138.0 / 255.0, 0.0, 0.0);
pub const SILVER: Vec3 = Vec3::new(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0);

/// Foliage gradient endpoints (base of the cone to the tip)
pub const FOLIAGE_DEEP: Vec3 = Vec3::new(0.0, 0.1, 0.05);
pub const FOLIAGE_LIGHT: Vec3 = Vec3::new(0.02, 0.3, 0.15);

/// Transient foliage glitter color
pub const SPARKLE_GOLD: Vec3 = Vec3::new(1.0, 0.8, 0.2);

/// A discrete palette sampled by uniform index
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: &'static [Vec3],
}

/// Boxes: gold dominant, with a red and a silver accent
pub const BOX_PALETTE: Palette = Palette {
    entries: &[GOLD, GOLD, GOLD, GOLD, ACCENT_RED, SILVER],
};

/// Spheres: mostly green, with gold, red and silver
pub const SPHERE_PALETTE: Palette = Palette {
    entries: &[
        GOLD,
        ACCENT_RED,
        SILVER,
        EMERALD_LIGHT,
        EMERALD_LIGHT,
        EMERALD_LIGHT,
        EMERALD_LIGHT,
    ],
};

impl Palette {
    pub const fn new(entries: &'static [Vec3]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots occupied by `color`
    pub fn weight_of(&self, color: Vec3) -> usize {
        self.entries.iter().filter(|&&c| c == color).count()
    }

    /// Draw one color. An empty palette yields white.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        if self.entries.is_empty() {
            return Vec3::ONE;
        }
        self.entries[rng.gen_range(0..self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_palette_weights() {
        assert_eq!(BOX_PALETTE.len(), 6);
        assert_eq!(BOX_PALETTE.weight_of(GOLD), 4);
        assert_eq!(BOX_PALETTE.weight_of(ACCENT_RED), 1);
        assert_eq!(BOX_PALETTE.weight_of(SILVER), 1);

        assert_eq!(SPHERE_PALETTE.len(), 7);
        assert_eq!(SPHERE_PALETTE.weight_of(EMERALD_LIGHT), 4);
        assert_eq!(SPHERE_PALETTE.weight_of(GOLD), 1);
    }

    #[test]
    fn test_pick_follows_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 6000;
        let gold = (0..draws)
            .filter(|_| BOX_PALETTE.pick(&mut rng) == GOLD)
            .count();
        let share = gold as f32 / draws as f32;
        // Expected 4/6
        assert!((share - 0.6667).abs() < 0.05, "gold share was {}", share);
    }

    #[test]
    fn test_pick_only_returns_members() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let c = SPHERE_PALETTE.pick(&mut rng);
            assert!(SPHERE_PALETTE.weight_of(c) > 0);
        }
    }

    #[test]
    fn test_empty_palette() {
        let empty = Palette::new(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(empty.is_empty());
        assert_eq!(empty.pick(&mut rng), Vec3::ONE);
    }

    #[test]
    fn test_colors_normalized() {
        for c in [EMERALD_LIGHT, GOLD, ACCENT_RED, SILVER, FOLIAGE_DEEP, FOLIAGE_LIGHT, SPARKLE_GOLD] {
            for v in c.to_array() {
                assert!((0.0..=1.0).contains(&v));
            }
        }
        assert!((GOLD.y - 0.843).abs() < 0.001);
    }
}
