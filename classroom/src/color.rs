use rand::Rng;

/// Largest possible distance between two RGB colors with channels in 0..=1.
pub const MAX_RGB_DISTANCE: f32 = 1.732_050_8;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Random color with every channel quantized to 8 bits.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut channel = || rng.gen_range(0..=255_u8) as f32 / 255.0;

        Self::new(channel(), channel(), channel())
    }

    pub fn distance(&self, other: &Color) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;

        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Distance scaled into 0..=1.
    pub fn normalized_distance(&self, other: &Color) -> f32 {
        self.distance(other) / MAX_RGB_DISTANCE
    }

    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn distance_extremes() {
        let black = Color::new(0.0, 0.0, 0.0);
        let white = Color::new(1.0, 1.0, 1.0);

        assert_eq!(black.normalized_distance(&black), 0.0);
        assert!((black.normalized_distance(&white) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn random_channels_are_quantized() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..64 {
            let c = Color::random(&mut rng);
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&ch));
                let steps = ch * 255.0;
                assert!((steps - steps.round()).abs() < 1e-3);
            }
        }
    }
}
