/// A closed or open range of ray parameters or channel values, depending on
/// which test is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The range [0, 1] that color channels are clamped to.
    pub const UNIT: Interval = Interval::new(0.0, 1.0);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min <= t <= max`
    pub fn contains(&self, t: f32) -> bool {
        (self.min..=self.max).contains(&t)
    }

    /// `min < t < max`. Hits are accepted with this test, so a hit exactly
    /// at either bound is rejected.
    pub fn surrounds(&self, t: f32) -> bool {
        self.min < t && t < self.max
    }

    /// Clamp `t` into the range. NaN clamps to `min`.
    pub fn clamp(&self, t: f32) -> f32 {
        if t > self.max {
            self.max
        } else if t >= self.min {
            t
        } else {
            self.min
        }
    }
}
