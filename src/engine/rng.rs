// engine/rng.rs
// Random source used when particles are created

/// Yields uniform samples in `[0, 1)`. The engine only ever needs this, so
/// tests can replace the generator with a fixed sequence.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[min, max)`.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }
}

impl UnitSource for fastrand::Rng {
    fn next_unit(&mut self) -> f64 {
        self.f64()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct FixedUnits {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedUnits {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "FixedUnits needs at least one value");
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl UnitSource for FixedUnits {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
