use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{Range, RegimeRanges};

/// One drawn parameter triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Draw {
    pub x: f64,
    pub u: f64,
    pub s: f64,
}

/// Uniform sampler over regime intervals.
///
/// Seeded runs produce the same sequence on every platform (ChaCha8).
pub struct ParamSampler {
    rng: ChaCha8Rng,
}

impl ParamSampler {
    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Uniform value in `[min, max]`. A degenerate range returns `min` exactly.
    #[inline]
    pub fn uniform(&mut self, range: Range) -> f64 {
        if range.min == range.max {
            range.min
        } else {
            self.rng.gen_range(range.min..=range.max)
        }
    }

    /// Draw x, u, s in that order.
    pub fn draw(&mut self, ranges: &RegimeRanges) -> Draw {
        let x = self.uniform(ranges.x);
        let u = self.uniform(ranges.u);
        let s = self.uniform(ranges.s);
        Draw { x, u, s }
    }
}
