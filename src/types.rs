use serde::{Deserialize, Serialize};

use crate::config::Regime;

// ─── Test Case ───

/// One generated vector. All fields are strings so WADs beyond 2^53 survive
/// any JSON consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub cdf: String,
    pub cdf_wad: String,
    pub s: String,
    pub s_wad: String,
    pub u: String,
    pub u_wad: String,
    pub x: String,
    pub x_wad: String,
}

impl TestCase {
    /// (name, decimal, wad) for every numeric field.
    pub fn pairs(&self) -> [(&'static str, &str, &str); 4] {
        [
            ("x", self.x.as_str(), self.x_wad.as_str()),
            ("u", self.u.as_str(), self.u_wad.as_str()),
            ("s", self.s.as_str(), self.s_wad.as_str()),
            ("cdf", self.cdf.as_str(), self.cdf_wad.as_str()),
        ]
    }
}

/// Cases for one regime, in generation order.
pub type RegimeSuite = Vec<TestCase>;

// ─── Document ───

/// The persisted artifact: exactly four regime keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestVectorDocument {
    pub fixed_dist: RegimeSuite,
    pub full_range: RegimeSuite,
    pub tight_range: RegimeSuite,
    pub tight_range_scaled: RegimeSuite,
}

impl TestVectorDocument {
    pub fn suite(&self, regime: Regime) -> &RegimeSuite {
        match regime {
            Regime::FixedDist => &self.fixed_dist,
            Regime::FullRange => &self.full_range,
            Regime::TightRange => &self.tight_range,
            Regime::TightRangeScaled => &self.tight_range_scaled,
        }
    }

    pub fn suite_mut(&mut self, regime: Regime) -> &mut RegimeSuite {
        match regime {
            Regime::FixedDist => &mut self.fixed_dist,
            Regime::FullRange => &mut self.full_range,
            Regime::TightRange => &mut self.tight_range,
            Regime::TightRangeScaled => &mut self.tight_range_scaled,
        }
    }

    pub fn total_cases(&self) -> usize {
        Regime::ALL.iter().map(|r| self.suite(*r).len()).sum()
    }
}
