//! Regime suite builder.
//!
//! Drives sampler → oracle → encoder for every regime and assembles the
//! document. Pure data construction; the only side effect is stderr logging.

use std::time::Instant;

use crate::config::{Config, Regime, RegimeRanges, CASES_PER_REGIME};
use crate::error::{Result, VectorError};
use crate::math::normal::{oracle_for, CdfOracle};
use crate::math::sampler::{Draw, ParamSampler};
use crate::math::wad::encode;
use crate::types::{RegimeSuite, TestCase, TestVectorDocument};

/// Evaluate and encode one drawn triple.
///
/// `regime` and `index` only label the error if the oracle misbehaves.
pub fn build_case(
    draw: Draw,
    oracle: &dyn CdfOracle,
    regime: &'static str,
    index: usize,
) -> Result<TestCase> {
    let p = oracle.cdf(draw.x, draw.u, draw.s)?;
    // A non-finite or out-of-range probability would poison the golden file
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(VectorError::Oracle { regime, index, value: p });
    }

    let x = encode(draw.x)?;
    let u = encode(draw.u)?;
    let s = encode(draw.s)?;
    let cdf = encode(p)?;

    Ok(TestCase {
        cdf: cdf.decimal,
        cdf_wad: cdf.wad,
        s: s.decimal,
        s_wad: s.wad,
        u: u.decimal,
        u_wad: u.wad,
        x: x.decimal,
        x_wad: x.wad,
    })
}

pub struct SuiteBuilder<'a> {
    sampler: ParamSampler,
    oracle: &'a dyn CdfOracle,
}

impl<'a> SuiteBuilder<'a> {
    pub fn new(sampler: ParamSampler, oracle: &'a dyn CdfOracle) -> Self {
        Self { sampler, oracle }
    }

    /// Draw `CASES_PER_REGIME` cases from `ranges`. Ranges are validated first.
    pub fn build_cases(&mut self, label: &'static str, ranges: &RegimeRanges) -> Result<RegimeSuite> {
        ranges.validate(label)?;
        let mut cases = Vec::with_capacity(CASES_PER_REGIME);
        for i in 0..CASES_PER_REGIME {
            let draw = self.sampler.draw(ranges);
            cases.push(build_case(draw, self.oracle, label, i)?);
        }
        Ok(cases)
    }

    pub fn build_regime(&mut self, regime: Regime) -> Result<RegimeSuite> {
        self.build_cases(regime.label(), &regime.ranges())
    }

    /// All four regimes, in `Regime::ALL` order from one RNG stream.
    ///
    /// Every regime is validated before the first draw, so a bad range aborts
    /// without producing anything.
    pub fn build_document(&mut self) -> Result<TestVectorDocument> {
        for regime in Regime::ALL {
            regime.ranges().validate(regime.label())?;
        }

        let mut doc = TestVectorDocument::default();
        for regime in Regime::ALL {
            let t0 = Instant::now();
            let suite = self.build_regime(regime)?;
            eprintln!(
                "[GEN] {:<18} {} cases in {:.1}ms",
                regime.label(),
                suite.len(),
                t0.elapsed().as_secs_f64() * 1000.0,
            );
            *doc.suite_mut(regime) = suite;
        }
        Ok(doc)
    }
}

/// Build the full document for `config`.
pub fn generate(config: &Config) -> Result<TestVectorDocument> {
    let oracle = oracle_for(config.oracle);
    let sampler = ParamSampler::new(config.seed);
    SuiteBuilder::new(sampler, oracle.as_ref()).build_document()
}
