use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::OracleKind;
use crate::error::{Result, VectorError};

/// Ground-truth Gaussian CDF.
///
/// The distribution is passed by value on every call; implementations hold no
/// per-case state.
pub trait CdfOracle: Send + Sync {
    fn name(&self) -> &'static str;

    /// P(X <= x) for X ~ Normal(mean, std_dev). Requires std_dev > 0.
    fn cdf(&self, x: f64, mean: f64, std_dev: f64) -> Result<f64>;
}

/// Build the oracle selected in config.
pub fn oracle_for(kind: OracleKind) -> Box<dyn CdfOracle> {
    match kind {
        OracleKind::Statrs => Box::new(StatrsOracle),
        OracleKind::LegacyErfc => Box::new(LegacyErfcOracle),
    }
}

fn check_params(x: f64, mean: f64, std_dev: f64) -> Result<()> {
    if !x.is_finite() || !mean.is_finite() || !std_dev.is_finite() || std_dev <= 0.0 {
        return Err(VectorError::Config(format!(
            "cannot evaluate cdf at x={} for Normal({}, {})",
            x, mean, std_dev
        )));
    }
    Ok(())
}

/// `statrs` normal distribution. Exact 0.5 at the mean.
pub struct StatrsOracle;

impl CdfOracle for StatrsOracle {
    fn name(&self) -> &'static str {
        "statrs"
    }

    fn cdf(&self, x: f64, mean: f64, std_dev: f64) -> Result<f64> {
        check_params(x, mean, std_dev)?;
        let dist = Normal::new(mean, std_dev)
            .map_err(|e| VectorError::Config(format!("Normal({}, {}): {}", mean, std_dev, e)))?;
        Ok(dist.cdf(x))
    }
}

/// Complementary error function, Chebyshev fit (Numerical Recipes `erfcc`).
/// Fractional error < 1.2e-7 everywhere.
#[inline]
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * (-z * z + poly).exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

/// Gaussian CDF via [`erfc`]. Reproduces the reference values of earlier
/// corpora built with the same approximation.
pub struct LegacyErfcOracle;

impl CdfOracle for LegacyErfcOracle {
    fn name(&self) -> &'static str {
        "legacy-erfc"
    }

    fn cdf(&self, x: f64, mean: f64, std_dev: f64) -> Result<f64> {
        check_params(x, mean, std_dev)?;
        Ok(0.5 * erfc(-(x - mean) / (std_dev * std::f64::consts::SQRT_2)))
    }
}
