use crate::error::{Result, VectorError};

/// Number of test cases drawn per regime.
pub const CASES_PER_REGIME: usize = 1000;

/// Seed used when `SEED` is not set, so a default run is reproducible.
pub const DEFAULT_SEED: u64 = 20_240_101;

pub const DEFAULT_OUTPUT_PATH: &str = "input/tests.json";

/// Closed sampling interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Sampling intervals for one regime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeRanges {
    pub x: Range,
    pub u: Range,
    pub s: Range,
}

impl RegimeRanges {
    /// Reject ranges the oracle cannot evaluate. Runs before any sampling.
    pub fn validate(&self, regime: &str) -> Result<()> {
        for (name, r) in [("x", self.x), ("u", self.u), ("s", self.s)] {
            if !r.min.is_finite() || !r.max.is_finite() {
                return Err(VectorError::Config(format!(
                    "{}: {} range [{}, {}] is not finite",
                    regime, name, r.min, r.max
                )));
            }
            if r.min > r.max {
                return Err(VectorError::Config(format!(
                    "{}: {} range [{}, {}] has min > max",
                    regime, name, r.min, r.max
                )));
            }
            // max - min must not overflow when sampled
            if !(r.max - r.min).is_finite() {
                return Err(VectorError::Config(format!(
                    "{}: {} range [{}, {}] is too wide",
                    regime, name, r.min, r.max
                )));
            }
        }
        if self.s.min <= 0.0 {
            return Err(VectorError::Config(format!(
                "{}: standard deviation lower bound {} must be > 0",
                regime, self.s.min
            )));
        }
        Ok(())
    }
}

/// Sampling regime. Each one targets a different magnitude/precision scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Standard normal only; x varies.
    FixedDist,
    /// Extreme dynamic range, up to 1e23 / down to 1e-18.
    FullRange,
    /// Steep central region at unit scale.
    TightRange,
    /// Steep central region at 1e15 scale.
    TightRangeScaled,
}

impl Regime {
    /// All regimes in generation order.
    pub const ALL: [Regime; 4] = [
        Regime::FixedDist,
        Regime::FullRange,
        Regime::TightRange,
        Regime::TightRangeScaled,
    ];

    /// Key used in the output document.
    pub fn label(&self) -> &'static str {
        match self {
            Regime::FixedDist => "fixed_dist",
            Regime::FullRange => "full_range",
            Regime::TightRange => "tight_range",
            Regime::TightRangeScaled => "tight_range_scaled",
        }
    }

    pub fn ranges(&self) -> RegimeRanges {
        match self {
            Regime::FixedDist => RegimeRanges {
                x: Range::new(-4.0, 4.0),
                u: Range::new(0.0, 0.0),
                s: Range::new(1.0, 1.0),
            },
            Regime::FullRange => RegimeRanges {
                x: Range::new(-1e23, 1e23),
                u: Range::new(-1e20, 1e20),
                s: Range::new(1e-18, 1e18),
            },
            Regime::TightRange => RegimeRanges {
                x: Range::new(-40.0, 40.0),
                u: Range::new(-1.0, 1.0),
                s: Range::new(1e-18, 10.0),
            },
            Regime::TightRangeScaled => RegimeRanges {
                x: Range::new(-40e15, 40e15),
                u: Range::new(-1e15, 1e15),
                s: Range::new(1e-18, 1e16),
            },
        }
    }
}

/// Which CDF implementation serves as ground truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleKind {
    Statrs,
    LegacyErfc,
}

impl OracleKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "statrs" => Ok(OracleKind::Statrs),
            "legacy-erfc" | "legacy" => Ok(OracleKind::LegacyErfc),
            other => Err(VectorError::Config(format!(
                "unknown ORACLE '{}', expected statrs or legacy-erfc",
                other
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OracleKind::Statrs => "statrs",
            OracleKind::LegacyErfc => "legacy-erfc",
        }
    }
}

/// Configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// `None` draws from OS entropy; runs are then not reproducible.
    pub seed: Option<u64>,
    pub output_path: String,
    pub oracle: OracleKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: Some(DEFAULT_SEED),
            output_path: DEFAULT_OUTPUT_PATH.into(),
            oracle: OracleKind::Statrs,
        }
    }
}

impl Config {
    /// Read `SEED`, `VECTORS_OUT` and `ORACLE`. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = match lookup("SEED") {
            Some(raw) => parse_seed(&raw)?,
            None => Some(DEFAULT_SEED),
        };
        let oracle = match lookup("ORACLE") {
            Some(raw) => OracleKind::parse(&raw)?,
            None => OracleKind::Statrs,
        };

        Ok(Self {
            seed,
            output_path: lookup("VECTORS_OUT").unwrap_or_else(|| DEFAULT_OUTPUT_PATH.into()),
            oracle,
        })
    }

    /// Human-readable seed for the startup banner.
    pub fn seed_label(&self) -> String {
        match self.seed {
            Some(s) => s.to_string(),
            None => "entropy (unseeded)".into(),
        }
    }
}

fn parse_seed(raw: &str) -> Result<Option<u64>> {
    let trimmed = raw.trim();
    match trimmed.to_lowercase().as_str() {
        "random" | "entropy" | "none" => Ok(None),
        _ => trimmed
            .parse()
            .map(Some)
            .map_err(|_| VectorError::Config(format!("SEED '{}' is not a u64", raw))),
    }
}
