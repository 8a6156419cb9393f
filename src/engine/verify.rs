//! Offline checks for a generated vectors document.
//!
//! Recomputes every WAD from its decimal field with the exact encoder and
//! checks the structural guarantees downstream consumers rely on.

use std::cmp::Ordering;
use std::fs;

use num_bigint::{BigInt, Sign};

use crate::config::{Regime, CASES_PER_REGIME};
use crate::error::{Result, VectorError};
use crate::math::wad::{decimal_to_wad, parse_decimal, wad_one, wad_to_decimal, WAD_DECIMALS};
use crate::types::{TestCase, TestVectorDocument};

/// Outcome of [`verify_document`].
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub cases_checked: usize,
    pub violation_count: usize,
    /// First `max_reported` violations, in document order.
    pub violations: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.violation_count == 0
    }

    /// `Err(Verify)` if anything failed.
    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(VectorError::Verify { violations: self.violation_count })
        }
    }
}

struct Collector {
    report: VerifyReport,
    max_reported: usize,
}

impl Collector {
    fn push(&mut self, msg: String) {
        self.report.violation_count += 1;
        if self.report.violations.len() < self.max_reported {
            self.report.violations.push(msg);
        }
    }
}

/// Read and deserialize a document. Unknown or missing keys fail here.
pub fn load_document(path: &str) -> Result<TestVectorDocument> {
    let raw = fs::read_to_string(path).map_err(|source| VectorError::Read {
        path: path.to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Check every case in `doc`. Never short-circuits; all violations are counted.
pub fn verify_document(doc: &TestVectorDocument, max_reported: usize) -> VerifyReport {
    let mut c = Collector { report: VerifyReport::default(), max_reported };

    for regime in Regime::ALL {
        let suite = doc.suite(regime);
        if suite.len() != CASES_PER_REGIME {
            c.push(format!(
                "{}: {} cases, expected {}",
                regime.label(),
                suite.len(),
                CASES_PER_REGIME
            ));
        }
        for (i, case) in suite.iter().enumerate() {
            check_case(&mut c, regime, i, case);
            c.report.cases_checked += 1;
        }
    }
    c.report
}

fn check_case(c: &mut Collector, regime: Regime, i: usize, case: &TestCase) {
    let label = regime.label();

    for (name, decimal, wad) in case.pairs() {
        match decimal_to_wad(decimal) {
            Ok(expected) if expected == wad => {}
            Ok(expected) => c.push(format!(
                "{}[{}].{}_wad = {}, expected {} from {} = {}",
                label, i, name, wad, expected, name, decimal
            )),
            Err(_) => {
                c.push(format!("{}[{}].{} = {:?} is not a decimal", label, i, name, decimal));
                continue;
            }
        }
        // Without extra fractional digits the WAD must give back the decimal exactly
        if let (Ok(d), Ok(back)) = (parse_decimal(decimal), wad_to_decimal(wad)) {
            if d.scale <= WAD_DECIMALS as i64 {
                let same = parse_decimal(&back)
                    .map(|b| b.cmp_exact(&d) == Ordering::Equal)
                    .unwrap_or(false);
                if !same {
                    c.push(format!(
                        "{}[{}].{}_wad = {} does not round-trip to {}",
                        label, i, name, wad, decimal
                    ));
                }
            }
        }
    }

    let ranges = regime.ranges();
    for (name, decimal, range) in [
        ("x", &case.x, ranges.x),
        ("u", &case.u, ranges.u),
        ("s", &case.s, ranges.s),
    ] {
        match decimal.parse::<f64>() {
            Ok(v) if range.contains(v) => {}
            _ => c.push(format!(
                "{}[{}].{} = {} outside [{}, {}]",
                label, i, name, decimal, range.min, range.max
            )),
        }
    }

    if let Ok(s) = parse_decimal(&case.s) {
        if s.negative || s.is_zero() {
            c.push(format!("{}[{}].s = {} is not positive", label, i, case.s));
        }
    }

    if let (Ok(p), Ok(one)) = (parse_decimal(&case.cdf), parse_decimal("1")) {
        if p.negative || p.cmp_exact(&one) == Ordering::Greater {
            c.push(format!("{}[{}].cdf = {} outside [0, 1]", label, i, case.cdf));
        }
    }
    match case.cdf_wad.parse::<BigInt>() {
        Ok(w) if w.sign() == Sign::Minus => {
            c.push(format!("{}[{}].cdf_wad = {} is negative", label, i, case.cdf_wad))
        }
        Ok(w) if w > wad_one() => {
            c.push(format!("{}[{}].cdf_wad = {} exceeds 1e18", label, i, case.cdf_wad))
        }
        Ok(_) => {}
        Err(_) => c.push(format!("{}[{}].cdf_wad = {} is not an integer", label, i, case.cdf_wad)),
    }

    if regime == Regime::FixedDist && (case.u != "0" || case.s != "1") {
        c.push(format!(
            "{}[{}] has u = {}, s = {}; expected u = 0, s = 1",
            label, i, case.u, case.s
        ));
    }
}
