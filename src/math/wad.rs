//! Lossless conversion between real numbers and WAD integer strings.
//!
//! A WAD is `round(v * 10^18)` written as a plain base-10 integer. Scaling is
//! done on the exact decimal text of `v` with big integers, never with an `f64`
//! multiply, so values like `1e23` (WAD ~ 10^41) keep every digit.
//!
//! Rounding: half away from zero, applied once at the final integer step.

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::error::{Result, VectorError};

/// Decimal places carried by a WAD.
pub const WAD_DECIMALS: u32 = 18;

/// Exponents beyond this are rejected by the parser rather than expanded.
const MAX_EXPONENT: i64 = 4096;

/// A real number in both output forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// Shortest round-trip decimal, never in exponent notation.
    pub decimal: String,
    /// `round(decimal * 10^18)`, no separators, `-` only for negatives.
    pub wad: String,
}

/// Encode a finite `f64` into its decimal and WAD strings.
pub fn encode(v: f64) -> Result<Encoded> {
    if !v.is_finite() {
        return Err(VectorError::Encoding { value: v.to_string() });
    }
    let decimal = format_decimal(v);
    let wad = decimal_to_wad(&decimal)?;
    Ok(Encoded { decimal, wad })
}

/// Shortest decimal that round-trips to `v`. `Display` for f64 never switches
/// to exponent notation, e.g. `1e23` renders as `100000000000000000000000`.
pub fn format_decimal(v: f64) -> String {
    if v == 0.0 {
        // -0.0 would render as "-0"
        "0".into()
    } else {
        format!("{}", v)
    }
}

/// Exact WAD of a decimal string.
pub fn decimal_to_wad(s: &str) -> Result<String> {
    Ok(parse_decimal(s)?.to_wad().to_string())
}

/// Exact decimal value: `(-1)^negative * mantissa * 10^(-scale)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExactDecimal {
    pub negative: bool,
    pub mantissa: BigUint,
    pub scale: i64,
}

impl ExactDecimal {
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// `round(self * 10^18)`, half away from zero.
    pub fn to_wad(&self) -> BigInt {
        let shift = WAD_DECIMALS as i64 - self.scale;
        let magnitude = if shift >= 0 {
            &self.mantissa * pow10(shift as u32)
        } else {
            let divisor = pow10((-shift) as u32);
            let mut q = &self.mantissa / &divisor;
            let r = &self.mantissa % &divisor;
            if r * 2u32 >= divisor {
                q += 1u32;
            }
            q
        };
        signed(self.negative, magnitude)
    }

    /// Compare against another exact decimal without losing precision.
    pub fn cmp_exact(&self, other: &ExactDecimal) -> Ordering {
        let scale = self.scale.max(other.scale);
        let a = signed(self.negative, &self.mantissa * pow10((scale - self.scale) as u32));
        let b = signed(other.negative, &other.mantissa * pow10((scale - other.scale) as u32));
        a.cmp(&b)
    }
}

/// Parse a plain or exponent-form decimal string exactly.
///
/// Accepts an optional sign, digits with at most one `.`, and an optional
/// `e`/`E` exponent. Grouping separators, whitespace, `NaN` and `Infinity`
/// are rejected.
pub fn parse_decimal(s: &str) -> Result<ExactDecimal> {
    let bad = || VectorError::Encoding { value: s.to_string() };

    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (number, exponent) = match body.find(['e', 'E']) {
        Some(pos) => {
            let exp: i64 = body[pos + 1..].parse().map_err(|_| bad())?;
            (&body[..pos], exp)
        }
        None => (body, 0),
    };
    if exponent.abs() > MAX_EXPONENT {
        return Err(bad());
    }
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(bad());
    }
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(bad());
    }

    let digits = format!("{}{}", int_part, frac_part);
    let mantissa = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(bad)?;
    let scale = frac_part.len() as i64 - exponent;

    // Normalize so the exponent is folded into the mantissa when it would
    // otherwise leave a negative scale.
    let (mantissa, scale) = if scale < 0 {
        (mantissa * pow10((-scale) as u32), 0)
    } else {
        (mantissa, scale)
    };

    Ok(ExactDecimal {
        negative: negative && !mantissa.is_zero(),
        mantissa,
        scale,
    })
}

/// Render a WAD integer string as the exact decimal it stands for,
/// with trailing fractional zeros trimmed.
pub fn wad_to_decimal(wad: &str) -> Result<String> {
    let bad = || VectorError::Encoding { value: wad.to_string() };

    let (negative, digits) = match wad.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, wad),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(bad)?;
    if magnitude.is_zero() {
        return Ok("0".into());
    }

    let width = WAD_DECIMALS as usize + 1;
    let padded = format!("{:0>width$}", magnitude.to_string(), width = width);
    let (int_part, frac_part) = padded.split_at(padded.len() - WAD_DECIMALS as usize);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(padded.len() + 2);
    if negative {
        out.push('-');
    }
    out.push_str(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    Ok(out)
}

/// `10^18` as a big integer, the WAD for `1`.
pub fn wad_one() -> BigInt {
    BigInt::from(pow10(WAD_DECIMALS))
}

fn pow10(n: u32) -> BigUint {
    BigUint::from(10u32).pow(n)
}

fn signed(negative: bool, magnitude: BigUint) -> BigInt {
    if magnitude.is_zero() {
        BigInt::zero()
    } else if negative {
        BigInt::from_biguint(Sign::Minus, magnitude)
    } else {
        BigInt::from_biguint(Sign::Plus, magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Scenario: CDF value 0.5 (standard normal at its mean).
    /// Expected: decimal "0.5", WAD "500000000000000000".
    #[test]
    fn test_half() {
        let e = encode(0.5).unwrap();
        assert_eq!(e.decimal, "0.5");
        assert_eq!(e.wad, "500000000000000000");
    }

    /// Scenario: x = 1e23, the largest full_range magnitude.
    /// Expected: decimal has no exponent, WAD is 1 followed by 41 zeros with nothing truncated.
    #[test]
    fn test_extreme_magnitude() {
        let e = encode(1e23).unwrap();
        assert_eq!(e.decimal, "100000000000000000000000");
        assert_eq!(e.wad, format!("1{}", "0".repeat(41)));

        let neg = encode(-1e23).unwrap();
        assert_eq!(neg.wad, format!("-1{}", "0".repeat(41)));
    }

    /// Scenario: 1e-18, the smallest s bound.
    /// Expected: decimal written out in full, WAD "1".
    #[test]
    fn test_smallest_sigma() {
        let e = encode(1e-18).unwrap();
        assert_eq!(e.decimal, "0.000000000000000001");
        assert_eq!(e.wad, "1");
    }

    /// Scenario: Zero and negative zero.
    /// Expected: Both encode as "0" / "0"; no "-0" leaks out.
    #[test]
    fn test_zero() {
        for v in [0.0, -0.0] {
            let e = encode(v).unwrap();
            assert_eq!(e.decimal, "0");
            assert_eq!(e.wad, "0");
        }
    }

    /// Scenario: Values with more than 18 fractional digits landing below, on, and above a half.
    /// Expected: Half away from zero, symmetric for negatives; sub-half negatives collapse to "0".
    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(decimal_to_wad("0.0000000000000000004").unwrap(), "0");
        assert_eq!(decimal_to_wad("0.0000000000000000005").unwrap(), "1");
        assert_eq!(decimal_to_wad("0.0000000000000000015").unwrap(), "2");
        assert_eq!(decimal_to_wad("0.0000000000000000025").unwrap(), "3");
        assert_eq!(decimal_to_wad("-0.0000000000000000005").unwrap(), "-1");
        assert_eq!(decimal_to_wad("-0.0000000000000000004").unwrap(), "0");
        assert_eq!(decimal_to_wad("1.9999999999999999995").unwrap(), "2000000000000000000");
    }

    /// Scenario: A CDF deep in the tail, far below one WAD unit.
    /// Expected: WAD "0" while the decimal keeps its digits and no exponent.
    #[test]
    fn test_tiny_cdf() {
        let e = encode(1.2e-30).unwrap();
        assert_eq!(e.wad, "0");
        assert!(e.decimal.starts_with("0.000000000000000000000000000001"));
        assert!(!e.decimal.contains('e'));
    }

    /// Scenario: A value whose scaled form exceeds 2^53, where f64 multiply would drift.
    /// Expected: Exact digits of the decimal followed by zero padding.
    #[test]
    fn test_beyond_f64_integer_range() {
        let e = encode(123456789.123456789).unwrap();
        assert_eq!(e.decimal, "123456789.12345679");
        assert_eq!(e.wad, "123456789123456790000000000");
        assert_eq!(encode(0.1).unwrap().wad, "100000000000000000");
        assert_eq!(encode(-40e15).unwrap().wad, format!("-4{}", "0".repeat(34)));
    }

    /// Scenario: NaN, +inf and -inf.
    /// Expected: EncodingError for each.
    #[test]
    fn test_non_finite_rejected() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(encode(v), Err(VectorError::Encoding { .. })));
        }
    }

    /// Scenario: Parse exponent-form strings, including JS-style "1e+23".
    /// Expected: Same WAD as the plain form.
    #[test]
    fn test_parse_exponent_forms() {
        assert_eq!(decimal_to_wad("1e+23").unwrap(), format!("1{}", "0".repeat(41)));
        assert_eq!(decimal_to_wad("1E-18").unwrap(), "1");
        assert_eq!(decimal_to_wad("2.5e-1").unwrap(), "250000000000000000");
        assert_eq!(decimal_to_wad("-.5").unwrap(), "-500000000000000000");
        assert_eq!(decimal_to_wad("7.").unwrap(), "7000000000000000000");
    }

    /// Scenario: Malformed inputs: empty, lone sign, grouping commas, spaces, NaN, huge exponent.
    /// Expected: All rejected with EncodingError.
    #[test]
    fn test_parse_rejects_garbage() {
        for s in ["", "-", ".", "1,000", " 1", "NaN", "Infinity", "1e", "1e99999", "1.2.3", "--1"] {
            assert!(parse_decimal(s).is_err(), "accepted {:?}", s);
        }
    }

    /// Scenario: Turn WAD strings back into decimals.
    /// Expected: Exact decimals with trailing zeros trimmed and the sign preserved.
    #[test]
    fn test_wad_to_decimal() {
        assert_eq!(wad_to_decimal("500000000000000000").unwrap(), "0.5");
        assert_eq!(wad_to_decimal("1").unwrap(), "0.000000000000000001");
        assert_eq!(wad_to_decimal("-1000000000000000000").unwrap(), "-1");
        assert_eq!(wad_to_decimal("0").unwrap(), "0");
        assert_eq!(wad_to_decimal("-0").unwrap(), "0");
        assert_eq!(
            wad_to_decimal(&format!("1{}", "0".repeat(41))).unwrap(),
            "100000000000000000000000"
        );
        assert!(wad_to_decimal("1.5").is_err());
        assert!(wad_to_decimal("").is_err());
    }

    /// Scenario: Exact comparison of decimals at different scales.
    /// Expected: Ordering matches the real values, including sign.
    #[test]
    fn test_cmp_exact() {
        let a = parse_decimal("0.5").unwrap();
        let b = parse_decimal("0.50000000000000000000001").unwrap();
        let c = parse_decimal("-4").unwrap();
        let d = parse_decimal("-4e0").unwrap();
        assert_eq!(a.cmp_exact(&b), Ordering::Less);
        assert_eq!(b.cmp_exact(&a), Ordering::Greater);
        assert_eq!(c.cmp_exact(&d), Ordering::Equal);
        assert_eq!(c.cmp_exact(&a), Ordering::Less);
    }

    /// Scenario: wad_one helper.
    /// Expected: 10^18.
    #[test]
    fn test_wad_one() {
        assert_eq!(wad_one().to_string(), "1000000000000000000");
    }

    proptest! {
        /// Decimal n / 10^k encodes to n * 10^(18-k) exactly, and converts back.
        #[test]
        fn prop_short_decimals_scale_exactly(n in -1_000_000_000i64..1_000_000_000i64, k in 0u32..=6) {
            let v = n as f64 / 10f64.powi(k as i32);
            let e = encode(v).unwrap();
            let expected = BigInt::from(n) * BigInt::from(10u32).pow(WAD_DECIMALS - k);
            prop_assert_eq!(&e.wad, &expected.to_string());
            prop_assert_eq!(wad_to_decimal(&e.wad).unwrap(), e.decimal);
        }

        /// Any finite f64 yields plain strings whose WAD sign matches the value.
        #[test]
        fn prop_plain_output(v in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL | proptest::num::f64::ZERO) {
            let e = encode(v).unwrap();
            prop_assert!(!e.decimal.contains(['e', 'E', ',']));
            prop_assert!(e.wad.bytes().enumerate().all(|(i, b)| b.is_ascii_digit() || (i == 0 && b == b'-')));
            if e.wad.starts_with('-') {
                prop_assert!(v < 0.0);
            }
            if v.abs() >= 1e-18 {
                prop_assert_ne!(e.wad, "0");
            }
        }
    }
}
