//! [BSON Decimal128](https://github.com/mongodb/specifications/blob/master/source/bson-decimal128/decimal128.md) data type representation

use std::{fmt, str::FromStr};

use crate::error::{Decimal128ErrorKind, Error, Result};

const EXPONENT_BIAS: i32 = 6176;
const MIN_EXPONENT: i64 = -6176;
const MAX_EXPONENT: i64 = 6111;
const MAX_DIGITS: usize = 34;
const MAX_COEFFICIENT: u128 = 10u128.pow(MAX_DIGITS as u32) - 1;

const COMBINATION_NAN: u128 = 0b11111;
const COMBINATION_INFINITY: u128 = 0b11110;
const EXPONENT_MASK: u128 = 0x3FFF;

/// Struct representing a BSON Decimal128 type.
///
/// The value is stored as the 16 bytes of its IEEE 754-2008 binary integer decimal encoding, in
/// the little-endian order BSON uses on the wire. Formatting with [`Display`](fmt::Display)
/// produces the canonical string form used by extended JSON, and [`FromStr`] accepts any string
/// that can be represented exactly:
///
/// ```rust
/// use bson_extjson::Decimal128;
///
/// let d: Decimal128 = "1000".parse()?;
/// assert_eq!(d.to_string(), "1000");
///
/// let d: Decimal128 = "1.0E+3".parse()?;
/// assert_eq!(d.to_string(), "1.0E+3");
/// # Ok::<(), bson_extjson::error::Error>(())
/// ```
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub struct Decimal128 {
    /// BSON bytes containing the decimal128. Stored for round tripping.
    pub(crate) bytes: [u8; 16],
}

impl Decimal128 {
    /// Constructs a new `Decimal128` from the provided raw byte representation.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Returns the raw byte representation of this `Decimal128`.
    pub const fn bytes(&self) -> [u8; 16] {
        self.bytes
    }

    /// Whether this value is a NaN, signaling or quiet.
    pub fn is_nan(&self) -> bool {
        matches!(self.unpack().kind, Kind::NaN)
    }

    /// Whether this value is positive or negative infinity.
    pub fn is_infinite(&self) -> bool {
        matches!(self.unpack().kind, Kind::Infinity)
    }

    /// Whether the sign bit is set. This is true for negative zero and negative NaN as well.
    pub fn is_sign_negative(&self) -> bool {
        self.unpack().sign
    }

    fn unpack(&self) -> Unpacked {
        let bits = u128::from_le_bytes(self.bytes);
        let sign = bits >> 127 == 1;
        let combination = (bits >> 122) & 0b11111;

        let kind = if combination == COMBINATION_NAN {
            Kind::NaN
        } else if combination == COMBINATION_INFINITY {
            Kind::Infinity
        } else if (bits >> 125) & 0b11 == 0b11 {
            // The implied 0b100 prefix puts the coefficient above 10^34 - 1, which is
            // non-canonical and read as zero.
            Kind::Finite {
                coefficient: 0,
                exponent: ((bits >> 111) & EXPONENT_MASK) as i32 - EXPONENT_BIAS,
            }
        } else {
            let coefficient = bits & ((1u128 << 113) - 1);
            Kind::Finite {
                coefficient: if coefficient > MAX_COEFFICIENT {
                    0
                } else {
                    coefficient
                },
                exponent: ((bits >> 113) & EXPONENT_MASK) as i32 - EXPONENT_BIAS,
            }
        };

        Unpacked { sign, kind }
    }

    fn pack(sign: bool, kind: Kind) -> Self {
        let mut bits = match kind {
            Kind::NaN => COMBINATION_NAN << 122,
            Kind::Infinity => COMBINATION_INFINITY << 122,
            Kind::Finite {
                coefficient,
                exponent,
            } => (((exponent + EXPONENT_BIAS) as u128) << 113) | coefficient,
        };
        if sign {
            bits |= 1 << 127;
        }
        Self::from_bytes(bits.to_le_bytes())
    }
}

struct Unpacked {
    sign: bool,
    kind: Kind,
}

enum Kind {
    NaN,
    Infinity,
    Finite { coefficient: u128, exponent: i32 },
}

impl fmt::Debug for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal128({})", self)
    }
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Unpacked { sign, kind } = self.unpack();
        let (coefficient, exponent) = match kind {
            Kind::NaN => return f.write_str("NaN"),
            Kind::Infinity => return f.write_str(if sign { "-Infinity" } else { "Infinity" }),
            Kind::Finite {
                coefficient,
                exponent,
            } => (coefficient, exponent),
        };

        if sign {
            f.write_str("-")?;
        }

        let digits = coefficient.to_string();
        let adjusted = exponent + digits.len() as i32 - 1;

        if exponent <= 0 && adjusted >= -6 {
            if exponent == 0 {
                return f.write_str(&digits);
            }
            let scale = exponent.unsigned_abs() as usize;
            if digits.len() > scale {
                let (whole, fraction) = digits.split_at(digits.len() - scale);
                write!(f, "{whole}.{fraction}")
            } else {
                write!(f, "0.{}{digits}", "0".repeat(scale - digits.len()))
            }
        } else {
            let (first, rest) = digits.split_at(1);
            f.write_str(first)?;
            if !rest.is_empty() {
                write!(f, ".{rest}")?;
            }
            write!(f, "E{adjusted:+}")
        }
    }
}

impl FromStr for Decimal128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        if rest.is_empty() {
            return Err(Error::decimal128(Decimal128ErrorKind::Unparseable));
        }
        if rest.eq_ignore_ascii_case("nan") {
            return Ok(Self::pack(sign, Kind::NaN));
        }
        if rest.eq_ignore_ascii_case("inf") || rest.eq_ignore_ascii_case("infinity") {
            return Ok(Self::pack(sign, Kind::Infinity));
        }

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let exponent: i64 = match exponent {
            None => 0,
            Some("") => return Err(Error::decimal128(Decimal128ErrorKind::EmptyExponent)),
            Some(e) => e.parse::<i32>().map(i64::from).map_err(|e| {
                Error::decimal128(Decimal128ErrorKind::InvalidExponent {
                    message: e.to_string(),
                })
            })?,
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(Error::decimal128(
                Decimal128ErrorKind::InvalidCoefficient {
                    message: "no digits".to_string(),
                },
            ));
        }
        if let Some(c) = whole
            .chars()
            .chain(fraction.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(Error::decimal128(
                Decimal128ErrorKind::InvalidCoefficient {
                    message: format!("unexpected character {c:?}"),
                },
            ));
        }

        let digits: Vec<u8> = whole
            .bytes()
            .chain(fraction.bytes())
            .skip_while(|&b| b == b'0')
            .collect();
        let mut significant = digits.as_slice();
        let mut exponent = exponent - fraction.len() as i64;

        // Trailing zeros past the 34 digit limit can move into the exponent without losing
        // precision.
        while significant.len() > MAX_DIGITS && significant.last() == Some(&b'0') {
            significant = &significant[..significant.len() - 1];
            exponent += 1;
        }
        if significant.len() > MAX_DIGITS {
            return Err(Error::decimal128(Decimal128ErrorKind::InexactRounding));
        }

        let mut coefficient = significant
            .iter()
            .fold(0u128, |acc, d| acc * 10 + u128::from(d - b'0'));

        if coefficient == 0 {
            exponent = exponent.clamp(MIN_EXPONENT, MAX_EXPONENT);
        }
        while exponent > MAX_EXPONENT {
            if coefficient * 10 > MAX_COEFFICIENT {
                return Err(Error::decimal128(Decimal128ErrorKind::Overflow));
            }
            coefficient *= 10;
            exponent -= 1;
        }
        while exponent < MIN_EXPONENT {
            if coefficient % 10 != 0 {
                return Err(Error::decimal128(Decimal128ErrorKind::Underflow));
            }
            coefficient /= 10;
            exponent += 1;
        }

        Ok(Self::pack(
            sign,
            Kind::Finite {
                coefficient,
                exponent: exponent as i32,
            },
        ))
    }
}
