//! Non-negative decimal amount parsed from untrusted text.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::RejectionReason;

/// Largest accepted amount (inclusive).
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Maximum number of fractional digits accepted in the raw text.
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Fractional digits kept in a converted amount.
pub const QUOTE_DECIMAL_PLACES: u32 = 6;

/// Integer digits of `MAX_AMOUNT`, used to compare magnitudes on the text itself.
const MAX_AMOUNT_DIGITS: &str = "1000000000000";

/// Optional sign, digits, optional fraction. No exponent, no bare dot.
static PLAIN_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(?:\.[0-9]+)?$").expect("valid amount pattern"));

/// A validated amount to convert.
///
/// Invariants: finite, `0 <= value <= 10^12`, at most 8 fractional digits in
/// the text it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Parses raw query text, applying the checks in order: empty, grammar,
    /// finiteness, magnitude, sign, fractional digits.
    ///
    /// Fractional digits are counted on the text, not on a parsed float, so
    /// `"1.000000000"` is rejected even though it equals `1`.
    pub fn parse(raw: &str) -> Result<Self, RejectionReason> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(RejectionReason::EmptyAmount);
        }
        if !PLAIN_DECIMAL.is_match(text) {
            return Err(RejectionReason::MalformedAmount);
        }

        let as_float: f64 = text
            .parse()
            .map_err(|_| RejectionReason::MalformedAmount)?;
        if !as_float.is_finite() {
            return Err(RejectionReason::NonFiniteAmount);
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let int_digits = int_part.trim_start_matches('0');

        if exceeds_max(int_digits, frac_part) {
            return Err(RejectionReason::AmountOutOfRange);
        }

        let is_zero = int_digits.is_empty() && frac_part.bytes().all(|b| b == b'0');
        if negative && !is_zero {
            return Err(RejectionReason::NegativeAmountRejected);
        }

        if frac_part.len() > MAX_FRACTION_DIGITS {
            return Err(RejectionReason::TooManyDecimals);
        }

        let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
        let normalized = if frac_part.is_empty() {
            int_digits.to_string()
        } else {
            format!("{int_digits}.{frac_part}")
        };
        Decimal::from_str_exact(&normalized)
            .map(Amount)
            .map_err(|_| RejectionReason::MalformedAmount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiplies by `rate` and rounds half away from zero to
    /// `QUOTE_DECIMAL_PLACES`. Returns `None` when the product overflows.
    pub fn convert_at(&self, rate: Decimal) -> Option<Decimal> {
        self.0
            .checked_mul(rate)
            .map(|v| {
                v.round_dp_with_strategy(QUOTE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            })
    }
}

/// Compares the unsigned magnitude against `MAX_AMOUNT` without parsing.
/// `int_digits` must have no leading zeros.
fn exceeds_max(int_digits: &str, frac_part: &str) -> bool {
    match int_digits.len().cmp(&MAX_AMOUNT_DIGITS.len()) {
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => match int_digits.cmp(MAX_AMOUNT_DIGITS) {
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => frac_part.bytes().any(|b| b != b'0'),
        },
    }
}

impl FromStr for Amount {
    type Err = RejectionReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
