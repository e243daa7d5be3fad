//! Query validation and normalization.
//!
//! Turns untrusted query parameters into a [`ConversionRequest`]. Pure: no
//! I/O, no configuration. Checks run in a fixed order and the first failure
//! is returned.

use std::sync::LazyLock;

use regex::Regex;

use currency_codes::CurrencyCode;

use crate::domain::{Amount, ConversionRequest};
use crate::error::RejectionReason;

/// The only query keys a conversion accepts.
pub const ALLOWED_PARAMS: [&str; 3] = ["from", "to", "amount"];

/// Unknown keys are echoed back truncated to this many characters.
const MAX_ECHOED_KEY_CHARS: usize = 32;

static CURRENCY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency pattern"));

/// Validates decoded `key=value` pairs, in the order they appeared.
///
/// 1. every key is one of [`ALLOWED_PARAMS`], each at most once
/// 2. `from` and `to` are present and non-blank
/// 3. both are 3 ASCII letters once trimmed and uppercased
/// 4. both are in the supported catalogue
/// 5. `amount`, when present, passes [`Amount::parse`]
pub fn validate<K, V>(query: &[(K, V)]) -> Result<ConversionRequest, RejectionReason>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if let Some((key, _)) = query
        .iter()
        .find(|(key, _)| !ALLOWED_PARAMS.contains(&key.as_ref()))
    {
        return Err(RejectionReason::UnexpectedParameter(echo_key(key.as_ref())));
    }

    for name in ALLOWED_PARAMS {
        if query.iter().filter(|(key, _)| key.as_ref() == name).count() > 1 {
            return Err(RejectionReason::DuplicateParameter(name.to_string()));
        }
    }

    let (from, to) = match (param(query, "from"), param(query, "to")) {
        (Some(from), Some(to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            (normalize_code(from), normalize_code(to))
        }
        _ => return Err(RejectionReason::MissingRequiredParameter),
    };

    if !CURRENCY_SHAPE.is_match(&from) || !CURRENCY_SHAPE.is_match(&to) {
        return Err(RejectionReason::MalformedCurrencyCode);
    }

    let from = CurrencyCode::lookup(&from).ok_or(RejectionReason::UnsupportedCurrency(from))?;
    let to = CurrencyCode::lookup(&to).ok_or(RejectionReason::UnsupportedCurrency(to))?;

    let amount = param(query, "amount").map(Amount::parse).transpose()?;

    Ok(ConversionRequest::new(from, to, amount))
}

fn param<'a, K, V>(query: &'a [(K, V)], name: &str) -> Option<&'a str>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    query
        .iter()
        .find(|(key, _)| key.as_ref() == name)
        .map(|(_, value)| value.as_ref())
}

fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

fn echo_key(key: &str) -> String {
    key.chars().take(MAX_ECHOED_KEY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn run(pairs: &[(&str, &str)]) -> Result<ConversionRequest, RejectionReason> {
        validate(pairs)
    }

    #[test]
    fn test_valid_request_with_amount() {
        let req = run(&[("from", "USD"), ("to", "EUR"), ("amount", "100")]).unwrap();
        assert_eq!(req.from_currency(), CurrencyCode::USD);
        assert_eq!(req.to_currency(), CurrencyCode::EUR);
        assert_eq!(req.amount().unwrap().value(), dec!(100));
    }

    #[test]
    fn test_lowercase_codes_are_normalized() {
        let req = run(&[("from", "usd"), ("to", " eur "), ("amount", "0.5")]).unwrap();
        assert_eq!(req.from_currency(), CurrencyCode::USD);
        assert_eq!(req.to_currency(), CurrencyCode::EUR);
        assert_eq!(req.amount().unwrap().value(), dec!(0.5));
    }

    #[test]
    fn test_amount_is_optional() {
        let req = run(&[("to", "JPY"), ("from", "GBP")]).unwrap();
        assert_eq!(req.amount(), None);
    }

    #[test]
    fn test_unexpected_parameter_wins_over_everything() {
        let err = run(&[("from", "usd"), ("callback", "x")]).unwrap_err();
        assert_eq!(err, RejectionReason::UnexpectedParameter("callback".into()));

        let err = run(&[("from", "USD"), ("from", "EUR"), ("apikey", "1")]).unwrap_err();
        assert_eq!(err, RejectionReason::UnexpectedParameter("apikey".into()));
    }

    #[test]
    fn test_unexpected_key_is_truncated() {
        let key = "k".repeat(500);
        let err = run(&[(key.as_str(), "1")]).unwrap_err();
        assert_eq!(err, RejectionReason::UnexpectedParameter("k".repeat(32)));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = run(&[("from", "USD"), ("to", "EUR"), ("to", "GBP")]).unwrap_err();
        assert_eq!(err, RejectionReason::DuplicateParameter("to".into()));
    }

    #[test]
    fn test_missing_required() {
        assert_eq!(
            run(&[("from", "USD")]).unwrap_err(),
            RejectionReason::MissingRequiredParameter
        );
        assert_eq!(
            run(&[("from", "USD"), ("to", "  ")]).unwrap_err(),
            RejectionReason::MissingRequiredParameter
        );
        assert_eq!(run(&[]).unwrap_err(), RejectionReason::MissingRequiredParameter);
    }

    #[test]
    fn test_malformed_currency_code() {
        for bad in ["US", "USDX", "U5D", "€UR", "u s"] {
            assert_eq!(
                run(&[("from", bad), ("to", "EUR")]).unwrap_err(),
                RejectionReason::MalformedCurrencyCode,
                "{bad}"
            );
        }
    }

    #[test]
    fn test_shape_checked_for_both_before_membership() {
        let err = run(&[("from", "XXX"), ("to", "EU")]).unwrap_err();
        assert_eq!(err, RejectionReason::MalformedCurrencyCode);
    }

    #[test]
    fn test_unsupported_currency_is_echoed_uppercase() {
        let err = run(&[("from", "xxx"), ("to", "EUR")]).unwrap_err();
        assert_eq!(err, RejectionReason::UnsupportedCurrency("XXX".into()));
        let err = run(&[("from", "USD"), ("to", "ron")]).unwrap_err();
        assert_eq!(err, RejectionReason::UnsupportedCurrency("RON".into()));
    }

    #[test]
    fn test_amount_rules_apply_after_currencies() {
        assert_eq!(
            run(&[("from", "USD"), ("to", "EUR"), ("amount", "1e100")]).unwrap_err(),
            RejectionReason::MalformedAmount
        );
        assert_eq!(
            run(&[("from", "USD"), ("to", "EUR"), ("amount", "-5")]).unwrap_err(),
            RejectionReason::NegativeAmountRejected
        );
        assert_eq!(
            run(&[("from", "USD"), ("to", "EUR"), ("amount", "")]).unwrap_err(),
            RejectionReason::EmptyAmount
        );
        assert_eq!(
            run(&[("from", "XXX"), ("to", "EUR"), ("amount", "-5")]).unwrap_err(),
            RejectionReason::UnsupportedCurrency("XXX".into())
        );
    }

    #[test]
    fn test_owned_pairs_are_accepted() {
        let pairs = vec![
            ("from".to_string(), "chf".to_string()),
            ("to".to_string(), "sek".to_string()),
        ];
        let req = validate(&pairs).unwrap();
        assert_eq!(req.from_currency(), CurrencyCode::CHF);
        assert_eq!(req.to_currency(), CurrencyCode::SEK);
    }
}
