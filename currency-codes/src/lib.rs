//! Supported Currency Catalogue with Macro-Based Code Generation
//!
//! This library provides the fixed allow-list of ISO 4217 currency codes the
//! converter accepts. Codes are defined declaratively using a macro that
//! generates the `CurrencyCode` enum, its lookup table and its parsing rules.
//!
//! A syntactically valid 3-letter code is not enough: only codes listed here
//! can be quoted, so membership is checked before any upstream call.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` macro invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     RON => ("RON", "Romanian Leu"),
//! }
//! ```
//!
//! # Example
//! ```
//! use currency_codes::CurrencyCode;
//!
//! let usd: CurrencyCode = "USD".parse().unwrap();
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(usd.name(), "United States Dollar");
//! assert!(CurrencyCode::lookup("XXX").is_none());
//! ```

use std::fmt;

/// Error returned when a code is not part of the supported catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookup table
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define supported currencies with auto-generated enum and lookups.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "Display name"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal)
        ),* $(,)?
    ) => {
        /// A currency code from the supported catalogue.
        ///
        /// Always three uppercase ASCII letters; immutable once constructed.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }

            /// Exact, case-sensitive lookup of an already normalized code.
            pub fn lookup(code: &str) -> Option<CurrencyCode> {
                match code {
                    $($code => Some(CurrencyCode::$name),)*
                    _ => None,
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "United States Dollar"),
    EUR => ("EUR", "Euro"),
    GBP => ("GBP", "British Pound"),
    JPY => ("JPY", "Japanese Yen"),
    AUD => ("AUD", "Australian Dollar"),
    CAD => ("CAD", "Canadian Dollar"),
    CHF => ("CHF", "Swiss Franc"),
    CNY => ("CNY", "Chinese Yuan"),
    HKD => ("HKD", "Hong Kong Dollar"),
    NZD => ("NZD", "New Zealand Dollar"),
    SEK => ("SEK", "Swedish Krona"),
    KRW => ("KRW", "South Korean Won"),
    SGD => ("SGD", "Singapore Dollar"),
    NOK => ("NOK", "Norwegian Krone"),
    MXN => ("MXN", "Mexican Peso"),
    INR => ("INR", "Indian Rupee"),
    RUB => ("RUB", "Russian Ruble"),
    BRL => ("BRL", "Brazilian Real"),
    ZAR => ("ZAR", "South African Rand"),
    TRY => ("TRY", "Turkish Lira"),
    DKK => ("DKK", "Danish Krone"),
    PLN => ("PLN", "Polish Zloty"),
    THB => ("THB", "Thai Baht"),
    MYR => ("MYR", "Malaysian Ringgit"),
    IDR => ("IDR", "Indonesian Rupiah"),
    HUF => ("HUF", "Hungarian Forint"),
    CZK => ("CZK", "Czech Koruna"),
    ILS => ("ILS", "Israeli New Shekel"),
    PHP => ("PHP", "Philippine Peso"),
    CLP => ("CLP", "Chilean Peso"),
    AED => ("AED", "United Arab Emirates Dirham"),
    SAR => ("SAR", "Saudi Riyal"),
    COP => ("COP", "Colombian Peso"),
    ARS => ("ARS", "Argentine Peso"),
    VND => ("VND", "Vietnamese Dong"),
    EGP => ("EGP", "Egyptian Pound"),
    NGN => ("NGN", "Nigerian Naira"),
    KZT => ("KZT", "Kazakhstani Tenge"),
    PKR => ("PKR", "Pakistani Rupee"),
    BDT => ("BDT", "Bangladeshi Taka"),
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = UnsupportedCurrency;

    /// Case-insensitive parse; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::lookup(&s.trim().to_ascii_uppercase())
            .ok_or_else(|| UnsupportedCurrency(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
