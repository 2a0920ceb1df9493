use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// One entry of the supported-currency catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
}

const CATALOG: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", name: "United States Dollar" },
    CurrencyInfo { code: "EUR", name: "Euro" },
    CurrencyInfo { code: "JPY", name: "Japanese Yen" },
    CurrencyInfo { code: "GBP", name: "British Pound Sterling" },
    CurrencyInfo { code: "AUD", name: "Australian Dollar" },
    CurrencyInfo { code: "CAD", name: "Canadian Dollar" },
    CurrencyInfo { code: "CHF", name: "Swiss Franc" },
    CurrencyInfo { code: "CNY", name: "Chinese Yuan" },
    CurrencyInfo { code: "INR", name: "Indian Rupee" },
    CurrencyInfo { code: "BRL", name: "Brazilian Real" },
    CurrencyInfo { code: "RUB", name: "Russian Ruble" },
    CurrencyInfo { code: "KRW", name: "South Korean Won" },
    CurrencyInfo { code: "SGD", name: "Singapore Dollar" },
    CurrencyInfo { code: "NZD", name: "New Zealand Dollar" },
    CurrencyInfo { code: "MXN", name: "Mexican Peso" },
    CurrencyInfo { code: "HKD", name: "Hong Kong Dollar" },
    CurrencyInfo { code: "NOK", name: "Norwegian Krone" },
    CurrencyInfo { code: "SEK", name: "Swedish Krona" },
    CurrencyInfo { code: "ZAR", name: "South African Rand" },
    CurrencyInfo { code: "TRY", name: "Turkish Lira" },
    CurrencyInfo { code: "DKK", name: "Danish Krone" },
    CurrencyInfo { code: "PLN", name: "Polish Zloty" },
    CurrencyInfo { code: "THB", name: "Thai Baht" },
    CurrencyInfo { code: "IDR", name: "Indonesian Rupiah" },
    CurrencyInfo { code: "HUF", name: "Hungarian Forint" },
    CurrencyInfo { code: "CZK", name: "Czech Koruna" },
    CurrencyInfo { code: "ILS", name: "Israeli New Shekel" },
    CurrencyInfo { code: "PHP", name: "Philippine Peso" },
    CurrencyInfo { code: "AED", name: "United Arab Emirates Dirham" },
    CurrencyInfo { code: "SAR", name: "Saudi Riyal" },
    CurrencyInfo { code: "MYR", name: "Malaysian Ringgit" },
];

static BY_CODE: Lazy<HashMap<&'static str, &'static CurrencyInfo>> = Lazy::new(|| {
    CATALOG.iter().map(|info| (info.code, info)).collect()
});

/// The full supported-currency catalog, in display order.
pub fn currencies() -> &'static [CurrencyInfo] {
    CATALOG
}

pub fn is_supported(code: &str) -> bool {
    BY_CODE.contains_key(code)
}

pub fn currency_name(code: &str) -> Option<&'static str> {
    BY_CODE.get(code).map(|info| info.name)
}

/// Display currency for this session: `GEXPENSES_CURRENCY` when it names a
/// cataloged code, otherwise USD.
pub fn local_currency() -> CurrencyCode {
    match env::var("GEXPENSES_CURRENCY") {
        Ok(raw) => {
            let code = CurrencyCode::new(raw);
            if is_supported(code.as_str()) {
                code
            } else {
                CurrencyCode::default()
            }
        }
        Err(_) => CurrencyCode::default(),
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" | "AUD" | "CAD" | "HKD" | "MXN" | "NZD" | "SGD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" | "CNY" => "¥".into(),
        "INR" => "₹".into(),
        "KRW" => "₩".into(),
        "BRL" => "R$".into(),
        "ILS" => "₪".into(),
        "PHP" => "₱".into(),
        "THB" => "฿".into(),
        "TRY" => "₺".into(),
        _ => format!("{} ", code),
    }
}

/// Fraction digits per ISO minor units. JPY and KRW carry none; the
/// three-digit dinars keep their extra precision.
pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders an amount under the currency's conventions with en-US numerals,
/// e.g. `format(1234.5, &CurrencyCode::new("USD"))` → `"$1,234.50"`.
pub fn format(amount: f64, code: &CurrencyCode) -> Result<String> {
    require_supported(code)?;
    let precision = minor_units_for(code.as_str());
    let body = format_number(amount.abs(), precision);
    Ok(attach_symbol(amount, code, body))
}

/// Abbreviated rendering for dense axes: thousands and above collapse to
/// `k`/`M`/`B` with at most one fraction digit.
pub fn format_compact(amount: f64, code: &CurrencyCode) -> Result<String> {
    require_supported(code)?;
    let magnitude = amount.abs();
    let body = if magnitude < 1_000.0 {
        format_number(magnitude, 0)
    } else {
        let mut scale = 1_000.0;
        let mut suffix = 'k';
        let mut scaled = round_to_tenth(magnitude / scale);
        // Rounding can cross into the next unit (999,960 would otherwise
        // render as 1000k instead of 1M).
        while scaled >= 1_000.0 && suffix != 'B' {
            scale *= 1_000.0;
            suffix = if suffix == 'k' { 'M' } else { 'B' };
            scaled = round_to_tenth(magnitude / scale);
        }
        format!("{}{}", trim_fraction(scaled), suffix)
    };
    Ok(attach_symbol(amount, code, body))
}

fn round_to_tenth(scaled: f64) -> f64 {
    (scaled * 10.0).round() / 10.0
}

/// Infallible rendering: an unknown code falls back to USD so display
/// never crashes on a bad stored preference.
pub fn format_or_default(amount: f64, code: &CurrencyCode) -> String {
    match format(amount, code) {
        Ok(rendered) => rendered,
        Err(_) => {
            tracing::warn!(code = %code.as_str(), "unknown currency code, falling back to USD");
            format(amount, &CurrencyCode::default())
                .unwrap_or_else(|_| format_number(amount, 2))
        }
    }
}

fn require_supported(code: &CurrencyCode) -> Result<()> {
    if is_supported(code.as_str()) {
        Ok(())
    } else {
        Err(LedgerError::InvalidCurrencyCode(code.as_str().to_string()))
    }
}

fn attach_symbol(amount: f64, code: &CurrencyCode, body: String) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol_for(code.as_str()), body)
}

fn trim_fraction(scaled: f64) -> String {
    let body = format!("{:.1}", scaled);
    body.strip_suffix(".0").map(str::to_string).unwrap_or(body)
}

/// Fixed en-US numeral formatting: `.` decimal point, `,` thousands
/// grouping.
fn format_number(value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    match body.find('.') {
        Some(pos) => {
            let grouped = group_digits(&body[..pos]);
            format!("{}{}", grouped, &body[pos..])
        }
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
