use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;

/// User-facing display preferences persisted alongside the ledger. The
/// currency is a display concern only; no conversion is ever applied to
/// stored amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub locale: String,
    pub currency: CurrencyCode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: CurrencyCode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_usd_en_us() {
        let settings = Settings::default();
        assert_eq!(settings.currency.as_str(), "USD");
        assert_eq!(settings.locale, "en-US");
    }

    #[test]
    fn round_trips_through_json() {
        let settings = Settings {
            locale: "en-US".into(),
            currency: CurrencyCode::new("jpy"),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
        assert_eq!(back.currency.as_str(), "JPY");
    }
}
