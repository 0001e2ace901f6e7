//! The currencies a user can pick in their preferences and how amounts are displayed.

use std::{fmt::Display, str::FromStr};

use numfmt::{Formatter, Precision};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A supported ISO 4217 currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Japanese Yen
    Jpy,
    /// Canadian Dollar
    Cad,
    /// Australian Dollar
    Aud,
    /// Swiss Franc
    Chf,
    /// Chinese Yuan
    Cny,
    /// Indian Rupee
    #[default]
    Inr,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Currency; 9] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Chf,
        Currency::Cny,
        Currency::Inr,
    ];

    /// The three letter currency code, e.g. "INR".
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
        }
    }

    /// The symbol placed in front of amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
            Currency::Chf => "CHF",
            Currency::Cny => "¥",
            Currency::Inr => "₹",
        }
    }


    /// Format `amount` with this currency's symbol and two decimal places,
    /// e.g. "₹1,234.50" or "-$3.00".
    pub fn format(&self, amount: f64) -> String {
        let symbol = self.symbol();

        if amount == 0.0 {
            // Zero is hardcoded as "0", so we must specify the formatted string for zero
            return format!("{symbol}0.00");
        }

        let prefix = if amount < 0.0 {
            format!("-{symbol}")
        } else {
            symbol.to_owned()
        };

        let mut formatted_string = match Formatter::currency(&prefix) {
            Ok(formatter) => formatter
                .precision(Precision::Decimals(2))
                .fmt_string(amount.abs()),
            Err(_) => format!("{prefix}{:.2}", amount.abs()),
        };

        // numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
        match formatted_string.rfind('.') {
            None => formatted_string.push_str(".00"),
            Some(pos) if formatted_string.len() - pos == 2 => formatted_string.push('0'),
            Some(_) => {}
        }

        formatted_string
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();

        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| Error::InvalidCurrency(s.to_owned()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ToSql for Currency {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for Currency {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod currency_tests {
    use crate::Error;

    use super::Currency;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("inr".parse(), Ok(Currency::Inr));
        assert_eq!("USD".parse(), Ok(Currency::Usd));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            "XYZ".parse::<Currency>(),
            Err(Error::InvalidCurrency("XYZ".to_owned()))
        );
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(Currency::Inr.format(0.0), "₹0.00");
    }

    #[test]
    fn formats_two_decimal_places() {
        let formatted = Currency::Usd.format(25.5);

        assert!(formatted.starts_with('$'), "got {formatted}");
        assert!(formatted.ends_with("25.50"), "got {formatted}");
    }

    #[test]
    fn formats_negative_amounts() {
        let formatted = Currency::Usd.format(-3.0);

        assert!(formatted.starts_with("-$"), "got {formatted}");
        assert!(formatted.ends_with("3.00"), "got {formatted}");
    }
}
