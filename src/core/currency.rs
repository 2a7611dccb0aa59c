//! Currency handling - the three supported currencies, the static exchange-rate table,
//! and pt-BR money formatting.
//!
//! Rates are illustrative and never fetched live. They are expressed as the value of one
//! unit of each currency in BRL.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Category suggestions offered when logging a transaction.
pub const CATEGORIES: [&str; 6] = [
    "Transporte",
    "Alimentação",
    "Acomodação",
    "Documentação",
    "Lazer",
    "Outros",
];

/// A currency an objective or transaction can be expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Brazilian real
    Brl,
    /// US dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Self; 3] = [Self::Brl, Self::Usd, Self::Eur];

    /// ISO code as stored in the database.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Brl => "BRL",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// Symbol used by pt-BR formatting.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Brl => "R$",
            Self::Usd => "US$",
            Self::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRL" => Ok(Self::Brl),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(Error::UnsupportedCurrency {
                code: s.to_string(),
            }),
        }
    }
}

/// Static exchange-rate table, value of one unit of each currency in BRL.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExchangeRates {
    /// BRL per BRL, normally 1
    pub brl: f64,
    /// BRL per USD
    pub usd: f64,
    /// BRL per EUR
    pub eur: f64,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            brl: 1.0,
            usd: 5.45,
            eur: 6.05,
        }
    }
}

impl ExchangeRates {
    /// Rate of `currency` expressed in BRL.
    #[must_use]
    pub const fn rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Brl => self.brl,
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
        }
    }

    /// Converts `amount` from one currency to another through BRL.
    #[must_use]
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64 {
        if from == to {
            return amount;
        }
        amount * self.rate(from) / self.rate(to)
    }

    /// Rejects tables with non-positive or non-finite rates.
    pub fn validate(&self) -> Result<()> {
        for currency in Currency::ALL {
            let rate = self.rate(currency);
            if !rate.is_finite() || rate <= 0.0 {
                return Err(Error::Config {
                    message: format!("Exchange rate for {currency} must be positive, got {rate}"),
                });
            }
        }
        Ok(())
    }
}

/// Formats an amount the way pt-BR renders money: `R$ 50.000,00`.
///
/// Thousands are grouped with `.`, cents follow a `,`, and negative amounts get a
/// leading `-` before the symbol.
#[must_use]
pub fn format_currency(amount: f64, currency: Currency) -> String {
    // Cast safety: rounded absolute cents; non-finite input saturates or becomes 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{} {grouped},{fraction:02}", currency.symbol())
}
