//! Normalized financial inputs for a single advisory request.
//!
//! The intake is deliberately permissive: numeric fields may arrive as
//! JSON numbers or strings, booleans as "yes"/"no" tags, and anything
//! missing or malformed coerces to zero instead of failing the request.

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

/// Which statutory computation scheme the taxpayer has opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Regime {
    #[default]
    Old,
    New,
}

impl<'de> Deserialize<'de> for Regime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Anything other than an explicit "new" keeps the default.
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if s.trim().eq_ignore_ascii_case("new") => Regime::New,
            _ => Regime::Old,
        })
    }
}

/// Financial profile of one taxpayer, immutable per request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TaxInput {
    /// Annual salary income.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub salary: f64,
    /// Capital gains for the year.
    #[serde(
        default,
        alias = "capitalGains",
        deserialize_with = "lenient_amount"
    )]
    pub capital_gains: f64,
    /// Amount claimed under §80C (ELSS, PPF, etc.).
    #[serde(default, alias = "sec80c", deserialize_with = "lenient_amount")]
    pub deductions_80c: f64,
    /// Amount claimed under §80D (health insurance premiums).
    #[serde(default, alias = "sec80d", deserialize_with = "lenient_amount")]
    pub deductions_80d: f64,
    /// Home-loan interest claimed under §24(b).
    #[serde(
        default,
        alias = "homeLoan",
        deserialize_with = "lenient_amount"
    )]
    pub home_loan_interest: f64,
    /// Taxpayer age; the §80D cap rises at the senior-citizen threshold.
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: u32,
    /// Whether the taxpayer owns more than one house property.
    #[serde(
        default,
        alias = "multipleHouse",
        deserialize_with = "yes_no"
    )]
    pub multiple_properties: bool,
    /// Chosen regime; suggestions only apply under the old regime.
    #[serde(default, rename = "tax_regime", alias = "regime")]
    pub regime: Regime,
}

/// Coerce a JSON value to a non-negative amount. Strings are parsed,
/// everything unparseable becomes zero.
fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    // max() also maps a parsed NaN back to zero.
    amount.max(0.0)
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_amount(&Value::deserialize(deserializer)?))
}

fn lenient_age<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_amount(&Value::deserialize(deserializer)?).floor() as u32)
}

fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("yes"),
        _ => false,
    })
}
