use crate::error::AccountError;
use serde_json::Value;
use std::{fmt, num::IntErrorKind};

/// Validated organization number addressing one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(u64);

impl AccountId {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Store key, the canonical decimal form of the organization number.
    pub fn key(self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for AccountId {
    fn from(orgno: u64) -> Self {
        Self(orgno)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a raw account identifier.
///
/// Rules apply in order: an absent identifier is a missing `orgno`, then the
/// value must parse as an integer, then it must not be negative. Leading
/// zeros, a leading `+` and surrounding whitespace are tolerated, so `"007"`
/// and `"7"` designate the same account.
pub fn parse_account_id(raw: Option<&str>) -> Result<AccountId, AccountError> {
    let raw = raw.ok_or_else(|| AccountError::MissingField("orgno".to_owned()))?;

    match raw.trim().parse::<i128>() {
        Ok(n) if n < 0 => Err(AccountError::NegativeInteger(raw.to_owned())),
        Ok(n) => u64::try_from(n)
            .map(AccountId)
            .map_err(|_| AccountError::NotInteger(raw.to_owned())),
        Err(err) if *err.kind() == IntErrorKind::NegOverflow => {
            Err(AccountError::NegativeInteger(raw.to_owned()))
        }
        Err(_) => Err(AccountError::NotInteger(raw.to_owned())),
    }
}

/// Validates an identifier carried by a JSON document, where `orgno` may be
/// given either as a number or as a string. Floats are accepted only when
/// they have no fractional part.
pub(crate) fn account_id_from_value(value: Option<&Value>) -> Result<AccountId, AccountError> {
    match value {
        None | Some(Value::Null) => parse_account_id(None),
        Some(Value::String(raw)) => parse_account_id(Some(raw)),
        Some(Value::Number(number)) => match number.as_f64() {
            // Integral floats such as `43.0` name the integer they hold.
            Some(float) if number.is_f64() && float.fract() == 0.0 => {
                parse_account_id(Some(&format!("{float:.0}")))
            }
            _ => parse_account_id(Some(&number.to_string())),
        },
        Some(other) => Err(AccountError::NotInteger(other.to_string())),
    }
}
