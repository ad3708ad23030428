use crate::{error::AccountError, validation::AccountId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An organization entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub orgno: u64,
    pub leader_title: String,
    pub leader_name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Partial update of an account. `orgno` is not part of it: an account
/// keeps its organization number for life.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub leader_title: Option<String>,
    pub leader_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Account {
    /// Builds an account from a JSON object whose `orgno` has already been
    /// validated into `id`.
    ///
    /// Required fields are checked in declaration order and the first one
    /// missing, null or empty is reported.
    pub(crate) fn from_payload(
        id: AccountId,
        payload: &Map<String, Value>,
    ) -> Result<Self, AccountError> {
        let name = required_text(payload, "name")?;
        if payload.get("orgno").map_or(true, Value::is_null) {
            return Err(AccountError::MissingField("orgno".to_owned()));
        }
        let leader_title = required_text(payload, "leader_title")?;
        let leader_name = required_text(payload, "leader_name")?;
        let kind = required_text(payload, "type")?;

        Ok(Self {
            name,
            orgno: id.value(),
            leader_title,
            leader_name,
            kind,
        })
    }

    /// Overwrites every field the patch carries with a non-empty value.
    /// Returns whether any stored value actually changed.
    pub(crate) fn apply(&mut self, patch: AccountPatch) -> bool {
        let mut changed = false;

        for (slot, value) in [
            (&mut self.name, patch.name),
            (&mut self.leader_title, patch.leader_title),
            (&mut self.leader_name, patch.leader_name),
            (&mut self.kind, patch.kind),
        ] {
            match value {
                Some(value) if !value.is_empty() && *slot != value => {
                    *slot = value;
                    changed = true;
                }
                _ => {}
            }
        }

        changed
    }
}

fn required_text(payload: &Map<String, Value>, field: &str) -> Result<String, AccountError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(AccountError::MissingField(field.to_owned())),
        Some(Value::String(text)) if text.is_empty() => {
            Err(AccountError::MissingField(field.to_owned()))
        }
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(AccountError::InvalidPayload(format!(
            "{field} must be a string"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    fn acme() -> Account {
        Account {
            name: "Acme".into(),
            orgno: 42,
            leader_title: "CEO".into(),
            leader_name: "Jo".into(),
            kind: "LLC".into(),
        }
    }

    #[test]
    fn test_from_payload() {
        let payload = object(json!({
            "name": "Acme",
            "orgno": 42,
            "leader_title": "CEO",
            "leader_name": "Jo",
            "type": "LLC",
            "ignored": true
        }));

        assert_eq!(Account::from_payload(AccountId::from(42), &payload), Ok(acme()));
    }

    #[test]
    fn test_from_payload_reports_first_missing_field() {
        let payload = object(json!({
            "name": "Acme",
            "orgno": 42,
            "leader_title": "",
        }));

        assert_eq!(
            Account::from_payload(AccountId::from(42), &payload),
            Err(AccountError::MissingField("leader_title".into()))
        );

        let payload = object(json!({
            "name": "Acme",
            "orgno": 42,
            "leader_title": "CEO",
            "leader_name": "Jo",
            "type": null,
        }));

        assert_eq!(
            Account::from_payload(AccountId::from(42), &payload),
            Err(AccountError::MissingField("type".into()))
        );
    }

    #[test]
    fn test_from_payload_rejects_non_text_fields() {
        let payload = object(json!({
            "name": 12,
            "orgno": 42,
            "leader_title": "CEO",
            "leader_name": "Jo",
            "type": "LLC",
        }));

        assert!(matches!(
            Account::from_payload(AccountId::from(42), &payload),
            Err(AccountError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let value = serde_json::to_value(acme()).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Acme",
                "orgno": 42,
                "leader_title": "CEO",
                "leader_name": "Jo",
                "type": "LLC",
            })
        );
    }

    #[test]
    fn test_apply_patch() {
        let mut account = acme();
        let patch: AccountPatch = serde_json::from_value(json!({
            "name": "Acme Corp",
            "leader_name": "",
            "type": null,
            "orgno": 7,
        }))
        .unwrap();

        assert!(account.apply(patch));
        assert_eq!(account.name, "Acme Corp");
        assert_eq!(account.leader_name, "Jo");
        assert_eq!(account.kind, "LLC");
        assert_eq!(account.orgno, 42);
    }

    #[test]
    fn test_apply_empty_or_identical_patch_changes_nothing() {
        let mut account = acme();

        assert!(!account.apply(AccountPatch::default()));

        let patch = AccountPatch {
            name: Some("Acme".into()),
            leader_title: Some(String::new()),
            ..Default::default()
        };
        assert!(!account.apply(patch));
        assert_eq!(account, acme());
    }
}
