//! Contacts capability: result types and normalization of the browser
//! Contact Picker's output.
//!
//! The picker returns `name`, `tel` and `email` as arrays whose entries are
//! usually bare strings. Native shells hand back labeled objects instead
//! (`{ "label": "mobile", "number": "..." }`), sometimes under
//! `phoneNumbers`/`emails`. Both shapes normalize to [`Contact`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Contact;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactsError {
    #[error("Contact Picker API not available")]
    Unavailable,

    #[error("Contact selection was cancelled")]
    Cancelled,

    #[error("Contact picker failed: {0}")]
    Picker(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResult {
    pub granted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PermissionResult {
    /// The picker asks for consent itself, so availability is the permission.
    pub fn for_availability(available: bool) -> Self {
        if available {
            Self {
                granted: true,
                message: None,
            }
        } else {
            Self {
                granted: false,
                message: Some(ContactsError::Unavailable.to_string()),
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsResult {
    pub contacts: Vec<Contact>,
}

/// Map a rejected picker promise (DOMException name + message) to an error.
pub fn classify_picker_error(name: &str, message: &str) -> ContactsError {
    match name {
        "AbortError" => ContactsError::Cancelled,
        "NotSupportedError" => ContactsError::Unavailable,
        _ if message.to_lowercase().contains("cancel") => ContactsError::Cancelled,
        _ => ContactsError::Picker(message.to_string()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    // Tried first: a lone entry type may also accept a sequence.
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Bare(String),
    Labeled {
        #[serde(alias = "number", alias = "address")]
        value: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawEntry {
    fn into_value(self) -> Option<String> {
        let value = match self {
            RawEntry::Bare(value) => value,
            RawEntry::Labeled { value: Some(value) } => value,
            RawEntry::Labeled { value: None } | RawEntry::Other(_) => return None,
        };
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawContact {
    #[serde(default)]
    name: Option<OneOrMany<String>>,
    #[serde(default, alias = "phoneNumbers")]
    tel: Option<OneOrMany<RawEntry>>,
    #[serde(default, alias = "emails")]
    email: Option<OneOrMany<RawEntry>>,
    #[serde(default)]
    organization: Option<OneOrMany<String>>,
}

fn entries(raw: Option<OneOrMany<RawEntry>>) -> Vec<String> {
    raw.map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawEntry::into_value)
        .collect()
}

impl From<RawContact> for Contact {
    fn from(raw: RawContact) -> Self {
        let name = match raw.name {
            Some(OneOrMany::Many(parts)) => parts.join(" "),
            Some(OneOrMany::One(name)) => name,
            None => String::new(),
        };
        let organization = raw
            .organization
            .and_then(|org| org.into_vec().into_iter().find(|o| !o.trim().is_empty()));

        Contact {
            name,
            phone_numbers: entries(raw.tel),
            emails: entries(raw.email),
            organization,
        }
    }
}

/// Normalize the JSON array the picker resolved with.
pub fn normalize_picker_result(json: &str) -> Result<Vec<Contact>, ContactsError> {
    let raw: Vec<RawContact> = serde_json::from_str(json)
        .map_err(|e| ContactsError::Picker(format!("unexpected picker result: {}", e)))?;
    Ok(raw.into_iter().map(Contact::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_name_joined_with_single_space() {
        let contacts =
            normalize_picker_result(r#"[{"name": ["Ada", "King", "Lovelace"], "tel": []}]"#)
                .unwrap();
        assert_eq!(contacts[0].name, "Ada King Lovelace");
    }

    #[test]
    fn test_bare_tel_preserved_verbatim() {
        let contacts = normalize_picker_result(
            r#"[{"name": ["Grace"], "tel": ["+1 (555) 010-2030", " 555 0199 "], "email": ["g@example.com"]}]"#,
        )
        .unwrap();
        assert_eq!(
            contacts[0].phone_numbers,
            vec!["+1 (555) 010-2030".to_string(), " 555 0199 ".to_string()]
        );
        assert_eq!(contacts[0].emails, vec!["g@example.com".to_string()]);
    }

    #[test]
    fn test_labeled_entries_and_aliases() {
        let json = r#"[{
            "name": "Alan Turing",
            "phoneNumbers": [{"label": "mobile", "number": "+44 20 7946 0000"}, {"label": "home"}],
            "emails": [{"label": "work", "address": "alan@example.org"}],
            "organization": "Bletchley"
        }]"#;
        let contacts = normalize_picker_result(json).unwrap();
        assert_eq!(
            contacts[0],
            Contact {
                name: "Alan Turing".to_string(),
                phone_numbers: vec!["+44 20 7946 0000".to_string()],
                emails: vec!["alan@example.org".to_string()],
                organization: Some("Bletchley".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_fields_and_junk_entries() {
        let contacts = normalize_picker_result(r#"[{}, {"tel": [null, 5, ""]}]"#).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0], Contact::default());
        assert!(contacts[1].phone_numbers.is_empty());
    }

    #[test]
    fn test_non_array_result_is_picker_error() {
        assert!(matches!(
            normalize_picker_result(r#"{"oops": true}"#),
            Err(ContactsError::Picker(_))
        ));
    }

    #[test]
    fn test_classify_picker_error() {
        assert_eq!(
            classify_picker_error("AbortError", "The operation was aborted"),
            ContactsError::Cancelled
        );
        assert_eq!(
            classify_picker_error("Error", "User cancelled the selection"),
            ContactsError::Cancelled
        );
        assert_eq!(
            classify_picker_error("InvalidStateError", "picker already open"),
            ContactsError::Picker("picker already open".to_string())
        );
        assert_eq!(
            ContactsError::Cancelled.to_string(),
            "Contact selection was cancelled"
        );
    }

    #[test]
    fn test_permission_for_missing_picker() {
        let result = PermissionResult::for_availability(false);
        assert!(!result.granted);
        assert_eq!(
            result.message.as_deref(),
            Some("Contact Picker API not available")
        );
        assert!(PermissionResult::for_availability(true).granted);
    }
}
