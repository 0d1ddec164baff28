//! Editable settings forms.
//!
//! Edit fields are seeded from the server exactly once. [`SyncState`] makes
//! that explicit: the first successful load moves `Uninitialized -> Synced`
//! and hands back the values to seed; every later load is ignored so a
//! background refetch never overwrites what the user is typing.

use url::Url;
use validator::Validate;

use crate::api::UpdateGodfatherSettingsRequest;
use crate::error::ClientError;
use crate::models::GodfatherSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Uninitialized,
    Synced,
}

impl SyncState {
    /// Transition on a successful load. Returns the next state and the
    /// values to seed the form with, if any.
    pub fn on_load<T>(self, loaded: T) -> (SyncState, Option<T>) {
        match self {
            SyncState::Uninitialized => (SyncState::Synced, Some(loaded)),
            SyncState::Synced => (SyncState::Synced, None),
        }
    }
}

/// Local edit buffer seeded once from server state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncedForm<T> {
    state: SyncState,
    fields: T,
}

impl<T: Clone> SyncedForm<T> {
    /// Feed a successful load. Returns whether the fields were seeded.
    pub fn on_load(&mut self, loaded: &T) -> bool {
        let (next, seed) = self.state.on_load(loaded);
        self.state = next;
        match seed {
            Some(values) => {
                self.fields = values.clone();
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn fields(&self) -> &T {
        &self.fields
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.fields);
    }
}

pub type GodfatherForm = SyncedForm<GodfatherSettings>;

/// Validate the Godfather form and build the update request.
pub fn godfather_request(
    fields: &GodfatherSettings,
) -> Result<UpdateGodfatherSettingsRequest, ClientError> {
    let request = UpdateGodfatherSettingsRequest::from(fields.clone());
    request.validate()?;
    if fields.phone_numbers().is_empty() {
        return Err(ClientError::Validation(
            "At least one phone number is required".to_string(),
        ));
    }
    Ok(request)
}

// ============================================================================
// ICS calendar feed URL
// ============================================================================

/// Local storage key of the ICS feed URL. The URL is intentionally kept on
/// the device only; the backend has no field for it.
pub const ICS_URL_KEY: &str = "ai_admin.ics_url";

const ICS_SCHEMES: [&str; 3] = ["http", "https", "webcal"];

/// Minimal key/value persistence used for device-local settings.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// Check that `input` is a usable calendar feed address. Only surrounding
/// whitespace is removed; the URL itself is returned as typed.
pub fn validate_ics_url(input: &str) -> Result<String, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(
            "Please enter a calendar URL".to_string(),
        ));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|_| ClientError::Validation("Please enter a valid URL".to_string()))?;
    if !ICS_SCHEMES.contains(&parsed.scheme()) || parsed.host_str().is_none() {
        return Err(ClientError::Validation(
            "Calendar URL must start with http://, https:// or webcal://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate and persist the ICS URL. Nothing is written when validation fails.
pub fn save_ics_url<S: KeyValueStore>(store: &mut S, input: &str) -> Result<String, ClientError> {
    let url = validate_ics_url(input)?;
    store.set(ICS_URL_KEY, &url)?;
    Ok(url)
}

pub fn load_ics_url<S: KeyValueStore>(store: &S) -> Option<String> {
    store.get(ICS_URL_KEY).filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        values: HashMap<String, String>,
        writes: usize,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
            self.writes += 1;
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn settings(phones: &str, email: &str) -> GodfatherSettings {
        GodfatherSettings {
            phone_numbers_csv: phones.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_sync_state_transition() {
        let (state, seed) = SyncState::Uninitialized.on_load(1);
        assert_eq!(state, SyncState::Synced);
        assert_eq!(seed, Some(1));

        let (state, seed) = state.on_load(2);
        assert_eq!(state, SyncState::Synced);
        assert_eq!(seed, None);
    }

    #[test]
    fn test_later_load_does_not_clobber_edits() {
        let mut form = GodfatherForm::default();
        assert!(form.on_load(&settings("+15550001", "a@example.com")));
        assert_eq!(form.fields().email, "a@example.com");

        form.edit(|f| f.email = "typed@example.com".to_string());

        assert!(!form.on_load(&settings("+15559999", "server@example.com")));
        assert_eq!(form.fields().email, "typed@example.com");
        assert_eq!(form.fields().phone_numbers_csv, "+15550001");
        assert_eq!(form.state(), SyncState::Synced);
    }

    #[test]
    fn test_godfather_request_trims_and_validates() {
        let request = godfather_request(&settings(" +15550001 ", " boss@example.com ")).unwrap();
        assert_eq!(request.phone_numbers_csv, "+15550001");
        assert_eq!(request.email, "boss@example.com");

        let err = godfather_request(&settings("   ", "boss@example.com")).unwrap_err();
        assert_eq!(
            err,
            ClientError::Validation("At least one phone number is required".to_string())
        );
    }

    #[test]
    fn test_separators_only_phone_list_rejected() {
        for phones in [" , , ", ",", " ,"] {
            let err = godfather_request(&settings(phones, "boss@example.com")).unwrap_err();
            assert_eq!(
                err,
                ClientError::Validation("At least one phone number is required".to_string())
            );
        }
        assert!(godfather_request(&settings(", +15550001 ,", "boss@example.com")).is_ok());
    }

    #[test]
    fn test_save_valid_ics_url_persists_verbatim() {
        let mut store = MemoryStore::default();
        let url = "https://calendar.example.com/feeds/abc123/basic.ics";
        assert_eq!(save_ics_url(&mut store, url).unwrap(), url);
        assert_eq!(store.writes, 1);
        assert_eq!(load_ics_url(&store).as_deref(), Some(url));
    }

    #[test]
    fn test_ics_url_only_loses_surrounding_whitespace() {
        let mut store = MemoryStore::default();
        let url = "webcal://Example.com/Team%20Feed.ics?token=AbC";
        let saved = save_ics_url(&mut store, &format!("  {}\n", url)).unwrap();
        assert_eq!(saved, url);
        assert_eq!(load_ics_url(&store).as_deref(), Some(url));
    }

    #[test]
    fn test_invalid_ics_url_is_never_persisted() {
        let mut store = MemoryStore::default();
        for input in ["", "   ", "not a url", "ftp://example.com/cal.ics", "mailto:me@example.com"] {
            assert!(matches!(
                save_ics_url(&mut store, input),
                Err(ClientError::Validation(_))
            ));
        }
        assert_eq!(store.writes, 0);
        assert_eq!(load_ics_url(&store), None);
    }

    #[test]
    fn test_webcal_scheme_accepted() {
        assert!(validate_ics_url("webcal://example.com/team.ics").is_ok());
    }
}
