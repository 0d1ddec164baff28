//! Client-side copy of account settings consumed by several views.
//!
//! There is one store per app. Views read it and change it only by sending
//! a [`SettingsAction`] through [`SettingsStore::apply`].

use crate::models::GodfatherSettings;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsStore {
    godfather: Option<GodfatherSettings>,
    ics_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// Server state arrived from a read.
    GodfatherLoaded(GodfatherSettings),
    /// The server accepted an update.
    GodfatherSaved(GodfatherSettings),
    IcsUrlLoaded(Option<String>),
    IcsUrlSaved(String),
}

impl SettingsStore {
    pub fn apply(&self, action: SettingsAction) -> Self {
        let mut next = self.clone();
        match action {
            SettingsAction::GodfatherLoaded(settings) | SettingsAction::GodfatherSaved(settings) => {
                next.godfather = Some(settings);
            }
            SettingsAction::IcsUrlLoaded(url) => next.ics_url = url,
            SettingsAction::IcsUrlSaved(url) => next.ics_url = Some(url),
        }
        next
    }

    pub fn godfather_email(&self) -> Option<&str> {
        self.godfather
            .as_ref()
            .map(|s| s.email.as_str())
            .filter(|email| !email.is_empty())
    }

    pub fn ics_url(&self) -> Option<&str> {
        self.ics_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_settings_replace_cached_copy() {
        let store = SettingsStore::default().apply(SettingsAction::GodfatherLoaded(
            GodfatherSettings {
                phone_numbers_csv: "+15550001".into(),
                email: "old@example.com".into(),
            },
        ));
        assert_eq!(store.godfather_email(), Some("old@example.com"));

        let store = store.apply(SettingsAction::GodfatherSaved(GodfatherSettings {
            phone_numbers_csv: "+15550001".into(),
            email: "new@example.com".into(),
        }));
        assert_eq!(store.godfather_email(), Some("new@example.com"));
    }

    #[test]
    fn test_empty_email_reads_as_unknown() {
        let store = SettingsStore::default()
            .apply(SettingsAction::GodfatherLoaded(GodfatherSettings::default()));
        assert!(store.godfather.is_some());
        assert_eq!(store.godfather_email(), None);
    }

    #[test]
    fn test_ics_url_actions() {
        let store = SettingsStore::default().apply(SettingsAction::IcsUrlLoaded(None));
        assert_eq!(store.ics_url(), None);
        let store = store.apply(SettingsAction::IcsUrlSaved("https://a.example/c.ics".into()));
        assert_eq!(store.ics_url(), Some("https://a.example/c.ics"));
    }
}
