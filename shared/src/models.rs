use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Third-party account the assistant can be linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Calendar,
    Gmail,
    Outlook,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Calendar, Provider::Gmail, Provider::Outlook];

    /// Name shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Calendar => "Google Calendar",
            Provider::Gmail => "Gmail",
            Provider::Outlook => "Outlook",
        }
    }

    /// Path segment of the provider's endpoints (`/{segment}/status`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Provider::Calendar => "calendar",
            Provider::Gmail => "gmail",
            Provider::Outlook => "outlook",
        }
    }
}

/// Connection state of one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    pub connected: bool,
    #[serde(default)]
    pub email: Option<String>,
}

/// Start or end of a calendar event. Timed events carry `dateTime`,
/// all-day events only `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl EventTime {
    pub fn is_all_day(&self) -> bool {
        self.date_time.is_none() && self.date.is_some()
    }

    pub fn display(&self) -> String {
        match (self.date_time, self.date) {
            (Some(dt), _) => dt.format("%a %b %-d, %H:%M").to_string(),
            (None, Some(d)) => d.format("%a %b %-d").to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "htmlLink")]
    pub link: Option<String>,
}

impl CalendarEvent {
    pub fn title(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "(No title)",
        }
    }

    /// "start - end" for timed events, the start day alone for all-day events.
    pub fn when(&self) -> String {
        if self.start.is_all_day() {
            return format!("{} (all day)", self.start.display());
        }
        let end = self.end.display();
        if end.is_empty() {
            self.start.display()
        } else {
            format!("{} - {}", self.start.display(), end)
        }
    }
}

/// Contact details of the person the assistant escalates to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodfatherSettings {
    #[serde(default)]
    pub phone_numbers_csv: String,
    #[serde(default)]
    pub email: String,
}

impl GodfatherSettings {
    /// Individual numbers from the comma separated field, blanks dropped.
    pub fn phone_numbers(&self) -> Vec<&str> {
        self.phone_numbers_csv
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// Processing state of an uploaded knowledge document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
            ProcessingStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub business_id: Option<Uuid>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub processing_status: Option<ProcessingStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl KnowledgeEntry {
    /// First characters of the text content, for list rows.
    pub fn preview(&self, max_chars: usize) -> Option<String> {
        let content = self.content.as_deref()?.trim();
        if content.is_empty() {
            return None;
        }
        if content.chars().count() <= max_chars {
            return Some(content.to_string());
        }
        let cut: String = content.chars().take(max_chars).collect();
        Some(format!("{}…", cut.trim_end()))
    }
}

/// Time slot of a relationship-ops run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl RunType {
    pub const ALL: [RunType; 4] = [
        RunType::Morning,
        RunType::Midday,
        RunType::Afternoon,
        RunType::Evening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunType::Morning => "morning",
            RunType::Midday => "midday",
            RunType::Afternoon => "afternoon",
            RunType::Evening => "evening",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunType::Morning => "Morning",
            RunType::Midday => "Midday",
            RunType::Afternoon => "Afternoon",
            RunType::Evening => "Evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Completed,
    Failed,
    /// Anything else the backend reports (e.g. "running")
    #[serde(other)]
    Unknown,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipOpsRun {
    pub id: Uuid,
    pub run_type: RunType,
    pub status: RunStatus,
    pub run_date: NaiveDate,
    #[serde(default)]
    pub summary_title: Option<String>,
    #[serde(default)]
    pub summary_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interactions_ingested: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contacts_updated: u32,
    /// Free-form action suggestions; strings or objects depending on the run
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_actions: Vec<serde_json::Value>,
}

/// A contact after normalization of the picker's output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub organization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::Calendar.display_name(), "Google Calendar");
        assert_eq!(Provider::Gmail.path_segment(), "gmail");
        assert_eq!(Provider::Outlook.path_segment(), "outlook");
    }

    #[test]
    fn test_calendar_event_timed() {
        let json = r#"{
            "id": "evt1",
            "summary": "Standup",
            "start": {"dateTime": "2026-03-02T09:00:00Z"},
            "end": {"dateTime": "2026-03-02T09:15:00Z"},
            "location": "Room 4"
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(!event.start.is_all_day());
        assert_eq!(event.when(), "Mon Mar 2, 09:00 - Mon Mar 2, 09:15");
        assert_eq!(event.title(), "Standup");
    }

    #[test]
    fn test_calendar_event_all_day() {
        let json = r#"{
            "id": "evt2",
            "start": {"date": "2026-03-02"},
            "end": {"date": "2026-03-03"},
            "htmlLink": "https://calendar.example.com/evt2"
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();
        assert!(event.start.is_all_day());
        assert_eq!(event.when(), "Mon Mar 2 (all day)");
        assert_eq!(event.title(), "(No title)");
        assert_eq!(
            event.link.as_deref(),
            Some("https://calendar.example.com/evt2")
        );
    }

    #[test]
    fn test_phone_numbers_split() {
        let settings = GodfatherSettings {
            phone_numbers_csv: " +15550001, ,+15550002 ".to_string(),
            email: "boss@example.com".to_string(),
        };
        assert_eq!(settings.phone_numbers(), vec!["+15550001", "+15550002"]);
    }

    #[test]
    fn test_unknown_run_status() {
        let json = r#"{
            "id": "5f0c6f3e-9a34-4c31-a9f4-0a3b0c1d2e3f",
            "run_type": "evening",
            "status": "running",
            "run_date": "2026-03-02"
        }"#;
        let run: RelationshipOpsRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Unknown);
        assert_eq!(run.run_type, RunType::Evening);
        assert!(run.top_actions.is_empty());
        assert_eq!(run.interactions_ingested, 0);
    }

    #[test]
    fn test_pending_run_with_null_counters() {
        let json = r#"{
            "id": "5f0c6f3e-9a34-4c31-a9f4-0a3b0c1d2e3f",
            "run_type": "morning",
            "status": "pending",
            "run_date": "2026-03-02",
            "summary_title": null,
            "interactions_ingested": null,
            "contacts_updated": null,
            "top_actions": null
        }"#;
        let run: RelationshipOpsRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Pending);
        assert_eq!(run.interactions_ingested, 0);
        assert_eq!(run.contacts_updated, 0);
        assert!(run.top_actions.is_empty());
    }

    #[test]
    fn test_knowledge_preview() {
        let entry = KnowledgeEntry {
            id: Uuid::nil(),
            title: "Pricing".to_string(),
            business_id: None,
            content: Some("Our standard rate is ninety dollars".to_string()),
            file_name: None,
            file_url: None,
            processing_status: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(entry.preview(12).as_deref(), Some("Our standard…"));
        assert_eq!(
            entry.preview(200).as_deref(),
            Some("Our standard rate is ninety dollars")
        );
    }
}
