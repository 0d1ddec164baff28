use crate::models::{RelationshipOpsRun, RunStatus};

/// Icon drawn next to a run in the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Check,
    Cross,
    Spinner,
}

impl StatusIcon {
    pub fn for_status(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => StatusIcon::Check,
            RunStatus::Failed => StatusIcon::Cross,
            _ => StatusIcon::Spinner,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::Check => "✓",
            StatusIcon::Cross => "✗",
            StatusIcon::Spinner => "⟳",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusIcon::Check => "status-icon status-completed",
            StatusIcon::Cross => "status-icon status-failed",
            StatusIcon::Spinner => "status-icon status-pending spinning",
        }
    }
}

/// Heading of a run row; falls back to "<Type> run" when the run has no summary yet.
pub fn run_heading(run: &RelationshipOpsRun) -> String {
    match run.summary_title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => format!("{} run", run.run_type.label()),
    }
}

/// Readable text for one entry of `top_actions`.
pub fn top_action_label(action: &serde_json::Value) -> Option<String> {
    match action {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Object(map) => ["title", "action", "description", "text"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

/// Runs that have not reached a terminal state.
pub fn pending_count(runs: &[RelationshipOpsRun]) -> usize {
    runs.iter()
        .filter(|run| run.status == RunStatus::Pending)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunType;
    use chrono::NaiveDate;
    use serde_json::json;
    use uuid::Uuid;

    fn run(status: RunStatus) -> RelationshipOpsRun {
        RelationshipOpsRun {
            id: Uuid::nil(),
            run_type: RunType::Afternoon,
            status,
            run_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            summary_title: None,
            summary_text: None,
            interactions_ingested: 4,
            contacts_updated: 2,
            top_actions: Vec::new(),
        }
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(StatusIcon::for_status(RunStatus::Completed), StatusIcon::Check);
        assert_eq!(StatusIcon::for_status(RunStatus::Failed), StatusIcon::Cross);
        assert_eq!(StatusIcon::for_status(RunStatus::Pending), StatusIcon::Spinner);
        assert_eq!(StatusIcon::for_status(RunStatus::Unknown), StatusIcon::Spinner);
    }

    #[test]
    fn test_run_heading_fallback() {
        let mut r = run(RunStatus::Completed);
        assert_eq!(run_heading(&r), "Afternoon run");
        r.summary_title = Some("Three follow-ups due".to_string());
        assert_eq!(run_heading(&r), "Three follow-ups due");
    }

    #[test]
    fn test_top_action_label() {
        assert_eq!(
            top_action_label(&json!("Call Dana back")).as_deref(),
            Some("Call Dana back")
        );
        assert_eq!(
            top_action_label(&json!({"action": "Send invoice", "priority": 1})).as_deref(),
            Some("Send invoice")
        );
        assert_eq!(top_action_label(&json!(42)), None);
        assert_eq!(top_action_label(&json!("  ")), None);
    }

    #[test]
    fn test_pending_count() {
        let runs = vec![
            run(RunStatus::Pending),
            run(RunStatus::Completed),
            run(RunStatus::Pending),
            run(RunStatus::Failed),
        ];
        assert_eq!(pending_count(&runs), 2);
        assert_eq!(pending_count(&[]), 0);
    }
}
