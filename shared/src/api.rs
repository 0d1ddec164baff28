use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{GodfatherSettings, KnowledgeEntry, ProcessingStatus, RunType};

// ============================================================================
// Knowledge API Types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListKnowledgeQuery {
    pub business_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListKnowledgeQuery {
    /// Query string pairs for the parameters that are set.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(business_id) = self.business_id {
            params.push(("business_id", business_id.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        params
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListKnowledgeResponse {
    pub entries: Vec<KnowledgeEntry>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateKnowledgeRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntryResponse {
    pub entry: KnowledgeEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadKnowledgeResponse {
    pub entry: KnowledgeEntry,
    pub processing_status: ProcessingStatus,
}

// ============================================================================
// Integration API Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthStartResponse {
    pub auth_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCalendarEventsQuery {
    pub limit: Option<u32>,
}

// ============================================================================
// Godfather Settings API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateGodfatherSettingsRequest {
    #[validate(length(min = 1, message = "At least one phone number is required"))]
    pub phone_numbers_csv: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

impl From<GodfatherSettings> for UpdateGodfatherSettingsRequest {
    fn from(settings: GodfatherSettings) -> Self {
        Self {
            phone_numbers_csv: settings.phone_numbers_csv.trim().to_string(),
            email: settings.email.trim().to_string(),
        }
    }
}

impl From<UpdateGodfatherSettingsRequest> for GodfatherSettings {
    fn from(request: UpdateGodfatherSettingsRequest) -> Self {
        Self {
            phone_numbers_csv: request.phone_numbers_csv,
            email: request.email,
        }
    }
}

// ============================================================================
// Relationship Ops API Types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListRunsQuery {
    pub limit: Option<u32>,
    #[serde(rename = "type")]
    pub run_type: Option<RunType>,
}

impl ListRunsQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(run_type) = self.run_type {
            params.push(("type", run_type.as_str().to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRunRequest {
    pub run_type: RunType,
    pub force: bool,
}

impl TriggerRunRequest {
    /// Manual triggers always bypass the backend's "already ran today" check.
    pub fn forced(run_type: RunType) -> Self {
        Self {
            run_type,
            force: true,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<String>,
}
