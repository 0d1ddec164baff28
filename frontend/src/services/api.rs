use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{
    CreateKnowledgeRequest, KnowledgeEntryResponse, ListCalendarEventsQuery, ListKnowledgeQuery,
    ListKnowledgeResponse, ListRunsQuery, OAuthStartResponse, TriggerRunRequest,
    UpdateGodfatherSettingsRequest, UploadKnowledgeResponse,
};
use shared::error::ClientError;
use shared::models::{
    CalendarEvent, GodfatherSettings, IntegrationStatus, KnowledgeEntry, Provider,
    RelationshipOpsRun,
};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::config::config;

pub struct ApiService;

impl ApiService {
    // ------------------------------------------------------------------
    // Knowledge
    // ------------------------------------------------------------------

    pub async fn list_knowledge(
        query: ListKnowledgeQuery,
    ) -> Result<ListKnowledgeResponse, ClientError> {
        let url = config().endpoint("knowledge");
        let response = Request::get(&url)
            .query(query.to_params())
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    pub async fn create_knowledge(
        request: CreateKnowledgeRequest,
    ) -> Result<KnowledgeEntry, ClientError> {
        let url = config().endpoint("knowledge");
        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        let created: KnowledgeEntryResponse = parse_json(&url, response).await?;
        Ok(created.entry)
    }

    pub async fn upload_knowledge(
        file: File,
        title: Option<String>,
        business_id: Option<Uuid>,
    ) -> Result<UploadKnowledgeResponse, ClientError> {
        let url = config().endpoint("knowledge/upload");

        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", &file, &file.name())
            .map_err(js_error)?;
        if let Some(business_id) = business_id {
            form.append_with_str("business_id", &business_id.to_string())
                .map_err(js_error)?;
        }
        if let Some(title) = title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            form.append_with_str("title", title).map_err(js_error)?;
        }

        // No Content-Type header: the browser adds the multipart boundary.
        let response = Request::post(&url)
            .body(form)
            .map_err(|e| ClientError::Browser(e.to_string()))?
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    pub async fn delete_knowledge(id: Uuid) -> Result<(), ClientError> {
        let url = config().endpoint(&format!("knowledge/{}", id));
        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        expect_ok(&url, response).await.map(|_| ())
    }

    // ------------------------------------------------------------------
    // Integrations
    // ------------------------------------------------------------------

    pub async fn integration_status(provider: Provider) -> Result<IntegrationStatus, ClientError> {
        let url = config().endpoint(&format!("{}/status", provider.path_segment()));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    /// Ask the backend where to send the user for consent.
    pub async fn start_oauth(provider: Provider) -> Result<OAuthStartResponse, ClientError> {
        let url = config().endpoint(&format!("{}/oauth", provider.path_segment()));
        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    pub async fn list_calendar_events(
        query: ListCalendarEventsQuery,
    ) -> Result<Vec<CalendarEvent>, ClientError> {
        let url = config().endpoint("calendar/events");
        let params: Vec<(&str, String)> = query
            .limit
            .map(|limit| ("limit", limit.to_string()))
            .into_iter()
            .collect();
        let response = Request::get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    // ------------------------------------------------------------------
    // Godfather settings
    // ------------------------------------------------------------------

    pub async fn get_godfather_settings() -> Result<GodfatherSettings, ClientError> {
        let url = config().endpoint("godfather-settings");
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    pub async fn update_godfather_settings(
        request: UpdateGodfatherSettingsRequest,
    ) -> Result<GodfatherSettings, ClientError> {
        let url = config().endpoint("godfather-settings");
        let response = Request::put(&url)
            .json(&request)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;

        // Some deployments answer 204; the saved values are then the ones we sent.
        let body = expect_ok(&url, response).await?.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(request.into());
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Relationship ops
    // ------------------------------------------------------------------

    pub async fn list_runs(query: ListRunsQuery) -> Result<Vec<RelationshipOpsRun>, ClientError> {
        let url = config().endpoint("relationship-ops/runs");
        let response = Request::get(&url)
            .query(query.to_params())
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        parse_json(&url, response).await
    }

    pub async fn trigger_run(request: TriggerRunRequest) -> Result<(), ClientError> {
        let url = config().endpoint("relationship-ops/runs/trigger");
        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ClientError::Decode(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| network_error(&url, e))?;
        expect_ok(&url, response).await.map(|_| ())
    }
}

fn network_error(url: &str, err: gloo_net::Error) -> ClientError {
    tracing::error!("Request to {} failed: {:?}", url, err);
    ClientError::Network(err.to_string())
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Browser(format!("{:?}", err))
}

async fn expect_ok(url: &str, response: Response) -> Result<Response, ClientError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!("{} returned HTTP {}", url, status);
    Err(ClientError::from_response(status, &body))
}

async fn parse_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ClientError> {
    expect_ok(url, response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| {
            tracing::error!("Failed to parse response from {}: {:?}", url, e);
            ClientError::Decode(e.to_string())
        })
}
