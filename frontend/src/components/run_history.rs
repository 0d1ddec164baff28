use shared::api::ListRunsQuery;
use shared::fetch::{list_view, FetchState, ListView};
use shared::models::{RelationshipOpsRun, RunType};
use shared::runs::{run_heading, top_action_label, StatusIcon};
use yew::prelude::*;

use crate::services::api::ApiService;

#[derive(Properties, PartialEq)]
pub struct RunHistoryProps {
    #[prop_or_default]
    pub limit: Option<u32>,
    #[prop_or_default]
    pub run_type: Option<RunType>,
    /// Bumped by the parent to force a refetch (e.g. after a manual trigger)
    #[prop_or_default]
    pub refresh: u32,
}

#[function_component(RunHistory)]
pub fn run_history(props: &RunHistoryProps) -> Html {
    let runs = use_state(FetchState::<Vec<RelationshipOpsRun>>::default);
    let retry_trigger = use_state(|| 0u32);

    {
        let runs = runs.clone();
        let query = ListRunsQuery {
            limit: props.limit,
            run_type: props.run_type,
        };
        use_effect_with((query, props.refresh, *retry_trigger), move |(query, _, _)| {
            let query = query.clone();
            runs.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiService::list_runs(query).await;
                if let Err(e) = &result {
                    tracing::error!("Failed to fetch relationship-ops runs: {}", e);
                }
                runs.set(FetchState::from_result(result));
            });
            || ()
        });
    }

    let on_retry = {
        let retry_trigger = retry_trigger.clone();
        Callback::from(move |_| retry_trigger.set(*retry_trigger + 1))
    };

    match list_view(true, &*runs) {
        ListView::PrerequisiteMissing | ListView::Loading => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        ListView::Error(err) => html! {
            <div class="error-banner">
                <p class="error">{ format!("Failed to load run history: {}", err) }</p>
                if err.is_retryable() {
                    <button class="btn btn-secondary" onclick={on_retry}>{ "Retry" }</button>
                }
            </div>
        },
        ListView::Empty => html! {
            <div class="empty-state">
                <p>{ "No runs yet. Runs appear here after the first scheduled or manual trigger." }</p>
            </div>
        },
        ListView::Populated(items) => html! {
            <ul class="run-list">
                { for items.iter().map(run_row) }
            </ul>
        },
    }
}

fn run_row(run: &RelationshipOpsRun) -> Html {
    let icon = StatusIcon::for_status(run.status);
    let actions: Vec<String> = run.top_actions.iter().filter_map(top_action_label).collect();

    html! {
        <li class="run-item" key={run.id.to_string()}>
            <span class={icon.css_class()}>{ icon.glyph() }</span>
            <div class="run-content">
                <div class="run-title">{ run_heading(run) }</div>
                <div class="run-meta">
                    <span class="badge">{ run.run_type.label() }</span>
                    <span>{ run.run_date.format("%b %-d, %Y").to_string() }</span>
                    <span>{ format!("{} interactions", run.interactions_ingested) }</span>
                    <span>{ format!("{} contacts updated", run.contacts_updated) }</span>
                </div>
                if let Some(text) = &run.summary_text {
                    <p class="run-summary">{ text }</p>
                }
                if !actions.is_empty() {
                    <ol class="run-actions">
                        { for actions.iter().map(|action| html! { <li>{ action }</li> }) }
                    </ol>
                }
            </div>
        </li>
    }
}
