use shared::api::TriggerRunRequest;
use shared::fetch::InFlight;
use shared::models::RunType;
use shared::notice::Notice;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::run_history::RunHistory;
use crate::components::toast::{use_notice, Toast};
use crate::config::config;
use crate::services::api::ApiService;

fn parse_run_type(value: &str) -> Option<RunType> {
    RunType::ALL.into_iter().find(|t| t.as_str() == value)
}

#[function_component(RelationshipOpsPage)]
pub fn relationship_ops_page() -> Html {
    let filter = use_state(|| None::<RunType>);
    let trigger_type = use_state(|| RunType::Morning);
    let triggering = use_state(|| false);
    let in_flight = use_mut_ref(InFlight::default);
    let refresh = use_state(|| 0u32);
    let notice = use_notice();

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filter.set(parse_run_type(&select.value()));
        })
    };

    let on_trigger_type = {
        let trigger_type = trigger_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(run_type) = parse_run_type(&select.value()) {
                trigger_type.set(run_type);
            }
        })
    };

    let on_trigger = {
        let trigger_type = trigger_type.clone();
        let triggering = triggering.clone();
        let in_flight = in_flight.clone();
        let refresh = refresh.clone();
        let show_notice = notice.show.clone();
        Callback::from(move |_| {
            // Clicks landing before the next render still see this flag
            if !in_flight.borrow_mut().try_begin() {
                return;
            }
            triggering.set(true);
            let run_type = *trigger_type;
            let triggering = triggering.clone();
            let in_flight = in_flight.clone();
            let refresh = refresh.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::trigger_run(TriggerRunRequest::forced(run_type)).await {
                    Ok(()) => {
                        tracing::info!("Triggered {} relationship-ops run", run_type.as_str());
                        show_notice.emit(Notice::success(format!(
                            "{} run started",
                            run_type.label()
                        )));
                    }
                    Err(e) => {
                        tracing::error!("Failed to trigger {} run: {}", run_type.as_str(), e);
                        show_notice.emit(Notice::error(format!("Could not start run: {}", e)));
                    }
                }
                in_flight.borrow_mut().finish();
                triggering.set(false);
                refresh.set(*refresh + 1);
            });
        })
    };

    html! {
        <div class="container">
            <h2>{ "Relationship Ops" }</h2>
            <div class="run-controls">
                <label>
                    { "Show " }
                    <select onchange={on_filter}>
                        <option value="" selected={filter.is_none()}>{ "All runs" }</option>
                        { for RunType::ALL.iter().map(|t| html! {
                            <option value={t.as_str()} selected={*filter == Some(*t)}>{ t.label() }</option>
                        })}
                    </select>
                </label>
                <label>
                    { "Run now: " }
                    <select onchange={on_trigger_type}>
                        { for RunType::ALL.iter().map(|t| html! {
                            <option value={t.as_str()} selected={*trigger_type == *t}>{ t.label() }</option>
                        })}
                    </select>
                </label>
                <button class="btn btn-primary" disabled={*triggering} onclick={on_trigger}>
                    { if *triggering { "Starting…" } else { "Trigger run" } }
                </button>
            </div>
            <RunHistory
                limit={Some(config().recent_runs_limit)}
                run_type={*filter}
                refresh={*refresh}
            />
            <Toast notice={notice.current.clone()} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_type() {
        assert_eq!(parse_run_type("midday"), Some(RunType::Midday));
        assert_eq!(parse_run_type(""), None);
        assert_eq!(parse_run_type("night"), None);
    }
}
