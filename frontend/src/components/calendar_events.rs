use shared::api::ListCalendarEventsQuery;
use shared::fetch::{list_view, FetchState, ListView};
use shared::models::{CalendarEvent, Provider};
use yew::prelude::*;

use crate::services::api::ApiService;

#[derive(Properties, PartialEq)]
pub struct CalendarEventsProps {
    #[prop_or_default]
    pub limit: Option<u32>,
}

/// Upcoming events from the linked Google Calendar.
#[function_component(CalendarEvents)]
pub fn calendar_events(props: &CalendarEventsProps) -> Html {
    let connected = use_state(|| None::<bool>);
    let events = use_state(FetchState::<Vec<CalendarEvent>>::default);
    let refresh_trigger = use_state(|| 0u32);

    {
        let connected = connected.clone();
        let events = events.clone();
        let limit = props.limit;
        use_effect_with((limit, *refresh_trigger), move |_| {
            events.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::integration_status(Provider::Calendar).await {
                    Ok(status) if !status.connected => {
                        connected.set(Some(false));
                        return;
                    }
                    Ok(_) => connected.set(Some(true)),
                    Err(e) => {
                        // Surface as a list error; the retry control covers both reads
                        tracing::error!("Failed to fetch calendar status: {}", e);
                        connected.set(Some(true));
                        events.set(FetchState::Failed(e));
                        return;
                    }
                }
                let result = ApiService::list_calendar_events(ListCalendarEventsQuery { limit }).await;
                if let Err(e) = &result {
                    tracing::error!("Failed to fetch calendar events: {}", e);
                }
                events.set(FetchState::from_result(result));
            });
            || ()
        });
    }

    let on_retry = {
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_| refresh_trigger.set(*refresh_trigger + 1))
    };

    // Unknown connection state counts as met so the spinner shows first
    let prerequisite_met = (*connected).unwrap_or(true);

    let body = match list_view(prerequisite_met, &*events) {
        ListView::PrerequisiteMissing => html! {
            <div class="empty-state">
                <p>{ "Connect Google Calendar to see your upcoming events." }</p>
            </div>
        },
        ListView::Loading => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        ListView::Error(err) => html! {
            <div class="error-banner">
                <p class="error">{ format!("Failed to load events: {}", err) }</p>
                if err.is_retryable() {
                    <button class="btn btn-secondary" onclick={on_retry}>{ "Retry" }</button>
                }
            </div>
        },
        ListView::Empty => html! {
            <div class="empty-state">
                <p>{ "No upcoming events." }</p>
            </div>
        },
        ListView::Populated(items) => html! {
            <ul class="event-list">
                { for items.iter().map(event_row) }
            </ul>
        },
    };

    html! {
        <section class="calendar-events">
            <h3>{ "Upcoming Events" }</h3>
            { body }
        </section>
    }
}

fn event_row(event: &CalendarEvent) -> Html {
    html! {
        <li class="event-item" key={event.id.clone()}>
            <div class="event-title">
                if let Some(link) = &event.link {
                    <a href={link.clone()} target="_blank" rel="noopener noreferrer">{ event.title() }</a>
                } else {
                    { event.title() }
                }
            </div>
            <div class="event-when">{ event.when() }</div>
            if let Some(location) = &event.location {
                <div class="event-location">{ location }</div>
            }
        </li>
    }
}
