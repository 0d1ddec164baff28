use shared::models::Provider;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::calendar_events::CalendarEvents;
use crate::components::integration_card::IntegrationCard;
use crate::components::run_history::RunHistory;
use crate::router::Route;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="container">
            <h2>{ "Dashboard" }</h2>
            <section class="integration-grid">
                { for Provider::ALL.iter().map(|provider| html! {
                    <IntegrationCard provider={*provider} />
                })}
            </section>
            <CalendarEvents limit={Some(5)} />
            <section class="recent-runs">
                <h3>{ "Recent Relationship Ops" }</h3>
                <RunHistory limit={Some(5)} />
                <Link<Route> to={Route::RelationshipOps}>{ "View all runs" }</Link<Route>>
            </section>
        </div>
    }
}
