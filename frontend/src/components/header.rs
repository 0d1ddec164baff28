use shared::api::ListRunsQuery;
use shared::runs::pending_count;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::config;
use crate::router::Route;
use crate::services::api::ApiService;
use crate::store::use_settings;

#[function_component(Header)]
pub fn header() -> Html {
    let current = use_route::<Route>().unwrap_or(Route::NotFound);
    let settings = use_settings();
    let pending_runs = use_state(|| 0usize);

    // Count pending relationship-ops runs; refreshed on every navigation
    {
        let pending_runs = pending_runs.clone();
        use_effect_with(current, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let query = ListRunsQuery {
                    limit: Some(config().recent_runs_limit),
                    run_type: None,
                };
                match ApiService::list_runs(query).await {
                    Ok(runs) => pending_runs.set(pending_count(&runs)),
                    Err(e) => tracing::warn!("Failed to fetch runs for nav badge: {}", e),
                }
            });
            || ()
        });
    }

    html! {
        <header class="header">
            <div class="container">
                <h1>{ "AI Admin" }</h1>
                if let Some(email) = settings.0.godfather_email() {
                    <p class="header-subtitle">{ format!("Escalations go to {}", email) }</p>
                }
                <nav class="main-nav">
                    { for Route::NAV.iter().map(|route| {
                        let class = if *route == current { "nav-link active" } else { "nav-link" };
                        html! {
                            <Link<Route> to={*route} classes={classes!(class)}>
                                { route.label() }
                                if *route == Route::RelationshipOps && *pending_runs > 0 {
                                    <span class="nav-badge">{ *pending_runs }</span>
                                }
                            </Link<Route>>
                        }
                    })}
                </nav>
            </div>
        </header>
    }
}
