use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container">
            <div class="empty-state">
                <h2>{ "Page not found" }</h2>
                <p>{ "This screen does not exist in the admin app." }</p>
                <Link<Route> to={Route::Home}>
                    <button class="btn btn-primary">{ "Back to dashboard" }</button>
                </Link<Route>>
            </div>
        </div>
    }
}
