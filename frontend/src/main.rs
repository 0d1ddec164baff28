mod components;
mod config;
mod pages;
mod router;
mod services;
mod store;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::router::{switch, Route};
use crate::store::SettingsProvider;

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <SettingsProvider>
                <div id="app">
                    <components::header::Header />
                    <main>
                        <yew_router::Switch<Route> render={switch} />
                    </main>
                </div>
            </SettingsProvider>
        </BrowserRouter>
    }
}

fn main() {
    tracing_wasm::set_as_global_default();
    tracing::info!("AI admin starting against {}", config::config().api_base_url);

    yew::Renderer::<App>::new().render();
}
