use gloo::events::EventListener;
use shared::integration::{self, status_text, ConnectOutcome, IntegrationPanel, IntegrationView};
use shared::models::Provider;
use shared::notice::Notice;
use yew::prelude::*;

use crate::components::toast::{use_notice, Toast};
use crate::services::integrations::ProviderApi;

#[derive(Properties, PartialEq)]
pub struct IntegrationCardProps {
    pub provider: Provider,
}

/// Connect/reconnect widget for one third-party account.
#[function_component(IntegrationCard)]
pub fn integration_card(props: &IntegrationCardProps) -> Html {
    let api = ProviderApi(props.provider);
    let panel = use_mut_ref(IntegrationPanel::default);
    let force_update = use_force_update();
    let refresh_trigger = use_state(|| 0u32);
    let notice = use_notice();

    // Fetch status on mount and on manual retry
    {
        let panel = panel.clone();
        let force_update = force_update.clone();
        use_effect_with((api, *refresh_trigger), move |(api, _)| {
            let api = *api;
            wasm_bindgen_futures::spawn_local(async move {
                integration::refresh(&api, &panel).await;
                force_update.force_update();
            });
            || ()
        });
    }

    // The OAuth round trip ends with the user coming back to this window
    {
        let panel = panel.clone();
        let force_update = force_update.clone();
        use_effect_with(api, move |api| {
            let api = *api;
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "focus", move |_| {
                    let panel = panel.clone();
                    let force_update = force_update.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        integration::refresh(&api, &panel).await;
                        force_update.force_update();
                    });
                })
            });
            move || drop(listener)
        });
    }

    let on_retry = {
        let panel = panel.clone();
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_| {
            panel.borrow_mut().retry();
            refresh_trigger.set(*refresh_trigger + 1);
        })
    };

    let on_connect = {
        let panel = panel.clone();
        let force_update = force_update.clone();
        let show_notice = notice.show.clone();
        Callback::from(move |_| {
            let panel = panel.clone();
            let force_update = force_update.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome =
                    integration::connect(&api, &panel, || force_update.force_update()).await;
                match outcome {
                    ConnectOutcome::Redirected => {}
                    ConnectOutcome::Suppressed => {
                        tracing::debug!("Connect already pending for {}", api.0.display_name());
                    }
                    ConnectOutcome::Failed(e) => {
                        tracing::error!("Failed to start {} OAuth: {}", api.0.display_name(), e);
                        show_notice.emit(Notice::error(format!(
                            "Could not connect {}: {}",
                            api.0.display_name(),
                            e
                        )));
                    }
                }
            });
        })
    };

    let panel_ref = panel.borrow();
    let provider = props.provider;
    let view = panel_ref.view();
    let text = status_text(provider, &view);

    let body = match view {
        IntegrationView::Loading => html! {
            <div class="loading">
                <div class="spinner"></div>
                <p>{ text }</p>
            </div>
        },
        IntegrationView::Error(err) => html! {
            <div class="error-banner">
                <p class="error">{ text }</p>
                if err.is_retryable() {
                    <button class="btn btn-secondary" onclick={on_retry}>{ "Retry" }</button>
                }
            </div>
        },
        IntegrationView::Connected { .. } | IntegrationView::Disconnected => {
            let connected = matches!(view, IntegrationView::Connected { .. });
            html! {
                <>
                    <span class={if connected { "badge badge-connected" } else { "badge badge-disconnected" }}>
                        { if connected { "Connected" } else { "Not connected" } }
                    </span>
                    <p class="integration-text">{ text }</p>
                    <button
                        class={if connected { "btn btn-secondary" } else { "btn btn-primary" }}
                        disabled={panel_ref.is_connecting()}
                        onclick={on_connect}
                    >
                        { panel_ref.connect_label(provider) }
                    </button>
                </>
            }
        }
    };

    html! {
        <div class="integration-card">
            <h3>{ provider.display_name() }</h3>
            { body }
            <Toast notice={notice.current.clone()} />
        </div>
    }
}
