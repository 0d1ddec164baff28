use shared::fetch::FetchState;
use shared::models::GodfatherSettings;
use shared::notice::Notice;
use shared::settings::{godfather_request, GodfatherForm, SyncState};
use shared::store::SettingsAction;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::toast::{use_notice, Toast};
use crate::services::api::ApiService;
use crate::store::use_settings;

#[function_component(Settings)]
pub fn settings() -> Html {
    html! {
        <div class="container">
            <h2>{ "Settings" }</h2>
            <GodfatherSettingsForm />
        </div>
    }
}

#[function_component(GodfatherSettingsForm)]
fn godfather_settings_form() -> Html {
    let settings = use_settings();
    let load = use_state(FetchState::<GodfatherSettings>::default);
    let form = use_mut_ref(GodfatherForm::default);
    let force_update = use_force_update();
    let saving = use_state(|| false);
    let refresh_trigger = use_state(|| 0u32);
    let notice = use_notice();

    {
        let load = load.clone();
        let form = form.clone();
        let settings = settings.clone();
        use_effect_with(*refresh_trigger, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::get_godfather_settings().await {
                    Ok(loaded) => {
                        form.borrow_mut().on_load(&loaded);
                        settings.dispatch(SettingsAction::GodfatherLoaded(loaded.clone()));
                        load.set(FetchState::Loaded(loaded));
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch Godfather settings: {}", e);
                        load.set(FetchState::Failed(e));
                    }
                }
            });
            || ()
        });
    }

    let on_retry = {
        let load = load.clone();
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_| {
            load.set(FetchState::Loading);
            refresh_trigger.set(*refresh_trigger + 1);
        })
    };

    let on_phones = {
        let form = form.clone();
        let force_update = force_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.borrow_mut().edit(|f| f.phone_numbers_csv = input.value());
            force_update.force_update();
        })
    };

    let on_email = {
        let form = form.clone();
        let force_update = force_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.borrow_mut().edit(|f| f.email = input.value());
            force_update.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let settings = settings.clone();
        let show_notice = notice.show.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let request = match godfather_request(form.borrow().fields()) {
                Ok(request) => request,
                Err(err) => {
                    show_notice.emit(Notice::error(err.to_string()));
                    return;
                }
            };

            saving.set(true);
            let saving = saving.clone();
            let settings = settings.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::update_godfather_settings(request).await {
                    Ok(saved) => {
                        tracing::info!("Godfather settings saved");
                        settings.dispatch(SettingsAction::GodfatherSaved(saved));
                        show_notice.emit(Notice::success("Settings saved"));
                    }
                    Err(err) => {
                        tracing::error!("Failed to save Godfather settings: {}", err);
                        show_notice.emit(Notice::error(format!("Could not save settings: {}", err)));
                    }
                }
                saving.set(false);
            });
        })
    };

    let form_ref = form.borrow();

    // Once seeded, keep showing the form even if a later refetch fails
    let body = if form_ref.state() == SyncState::Synced {
        let fields = form_ref.fields();
        html! {
            <form class="settings-form" onsubmit={on_submit}>
                <label for="godfather-phones">{ "Phone numbers (comma separated)" }</label>
                <input
                    id="godfather-phones"
                    type="text"
                    class="input"
                    placeholder="+15551234567, +15557654321"
                    value={fields.phone_numbers_csv.clone()}
                    oninput={on_phones}
                />
                <label for="godfather-email">{ "Email" }</label>
                <input
                    id="godfather-email"
                    type="email"
                    class="input"
                    value={fields.email.clone()}
                    oninput={on_email}
                />
                <button type="submit" class="btn btn-primary" disabled={*saving}>
                    { if *saving { "Saving…" } else { "Save" } }
                </button>
            </form>
        }
    } else {
        match &*load {
            FetchState::Failed(err) => html! {
                <div class="error-banner">
                    <p class="error">{ format!("Failed to load settings: {}", err) }</p>
                    if err.is_retryable() {
                        <button class="btn btn-secondary" onclick={on_retry}>{ "Retry" }</button>
                    }
                </div>
            },
            _ => html! {
                <div class="loading">
                    <div class="spinner"></div>
                </div>
            },
        }
    };

    html! {
        <section class="godfather-settings">
            <h3>{ "Godfather Contact" }</h3>
            <p class="hint">{ "Who the assistant calls or emails when it needs a human decision." }</p>
            { body }
            <Toast notice={notice.current.clone()} />
        </section>
    }
}
