use shared::models::Provider;
use shared::notice::Notice;
use shared::settings::{save_ics_url, SyncedForm};
use shared::store::SettingsAction;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::calendar_events::CalendarEvents;
use crate::components::integration_card::IntegrationCard;
use crate::components::toast::{use_notice, Toast};
use crate::services::browser::BrowserStorage;
use crate::store::use_settings;

#[function_component(CalendarPage)]
pub fn calendar_page() -> Html {
    html! {
        <div class="container">
            <h2>{ "Calendar" }</h2>
            <IntegrationCard provider={Provider::Calendar} />
            <CalendarEvents limit={Some(20)} />
            <IcsUrlForm />
        </div>
    }
}

/// Alternative to OAuth: a read-only iCalendar feed kept on this device.
#[function_component(IcsUrlForm)]
fn ics_url_form() -> Html {
    let settings = use_settings();
    let form = use_mut_ref(SyncedForm::<String>::default);
    let force_update = use_force_update();
    let notice = use_notice();

    {
        let form = form.clone();
        let force_update = force_update.clone();
        let stored = settings.0.ics_url().map(str::to_string);
        use_effect_with(stored, move |stored| {
            if let Some(url) = stored {
                if form.borrow_mut().on_load(url) {
                    force_update.force_update();
                }
            }
            || ()
        });
    }

    let on_input = {
        let form = form.clone();
        let force_update = force_update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.borrow_mut().edit(|url| *url = input.value());
            force_update.force_update();
        })
    };

    let on_submit = {
        let form = form.clone();
        let settings = settings.clone();
        let show_notice = notice.show.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let input = form.borrow().fields().clone();
            match save_ics_url(&mut BrowserStorage, &input) {
                Ok(url) => {
                    tracing::info!("Saved ICS calendar URL");
                    settings.dispatch(SettingsAction::IcsUrlSaved(url));
                    show_notice.emit(Notice::success("Calendar URL saved"));
                }
                Err(err) => show_notice.emit(Notice::error(err.to_string())),
            }
        })
    };

    let value = form.borrow().fields().clone();

    html! {
        <section class="ics-form">
            <h3>{ "Calendar Feed (ICS)" }</h3>
            <p class="hint">{ "Paste a private iCalendar link. It is stored on this device only." }</p>
            <form onsubmit={on_submit}>
                <input
                    type="url"
                    class="input"
                    placeholder="https://calendar.example.com/feed.ics"
                    value={value}
                    oninput={on_input}
                />
                <button type="submit" class="btn btn-primary">{ "Save" }</button>
            </form>
            <Toast notice={notice.current.clone()} />
        </section>
    }
}
