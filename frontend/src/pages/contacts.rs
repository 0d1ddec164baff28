use shared::contacts::ContactsError;
use shared::models::Contact;
use shared::notice::Notice;
use yew::prelude::*;

use crate::components::toast::{use_notice, Toast};
use crate::services::contacts;

#[function_component(ContactsPage)]
pub fn contacts_page() -> Html {
    let permission = use_memo((), |_| contacts::request_permission());
    let imported = use_state(Vec::<Contact>::new);
    let importing = use_state(|| false);
    let notice = use_notice();

    let on_import = {
        let imported = imported.clone();
        let importing = importing.clone();
        let show_notice = notice.show.clone();
        Callback::from(move |_| {
            if *importing {
                return;
            }
            importing.set(true);
            let imported = imported.clone();
            let importing = importing.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match contacts::get_contacts().await {
                    Ok(result) => {
                        show_notice.emit(Notice::success(format!(
                            "Imported {} contacts",
                            result.contacts.len()
                        )));
                        imported.set(result.contacts);
                    }
                    Err(ContactsError::Cancelled) => {
                        show_notice.emit(Notice::error(ContactsError::Cancelled.to_string()));
                    }
                    Err(e) => {
                        tracing::error!("Contact import failed: {}", e);
                        show_notice.emit(Notice::error(e.to_string()));
                    }
                }
                importing.set(false);
            });
        })
    };

    html! {
        <div class="container">
            <h2>{ "Contacts" }</h2>
            if permission.granted {
                <p>{ "Pick contacts from this device to share with the assistant." }</p>
                <button class="btn btn-primary" disabled={*importing} onclick={on_import}>
                    { if *importing { "Opening picker…" } else { "Import contacts" } }
                </button>
            } else {
                <div class="empty-state">
                    <p>{ permission.message.clone().unwrap_or_default() }</p>
                    <p class="hint">{ "Contact import needs the mobile app or a browser with the Contact Picker." }</p>
                </div>
            }
            if !imported.is_empty() {
                <ul class="contact-list">
                    { for imported.iter().map(contact_row) }
                </ul>
            }
            <Toast notice={notice.current.clone()} />
        </div>
    }
}

fn contact_row(contact: &Contact) -> Html {
    let name = if contact.name.trim().is_empty() {
        "(No name)".to_string()
    } else {
        contact.name.clone()
    };

    html! {
        <li class="contact-item">
            <div class="contact-name">{ name }</div>
            if let Some(org) = &contact.organization {
                <div class="contact-org">{ org }</div>
            }
            { for contact.phone_numbers.iter().map(|tel| html! {
                <div class="contact-phone">{ tel }</div>
            })}
            { for contact.emails.iter().map(|email| html! {
                <div class="contact-email">{ email }</div>
            })}
        </li>
    }
}
