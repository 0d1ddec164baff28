use shared::models::Provider;
use yew::prelude::*;

use crate::components::integration_card::IntegrationCard;

#[function_component(EmailPage)]
pub fn email_page() -> Html {
    html! {
        <div class="container">
            <h2>{ "Email Accounts" }</h2>
            <p>{ "Link the inboxes the assistant reads and replies from." }</p>
            <div class="integration-grid">
                <IntegrationCard provider={Provider::Gmail} />
                <IntegrationCard provider={Provider::Outlook} />
            </div>
        </div>
    }
}
