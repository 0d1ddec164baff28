use std::rc::Rc;

use shared::settings::load_ics_url;
use shared::store::{SettingsAction, SettingsStore};
use yew::prelude::*;

use crate::services::api::ApiService;
use crate::services::browser::BrowserStorage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings(pub SettingsStore);

impl Reducible for AppSettings {
    type Action = SettingsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(AppSettings(self.0.apply(action)))
    }
}

pub type SettingsContext = UseReducerHandle<AppSettings>;

#[derive(Properties, PartialEq)]
pub struct SettingsProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Owns the app's single settings store and primes it on startup.
#[function_component(SettingsProvider)]
pub fn settings_provider(props: &SettingsProviderProps) -> Html {
    let store = use_reducer(AppSettings::default);

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            store.dispatch(SettingsAction::IcsUrlLoaded(load_ics_url(&BrowserStorage)));
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::get_godfather_settings().await {
                    Ok(settings) => store.dispatch(SettingsAction::GodfatherLoaded(settings)),
                    Err(e) => tracing::warn!("Failed to prime Godfather settings: {}", e),
                }
            });
            || ()
        });
    }

    html! {
        <ContextProvider<SettingsContext> context={store}>
            { props.children.clone() }
        </ContextProvider<SettingsContext>>
    }
}

#[hook]
pub fn use_settings() -> SettingsContext {
    use_context::<SettingsContext>().expect("use_settings called outside SettingsProvider")
}
