//! Web fallback for the contacts capability, using the Contact Picker API
//! (`navigator.contacts.select`). Unavailable on most desktop browsers.

use js_sys::{Array, Function, Object, Promise, Reflect, JSON};
use shared::contacts::{
    classify_picker_error, normalize_picker_result, ContactsError, ContactsResult,
    PermissionResult,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

const PICKER_PROPERTIES: [&str; 3] = ["name", "email", "tel"];

fn contacts_manager() -> Option<JsValue> {
    let navigator = web_sys::window()?.navigator();
    let manager = Reflect::get(&navigator, &JsValue::from_str("contacts")).ok()?;
    if manager.is_undefined() || manager.is_null() {
        return None;
    }
    Reflect::get(&manager, &JsValue::from_str("select"))
        .ok()
        .filter(|select| select.is_function())
        .map(|_| manager)
}

pub fn request_permission() -> PermissionResult {
    PermissionResult::for_availability(contacts_manager().is_some())
}

/// Open the picker and normalize whatever the user selected.
pub async fn get_contacts() -> Result<ContactsResult, ContactsError> {
    let manager = contacts_manager().ok_or(ContactsError::Unavailable)?;
    let select: Function = Reflect::get(&manager, &JsValue::from_str("select"))
        .map_err(|_| ContactsError::Unavailable)?
        .unchecked_into();

    let properties: Array = PICKER_PROPERTIES.iter().map(|p| JsValue::from_str(p)).collect();
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("multiple"), &JsValue::TRUE)
        .map_err(|e| ContactsError::Picker(describe(&e)))?;

    let promise: Promise = select
        .call2(&manager, &properties, &options)
        .map_err(picker_error)?
        .dyn_into()
        .map_err(|_| ContactsError::Picker("select() did not return a promise".into()))?;

    let selected = JsFuture::from(promise).await.map_err(picker_error)?;
    let json: String = JSON::stringify(&selected)
        .map_err(|e| ContactsError::Picker(describe(&e)))?
        .into();

    let contacts = normalize_picker_result(&json)?;
    tracing::info!("Imported {} contacts from picker", contacts.len());
    Ok(ContactsResult { contacts })
}

fn picker_error(err: JsValue) -> ContactsError {
    let name = Reflect::get(&err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    let error = classify_picker_error(&name, &describe(&err));
    tracing::warn!("Contact picker rejected: {}", error);
    error
}

fn describe(err: &JsValue) -> String {
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
