use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlElement, Storage, Window};

use super::js_error;
use crate::error::{FxError, FxResult};
use crate::preference::{MemoryStore, PreferenceStore, Theme, ThemePreference};

const DARK_CLASS: &str = "dark-mode";

/// `window.localStorage`, or an in-memory map when the browser refuses
/// access (private mode, sandboxed iframes).
enum PageStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl PageStore {
    fn open(window: &Window) -> Self {
        match window.local_storage() {
            Ok(Some(storage)) => Self::Local(storage),
            Ok(None) => {
                log::warn!("localStorage is disabled; theme will not persist");
                Self::Memory(MemoryStore::new())
            }
            Err(err) => {
                log::warn!("localStorage unavailable ({err:?}); theme will not persist");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

fn storage_error(err: JsValue) -> FxError {
    FxError::Storage(format!("{err:?}"))
}

impl PreferenceStore for PageStore {
    fn get(&self, key: &str) -> FxResult<Option<String>> {
        match self {
            Self::Local(storage) => storage
                .get_item(key)
                .map_err(storage_error),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        match self {
            Self::Local(storage) => storage
                .set_item(key, value)
                .map_err(storage_error),
            Self::Memory(store) => store.set(key, value),
        }
    }
}

fn apply(body: &HtmlElement, button: &HtmlElement, theme: Theme) -> FxResult<()> {
    body.class_list()
        .toggle_with_force(DARK_CLASS, theme.is_dark())
        .map_err(js_error)?;
    button.set_inner_text(theme.toggle_icon());
    Ok(())
}

/// Adds the floating dark-mode button and restores the saved theme.
pub fn install_theme_toggle(window: &Window, document: &Document) -> FxResult<()> {
    let body = document
        .body()
        .ok_or_else(|| FxError::Dom("no body".into()))?;
    let button: HtmlElement = document
        .create_element("button")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| FxError::Dom("button is not an HtmlElement".into()))?;
    button.set_class_name("dark-mode-toggle");
    button
        .set_attribute("aria-label", "Toggle dark mode")
        .map_err(js_error)?;

    let preference = ThemePreference::load(PageStore::open(window));
    apply(&body, &button, preference.theme())?;
    body.append_child(&button).map_err(js_error)?;

    let preference = Rc::new(RefCell::new(preference));
    let on_click = {
        let body = body.clone();
        let target = button.clone();
        Closure::wrap(Box::new(move || {
            let toggled = preference.borrow_mut().toggle();
            let theme = match toggled {
                Ok(theme) => theme,
                Err(err) => {
                    log::warn!("theme not saved: {err}");
                    return;
                }
            };
            if let Err(err) = apply(&body, &target, theme) {
                log::warn!("{err}");
            }
        }) as Box<dyn FnMut()>)
    };
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(js_error)?;
    on_click.forget();
    Ok(())
}
