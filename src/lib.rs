#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Decorative canvas background for a portfolio page: a drifting particle
//! field, wireframe solids, energy rings, tunnels and a pulsing grid, plus a
//! depth-tinted particle layer behind the hero section, a custom cursor, a
//! persisted dark-mode flag and a typing hero title.
//!
//! Everything except the `wasm` module is plain Rust and runs on the host,
//! drawing through [`surface::Surface`].

pub mod config;
pub mod cursor;
pub mod entities;
pub mod error;
pub mod hero;
pub mod preference;
pub mod projection;
pub mod rng;
pub mod scene;
pub mod surface;
pub mod text;

pub use config::{HeroConfig, SceneConfig};
pub use entities::Viewport;
pub use error::{FxError, FxResult};
pub use hero::HeroField;
pub use scene::{FrameStats, Scene};

// Only compile browser glue when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::error::FxError;

    mod console;
    mod render;
    mod storage;
    mod typing;

    pub(crate) fn js_error(value: JsValue) -> FxError {
        FxError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }

    pub(crate) fn to_js(err: FxError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console::init(log::LevelFilter::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = match document.get_element_by_id("c") {
            Some(element) => element.dyn_into::<web_sys::HtmlCanvasElement>()?,
            None => render::create_canvas(&document)?,
        };

        // 2^53 keeps the whole f64 mantissa
        let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        render::start(canvas, seed)?;

        if let Some(hero) = document.query_selector(".hero")? {
            let hero = hero.dyn_into::<web_sys::HtmlElement>()?;
            if let Err(err) = render::start_hero(&document, hero, seed.wrapping_add(1)) {
                log::warn!("hero particles unavailable: {err:?}");
            }
        }

        if let Err(err) = storage::install_theme_toggle(&window, &document) {
            log::warn!("dark mode toggle unavailable: {err}");
        }
        if let Err(err) = typing::start(&window, &document) {
            log::warn!("text effects unavailable: {err}");
        }
        Ok(())
    }
}
