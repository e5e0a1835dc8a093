#![cfg(target_arch = "wasm32")]

use portfolio_fx::error::{FxError, FxResult};
use portfolio_fx::preference::{PreferenceStore, Theme, ThemePreference, DARK_MODE_KEY};
use portfolio_fx::surface::{RecordingSurface, Surface};
use portfolio_fx::{Scene, SceneConfig, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

struct Local(web_sys::Storage);

impl PreferenceStore for Local {
    fn get(&self, key: &str) -> FxResult<Option<String>> {
        self.0.get_item(key).map_err(|e| FxError::Storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        self.0.set_item(key, value).map_err(|e| FxError::Storage(format!("{e:?}")))
    }
}

#[wasm_bindgen_test]
fn canvas_gets_a_2d_context() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(200);

    let ctx = canvas.get_context("2d").unwrap();
    assert!(ctx.is_some());
}

#[wasm_bindgen_test]
fn scene_runs_in_the_browser() {
    let mut scene = Scene::new(SceneConfig::default(), Viewport::new(320.0, 200.0), 5).unwrap();
    let mut surface = RecordingSurface::new(320.0, 200.0);
    let stats = scene.frame(&mut surface, 1.0 / 60.0);
    assert_eq!(surface.size().x, 320.0);
    assert!(stats.particles_drawn > 0);
}

#[wasm_bindgen_test]
fn dark_mode_round_trips_through_local_storage() {
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.remove_item(DARK_MODE_KEY).unwrap();

    let mut pref = ThemePreference::load(Local(storage.clone()));
    assert_eq!(pref.theme(), Theme::Light);
    pref.toggle().unwrap();
    assert_eq!(storage.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

    let reloaded = ThemePreference::load(Local(storage.clone()));
    assert_eq!(reloaded.theme(), Theme::Dark);
    storage.remove_item(DARK_MODE_KEY).unwrap();
}
