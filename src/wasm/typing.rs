use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Window};

use super::js_error;
use crate::error::FxResult;
use crate::text::{StatCounter, Typewriter};

const TYPE_DELAY_MS: i32 = 500;
const TYPE_STEP_MS: i32 = 50;
const COUNTER_DELAY_MS: i32 = 300;
const COUNTER_STEP_MS: i32 = 16;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs `step` every `interval_ms` after `delay_ms` until it returns `false`.
fn repeat(window: &Window, delay_ms: i32, interval_ms: i32, mut step: impl FnMut() -> bool + 'static) -> FxResult<()> {
    let f: Tick = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !step() {
            return;
        }
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(err) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                interval_ms,
            ) {
                log::warn!("timer rejected: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    if let Some(cb) = first.as_ref() {
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay_ms)
            .map_err(js_error)?;
    }
    Ok(())
}

fn type_title(window: &Window, title: Element) -> FxResult<()> {
    let mut writer = Typewriter::new(title.inner_html());
    title.set_inner_html("");
    repeat(window, TYPE_DELAY_MS, TYPE_STEP_MS, move || {
        if writer.step().is_none() {
            return false;
        }
        title.set_inner_html(writer.shown());
        true
    })
}

fn count_up(window: &Window, label: Element) -> FxResult<()> {
    let text = label.text_content().unwrap_or_default();
    let mut counter = StatCounter::parse(&text)?;
    repeat(window, COUNTER_DELAY_MS, COUNTER_STEP_MS, move || {
        label.set_text_content(Some(&counter.step()));
        !counter.is_done()
    })
}

/// Starts the hero typing animation and the stat counters, whichever the
/// page has.
pub fn start(window: &Window, document: &Document) -> FxResult<()> {
    if let Some(title) = document.query_selector(".hero-title").map_err(js_error)? {
        type_title(window, title)?;
    }

    let labels = document
        .query_selector_all(".about-stats .stat h3")
        .map_err(js_error)?;
    for i in 0..labels.length() {
        let Some(label) = labels.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        if let Err(err) = count_up(window, label) {
            log::debug!("skipping stat: {err}");
        }
    }
    Ok(())
}
