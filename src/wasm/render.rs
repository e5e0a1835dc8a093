use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::DVec2;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent, Window,
};

use crate::surface::{Color, Paint, Stroke, Surface};
use crate::{HeroConfig, HeroField, Scene, SceneConfig, Viewport};

/// Longest step handed to the scene; keeps the pulse clock sane after the
/// tab was in the background.
const MAX_DT: f64 = 0.1;

/// [`Surface`] backed by a 2D canvas context.
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas not supported")?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    fn path(&self, points: &[DVec2], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        if closed {
            self.ctx.close_path();
        }
    }

    fn circle(&self, center: DVec2, radius: f64) -> bool {
        self.ctx.begin_path();
        match self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            Ok(()) => true,
            Err(err) => {
                log::trace!("arc r={radius} rejected: {err:?}");
                false
            }
        }
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_string());
        self.ctx.set_line_width(stroke.width);
    }

    fn apply_paint(&self, paint: &Paint) -> Result<(), JsValue> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_string()),
            Paint::Radial(g) => {
                let gradient = self.ctx.create_radial_gradient(
                    g.center.x, g.center.y, 0.0, g.center.x, g.center.y, g.radius,
                )?;
                for (offset, color) in &g.stops {
                    gradient.add_color_stop(*offset, &color.to_string())?;
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> DVec2 {
        DVec2::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_shadow(&mut self, color: Color, blur: f64) {
        self.ctx.set_shadow_color(&color.to_string());
        self.ctx.set_shadow_blur(blur);
    }

    fn clear_rect(&mut self, origin: DVec2, size: DVec2) {
        self.ctx.clear_rect(origin.x, origin.y, size.x, size.y);
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(origin.x, origin.y, size.x, size.y);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        if let Err(err) = self.apply_paint(paint) {
            log::trace!("paint rejected: {err:?}");
            return;
        }
        if self.circle(center, radius) {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: Stroke) {
        self.apply_stroke(stroke);
        if self.circle(center, radius) {
            self.ctx.stroke();
        }
    }

    fn stroke_path(&mut self, points: &[DVec2], closed: bool, stroke: Stroke) {
        self.apply_stroke(stroke);
        self.path(points, closed);
        self.ctx.stroke();
    }
}

/// Full-window overlay canvas for pages that do not ship their own `#c`.
pub fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id("c");
    canvas.style().set_css_text(
        "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
         pointer-events: none; z-index: 1; opacity: 0.8; mix-blend-mode: screen;",
    );
    document.body().ok_or("no body")?.append_child(&canvas)?;
    Ok(canvas)
}

fn window_viewport(window: &Window) -> Option<Viewport> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(w, h))
}

fn fit(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}

/// Calls `step` with the frame timestamp on every animation frame.
fn animate(mut step: impl FnMut(f64) + 'static) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. The `Option` lets the closure be
    // created first and referenced from within afterwards.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        step(now);

        // schedule next
        let scheduled = window().zip(f.borrow().as_ref()).map(|(w, cb)| {
            w.request_animation_frame(cb.as_ref().unchecked_ref())
        });
        if !matches!(scheduled, Some(Ok(_))) {
            log::error!("could not schedule the next animation frame");
        }
    }) as Box<dyn FnMut(f64)>));

    let first = g.borrow();
    let first = first.as_ref().ok_or("animation closure missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(first.as_ref().unchecked_ref())?;
    Ok(())
}

/// Builds the scene for `canvas` and starts the animation loop.
pub fn start(canvas: HtmlCanvasElement, seed: u64) -> Result<(), JsValue> {
    let mut surface = CanvasSurface::new(canvas.clone())?;
    let win = window().ok_or("no window")?;

    let viewport = window_viewport(&win).unwrap_or_default();
    fit(&canvas, viewport);
    let scene = Scene::new(SceneConfig::default(), viewport, seed).map_err(super::to_js)?;
    let scene = Rc::new(RefCell::new(scene));

    // Resize canvas to fit window
    let resize_closure = {
        let canvas = canvas.clone();
        let scene = scene.clone();
        Closure::wrap(Box::new(move || {
            let Some(viewport) = window().as_ref().and_then(window_viewport) else {
                return;
            };
            fit(&canvas, viewport);
            scene.borrow_mut().resize(viewport);
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let move_closure = {
        let scene = scene.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            scene
                .borrow_mut()
                .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    win.add_event_listener_with_callback("mousemove", move_closure.as_ref().unchecked_ref())?;
    move_closure.forget();

    let click_closure = {
        let scene = scene.clone();
        Closure::wrap(Box::new(move |_: MouseEvent| {
            scene.borrow_mut().clicked();
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    win.add_event_listener_with_callback("mousedown", click_closure.as_ref().unchecked_ref())?;
    click_closure.forget();

    let mut last: Option<f64> = None;
    animate(move |now| {
        let dt = last.map_or(0.0, |prev| ((now - prev) / 1000.0).clamp(0.0, MAX_DT));
        last = Some(now);
        scene.borrow_mut().frame(&mut surface, dt);
    })?;
    log::info!("background scene running at {}x{}", viewport.width, viewport.height);
    Ok(())
}

fn element_viewport(element: &HtmlElement) -> Viewport {
    Viewport::new(
        f64::from(element.offset_width()),
        f64::from(element.offset_height()),
    )
}

/// Adds a canvas covering `hero` and runs the depth-tinted particle layer on
/// it. The canvas follows the element's size on window resize.
pub fn start_hero(document: &Document, hero: HtmlElement, seed: u64) -> Result<(), JsValue> {
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_class_name("hero-particle-canvas");
    canvas.style().set_css_text(
        "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
         pointer-events: none; z-index: 1;",
    );
    hero.append_child(&canvas)?;

    let viewport = element_viewport(&canvas);
    fit(&canvas, viewport);
    let field = HeroField::new(HeroConfig::default(), viewport, seed).map_err(super::to_js)?;
    let field = Rc::new(RefCell::new(field));

    let resize_closure = {
        let canvas = canvas.clone();
        let field = field.clone();
        Closure::wrap(Box::new(move || {
            let viewport = element_viewport(&canvas);
            fit(&canvas, viewport);
            field.borrow_mut().resize(viewport);
        }) as Box<dyn FnMut()>)
    };
    window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let mut surface = CanvasSurface::new(canvas)?;
    animate(move |_| {
        field.borrow_mut().frame(&mut surface);
    })?;
    log::info!("hero particles running at {}x{}", viewport.width, viewport.height);
    Ok(())
}
