//! Browser host for the splash field.
//!
//! Draws on a full-viewport 2D `<canvas>`, drives `FrameDriver` from
//! `requestAnimationFrame` and wires the page listeners the effect reacts to.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, Node, Window};

use crate::app::frame_loop::FrameDriver;
use crate::app::state::{self, SplashCommand};
use crate::app::triggers::{EmissionPlanner, PageEvent};
use crate::color::SplashColor;
use crate::config::CANVAS_ELEMENT_ID;
use crate::engine::ParticleFieldEngine;
use crate::init_config::SplashConfigFile;
use crate::surface::{Surface, Viewport};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn set_fill_color(&mut self, css: &str) {
        self.ctx.set_fill_style_str(css);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

struct WindowViewport(Window);

impl Viewport for WindowViewport {
    fn inner_size(&self) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
        };
        (dim(self.0.inner_width()), dim(self.0.inner_height()))
    }
}

type Driver = FrameDriver<CanvasSurface>;

fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn js_err(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

/// Handle returned to page scripts.
#[wasm_bindgen]
pub struct SplashHandle {
    driver: Rc<RefCell<Driver>>,
    window: Window,
}

#[wasm_bindgen]
impl SplashHandle {
    /// Splash at (x, y) on the next frame; `color` is any CSS hex or color name.
    pub fn emit(&self, x: f64, y: f64, color: Option<String>) -> bool {
        let color = color.and_then(|c| match SplashColor::parse(&c) {
            Ok(color) => Some(color),
            Err(e) => {
                log::warn!("{e}; using the default color");
                None
            }
        });
        state::emit(x, y, color)
    }

    /// Call when the document modal opens.
    pub fn modal_opened(&self) {
        let t = now(&self.window);
        self.driver.borrow_mut().page_event(PageEvent::ModalOpened, t);
    }

    pub fn stop(&self) {
        self.driver.borrow_mut().stop();
    }

    pub fn active_splashes(&self) -> usize {
        self.driver.borrow().engine().splash_count()
    }
}

/// Attaches the effect to `canvas_id` (default `paintCanvas`) and starts the
/// frame loop.
#[wasm_bindgen]
pub fn start(canvas_id: Option<String>) -> Result<SplashHandle, JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;
    let id = canvas_id.unwrap_or_else(|| CANVAS_ELEMENT_ID.to_string());
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(&id)
        .ok_or_else(|| js_err(&format!("missing #{id}")))?
        .dyn_into()
        .map_err(|_| js_err(&format!("#{id} is not a canvas")))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| js_err("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| js_err("unexpected 2d context type"))?;

    // No filesystem in the browser: built-in defaults only.
    let config = SplashConfigFile::default();
    let viewport = WindowViewport(window.clone());
    let size = viewport.inner_size();

    let mut engine = ParticleFieldEngine::new(CanvasSurface { canvas, ctx }, config.splash);
    engine.resize(&viewport);
    let planner = EmissionPlanner::new(config.triggers, size);
    let (tx, rx) = state::create_channel();
    state::install_sender(tx);
    let driver = Rc::new(RefCell::new(FrameDriver::new(engine, planner, rx)));

    install_listeners(&window, &document, &driver)?;
    driver
        .borrow_mut()
        .page_event(PageEvent::Loaded, now(&window));
    start_frame_loop(&window, driver.clone())?;

    log::info!("paint splash running on #{id}");
    Ok(SplashHandle { driver, window })
}

fn install_listeners(
    window: &Window,
    document: &web_sys::Document,
    driver: &Rc<RefCell<Driver>>,
) -> Result<(), JsValue> {
    {
        let window_for_size = window.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = WindowViewport(window_for_size.clone()).inner_size();
            state::send_command(SplashCommand::Resize { width, height });
        });
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    {
        let driver = driver.clone();
        let window_for_time = window.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let mut driver = driver.borrow_mut();
            let target_excluded = match &target {
                Some(el) => driver
                    .planner()
                    .click_excluded_by(|sel| matches!(el.closest(sel), Ok(Some(_)))),
                None => false,
            };
            let x = event.client_x() as f64;
            let y = event.client_y() as f64;
            driver.page_event(PageEvent::Click { x, y, target_excluded }, now(&window_for_time));
        });
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    {
        let driver = driver.clone();
        let window_for_time = window.clone();
        let selector = driver.borrow().planner().config().card_selector.clone();
        // Delegated `mouseenter`: react only when the pointer comes from
        // outside the card, not when it moves between the card's children.
        let on_over = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let card = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(&selector).ok().flatten());
            let Some(card) = card else { return };
            let from = event.related_target().and_then(|t| t.dyn_into::<Node>().ok());
            if card.contains(from.as_ref()) {
                return;
            }
            let rect = card.get_bounding_client_rect();
            driver.borrow_mut().page_event(
                PageEvent::CardEntered {
                    left: rect.left(),
                    top: rect.top(),
                    width: rect.width(),
                    height: rect.height(),
                },
                now(&window_for_time),
            );
        });
        document.add_event_listener_with_callback("mouseover", on_over.as_ref().unchecked_ref())?;
        on_over.forget();
    }

    {
        let driver = driver.clone();
        let window_for_time = window.clone();
        let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let x = event.client_x() as f64;
            let y = event.client_y() as f64;
            driver
                .borrow_mut()
                .page_event(PageEvent::PointerMove { x, y }, now(&window_for_time));
        });
        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let driver = driver.clone();
        let window_for_scroll = window.clone();
        let on_scroll = Closure::<dyn FnMut()>::new(move || {
            let scroll_y = window_for_scroll.scroll_y().unwrap_or(0.0);
            let document_height = window_for_scroll
                .document()
                .and_then(|d| d.document_element())
                .map(|el| el.scroll_height() as f64)
                .unwrap_or(0.0);
            driver.borrow_mut().page_event(
                PageEvent::Scroll { scroll_y, document_height },
                now(&window_for_scroll),
            );
        });
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();
    }

    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop(window: &Window, driver: Rc<RefCell<Driver>>) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let window_for_loop = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if !driver.borrow_mut().on_frame(timestamp) {
            log::info!("paint splash stopped");
            return;
        }
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = window_for_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }));

    let first = callback.borrow();
    let cb = first.as_ref().ok_or_else(|| js_err("frame callback missing"))?;
    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}
