//! Disc Arena entry point
//!
//! Native: headless run at a fixed frame rate, logging progress.
//! Web: canvas front end driven by `requestAnimationFrame`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use disc_arena::platform::Key;
    use disc_arena::renderer::{CanvasSurface, FrameSignals};
    use disc_arena::{Game, Settings};

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(f.as_ref().unchecked_ref());
        }
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        let _ = element.style().set_property(property, value);
    }

    /// Mirror the frame signals onto the canvas filter and the overlays
    fn apply_signals(canvas: &HtmlCanvasElement, document: &Document, signals: FrameSignals) {
        set_style(canvas, "filter", if signals.grayscale { "grayscale(1)" } else { "" });

        for (id, visible) in [
            ("pause", signals.pause_visible),
            ("gameover", signals.gameover_visible),
        ] {
            if let Some(el) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                set_style(&el, "visibility", if visible { "visible" } else { "hidden" });
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;

        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings {
            width: width as f32,
            height: height as f32,
            seed: Some(js_sys::Date::now() as u64),
            ..Default::default()
        };
        let game = Rc::new(RefCell::new(Game::new(&settings)));
        let surface = Rc::new(RefCell::new(CanvasSurface::new(
            ctx,
            width as f32,
            height as f32,
        )));

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_down(Key::from_code(&event.code()));
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().key_up(Key::from_code(&event.code()));
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key-ups are lost while unfocused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let frame_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let first = frame_cb.clone();
        *first.borrow_mut() = Some(Closure::new(move || {
            let signals = game.borrow_mut().frame(&mut *surface.borrow_mut());
            apply_signals(&canvas, &document, signals);
            if let Some(cb) = frame_cb.borrow().as_ref() {
                request_animation_frame(cb);
            }
        }));
        if let Some(cb) = first.borrow().as_ref() {
            request_animation_frame(cb);
        }

        log::info!("Disc Arena started ({}x{})", width, height);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::ops::ControlFlow;

    use disc_arena::platform::{FixedRateScheduler, Scheduler};
    use disc_arena::renderer::{VertexSurface, vertex};
    use disc_arena::sim::Status;
    use disc_arena::{Game, Settings};

    env_logger::init();
    log::info!("Disc Arena (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::error!("{}; falling back to defaults", e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let mut game = Game::new(&settings);
    let mut surface = VertexSurface::new(settings.width, settings.height);
    let mut scheduler = FixedRateScheduler::new(settings.frame_rate_hz, settings.max_frames);
    let report_every = settings.frame_rate_hz.max(1) as u64;

    let frames = scheduler.run(|frame| {
        game.frame(&mut surface);

        let world = game.world();
        if frame % report_every == 0 {
            let player_health = world.controlled().next().map(|p| p.health());
            log::info!(
                "frame {}: {} entities, player health {:?}, {} bytes of vertex data",
                frame,
                world.entities.len(),
                player_health,
                vertex::as_bytes(surface.vertices()).len()
            );
        }

        if world.status == Status::Lost {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    log::info!(
        "Stopped after {} frames ({} simulated ticks), status {:?}, seed {}",
        frames,
        game.world().time_ticks,
        game.status(),
        game.seed()
    );
}
