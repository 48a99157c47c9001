//! Cleaning Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent};

    use cleaning_rush::Settings;
    use cleaning_rush::backdrop::Backdrop;
    use cleaning_rush::coach::fetch_tip;
    use cleaning_rush::renderer::{CanvasPainter, RenderOptions, render};
    use cleaning_rush::sim::{GameEvent, GameState, PointerTracker, TickInput, Viewport, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tracker: PointerTracker,
        settings: Settings,
        canvas: HtmlCanvasElement,
        document: Document,
        painter: CanvasPainter,
        /// Randomness for backdrop layers, kept apart from the simulation RNG
        backdrop_rng: Pcg32,
        sponge_ready: bool,
        /// Set by the resize listener, applied at the start of the next frame
        pending_resize: bool,
    }

    fn window_viewport(window: &web_sys::Window) -> Viewport {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        Viewport::new(width as f32, height as f32)
    }

    impl Game {
        /// Match the canvas to the window and rebuild size-dependent layers
        fn apply_resize(&mut self) -> Result<(), JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let viewport = window_viewport(&window);
            self.canvas.set_width(viewport.width as u32);
            self.canvas.set_height(viewport.height as u32);
            self.state.resize(viewport);

            let backdrop = Backdrop::generate(
                viewport.width as u32,
                viewport.height as u32,
                &mut self.backdrop_rng,
            );
            self.painter.set_backdrop(&self.document, &backdrop)?;
            self.pending_resize = false;
            Ok(())
        }

        /// Sample input, step the simulation and hand back host events
        fn update(&mut self, time: f64) -> Vec<GameEvent> {
            if self.pending_resize {
                if let Err(e) = self.apply_resize() {
                    log::error!("Resize failed: {:?}", e);
                }
            }
            let pointer = self.tracker.sample(time);
            tick(&mut self.state, &TickInput { now_ms: time, pointer });
            self.state.drain_events()
        }

        fn render(&self) {
            let options = RenderOptions {
                sponge_ready: self.sponge_ready,
                reduced_motion: self.settings.reduced_motion,
            };
            let frame = render(&self.state, self.tracker.state(), &options);
            if let Err(e) = self.painter.paint(&frame) {
                log::warn!("Paint error: {:?}", e);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("Logger init failed: {}", e)));
        }

        log::info!("Cleaning Rush starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let viewport = window_viewport(&window);

        let painter = CanvasPainter::new(&canvas)?;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, viewport, now),
            tracker: PointerTracker::new(now),
            settings,
            canvas: canvas.clone(),
            document: document.clone(),
            painter,
            backdrop_rng: Pcg32::seed_from_u64(seed ^ 0x5EED),
            sponge_ready: false,
            pending_resize: false,
        }));
        game.borrow_mut().apply_resize()?;

        log::info!("Game initialized with seed: {}", seed);

        load_sponge(game.clone())?;
        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Cleaning Rush running!");
        Ok(())
    }

    /// Start loading the sponge cursor image. Until it loads, the cursor is a plain circle.
    fn load_sponge(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let url = game.borrow().settings.sponge_url.clone();
        if url.is_empty() {
            log::info!("No sponge image configured");
            return Ok(());
        }
        let image = HtmlImageElement::new()?;
        image.set_cross_origin(Some("anonymous"));

        let loaded = image.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            let mut g = game.borrow_mut();
            g.painter.set_sponge(loaded.clone());
            g.sponge_ready = true;
            log::info!("Sponge image loaded");
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::<dyn FnMut()>::new(move || {
            log::warn!("Sponge image failed to load, using plain cursor");
        });
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        image.set_src(&url);
        Ok(())
    }

    fn touch_position(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .tracker
                    .on_move(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .tracker
                    .on_down(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().tracker.on_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&canvas_clone, &event) {
                    game.borrow_mut().tracker.on_down(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&canvas_clone, &event) {
                    game.borrow_mut().tracker.on_move(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().tracker.on_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().pending_resize = true;
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Fire one coach request. The answer is dropped if the player moved on.
    fn request_tip(game: Rc<RefCell<Game>>, tip: cleaning_rush::coach::TipRequest) {
        let settings = game.borrow().settings.coach.clone();
        let session = tip.session;
        wasm_bindgen_futures::spawn_local(async move {
            let text = fetch_tip(settings, tip).await;
            game.borrow_mut().state.deliver_tip(session, text);
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let events = {
            let mut g = game.borrow_mut();
            let events = g.update(time);
            g.render();
            events
        };

        for event in events {
            match event {
                GameEvent::ScreenChanged { from, to } => {
                    log::debug!("Host saw {:?} -> {:?}", from, to);
                }
                GameEvent::CoachRequested(tip) => request_tip(game.clone(), tip),
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cleaning Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    let settings = cleaning_rush::Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    for (motion_index, mode) in [
        (0, cleaning_rush::sim::GameMode::Speed),
        (4, cleaning_rush::sim::GameMode::Endurance),
    ] {
        autopilot_session(seed, motion_index, mode, &settings);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one session start to finish and print the outcome
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_session(
    seed: u64,
    motion_index: usize,
    mode: cleaning_rush::sim::GameMode,
    settings: &cleaning_rush::Settings,
) {
    use cleaning_rush::coach::{FALLBACK_TIP, resolve_tip};
    use cleaning_rush::renderer::{RenderOptions, render};
    use cleaning_rush::sim::{
        Autopilot, GameEvent, GameState, PointerTracker, ScreenKind, TickInput, Viewport, tick,
    };

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 30_000;

    let mut state = GameState::new(seed, Viewport::new(1280.0, 720.0), 0.0);
    let mut tracker = PointerTracker::new(0.0);
    let mut pilot = Autopilot::new(motion_index, mode);
    let options = RenderOptions {
        sponge_ready: false,
        reduced_motion: settings.reduced_motion,
    };

    let mut now = 0.0;
    let mut draw_calls = 0usize;
    for frame in 0..MAX_FRAMES {
        now += FRAME_MS;
        let target = pilot.next(&state);
        tracker.on_move(target.x, target.y);
        let pointer = tracker.sample(now);
        tick(&mut state, &TickInput { now_ms: now, pointer });
        draw_calls += render(&state, &pointer, &options).commands.len();

        for event in state.drain_events() {
            match event {
                GameEvent::ScreenChanged { to, .. } => {
                    println!("  frame {:>5}: {:?}", frame, to);
                    if let (ScreenKind::Menu, Some(result)) = (to, state.result) {
                        println!(
                            "Session done: {} / {} success={} score={:.1} ({} draw commands)",
                            result.motion.flat_label(),
                            result.mode.as_str(),
                            result.success,
                            result.score,
                            draw_calls
                        );
                        return;
                    }
                }
                GameEvent::CoachRequested(tip) => {
                    // No network natively: show the offline fallback
                    println!("  coach prompt: {}", tip.prompt().lines().next().unwrap_or_default());
                    let text = resolve_tip(Err(cleaning_rush::coach::CoachError::NotConfigured));
                    debug_assert_eq!(text, FALLBACK_TIP);
                    state.deliver_tip(tip.session, text);
                }
            }
        }
    }
    log::warn!("Autopilot gave up after {} frames on {:?}", MAX_FRAMES, state.kind());
}
