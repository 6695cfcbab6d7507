//! Santa Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use santa_dash::audio::AudioManager;
    use santa_dash::platform::TickSource;
    use santa_dash::renderer::{CanvasRenderer, DomScore};
    use santa_dash::sim::Viewport;
    use santa_dash::{FrameDriver, HostEvent, Settings};

    type Driver = FrameDriver<CanvasRenderer, AudioManager, DomScore>;

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        settings: Settings,
    }

    /// Records whether the driver asked for another animation frame
    #[derive(Default)]
    struct NextFrame(bool);

    impl TickSource for NextFrame {
        fn request_frame(&mut self) {
            self.0 = true;
        }
    }

    /// Current window size in CSS pixels
    fn window_size() -> Option<(f32, f32)> {
        let window = web_sys::window()?;
        let w = window.inner_width().ok()?.as_f64()?;
        let h = window.inner_height().ok()?.as_f64()?;
        Some((w as f32, h as f32))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Santa Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();

        let (width, height) = window_size().unwrap_or((
            santa_dash::consts::DEFAULT_SCREEN_WIDTH,
            santa_dash::consts::DEFAULT_SCREEN_HEIGHT,
        ));
        let viewport = Viewport::new(width, height).unwrap_or_default();

        let Some(mut renderer) = CanvasRenderer::new(canvas, document.clone()) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };
        renderer.clouds = settings.clouds;
        renderer.resize(viewport.width as u32, viewport.height as u32);

        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);
        let score = DomScore::new(document.clone(), &settings);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let mut driver = FrameDriver::new(seed, viewport, renderer, audio, score);
        if settings.autopilot {
            driver.handle(HostEvent::ToggleAutopilot, &mut NextFrame::default());
        }
        let game = Rc::new(RefCell::new(Game { driver, settings }));

        log::info!("Game initialized with seed: {}", seed);

        setup_start_button(game.clone());
        setup_input_handlers(game.clone());
        setup_resize_handler(game);

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
    }

    /// Apply a host message and keep the frame loop going if asked to
    fn dispatch(game: &Rc<RefCell<Game>>, event: HostEvent) {
        let mut next = NextFrame::default();
        game.borrow_mut().driver.handle(event, &mut next);
        if next.0 {
            request_animation_frame(game.clone());
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(btn) = document.get_element_by_id("start-btn") else {
            log::warn!("No #start-btn element; starting immediately");
            dispatch(&game, HostEvent::Start);
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(el) = document.get_element_by_id("start-screen") {
                let _ = el.set_attribute("class", "hidden");
            }
            // First user gesture: audio may start now
            game.borrow().driver.audio().resume();
            dispatch(&game, HostEvent::Start);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        dispatch(&game, HostEvent::Jump);
                    }
                    "KeyI" => dispatch(&game, HostEvent::ToggleAutopilot),
                    "KeyM" => {
                        let mut g = game.borrow_mut();
                        let Game { driver, settings } = &mut *g;
                        settings.muted = !settings.muted;
                        driver.audio_mut().apply_settings(settings);
                        settings.save();
                        log::info!("Muted: {}", settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&game, HostEvent::Jump);
            });
            let _ = document
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                dispatch(&game, HostEvent::Jump);
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some((width, height)) = window_size() else {
                return;
            };
            dispatch(&game, HostEvent::Resize { width, height });
            let mut g = game.borrow_mut();
            let viewport = g.driver.viewport();
            g.driver
                .renderer_mut()
                .resize(viewport.width as u32, viewport.height as u32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        let mut next = NextFrame::default();
        game.borrow_mut().driver.frame(&mut next);

        if next.0 {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use santa_dash::platform::{Headless, ManualTicks};
    use santa_dash::sim::Viewport;
    use santa_dash::{DriverPhase, FrameDriver, HostEvent};

    env_logger::init();
    log::info!("Santa Dash (native) starting...");
    log::info!("Native mode runs the autopilot headless - run with `trunk serve` for the web version");

    // Usage: santa-dash [seed] [max_frames]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let max_frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(10_000u32);

    let mut driver = FrameDriver::new(
        seed,
        Viewport::default(),
        Headless::default(),
        Headless::default(),
        Headless::default(),
    );
    let mut ticks = ManualTicks::default();
    driver.handle(HostEvent::ToggleAutopilot, &mut ticks);
    driver.handle(HostEvent::Start, &mut ticks);

    let mut frames = 0;
    while frames < max_frames && ticks.take() {
        driver.frame(&mut ticks);
        frames += 1;
    }

    let score = driver.state().map_or(0, |s| s.score);
    let outcome = match driver.phase() {
        DriverPhase::Ended => "crashed",
        _ => "still running",
    };
    println!(
        "seed {seed}: {frames} frames, score {score}, {} jumps, {outcome}",
        driver.audio().jump_cues
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
