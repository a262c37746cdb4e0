//! Flappy Gates entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_gates::audio::WebAudio;
    use flappy_gates::platform;
    use flappy_gates::renderer::RenderState;
    use flappy_gates::sim::{GameSession, Playfield, autopilot};
    use flappy_gates::{Driver, Settings, Tuning};

    /// LocalStorage key for balance overrides
    const TUNING_KEY: &str = "flappy_gates_tuning";

    /// Game instance holding all state
    struct Game {
        driver: Driver<Option<RenderState>, WebAudio>,
        settings: Settings,
        /// Autopilot flies the avatar
        idle_mode: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(session: GameSession, settings: Settings, now_ms: f64) -> Self {
            let mut audio = WebAudio::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            let mut driver = Driver::new(session, None, audio, now_ms);
            driver.set_muted(settings.muted);

            Self {
                driver,
                settings,
                idle_mode: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn update(&mut self, time: f64) {
            if self.idle_mode && autopilot::wants_flap(self.driver.session()) {
                self.driver.jump();
            }
            self.driver.frame(time);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn jump(&mut self) {
            self.driver.audio().resume();
            self.driver.jump();
        }

        fn restart(&mut self) {
            let (w, h) = platform::viewport_size();
            let playfield = Playfield::new(w, h);
            if !self.driver.restart(playfield, platform::now_ms()) {
                return;
            }
            if let (Some((width, height)), Some(render_state)) =
                (resize_canvas(playfield), self.driver.renderer_mut())
            {
                render_state.resize(width, height);
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.driver.toggle_mute();
            self.settings.muted = muted;
            self.settings.save();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let session = self.driver.session();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&session.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("countdown") {
                match session.phase.countdown() {
                    Some(countdown) => {
                        let _ = el.set_attribute("class", "");
                        el.set_text_content(Some(&countdown.to_string()));
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if session.phase.is_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&session.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("sound-btn") {
                let label = if self.driver.is_muted() {
                    "Sound: off"
                } else {
                    "Sound: on"
                };
                el.set_text_content(Some(label));
            }
        }
    }

    /// Match the canvas backing store to the playfield, returning its new size
    fn resize_canvas(playfield: Playfield) -> Option<(u32, u32)> {
        let window = web_sys::window()?;
        let canvas = window
            .document()?
            .get_element_by_id("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let dpr = window.device_pixel_ratio();
        let width = (playfield.width as f64 * dpr) as u32;
        let height = (playfield.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        Some((width, height))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy Gates starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let (w, h) = platform::viewport_size();
        let playfield = Playfield::new(w, h);
        let (width, height) = resize_canvas(playfield).unwrap_or((w as u32, h as u32));

        let tuning: Tuning = platform::load_json(TUNING_KEY).unwrap_or_default();
        let settings = Settings::load();

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(tuning, playfield, seed);
        let game = Rc::new(RefCell::new(Game::new(
            session,
            settings,
            platform::now_ms(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;

                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, playfield).await
                        {
                            Ok(render_state) => {
                                *game.borrow_mut().driver.renderer_mut() = Some(render_state);
                            }
                            Err(e) => log::error!("Failed to create device: {:?}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {:?}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {:?}", e),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Flappy Gates running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                " " | "ArrowUp" => {
                    event.prevent_default();
                    g.jump();
                }
                "Enter" => g.restart(),
                "m" | "M" => g.toggle_mute(),
                "f" | "F" => {
                    g.settings.show_fps = !g.settings.show_fps;
                    g.settings.save();
                }
                "i" | "I" => {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("sound-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().toggle_mute();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_gates::consts::FRAME_MS;
    use flappy_gates::sim::{GameSession, Playfield, autopilot};
    use flappy_gates::{Driver, HeadlessRenderer, NullAudio, Tuning};

    /// Rounds flown by the headless demo
    const DEMO_ROUNDS: u32 = 3;
    /// Give up on a round after five simulated minutes
    const MAX_FRAMES_PER_ROUND: u32 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Flappy Gates (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Invalid tuning file {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let (w, h) = flappy_gates::platform::viewport_size();
    let playfield = Playfield::new(w, h);
    let session = GameSession::new(tuning, playfield, 0x5eed);
    let mut driver = Driver::new(session, HeadlessRenderer::default(), NullAudio, 0.0);

    // Simulated 60 Hz clock; the demo runs as fast as it can
    let mut now = 0.0;
    for round in 1..=DEMO_ROUNDS {
        for _ in 0..MAX_FRAMES_PER_ROUND {
            if driver.session().phase.is_over() {
                break;
            }
            if autopilot::wants_flap(driver.session()) {
                driver.jump();
            }
            now += FRAME_MS;
            driver.frame(now);
        }

        let session = driver.session();
        log::info!(
            "Demo round {}: score {} after {} ticks ({:?})",
            round,
            session.score,
            session.time_ticks,
            session.phase
        );
        println!("round {}: score {}", round, session.score);

        if round < DEMO_ROUNDS && !driver.restart(playfield, now) {
            // Still flying when the frame budget ran out
            break;
        }
    }

    log::info!("Rendered {} frames", driver.renderer().frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
