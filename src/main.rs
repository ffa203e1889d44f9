//! Lobshot entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use lobshot::consts::*;
    use lobshot::renderer::RenderState;
    use lobshot::sim::{GameEvent, GameState, TickInput, tick};
    use lobshot::{Settings, Tuning, screen_to_world};

    /// LocalStorage key for optional tuning overrides
    const TUNING_KEY: &str = "lobshot_tuning";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Held aim keys (-1, 0, +1)
        aim_held: f32,
        /// Held power keys (-1, 0, +1)
        power_held: f32,
        /// Canvas CSS size, for pointer mapping
        canvas_size: (f32, f32),
        // FPS tracking
        frames: u32,
        fps_window_start: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed, tuning),
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                aim_held: 0.0,
                power_held: 0.0,
                canvas_size: (1.0, 1.0),
                frames: 0,
                fps_window_start: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let mut input = self.input.clone();
                input.aim_delta = self.aim_held;
                input.power_delta = self.power_held;
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.launch = false;
                self.input.restart = false;
            }

            for event in self.state.drain_events() {
                if let GameEvent::TargetHit { id, score } = event {
                    log::info!("Hit target {} (score {})", id, score);
                }
            }

            self.frames += 1;
            if time - self.fps_window_start >= 1000.0 {
                if self.settings.show_fps {
                    log::info!("FPS: {}", self.frames);
                }
                self.frames = 0;
                self.fps_window_start = time;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn load_tuning() -> Tuning {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(TUNING_KEY).ok().flatten());
        Tuning::load_or_default(json.as_deref())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lobshot starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, load_tuning(), Settings::load())));
        game.borrow_mut().canvas_size = (client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Lobshot running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse aim
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.settings.mouse_aim {
                    return;
                }
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                let (w, h) = g.canvas_size;
                g.input.pointer = Some(screen_to_world(x, y, w, h));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click to fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.launch = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let window = web_sys::window().unwrap();

        // Keyboard: held aim/power keys, one-shot fire/restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        g.input.launch = true;
                    }
                    "ArrowUp" | "w" | "W" => g.power_held = 1.0,
                    "ArrowDown" | "s" | "S" => g.power_held = -1.0,
                    "ArrowLeft" | "a" | "A" => {
                        g.input.pointer = None;
                        g.aim_held = 1.0;
                    }
                    "ArrowRight" | "d" | "D" => {
                        g.input.pointer = None;
                        g.aim_held = -1.0;
                    }
                    "r" | "R" => {
                        g.input.restart = true;
                    }
                    "t" | "T" => {
                        g.settings.show_trajectory = !g.settings.show_trajectory;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" | "ArrowDown" | "s" | "S" => g.power_held = 0.0,
                    "ArrowLeft" | "a" | "A" | "ArrowRight" | "d" | "D" => g.aim_held = 0.0,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
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
    env_logger::init();
    log::info!("Lobshot (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let tuning_json = std::env::args().nth(1).and_then(|path| {
        std::fs::read_to_string(&path)
            .map_err(|e| log::warn!("Could not read tuning file {}: {}", path, e))
            .ok()
    });
    let tuning = lobshot::Tuning::load_or_default(tuning_json.as_deref());

    demo::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted volley for headless runs
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use lobshot::Tuning;
    use lobshot::consts::SIM_DT;
    use lobshot::deg_to_rad;
    use lobshot::sim::{GameEvent, GameState, Segment, TickInput, segment_lit, tick};

    /// (angle in degrees, power)
    const VOLLEY: [(f32, f32); 6] = [
        (45.0, 40.0),
        (60.0, 40.0),
        (30.0, 35.0),
        (50.0, 48.0),
        (70.0, 55.0),
        (40.0, 30.0),
    ];

    const MAX_FLIGHT_TICKS: usize = 20_000;

    pub fn run(tuning: Tuning) {
        let mut state = GameState::new(2024, tuning);

        for (shot, &(angle, power)) in VOLLEY.iter().enumerate() {
            state.cannon.angle = state.tuning.clamp_aim(deg_to_rad(angle));
            state.cannon.power = state.tuning.clamp_power(power);

            let fire = TickInput {
                launch: true,
                ..Default::default()
            };
            tick(&mut state, &fire, SIM_DT);

            let idle = TickInput::default();
            let mut ticks = 1;
            while state.projectile.in_flight() && ticks < MAX_FLIGHT_TICKS {
                tick(&mut state, &idle, SIM_DT);
                ticks += 1;
            }

            let events = state.drain_events();
            let bounces = events
                .iter()
                .filter(|e| matches!(e, GameEvent::FloorBounce { .. }))
                .count();
            let hits = events
                .iter()
                .filter(|e| matches!(e, GameEvent::TargetHit { .. }))
                .count();
            println!(
                "shot {}: {:>4.0} deg, power {:>4.1} -> {} ticks, {} floor bounces, {} hits",
                shot + 1,
                angle,
                power,
                ticks,
                bounces,
                hits
            );
        }

        println!(
            "\nscore {} after {} shots (level {})",
            state.score.value(),
            state.shots_fired,
            state.level_index
        );
        for line in ascii_digit(state.score.value()) {
            println!("  {}", line);
        }
    }

    /// Five-line seven-segment rendering of a digit
    fn ascii_digit(digit: u8) -> [String; 5] {
        let h = |s| if segment_lit(digit, s) { "###" } else { "   " };
        let v = |s| if segment_lit(digit, s) { "#" } else { " " };
        [
            format!(" {} ", h(Segment::A)),
            format!("{}   {}", v(Segment::F), v(Segment::B)),
            format!(" {} ", h(Segment::G)),
            format!("{}   {}", v(Segment::E), v(Segment::C)),
            format!(" {} ", h(Segment::D)),
        ]
    }
}
