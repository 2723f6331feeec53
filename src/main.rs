//! Steer Clear entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, TouchList};

    use steer_clear::audio::AudioManager;
    use steer_clear::consts::SIM_DT;
    use steer_clear::input::{key_from_code, key_from_name};
    use steer_clear::renderer::CanvasSurface;
    use steer_clear::sim::Arena;
    use steer_clear::{ConfigError, Session, Settings, Tuning};

    type Game = Session<CanvasSurface, AudioManager>;

    /// Wall-clock bookkeeping for requestAnimationFrame
    struct Driver {
        session: Game,
        last_time: f64,
    }

    pub fn run() -> Result<(), ConfigError> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Steer Clear starting...");

        let window = web_sys::window().ok_or(ConfigError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(ConfigError::MissingElement("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(ConfigError::MissingElement("#game-canvas"))?;

        // Canvas fills the viewport at startup
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let arena = Arena::new(width as f32, height as f32);

        let tuning = match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json)?,
            None => Tuning::default(),
        };
        let settings = match canvas.get_attribute("data-settings") {
            Some(json) => Settings::from_json(&json)?,
            None => Settings::default(),
        };

        let surface = CanvasSurface::new(&canvas)?;
        let audio = AudioManager::new(&settings);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, arena, tuning, settings, surface, audio);

        let driver = Rc::new(RefCell::new(Driver {
            session,
            last_time: 0.0,
        }));

        setup_input_handlers(driver.clone());
        setup_restart(driver.clone());
        request_animation_frame(driver);

        log::info!("Steer Clear running!");
        Ok(())
    }

    fn touch_xs(touches: &TouchList) -> Vec<f32> {
        (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| t.client_x() as f32)
            .collect()
    }

    fn setup_input_handlers(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = key_from_name(&event.key()).or_else(|| key_from_code(event.key_code()));
                if let Some(key) = key {
                    event.prevent_default();
                    driver.borrow_mut().session.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = key_from_name(&event.key()).or_else(|| key_from_code(event.key_code()));
                if let Some(key) = key {
                    driver.borrow_mut().session.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - left/right half of the screen
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let xs = touch_xs(&event.changed_touches());
                let mut d = driver.borrow_mut();
                d.session.audio().resume();
                d.session.touch_start(&xs);
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let xs = touch_xs(&event.changed_touches());
                driver.borrow_mut().session.touch_end(&xs);
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Any click after death starts a new game
    fn setup_restart(driver: Rc<RefCell<Driver>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut d = driver.borrow_mut();
            d.session.audio().resume();
            let seed = js_sys::Date::now() as u64;
            if d.session.restart(seed) {
                d.last_time = 0.0;
            }
        });
        let _ =
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(driver, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(driver: Rc<RefCell<Driver>>, time: f64) {
        {
            let mut d = driver.borrow_mut();

            // Calculate delta time
            let dt = if d.last_time > 0.0 {
                ((time - d.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            d.last_time = time;

            d.session.frame(dt);
        }

        request_animation_frame(driver);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Steer Clear (native) starting...");
    log::info!("The playable build runs in the browser; running a headless autopilot instead");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let tuning = match args.next() {
        Some(path) => match steer_clear::Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => steer_clear::Tuning::default(),
    };

    let (score, ticks) = autopilot::run(seed, tuning);
    println!("Autopilot finished: score {} after {} ticks", score, ticks);
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use steer_clear::audio::SilentAudio;
    use steer_clear::consts::{FRAME_RATE, SIM_DT};
    use steer_clear::renderer::RecordingSurface;
    use steer_clear::sim::{Arena, GameState, Key};
    use steer_clear::{Session, Settings, Tuning};

    /// Give up after five minutes of game time
    const MAX_TICKS: u64 = FRAME_RATE as u64 * 60 * 5;

    /// Steer toward the goal: press whichever key closes the heading gap
    fn choose_key(state: &GameState) -> Option<Key> {
        let to_goal = state.goal.pos - state.player.pos;
        let target = to_goal.y.atan2(to_goal.x);
        let gap = steer_clear::normalize_angle(target - state.player.heading());
        let turn = state.tuning.player.turn_increment;
        if gap < turn / 2.0 || gap > std::f32::consts::TAU - turn / 2.0 {
            None
        } else if gap < std::f32::consts::PI {
            Some(Key::Right)
        } else {
            Some(Key::Left)
        }
    }

    pub fn run(seed: u64, tuning: Tuning) -> (u64, u64) {
        let mut session = Session::new(
            seed,
            Arena::new(1024.0, 768.0),
            tuning,
            Settings::default(),
            RecordingSurface::new(),
            SilentAudio,
        );

        let mut ticks = 0;
        while session.is_running() && ticks < MAX_TICKS {
            session.key_up(Key::Left);
            session.key_up(Key::Right);
            if let Some(key) = choose_key(session.state()) {
                session.key_down(key);
            }
            session.surface_mut().clear();
            for event in session.frame(SIM_DT) {
                log::debug!("{:?}", event);
            }
            ticks += 1;
        }

        log::info!(
            "Autopilot stopped after {} ticks (score {}, health {})",
            ticks,
            session.state().score,
            session.state().player.health()
        );
        (session.state().score, ticks)
    }
}
