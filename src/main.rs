//! Plinko Heat entry point
//!
//! Browser: waits for a click on the poster, then runs the frame loop on the
//! canvas. Native: runs the board headless and prints the hit report.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_board {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use plinko_heat::Settings;
    use plinko_heat::platform::CanvasSurface;
    use plinko_heat::sim::{FrameEvent, Simulation};

    /// Board instance driven by the animation frame loop
    struct Game {
        sim: Simulation,
        surface: CanvasSurface,
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(f.as_ref().unchecked_ref());
        }
    }

    /// Run one frame per repaint, forever
    fn start_loop(game: Rc<RefCell<Game>>) {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let first = tick.clone();

        *first.borrow_mut() = Some(Closure::new(move || {
            if let Some(cb) = tick.borrow().as_ref() {
                request_animation_frame(cb);
            }

            let mut g = game.borrow_mut();
            let Game { sim, surface } = &mut *g;
            if sim.frame(surface) == FrameEvent::Respawned {
                log::debug!("Ball #{} dropped", sim.balls());
            }
        }));

        if let Some(cb) = first.borrow().as_ref() {
            request_animation_frame(cb);
        }
    }

    /// Clear the poster and fade it out
    fn hide_poster(poster: &web_sys::Element) {
        poster.set_inner_html("");
        let _ = poster.class_list().add_1("disolve");
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Plinko Heat starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let Some(surface) = CanvasSurface::from_canvas(&canvas) else {
            log::error!("Canvas has no 2d context");
            return;
        };

        let mut settings = Settings::load();
        // Store the effective settings so they can be edited in LocalStorage
        settings.save();
        settings.seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            sim: Simulation::new(settings),
            surface,
        }));

        let Some(poster) = document.query_selector(".poster").ok().flatten() else {
            log::warn!("No .poster element, starting immediately");
            start_loop(game);
            return;
        };

        // The poster starts the board once, then gets out of the way
        let target = poster.clone();
        let mut pending = Some(game);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            if let Some(game) = pending.take() {
                hide_poster(&target);
                log::info!("Board started");
                start_loop(game);
            }
        });
        let _ = poster.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_board::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use plinko_heat::Settings;
    use plinko_heat::renderer::VertexBatch;
    use plinko_heat::sim::Simulation;

    /// Frames simulated when no count is given
    const DEFAULT_FRAMES: u64 = 10_000;

    env_logger::init();
    log::info!("Plinko Heat (native) starting...");

    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid frame count {:?}, using {}", arg, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }),
        None => DEFAULT_FRAMES,
    };
    let settings = match args.next() {
        Some(path) => Settings::load_file(std::path::Path::new(&path)),
        None => Settings::default(),
    };

    let mut sim = Simulation::new(settings);
    let mut batch = VertexBatch::default();
    for _ in 0..frames {
        sim.frame(&mut batch);
    }

    let report = sim.report();
    log::info!(
        "{} frames, {} balls, {} bounces, last frame {} vertices ({} bytes)",
        report.frames,
        report.balls,
        report.total_hits,
        batch.len(),
        batch.as_bytes().len()
    );
    for peg in report.hottest(5) {
        log::info!("peg {} at ({}, {}): {} hits", peg.id, peg.x, peg.y, peg.hits);
    }

    match report.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
