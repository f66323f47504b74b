//! Sea Docking entry point
//!
//! The browser build drives the game from `requestAnimationFrame`. The native
//! build has no window; it plays a short scripted run headless and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, Window};

    use sea_docking::audio::WebAudio;
    use sea_docking::persistence::LocalStorage;
    use sea_docking::platform::key_from_dom;
    use sea_docking::renderer::canvas::CanvasSurface;
    use sea_docking::scene::{SceneId, Services};
    use sea_docking::{Game, Tuning};

    /// Tuning override read from `<script id="tuning" type="application/json">`
    const TUNING_ELEMENT: &str = "tuning";

    struct App {
        game: Game,
        surface: CanvasSurface,
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id(TUNING_ELEMENT)
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Ignoring tuning override: {e}");
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Sea Docking starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let services = Services::new(
            Box::new(WebAudio::new()),
            Box::new(LocalStorage::new()),
            load_tuning(&document),
            seed,
        );
        let game =
            Game::new(services, SceneId::Intro).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let app = Rc::new(RefCell::new(App {
            game,
            surface: CanvasSurface::new(canvas, ctx),
        }));

        setup_key_handlers(&window, app.clone())?;
        setup_auto_suspend(&window, &document, app.clone())?;
        request_animation_frame(&window, app);

        log::info!("Sea Docking running with seed {seed}");
        Ok(())
    }

    fn setup_key_handlers(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for (event, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = key_from_dom(&event.key()) else {
                    return;
                };
                event.prevent_default();
                app.borrow_mut().game.set_key(key, pressed);
            });
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_suspend(
        window: &Window,
        document: &Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.suspend();
                    log::info!("Suspended (tab hidden)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.suspend();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(window: &Window, app: Rc<RefCell<App>>) {
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed - game loop stopped");
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            let App { game, surface } = &mut *app;
            if let Err(e) = game.frame(time) {
                log::error!("Tick failed: {e}");
            }
            surface.begin_frame();
            game.render(surface);
        }

        if let Some(window) = web_sys::window() {
            request_animation_frame(&window, app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sea Docking (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    if let Err(e) = headless_demo() {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Skip the intro, start a run and free-fall into the ground until game over
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() -> Result<(), sea_docking::GameError> {
    use sea_docking::audio::SilentAudio;
    use sea_docking::persistence::MemoryStorage;
    use sea_docking::renderer::CommandList;
    use sea_docking::scene::{SceneId, Services};
    use sea_docking::{Game, HighScores, Key, Tuning};

    let services = Services::new(
        Box::new(SilentAudio),
        Box::new(MemoryStorage::new()),
        Tuning::default(),
        std::process::id() as u64,
    );
    let mut game = Game::new(services, SceneId::Title)?;

    game.tick()?;
    game.set_key(Key::Ok, true);
    game.tick()?;
    game.set_key(Key::Ok, false);

    // Three falls, three crash delays, then the game over screen prompts
    for _ in 0..3000 {
        game.tick()?;
        if game.scene_id() != SceneId::InGame {
            break;
        }
        if game.ticks() % 200 == 0 {
            game.set_key(Key::Ok, true);
        } else {
            game.set_key(Key::Ok, false);
        }
    }

    let mut list = CommandList::new();
    game.render(&mut list);
    log::info!(
        "Demo ended in {:?} after {} ticks ({} draw calls)",
        game.scene_id(),
        game.ticks(),
        list.commands.len()
    );
    let table = HighScores::load(game.services().storage.as_ref());
    println!("High scores: {:?}", table.scores());
    Ok(())
}
