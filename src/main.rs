//! OK Party entry point
//!
//! On the web, exports `OkParty`: a handle that overlays a canvas on a target
//! element and animates the party from `requestAnimationFrame` once started.
//! Natively, runs a headless party into the tessellator and reports what it
//! produced.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_party {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

    use ok_party::consts::DEFAULT_Z_INDEX;
    use ok_party::{Bounds, Party, PartyConfig};

    /// Party plus the canvas it draws on
    struct App {
        party: Party,
        target: Element,
        canvas: HtmlCanvasElement,
        context: CanvasRenderingContext2d,
        /// A `requestAnimationFrame` callback is pending
        looping: bool,
    }

    impl App {
        /// Match the canvas to the target's layout size
        fn resize(&mut self) {
            let bounds = element_bounds(&self.target);
            self.canvas.set_width(bounds.width as u32);
            self.canvas.set_height(bounds.height as u32);
            self.party.resize(bounds);
        }
    }

    fn element_bounds(el: &Element) -> Bounds {
        let rect = el.get_bounding_client_rect();
        Bounds::from_rect(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    /// Window listener kept alive by the handle so `destroy` can remove it
    struct Listener {
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    /// Page-facing party handle.
    ///
    /// Nothing animates until `start` is called. The handle must be kept
    /// alive for as long as the party runs.
    #[wasm_bindgen]
    pub struct OkParty {
        app: Rc<RefCell<App>>,
        listeners: Vec<Listener>,
    }

    #[wasm_bindgen]
    impl OkParty {
        /// Overlay a canvas on `target` (default `<body>`).
        ///
        /// `config` is a JSON `PartyConfig`, `density` one of low/medium/high.
        #[wasm_bindgen(constructor)]
        pub fn new(
            target: Option<Element>,
            id: Option<String>,
            z_index: Option<i32>,
            config: Option<String>,
            density: Option<String>,
        ) -> Result<OkParty, JsValue> {
            let window = web_sys::window().ok_or("no window")?;
            let document = window.document().ok_or("no document")?;
            let target = match target {
                Some(el) => el,
                None => document.body().ok_or("no body")?.into(),
            };

            let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
            canvas.set_attribute(
                "style",
                &format!(
                    "position: absolute; top: 0; left: 0; width: 100%; height: 100%; \
                     pointer-events: none; z-index: {};",
                    z_index.unwrap_or(DEFAULT_Z_INDEX)
                ),
            )?;
            if let Some(id) = &id {
                canvas.set_id(id);
            }
            target.prepend_with_node_1(&canvas)?;

            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")?
                .ok_or("2d context unavailable")?
                .dyn_into()?;

            let config = PartyConfig::from_host(config.as_deref(), density.as_deref());
            let bounds = element_bounds(&target);
            let seed = js_sys::Date::now() as u64;
            let app = Rc::new(RefCell::new(App {
                party: Party::new(config, bounds, seed),
                target,
                canvas,
                context,
                looping: false,
            }));
            app.borrow_mut().resize();

            let listeners = listen(&window, &app)?;
            Ok(OkParty { app, listeners })
        }

        /// Start, or resume after `stop`
        pub fn start(&self) {
            let needs_loop = {
                let mut app = self.app.borrow_mut();
                app.party.start();
                app.resize();
                let idle = app.party.is_running() && !app.looping;
                if idle {
                    app.looping = true;
                }
                idle
            };
            if needs_loop {
                request_animation_frame(self.app.clone());
            }
        }

        /// Stop animating. Resume with `start`.
        pub fn stop(&self) {
            self.app.borrow_mut().party.stop();
        }

        /// Stop for good, remove the canvas and the window listeners
        pub fn destroy(&mut self) {
            {
                let mut app = self.app.borrow_mut();
                app.party.destroy();
                app.canvas.remove();
            }
            if let Some(window) = web_sys::window() {
                for listener in self.listeners.drain(..) {
                    let _ = window.remove_event_listener_with_callback(
                        listener.event,
                        listener.closure.as_ref().unchecked_ref(),
                    );
                }
            }
        }

        /// True between `start` and `stop`/`destroy`
        #[wasm_bindgen(getter)]
        pub fn running(&self) -> bool {
            let app = self.app.borrow();
            app.looping && app.party.is_running()
        }
    }

    fn listen(window: &web_sys::Window, app: &Rc<RefCell<App>>) -> Result<Vec<Listener>, JsValue> {
        let mut listeners = Vec::new();

        // Resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            listeners.push(Listener {
                event: "resize",
                closure,
            });
        }

        // Focus - don't simulate the time spent in another tab
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().party.focus();
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            listeners.push(Listener {
                event: "focus",
                closure,
            });
        }

        Ok(listeners)
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            app.borrow_mut().looping = false;
            return;
        };
        let closure = Closure::once(move |time: f64| {
            party_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn party_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut guard = app.borrow_mut();
            let App { party, context, .. } = &mut *guard;
            let keep_going = party.frame(time, context);
            guard.looping = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(app);
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("OK Party loaded, waiting for start()");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_party::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ok_party::{Bounds, Party, Tessellator};

    env_logger::init();
    log::info!("OK Party (native) starting...");

    let config = load_config();
    let bounds = Bounds::new(1280.0, 720.0);
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut party = Party::new(config, bounds, seed);
    let mut surface = Tessellator::new();

    // 10 seconds at 60 fps
    let frame_ms = 1000.0 / 60.0;
    for frame in 0..600u32 {
        party.frame(frame as f64 * frame_ms, &mut surface);
        if frame % 60 == 59 {
            log::info!(
                "t={:>2}s  triangles={:>6}  bytes={:>8}",
                (frame + 1) / 60,
                surface.triangle_count(),
                surface.as_bytes().len()
            );
        }
    }

    party.stop();
    println!("Simulated {} entities for 10s", party.entity_count());
}

/// Config from `ok-party [config.json] [low|medium|high]`, or defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> ok_party::PartyConfig {
    use ok_party::PartyConfig;

    let mut args = std::env::args().skip(1);
    let json = args.next().and_then(|path| match std::fs::read_to_string(&path) {
        Ok(json) => {
            log::info!("Loaded config from {}", path);
            Some(json)
        }
        Err(e) => {
            log::error!("Could not read {}: {}", path, e);
            None
        }
    });
    let density = args.next();

    PartyConfig::from_host(json.as_deref(), density.as_deref())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
