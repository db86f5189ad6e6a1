// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod utils;
pub mod error;
pub mod config;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::SiteConfig;
pub use error::SiteError;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
    use web_sys::{Document, Element, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, Window};

    use crate::config::SiteConfig;
    use crate::controller::input::wasm as input_wasm;
    use crate::controller::loading::strategy_from_config;
    use crate::controller::{FrameContext, GateState, InputState, LoadingGate, LoadingStrategy};
    use crate::error::SiteError;
    use crate::logging;
    use crate::model::{content, Viewport, FEATURES, LEADERS};
    use crate::view::content::{render_features, render_leaders, set_content_offset};
    use crate::view::dom::web::WebDom;
    use crate::view::render::to_css_color;
    use crate::view::shader::BACKGROUND_WGSL;
    use crate::view::{Background, Dom, GpuContext, LoadingScreen, RenderState};

    const CONFIG_ELEMENT_ID: &str = "site-config";

    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        logging::init();

        match setup_app().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("startup failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Main application setup for WASM
    async fn setup_app() -> Result<(), SiteError> {
        let window = web_sys::window().ok_or_else(|| SiteError::Js("no global `window`".into()))?;
        let document = window.document().ok_or_else(|| SiteError::Js("no document on window".into()))?;
        let config = read_config(&document);
        let dom = WebDom::new(document.clone());

        // Resolve every required element before touching anything
        let selectors = &config.selectors;
        let canvas = dom
            .get_element(&selectors.canvas)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SiteError::WrongElementType {
                selector: selectors.canvas.clone(),
                expected: "canvas",
            })?;
        let loading_screen = LoadingScreen::find(&dom, selectors)?;
        let content_el = dom.get_element(&selectors.content)?;
        let leadership_grid = dom.get_element(&selectors.leadership_grid)?;
        let features_grid = dom.get_element(&selectors.features_grid)?;

        let viewport = current_viewport(&window, config.max_pixel_ratio)?;
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);

        let input_state = Rc::new(RefCell::new(InputState::new(&viewport, config.max_pixel_ratio)));
        if let Some(scroll) = input_wasm::scroll_to_input(&window) {
            input_state.borrow_mut().process_event(&scroll);
        }
        setup_input_listeners(&window, &document, input_state.clone())?;

        start_loading(&window, &dom, &config, loading_screen, leadership_grid, features_grid)?;

        // Background: shader if the GPU cooperates, a flat CSS color if not
        let mut renderer = match GpuContext::new(&canvas, viewport.width, viewport.height).await {
            Ok(gpu) => {
                let background = Background::build(gpu.device.as_ref(), gpu.format, BACKGROUND_WGSL, &config).await;
                let render_state = RenderState {
                    format: gpu.format,
                    alpha_mode: gpu.config.alpha_mode,
                    width: gpu.config.width,
                    height: gpu.config.height,
                    background,
                    clear_color: wgpu::Color::TRANSPARENT,
                };
                Some((gpu, render_state))
            }
            Err(e) => {
                tracing::error!("background effect disabled: {e}");
                let _ = canvas
                    .style()
                    .set_property("background-color", &to_css_color(config.fallback_color));
                None
            }
        };

        let now = performance_now(&window);
        let initial_scroll = input_state.borrow().scroll_target;
        let mut frame_ctx = FrameContext::new(&config, viewport, now, initial_scroll);

        // Continuous redraw using requestAnimationFrame
        let f = RcCellCallback::new(window.clone(), {
            let window_for_loop = window.clone();

            move || {
                let now = performance_now(&window_for_loop);
                let output = frame_ctx.update(now, &mut input_state.borrow_mut());

                if let Some(vp) = output.resized {
                    canvas.set_width(vp.width);
                    canvas.set_height(vp.height);
                }
                if let Err(e) = set_content_offset(&content_el, output.content_offset) {
                    tracing::warn!("content transform: {e}");
                }

                if let Some((gpu, render_state)) = renderer.as_mut() {
                    render_state.draw_frame(gpu.device.as_ref(), gpu.queue.as_ref(), &gpu.surface, &output);
                }
            }
        });
        f.start();

        tracing::info!(width = viewport.width, height = viewport.height, "site runtime started");
        Ok(())
    }

    /// Inline JSON from `<script type="application/json" id="site-config">`, if any
    fn read_config(document: &Document) -> SiteConfig {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        SiteConfig::from_json_or_default(text.as_deref())
    }

    fn current_viewport(window: &Window, max_pixel_ratio: f64) -> Result<Viewport, SiteError> {
        let w = window.inner_width().map_err(|e| SiteError::js(&e))?.as_f64().unwrap_or(800.0);
        let h = window.inner_height().map_err(|e| SiteError::js(&e))?.as_f64().unwrap_or(600.0);
        Ok(Viewport::from_css(w, h, window.device_pixel_ratio(), max_pixel_ratio))
    }

    fn performance_now(window: &Window) -> f64 {
        window.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    /// Pointer, scroll and resize only record into `InputState`; the frame loop applies them
    fn setup_input_listeners(
        window: &Window,
        document: &Document,
        input_state: Rc<RefCell<InputState>>,
    ) -> Result<(), SiteError> {
        // Pointer move
        {
            let input_state = input_state.clone();
            let pm = Closure::wrap(Box::new(move |e: MouseEvent| {
                input_state.borrow_mut().process_event(&input_wasm::pointer_event_to_input(&e));
            }) as Box<dyn FnMut(MouseEvent)>);
            document
                .add_event_listener_with_callback("pointermove", pm.as_ref().unchecked_ref())
                .map_err(|e| SiteError::js(&e))?;
            pm.forget();
        }

        // Scroll
        {
            let input_state = input_state.clone();
            let window_for_scroll = window.clone();
            let scroll = Closure::wrap(Box::new(move |_e: Event| {
                if let Some(event) = input_wasm::scroll_to_input(&window_for_scroll) {
                    input_state.borrow_mut().process_event(&event);
                }
            }) as Box<dyn FnMut(Event)>);
            window
                .add_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref())
                .map_err(|e| SiteError::js(&e))?;
            scroll.forget();
        }

        // Resize
        {
            let window_for_resize = window.clone();
            let resize = Closure::wrap(Box::new(move |_e: Event| {
                let Some(event) = input_wasm::resize_to_input(&window_for_resize) else {
                    return;
                };
                let mut input = input_state.borrow_mut();
                input.process_event(&event);
                // the page height changes with the viewport, so does the scroll limit
                if let Some(scroll) = input_wasm::scroll_to_input(&window_for_resize) {
                    input.process_event(&scroll);
                }
            }) as Box<dyn FnMut(Event)>);
            window
                .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
                .map_err(|e| SiteError::js(&e))?;
            resize.forget();
        }

        Ok(())
    }

    /// Wire the configured loading strategy to the gate and the loading screen
    fn start_loading(
        window: &Window,
        dom: &WebDom,
        config: &SiteConfig,
        screen: LoadingScreen<Element>,
        leadership_grid: Element,
        features_grid: Element,
    ) -> Result<(), SiteError> {
        let urls = content::preload_urls();
        let strategy = strategy_from_config(&config.loading, urls.len() as u32);
        tracing::info!(strategy = strategy.name(), assets = urls.len(), "loading started");

        let fade_ms = config.fade_out_ms;
        let gate = LoadingGate::new()
            .on_progress({
                let screen = screen.clone();
                move |pct| {
                    if let Err(e) = screen.show_progress(pct) {
                        tracing::warn!("loading progress: {e}");
                    }
                }
            })
            .on_complete({
                let window = window.clone();
                let dom = dom.clone();
                move || finish_loading(&window, &dom, screen, leadership_grid, features_grid, fade_ms)
            });

        let gate = Rc::new(RefCell::new(gate));
        let strategy: Rc<RefCell<Box<dyn LoadingStrategy>>> = Rc::new(RefCell::new(strategy));
        strategy.borrow_mut().start(&mut gate.borrow_mut());

        let interval = strategy.borrow().tick_interval_ms();
        match interval {
            Some(ms) => {
                // Timer-driven: tick until complete, then clear the interval
                let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
                let tick = {
                    let handle = handle.clone();
                    let window = window.clone();
                    Closure::wrap(Box::new(move || {
                        let state = strategy.borrow_mut().signal(&mut gate.borrow_mut());
                        if state == GateState::Complete {
                            if let Some(id) = handle.take() {
                                window.clear_interval_with_handle(id);
                            }
                        }
                    }) as Box<dyn FnMut()>)
                };
                let id = window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        tick.as_ref().unchecked_ref(),
                        ms as i32,
                    )
                    .map_err(|e| SiteError::js(&e))?;
                handle.set(Some(id));
                tick.forget();
            }
            None => {
                // Event-driven: every image load or error is one signal
                let mut images = Vec::with_capacity(urls.len());
                let on_load = {
                    let strategy = strategy.clone();
                    let gate = gate.clone();
                    Closure::wrap(Box::new(move |_e: Event| {
                        strategy.borrow_mut().signal(&mut gate.borrow_mut());
                    }) as Box<dyn FnMut(Event)>)
                };
                let on_error = Closure::wrap(Box::new(move |e: Event| {
                    let src = e
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
                        .map(|img| img.src())
                        .unwrap_or_default();
                    tracing::warn!(%src, "asset failed to load");
                    strategy.borrow_mut().signal(&mut gate.borrow_mut());
                }) as Box<dyn FnMut(Event)>);

                for url in urls {
                    let img = HtmlImageElement::new().map_err(|e| SiteError::js(&e))?;
                    img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
                        .map_err(|e| SiteError::js(&e))?;
                    img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
                        .map_err(|e| SiteError::js(&e))?;
                    img.set_src(url);
                    images.push(img);
                }
                on_load.forget();
                on_error.forget();
                // Keep the preload elements alive for the page lifetime
                std::mem::forget(images);
            }
        }
        Ok(())
    }

    /// Fade the loading screen, then hide it and populate the page
    fn finish_loading(
        window: &Window,
        dom: &WebDom,
        screen: LoadingScreen<Element>,
        leadership_grid: Element,
        features_grid: Element,
        fade_ms: u32,
    ) {
        tracing::info!("assets ready");
        if let Err(e) = screen.fade_out(fade_ms) {
            tracing::warn!("fade out: {e}");
        }

        let dom = dom.clone();
        let after_fade = Closure::once_into_js(move || {
            if let Err(e) = screen.hide() {
                tracing::warn!("hide loading screen: {e}");
            }
            if let Err(e) = render_leaders(&dom, &leadership_grid, &LEADERS) {
                tracing::error!("leader cards: {e}");
            }
            if let Err(e) = render_features(&dom, &features_grid, &FEATURES) {
                tracing::error!("feature cards: {e}");
            }
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            after_fade.unchecked_ref(),
            fade_ms as i32,
        ) {
            tracing::error!("scheduling post-load content: {}", SiteError::js(&e));
        }
    }

    struct RcCellCallback {
        inner: Rc<RefCell<Box<dyn FnMut()>>>,
        window: Window,
    }

    impl RcCellCallback {
        fn new(window: Window, f: impl FnMut() + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
            }
        }

        fn start(self) {
            let inner = self.inner.clone();
            let window = self.window.clone();

            let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
            let callback_clone = callback.clone();

            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                inner.borrow_mut().as_mut()();

                // Recursively schedule next frame
                if let Some(cb) = callback_clone.borrow().as_ref() {
                    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        tracing::error!("requestAnimationFrame failed: {}", SiteError::js(&e));
                    }
                }
            }) as Box<dyn FnMut()>));

            if let Some(cb) = callback.borrow().as_ref() {
                if let Err(e) = self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    tracing::error!("requestAnimationFrame failed: {}", SiteError::js(&e));
                }
            }

            // Leak the closure to keep it alive
            std::mem::forget(callback);
        }
    }
}
