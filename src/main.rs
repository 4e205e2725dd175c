//! Cyber Dash entry point
//!
//! Handles platform-specific initialization and wires the game to its host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use cyber_dash::game::{Game, Ports};
    use cyber_dash::platform::web::{DomUi, RafScheduler, SharedAudio, WebHost};
    use cyber_dash::renderer::RenderState;
    use cyber_dash::sim::EntropyRng;
    use cyber_dash::{GameError, HighScore, Settings};

    type Shared = Rc<RefCell<Game>>;

    /// Size the canvas backing store to the window and return it
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(1.0) as u32
        };
        let width = dim(window.inner_width());
        let height = dim(window.inner_height());
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Cyber Dash starting...");

        let window =
            web_sys::window().ok_or_else(|| GameError::SurfaceUnavailable("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::SurfaceUnavailable("no document".into()))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| GameError::SurfaceUnavailable("#gameCanvas not found".into()))?;

        let (width, height) = fit_canvas(&window, &canvas);

        let settings = Settings::load();
        let audio = SharedAudio::default();
        {
            let mut manager = audio.0.borrow_mut();
            manager.set_master_volume(settings.master_volume);
            manager.set_sfx_volume(settings.sfx_volume);
            manager.set_muted(settings.muted);
        }

        let game: Shared = Rc::new_cyclic(|weak| {
            let ports = Ports {
                store: Box::new(HighScore::load()),
                ui: Box::new(DomUi::new(document.clone())),
                audio: Box::new(audio.clone()),
                host: Some(Box::new(WebHost::detect())),
                scheduler: Box::new(RafScheduler::new(weak.clone())),
            };
            RefCell::new(Game::new(
                settings,
                Vec2::new(width as f32, height as f32),
                ports,
                Box::new(EntropyRng::new()),
            ))
        });

        // Initialize WebGPU (WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::SurfaceUnavailable(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().set_surface(Box::new(render_state));

        setup_input_handlers(&document, &canvas, game.clone(), audio);
        setup_buttons(&document, game.clone());
        setup_resize(&window, canvas, game);

        log::info!("Cyber Dash running!");
        Ok(())
    }

    fn setup_input_handlers(
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Shared,
        audio: SharedAudio,
    ) {
        // Browsers only allow audio after a user gesture
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                audio.0.borrow_mut().unlock();
            });
            for name in ["click", "touchstart", "keydown"] {
                let _ = document
                    .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.code().as_str(), "Space" | "ArrowUp") || event.key() == " " {
                    event.prevent_default();
                    game.borrow_mut().jump();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .tap(event.offset_x() as f32, event.offset_y() as f32, false);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let (x, y) = event
                    .touches()
                    .get(0)
                    .map(|touch| {
                        (
                            touch.client_x() as f32 - rect.left() as f32,
                            touch.client_y() as f32 - rect.top() as f32,
                        )
                    })
                    .unwrap_or((0.0, 0.0));
                game.borrow_mut().tap(x, y, true);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, game: Shared, action: fn(&mut Game)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::debug!("#{} not present", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Shared) {
        on_click(document, "startBtn", game.clone(), Game::start_game);
        on_click(document, "restartBtn", game.clone(), Game::restart_game);
        on_click(document, "shareBtn", game, Game::share_score);
    }

    fn setup_resize(window: &Window, canvas: HtmlCanvasElement, game: Shared) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            game.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Cyber Dash failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Upper bound on a headless run
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;
    use cyber_dash::{QualityPreset, Variant};

    fn parse_variant(s: &str) -> Result<Variant, String> {
        Variant::from_str(s).ok_or_else(|| format!("unknown variant '{s}' (cyber, classic)"))
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::from_str(s).ok_or_else(|| format!("unknown quality '{s}' (low, medium, high)"))
    }

    /// Cyber Dash headless autopilot. Build for wasm32 to play.
    #[derive(Debug, Parser)]
    #[command(name = "cyber-dash")]
    pub struct Args {
        /// Game variant: cyber or classic (overrides saved settings)
        #[arg(short, long, value_parser = parse_variant)]
        pub variant: Option<Variant>,

        /// Quality preset: low, medium or high (caps live particles)
        #[arg(short, long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,

        /// Seed for a repeatable run
        #[arg(short, long)]
        pub seed: Option<u64>,

        /// Stop after this many frames
        #[arg(short, long, default_value_t = super::MAX_FRAMES)]
        pub frames: u64,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use cyber_dash::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use cyber_dash::game::{Game, Ports};
    use cyber_dash::platform::headless::ManualScheduler;
    use cyber_dash::sim::EntropyRng;
    use cyber_dash::Settings;
    use glam::Vec2;

    let args = cli::Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cyber Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let mut settings = Settings::load();
    if let Some(variant) = args.variant {
        settings.variant = variant;
    }
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    let quality = settings.quality;
    let rng = match args.seed {
        Some(seed) => {
            log::info!("Seed {}", seed);
            EntropyRng::seeded(seed)
        }
        None => EntropyRng::new(),
    };

    let scheduler = ManualScheduler::new();
    let mut game = Game::new(
        settings,
        Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
        Ports::headless(scheduler.clone()),
        Box::new(rng),
    );

    game.start_game();
    let mut frames = 0;
    while scheduler.take() && frames < args.frames {
        if autopilot::should_jump(game.world()) {
            game.jump();
        }
        game.frame();
        frames += 1;
    }

    log::info!(
        "Autopilot finished after {} frames ({} quality): score {}, multiplier x{}, high score {}",
        frames,
        quality.as_str(),
        game.score(),
        game.world().scoring.multiplier,
        game.high_score()
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use cyber_dash::sim::World;

    /// Jump when the nearest obstacle ahead is within a few frames of contact
    pub fn should_jump(world: &World) -> bool {
        let player = &world.player;
        if player.is_jumping {
            return false;
        }
        let front = player.pos.x + player.size.x;
        let lead = world.difficulty.speed * 5.0;
        world.obstacles.iter().any(|o| {
            let gap = o.pos.x - front;
            (0.0..=lead).contains(&gap)
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use clap::Parser;
    use cyber_dash::{QualityPreset, Variant};

    use super::cli::Args;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["cyber-dash"]).unwrap();
        assert_eq!(args.variant, None);
        assert_eq!(args.quality, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.frames, super::MAX_FRAMES);
    }

    #[test]
    fn test_args_variant_quality_and_seed() {
        let args = Args::try_parse_from([
            "cyber-dash",
            "--variant",
            "classic",
            "-q",
            "LOW",
            "-s",
            "42",
            "-f",
            "600",
        ])
        .unwrap();
        assert_eq!(args.variant, Some(Variant::Classic));
        assert_eq!(args.quality, Some(QualityPreset::Low));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.frames, 600);
    }

    #[test]
    fn test_args_reject_unknown_values() {
        assert!(Args::try_parse_from(["cyber-dash", "--variant", "neon"]).is_err());
        assert!(Args::try_parse_from(["cyber-dash", "--quality", "ultra"]).is_err());
        // The old positional form is gone
        assert!(Args::try_parse_from(["cyber-dash", "classic"]).is_err());
    }
}
