//! Browser implementations of the platform ports

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use super::{AudioSink, FrameScheduler, HostChannel, ScoreReport, UiSink};
use crate::GameError;
use crate::audio::{AudioManager, SoundEffect};
use crate::game::Game;

/// Show or hide an element by toggling its `hidden` class
fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let classes = el.class_list();
        let _ = if hidden {
            classes.add_1("hidden")
        } else {
            classes.remove_1("hidden")
        };
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// DOM panels and labels. Missing elements are skipped.
pub struct DomUi {
    document: Document,
}

impl DomUi {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_playing(&self, playing: bool) {
        if let Some(el) = self.document.get_element_by_id("gameContainer") {
            let classes = el.class_list();
            let _ = if playing {
                classes.add_1("playing")
            } else {
                classes.remove_1("playing")
            };
        }
    }
}

impl UiSink for DomUi {
    fn game_started(&mut self) {
        set_hidden(&self.document, "startScreen", true);
        set_hidden(&self.document, "gameOverScreen", true);
        set_hidden(&self.document, "menu", true);
        self.set_playing(true);
    }

    fn score_changed(&mut self, score: u64, high_score: u64) {
        set_text(&self.document, "score", &format!("⭐ {score}"));
        set_text(&self.document, "highScore", &format!("🏆 {high_score}"));
    }

    fn game_over(&mut self, score: u64) {
        set_hidden(&self.document, "gameOverScreen", false);
        set_text(&self.document, "finalScore", &format!("⭐ {score}"));
        set_hidden(&self.document, "menu", false);
        self.set_playing(false);
    }

    fn theme_changed(&mut self, index: usize) {
        if let Some(body) = self.document.body() {
            let _ = body.set_attribute("data-theme", &index.to_string());
        }
    }

    fn notify(&mut self, text: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(text);
        }
    }
}

/// Shares one [`AudioManager`] between the game and the gesture handler
/// that unlocks it
#[derive(Clone, Default)]
pub struct SharedAudio(pub Rc<RefCell<AudioManager>>);

impl AudioSink for SharedAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.0.borrow_mut().play(effect);
    }
}

/// `requestAnimationFrame` driver. Holds the game weakly so a dropped game
/// ends the loop.
pub struct RafScheduler {
    game: Weak<RefCell<Game>>,
}

impl RafScheduler {
    pub fn new(game: Weak<RefCell<Game>>) -> Self {
        Self { game }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game = self.game.clone();
        let closure = Closure::once(move |_time: f64| {
            if let Some(game) = game.upgrade() {
                game.borrow_mut().frame();
            }
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("requestAnimationFrame failed");
        }
        closure.forget();
    }
}

/// The embedding chat platform, when there is one, plus the Web Share API
pub struct WebHost {
    /// `window.Telegram.WebApp`
    webapp: Option<JsValue>,
}

impl WebHost {
    pub fn detect() -> Self {
        let webapp = web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("Telegram")).ok())
            .filter(|t| !t.is_undefined() && !t.is_null())
            .and_then(|t| js_sys::Reflect::get(&t, &JsValue::from_str("WebApp")).ok())
            .filter(|w| !w.is_undefined() && !w.is_null());
        if webapp.is_some() {
            log::info!("Running inside a host web app");
        }
        Self { webapp }
    }
}

fn method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
}

fn js_error(err: JsValue) -> GameError {
    GameError::HostChannel(format!("{:?}", err))
}

impl HostChannel for WebHost {
    fn send_report(&mut self, report: &ScoreReport) -> Result<(), GameError> {
        let Some(webapp) = &self.webapp else {
            log::debug!("No host app, score report dropped");
            return Ok(());
        };
        let send = method(webapp, "sendData")
            .ok_or_else(|| GameError::HostChannel("sendData unavailable".into()))?;
        send.call1(webapp, &JsValue::from_str(&report.to_json()?))
            .map_err(js_error)?;
        Ok(())
    }

    fn share(&mut self, summary: &str) -> Result<(), GameError> {
        let navigator: JsValue = web_sys::window()
            .ok_or_else(|| GameError::HostChannel("no window".into()))?
            .navigator()
            .into();
        let share = method(&navigator, "share")
            .ok_or_else(|| GameError::HostChannel("Web Share unavailable".into()))?;

        let data = js_sys::Object::new();
        js_sys::Reflect::set(&data, &"title".into(), &"Cyber Dash".into()).map_err(js_error)?;
        js_sys::Reflect::set(&data, &"text".into(), &summary.into()).map_err(js_error)?;
        // The returned promise only reports whether the user completed the sheet
        share.call1(&navigator, &data).map_err(js_error)?;
        Ok(())
    }
}
