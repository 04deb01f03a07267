#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod film_grain;
mod frame;
mod hearts;
mod scenes;
mod sound;

pub use events::pointer::HeartCursor;
pub use film_grain::FilmGrain;
pub use hearts::HeartParticles;
pub use scenes::{NoButtonPosition, Proposal, RouteCheckpoints};
pub use sound::SoundBoard;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[valentine] effects module loaded");
}
