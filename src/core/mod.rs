pub mod automation;
pub mod checkpoints;
pub mod constants;
pub mod cue;
pub mod cursor;
pub mod device;
pub mod error;
pub mod grain;
pub mod music;
pub mod noise;
pub mod particles;
pub mod proposal;

pub use automation::*;
pub use cue::*;
pub use error::FxError;
pub use music::*;
pub use particles::*;
