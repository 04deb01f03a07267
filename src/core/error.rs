use thiserror::Error;

/// The only failure class of the effects layer: nothing to render onto.
///
/// These never reach the page; the web layer logs them and degrades to a no-op.
#[derive(Debug, Error)]
pub enum FxError {
    #[error("audio output unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}
