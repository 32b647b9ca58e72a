// Módulo de mapas: contrato del SDK, sesión, renderizado del itinerario

pub mod google;
pub mod renderer;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod fake;

pub use renderer::{DrawOutcome, MapRenderer, SkipReason};
pub use session::{MapSession, SessionStatus};
pub use traits::*;

/// Error del mapa
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,
    #[error("Map initialization already in progress")]
    AlreadyInitializing,
    #[error("Map container #{0} not found")]
    ContainerNotFound(String),
    #[error("Map SDK failed to load: {0}")]
    SdkLoad(String),
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for MapError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        MapError::Js(format!("{:?}", value))
    }
}
