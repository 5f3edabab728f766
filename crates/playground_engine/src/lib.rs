//! Playground engine: talks to the sheet API backend and executes effects.
mod classify;
mod client;
mod engine;
mod types;

pub use classify::{classify_data, classify_meta};
pub use client::{FetchSettings, ReqwestSheetApi, SheetApi};
pub use engine::{EngineError, EngineHandle};
pub use types::{EngineEvent, FailureKind, FetchError, RawResponse};
