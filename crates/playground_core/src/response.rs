use serde_json::Value;

use crate::SheetReference;

pub const API_SERVER_NOT_FOUND: &str = "api server not found";
pub const SHEET_URL_INVALID: &str = "sheet url is invalid";

/// The single thing the renderer looks at. Always replaced as a whole.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseState {
    #[default]
    Idle,
    Error(String),
    Result {
        api_url: String,
        status: u16,
        body: Value,
    },
}

impl ResponseState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ResponseState::Idle)
    }
}

/// Classified result of the metadata stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaOutcome {
    Resolved(SheetReference),
    /// The metadata endpoint answered 404.
    NotFound,
    /// Any other non-200 answer, or a 200 whose body could not be read.
    Invalid,
    /// No response at all.
    Transport(String),
}

/// Classified result of the data stage. Every HTTP answer is a `Response`,
/// whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub enum DataOutcome {
    Response { status: u16, body: Value },
    Transport(String),
}

pub(crate) fn transport_message(detail: &str) -> String {
    format!("request failed: {detail}")
}
