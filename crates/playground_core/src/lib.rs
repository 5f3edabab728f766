//! Playground core: pure submission state machine, parameter validation and
//! API URL construction. No IO happens in this crate.
mod api_url;
mod effect;
mod msg;
mod params;
mod query;
mod response;
mod sheet;
mod state;
mod update;
mod view_model;

pub use api_url::{build_api_url, sheet_path, ApiBase, ConfigError, Origin, PlaygroundConfig};
pub use effect::{DataRequest, Effect};
pub use msg::Msg;
pub use params::{validate, QueryParams, RawParams};
pub use query::{QueryPairs, LIMIT_KEY, OFFSET_KEY, ROW_KEY, SHEET_ID_KEY, SHEET_NAME_KEY};
pub use response::{
    DataOutcome, MetaOutcome, ResponseState, API_SERVER_NOT_FOUND, SHEET_URL_INVALID,
};
pub use sheet::{SheetReference, SheetSelector};
pub use state::{AppState, SubmissionId};
pub use update::update;
pub use view_model::{AppViewModel, PageHint};
