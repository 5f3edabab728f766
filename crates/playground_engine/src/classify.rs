use playground_core::{DataOutcome, MetaOutcome, SheetReference, SheetSelector};
use playground_logging::{playground_info, playground_warn};
use serde_json::Value;

use crate::types::SheetMetaEnvelope;
use crate::{FetchError, RawResponse};

/// Maps a metadata answer onto the outcome the state machine understands.
///
/// 200 with a readable body resolves, 404 means the API server is missing,
/// every other status is an invalid sheet url.
pub fn classify_meta(result: Result<RawResponse, FetchError>) -> MetaOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            playground_warn!("sheet_meta request failed: {}", err);
            return MetaOutcome::Transport(err.to_string());
        }
    };

    match response.status {
        200 => match serde_json::from_slice::<SheetMetaEnvelope>(&response.bytes) {
            Ok(envelope) => {
                let payload = envelope.data;
                let selector = SheetSelector::from_parts(
                    payload.sheet_id_or_name.tab_sheet_id,
                    payload.sheet_id_or_name.tab_sheet_name,
                );
                playground_info!(
                    "sheet_meta resolved spreadsheet_id={} selector={:?}",
                    payload.spread_sheet_id,
                    selector
                );
                MetaOutcome::Resolved(SheetReference::new(payload.spread_sheet_id, selector))
            }
            Err(err) => {
                playground_warn!("sheet_meta body could not be read: {}", err);
                MetaOutcome::Invalid
            }
        },
        404 => MetaOutcome::NotFound,
        status => {
            playground_info!("sheet_meta rejected with status {}", status);
            MetaOutcome::Invalid
        }
    }
}

/// Any HTTP answer from the data endpoint is surfaced as-is, including error
/// statuses, so the provider's error payload stays visible.
pub fn classify_data(result: Result<RawResponse, FetchError>) -> DataOutcome {
    match result {
        Ok(response) => DataOutcome::Response {
            status: response.status,
            body: body_as_json(&response.bytes),
        },
        Err(err) => {
            playground_warn!("sheet data request failed: {}", err);
            DataOutcome::Transport(err.to_string())
        }
    }
}

fn body_as_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
