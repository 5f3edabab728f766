use crate::response::transport_message;
use crate::{
    build_api_url, validate, AppState, DataOutcome, DataRequest, Effect, MetaOutcome, Msg,
    QueryPairs, ResponseState, SheetReference, API_SERVER_NOT_FOUND, SHEET_URL_INVALID,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::LoadServiceAccount],
        Msg::SheetUrlChanged(sheet_url) => {
            state.set_sheet_url(sheet_url);
            Vec::new()
        }
        Msg::OffsetChanged(offset) => {
            state.raw_params_mut().offset = offset;
            Vec::new()
        }
        Msg::LimitChanged(limit) => {
            state.raw_params_mut().limit = limit;
            Vec::new()
        }
        Msg::RowChanged(row) => {
            state.raw_params_mut().row = row;
            Vec::new()
        }
        Msg::Submitted => {
            // A new submission always clears the previous result, even when
            // it turns out to be empty.
            let submission = state.begin_submission();
            let sheet_url = state.sheet_url().trim().to_string();
            if sheet_url.is_empty() {
                state.set_searching(false);
                Vec::new()
            } else {
                state.set_searching(true);
                vec![Effect::ResolveMeta {
                    submission,
                    sheet_url,
                }]
            }
        }
        Msg::MetaResolved {
            submission,
            outcome,
        } => {
            if !state.is_current(submission) {
                return (state, Vec::new());
            }
            match outcome {
                MetaOutcome::Resolved(reference) => {
                    let request = data_request(&state, &reference);
                    state.set_pending_api_url(request.api_url.clone());
                    vec![Effect::FetchData {
                        submission,
                        request,
                    }]
                }
                MetaOutcome::NotFound => {
                    state.settle(ResponseState::Error(API_SERVER_NOT_FOUND.to_string()));
                    Vec::new()
                }
                MetaOutcome::Invalid => {
                    state.settle(ResponseState::Error(SHEET_URL_INVALID.to_string()));
                    Vec::new()
                }
                MetaOutcome::Transport(detail) => {
                    state.settle(ResponseState::Error(transport_message(&detail)));
                    Vec::new()
                }
            }
        }
        Msg::DataFetched {
            submission,
            outcome,
        } => {
            if !state.is_current(submission) {
                return (state, Vec::new());
            }
            // Inputs may have changed since the request went out.
            let api_url = state.take_pending_api_url().unwrap_or_default();
            let response = match outcome {
                DataOutcome::Response { status, body } => ResponseState::Result {
                    api_url,
                    status,
                    body,
                },
                DataOutcome::Transport(detail) => ResponseState::Error(transport_message(&detail)),
            };
            state.settle(response);
            Vec::new()
        }
        Msg::ServiceAccountLoaded(service_account) => {
            state.set_service_account(service_account);
            Vec::new()
        }
    };

    (state, effects)
}

fn data_request(state: &AppState, reference: &SheetReference) -> DataRequest {
    let params = validate(state.raw_params());
    let query = QueryPairs::for_sheet(reference, &params);
    let api_url = build_api_url(&state.config().api_base, &reference.spreadsheet_id, &query);
    DataRequest {
        spreadsheet_id: reference.spreadsheet_id.clone(),
        query,
        api_url,
    }
}
