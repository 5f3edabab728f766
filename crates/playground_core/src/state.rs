use crate::view_model::{AppViewModel, PageHint};
use crate::{PlaygroundConfig, RawParams, ResponseState};

/// Sequence number of a form submission. Only outcomes tagged with the
/// latest one are applied.
pub type SubmissionId = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: PlaygroundConfig,
    sheet_url: String,
    raw_params: RawParams,
    response: ResponseState,
    searching: bool,
    submission: SubmissionId,
    pending_api_url: Option<String>,
    service_account: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new(config: PlaygroundConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            sheet_url: self.sheet_url.clone(),
            params: self.raw_params.clone(),
            searching: self.searching,
            response: self.response.clone(),
            page: PageHint::from_response(&self.response),
            service_account: self.service_account.clone(),
            dirty: self.dirty,
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub fn raw_params(&self) -> &RawParams {
        &self.raw_params
    }

    pub fn response(&self) -> &ResponseState {
        &self.response
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn current_submission(&self) -> SubmissionId {
        self.submission
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn set_sheet_url(&mut self, sheet_url: String) {
        if self.sheet_url != sheet_url {
            self.sheet_url = sheet_url;
            self.dirty = true;
        }
    }

    pub(crate) fn raw_params_mut(&mut self) -> &mut RawParams {
        self.dirty = true;
        &mut self.raw_params
    }

    /// Starts a new submission, superseding any in flight.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.submission += 1;
        self.pending_api_url = None;
        self.response = ResponseState::Idle;
        self.dirty = true;
        self.submission
    }

    pub(crate) fn is_current(&self, submission: SubmissionId) -> bool {
        submission == self.submission
    }

    pub(crate) fn set_pending_api_url(&mut self, api_url: String) {
        self.pending_api_url = Some(api_url);
    }

    pub(crate) fn take_pending_api_url(&mut self) -> Option<String> {
        self.pending_api_url.take()
    }

    pub(crate) fn set_searching(&mut self, searching: bool) {
        if self.searching != searching {
            self.searching = searching;
            self.dirty = true;
        }
    }

    pub(crate) fn settle(&mut self, response: ResponseState) {
        self.response = response;
        self.searching = false;
        self.dirty = true;
    }

    pub(crate) fn set_service_account(&mut self, service_account: Option<String>) {
        self.service_account = service_account;
        self.dirty = true;
    }
}
