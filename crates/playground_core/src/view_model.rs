use serde::Deserialize;

use crate::{RawParams, ResponseState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub sheet_url: String,
    pub params: RawParams,
    pub searching: bool,
    pub response: ResponseState,
    pub page: Option<PageHint>,
    pub service_account: Option<String>,
    pub dirty: bool,
}

/// Pagination echoed by the backend in a successful data response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHint {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    /// Offset that would fetch the following page; `None` once a page came
    /// back with fewer rows than `limit`.
    pub next_offset: Option<u64>,
}

#[derive(Deserialize)]
struct Pagination {
    offset: Option<u64>,
    limit: Option<u64>,
}

impl PageHint {
    /// Reads the `pagination` member of a 200 response body, if present.
    pub fn from_response(response: &ResponseState) -> Option<Self> {
        let ResponseState::Result {
            status: 200, body, ..
        } = response
        else {
            return None;
        };
        let pagination: Pagination = serde_json::from_value(body.get("pagination")?.clone()).ok()?;
        let rows = body
            .get("data")
            .and_then(|data| data.as_array())
            .map(|data| data.len() as u64);
        let next_offset = match (pagination.offset, pagination.limit, rows) {
            (Some(offset), Some(limit), Some(rows)) if limit > 0 && rows >= limit => {
                offset.checked_add(limit)
            }
            _ => None,
        };
        Some(Self {
            offset: pagination.offset,
            limit: pagination.limit,
            next_offset,
        })
    }
}
