use crate::{QueryPairs, SubmissionId};

/// Everything the data stage needs, built once so that the request sent and
/// the URL displayed come from the same query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRequest {
    pub spreadsheet_id: String,
    pub query: QueryPairs,
    pub api_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up the service account e-mail shown as contact information.
    LoadServiceAccount,
    ResolveMeta {
        submission: SubmissionId,
        sheet_url: String,
    },
    FetchData {
        submission: SubmissionId,
        request: DataRequest,
    },
}
