#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// App finished starting up.
    Started,
    /// User edited the spreadsheet URL input.
    SheetUrlChanged(String),
    /// User edited the offset input.
    OffsetChanged(String),
    /// User edited the limit input.
    LimitChanged(String),
    /// User edited the row input.
    RowChanged(String),
    /// User submitted the form.
    Submitted,
    /// Metadata stage settled for a submission.
    MetaResolved {
        submission: crate::SubmissionId,
        outcome: crate::MetaOutcome,
    },
    /// Data stage settled for a submission.
    DataFetched {
        submission: crate::SubmissionId,
        outcome: crate::DataOutcome,
    },
    /// Service account lookup settled; `None` when it failed.
    ServiceAccountLoaded(Option<String>),
}
