/// Pagination inputs exactly as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawParams {
    pub offset: String,
    pub limit: String,
    pub row: String,
}

/// Validated query parameters. A field is `Some` only when its raw input was a
/// non-negative integer.
///
/// `row` is passed through to the backend untouched; the client attaches no
/// meaning to it beyond being an optional integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryParams {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub row: Option<u64>,
}

/// Normalizes raw form inputs. Empty, non-numeric and negative values are
/// dropped silently.
pub fn validate(raw: &RawParams) -> QueryParams {
    QueryParams {
        offset: parse_non_negative(&raw.offset),
        limit: parse_non_negative(&raw.limit),
        row: parse_non_negative(&raw.row),
    }
}

fn parse_non_negative(raw: &str) -> Option<u64> {
    // u64 parsing rejects a leading '-', so negatives fall out here too.
    raw.trim().parse::<u64>().ok()
}
