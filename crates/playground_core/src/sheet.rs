use crate::query::{SHEET_ID_KEY, SHEET_NAME_KEY};

/// Which tab of a spreadsheet to read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelector {
    ByName(String),
    ById(u32),
    #[default]
    Unspecified,
}

impl SheetSelector {
    /// Builds a selector from the optional tab fields of a metadata payload.
    /// A name wins over an id when both are present.
    pub fn from_parts(tab_sheet_id: Option<u32>, tab_sheet_name: Option<String>) -> Self {
        match (tab_sheet_name, tab_sheet_id) {
            (Some(name), _) => SheetSelector::ByName(name),
            (None, Some(id)) => SheetSelector::ById(id),
            (None, None) => SheetSelector::Unspecified,
        }
    }

    /// The query key/value this selector contributes, if any.
    pub fn query_pair(&self) -> Option<(&'static str, String)> {
        match self {
            SheetSelector::ByName(name) => Some((SHEET_NAME_KEY, name.clone())),
            SheetSelector::ById(id) => Some((SHEET_ID_KEY, id.to_string())),
            SheetSelector::Unspecified => None,
        }
    }
}

/// Canonical reference produced by the metadata stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReference {
    pub spreadsheet_id: String,
    pub selector: SheetSelector,
}

impl SheetReference {
    pub fn new(spreadsheet_id: impl Into<String>, selector: SheetSelector) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            selector,
        }
    }
}
