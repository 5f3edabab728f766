use url::form_urlencoded;

use crate::{QueryParams, SheetReference};

pub const SHEET_NAME_KEY: &str = "sheet_name";
pub const SHEET_ID_KEY: &str = "sheet_id";
pub const OFFSET_KEY: &str = "offset";
pub const LIMIT_KEY: &str = "limit";
pub const ROW_KEY: &str = "row";

/// Ordered query parameters. Absent values stay in the list and are skipped
/// when serializing, so insertion order alone decides the output order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPairs {
    pairs: Vec<(&'static str, Option<String>)>,
}

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for the data stage: selector key first, then offset, limit, row.
    pub fn for_sheet(reference: &SheetReference, params: &QueryParams) -> Self {
        let mut query = Self::new();
        if let Some((key, value)) = reference.selector.query_pair() {
            query.push(key, Some(value));
        }
        query.push(OFFSET_KEY, params.offset.map(|v| v.to_string()));
        query.push(LIMIT_KEY, params.limit.map(|v| v.to_string()));
        query.push(ROW_KEY, params.row.map(|v| v.to_string()));
        query
    }

    pub fn push(&mut self, key: &'static str, value: Option<String>) {
        self.pairs.push((key, value));
    }

    /// Present pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (*key, value)))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// `application/x-www-form-urlencoded` serialization of the present pairs.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}
