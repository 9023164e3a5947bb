use serde::Deserialize;

pub mod api;
pub mod pages;

/// Optional `?searchString=` on the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
}

impl SearchParams {
    pub fn filter(&self) -> Option<&str> {
        self.search_string
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
