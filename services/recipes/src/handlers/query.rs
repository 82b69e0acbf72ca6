//! Query-string parsing shared by list endpoints.
//!
//! Parsed from the raw query so repeated keys (`?tags=a&tags=b`) are preserved.

use foodgram_domain::pagination::PageRequest;

use crate::error::RecipesServiceError;

#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|raw| {
                url::form_urlencoded::parse(raw.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();
        Self { pairs }
    }

    /// First value for `key`, ignoring empty values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// Every non-empty value for `key`, in order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// `page` and `limit`; non-numeric values are rejected, out-of-range values clamped.
    pub fn page(&self) -> Result<PageRequest, RecipesServiceError> {
        let page = self.parse_u32("page")?;
        let limit = self.parse_u32("limit")?;
        Ok(PageRequest::from_query(page, limit))
    }

    /// Boolean switch accepting `1`/`true` and `0`/`false`; absent means `false`.
    pub fn flag(&self, key: &str) -> Result<bool, RecipesServiceError> {
        match self.get(key) {
            None | Some("0") | Some("false") => Ok(false),
            Some("1") | Some("true") => Ok(true),
            Some(_) => Err(RecipesServiceError::InvalidQuery),
        }
    }

    /// `recipes_limit`; a negative or non-integer value is ignored.
    pub fn recipes_limit(&self) -> Option<u64> {
        self.get("recipes_limit").and_then(|v| v.parse().ok())
    }

    fn parse_u32(&self, key: &str) -> Result<Option<u32>, RecipesServiceError> {
        self.get(key)
            .map(|v| v.parse().map_err(|_| RecipesServiceError::InvalidQuery))
            .transpose()
    }
}
