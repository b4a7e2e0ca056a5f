use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FilterError;

/// Query used for the startup search when the reader has not typed anything.
pub const LATEST_QUERY: &str = "latest";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Search parameters sent to the backend.
///
/// Optional fields are `None` rather than empty strings; the client omits
/// them from the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsFilters {
    pub query: String,
    pub language: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    /// Opaque cursor from a previous page's `nextPage`.
    pub page: Option<String>,
}

impl NewsFilters {
    pub fn new(query: impl AsRef<str>) -> Result<Self, FilterError> {
        let query = query.as_ref().trim();
        if query.is_empty() {
            return Err(FilterError::EmptyQuery);
        }
        Ok(Self {
            query: query.to_owned(),
            ..Self::default()
        })
    }

    pub fn latest() -> Self {
        Self {
            query: LATEST_QUERY.to_owned(),
            language: Some(DEFAULT_LANGUAGE.to_owned()),
            ..Self::default()
        }
    }

    pub fn is_latest(&self) -> bool {
        self.query == LATEST_QUERY
    }

    #[must_use]
    pub fn with_language(mut self, language: impl AsRef<str>) -> Self {
        self.language = non_empty(language.as_ref());
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl AsRef<str>) -> Self {
        self.country = non_empty(country.as_ref());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = non_empty(category.as_ref());
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: impl AsRef<str>) -> Self {
        self.page = non_empty(page.as_ref());
        self
    }

    /// Query-string pairs in wire order. `query` is always present.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("query", self.query.as_str())];
        let optional = [
            ("language", &self.language),
            ("country", &self.country),
            ("category", &self.category),
            ("page", &self.page),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, value));
            }
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// A list field the backend may send as missing, `null` or `[]`.
/// All three decode to the same empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OptionalList<T>(Vec<T>);

impl<T> Default for OptionalList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> OptionalList<T> {
    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: AsRef<str>> OptionalList<T> {
    pub fn joined(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl<T> From<Vec<T>> for OptionalList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<'a, T> IntoIterator for &'a OptionalList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionalList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default()))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Article as returned by the backend. Passed through untouched; every field
/// tolerates being absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub article_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default)]
    pub creator: OptionalList<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "pubDate", default, deserialize_with = "null_as_default")]
    pub pub_date: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default)]
    pub source_icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default)]
    pub country: OptionalList<String>,
    #[serde(default)]
    pub category: OptionalList<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsResponsePage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "totalResults", deserialize_with = "null_as_default")]
    pub total_results: u64,
    /// `None` when there is no further page. The backend sends `""` for that.
    #[serde(rename = "nextPage", default, deserialize_with = "empty_as_none")]
    pub next_page: Option<String>,
    /// Required key; `null` is an empty page.
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<NewsItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
