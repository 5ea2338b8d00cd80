//! City name entity.

use std::fmt;
use thiserror::Error;

/// The request carried no usable city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("City is required")]
pub struct MissingCity;

/// A non-blank city name as supplied by the client.
///
/// The original spelling (trimmed) is what the upstream provider receives;
/// [`CityName::cache_key`] is the lower-cased form used for cache entries,
/// so `London` and `LONDON` share one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityName(String);

impl CityName {
    /// Builds a city name from a raw request parameter.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCity`] if the parameter is absent, empty or
    /// whitespace only.
    pub fn parse(raw: Option<&str>) -> Result<Self, MissingCity> {
        match raw.map(str::trim) {
            Some(city) if !city.is_empty() => Ok(Self(city.to_string())),
            _ => Err(MissingCity),
        }
    }

    /// Returns the city as the client spelled it, minus surrounding whitespace.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-insensitive cache key for this city.
    pub fn cache_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let city = CityName::parse(Some("  Paris ")).unwrap();
        assert_eq!(city.as_str(), "Paris");
    }

    #[test]
    fn test_parse_rejects_missing_and_blank() {
        assert_eq!(CityName::parse(None), Err(MissingCity));
        assert_eq!(CityName::parse(Some("")), Err(MissingCity));
        assert_eq!(CityName::parse(Some("   ")), Err(MissingCity));
        assert_eq!(MissingCity.to_string(), "City is required");
    }

    #[test]
    fn test_cache_key_is_case_insensitive() {
        let a = CityName::parse(Some("London")).unwrap();
        let b = CityName::parse(Some("LONDON")).unwrap();
        let c = CityName::parse(Some("london")).unwrap();

        assert_eq!(a.cache_key(), "london");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(b.cache_key(), c.cache_key());
    }

    #[test]
    fn test_cache_key_keeps_original_spelling_separate() {
        let city = CityName::parse(Some("São Paulo")).unwrap();
        assert_eq!(city.as_str(), "São Paulo");
        assert_eq!(city.cache_key(), "são paulo");
    }
}
