use std::fmt;

use crate::{Error, Result};

/// Supabase project reference, the subdomain of `https://<ref>.supabase.co`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef(String);

impl ProjectRef {
    /// Extract the project reference from a Supabase project URL.
    ///
    /// The URL may carry a path or surrounding text; the first
    /// `http(s)://<ref>.supabase.co` occurrence is used.
    pub fn from_url(url: &str) -> Result<Self> {
        url.match_indices("http")
            .find_map(|(idx, _)| {
                let rest = &url[idx + "http".len()..];
                let rest = rest.strip_prefix('s').unwrap_or(rest);
                let rest = rest.strip_prefix("://")?;
                let (id, tail) = rest.split_once('.')?;
                (!id.is_empty() && tail.starts_with("supabase.co")).then(|| Self(id.to_string()))
            })
            .ok_or_else(|| {
                Box::new(Error::InvalidProjectUrl {
                    url: url.to_string(),
                })
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_https_url() {
        let project = ProjectRef::from_url("https://abcdefghijklmnop.supabase.co").unwrap();
        assert_eq!(project.as_str(), "abcdefghijklmnop");
    }

    #[test]
    fn test_from_http_url_with_path() {
        let project = ProjectRef::from_url("http://xyz.supabase.co/rest/v1").unwrap();
        assert_eq!(project.to_string(), "xyz");
    }

    #[test]
    fn test_rejects_custom_domain() {
        let err = ProjectRef::from_url("https://api.example.com").unwrap_err();
        assert!(matches!(*err, Error::InvalidProjectUrl { .. }));
        assert_eq!(
            err.to_string(),
            "could not extract project ID from URL: https://api.example.com"
        );
    }

    #[test]
    fn test_rejects_local_url() {
        assert!(ProjectRef::from_url("http://localhost:54321").is_err());
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(ProjectRef::from_url("abc.supabase.co").is_err());
    }

    #[test]
    fn test_skips_non_matching_prefix() {
        let project =
            ProjectRef::from_url("httpx https://later.supabase.co").unwrap();
        assert_eq!(project.as_str(), "later");
    }
}
