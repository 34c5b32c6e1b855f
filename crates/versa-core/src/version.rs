//! API version identifiers and ordering
//!
//! Versions are written as `v` followed by a positive integer (`v1`, `v2`, ...).
//! Two rules here are syntactic:
//!
//! - Ordering is lexicographic over the raw identifier, so `"v10" < "v2"`.
//! - The predecessor of `vN` is `v(N-1)`; `v1` and anything not shaped like
//!   `vN` have no predecessor.
//!
//! The free functions work on raw strings because the resolver has to order and
//! chain identifiers it never validated itself. [`ApiVersion`] is the checked form
//! used by callers that want a typed value.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Compare two version identifiers.
///
/// This is plain lexicographic comparison of the identifiers.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Compute the identifier of the version immediately before `version`.
///
/// Returns `None` for `v1`, and for any identifier that is not `v` + integer.
pub fn predecessor(version: &str) -> Option<String> {
    let number = parse_number(version).ok()?;
    if number > 1 {
        Some(format!("v{}", number - 1))
    } else {
        None
    }
}

/// Check whether `version` is a registrable version identifier.
pub fn is_valid_version(version: &str) -> bool {
    parse_number(version).is_ok()
}

fn parse_number(version: &str) -> Result<u32, VersionParseError> {
    if version.is_empty() {
        return Err(VersionParseError::Empty);
    }

    let digits = version
        .strip_prefix('v')
        .ok_or(VersionParseError::MissingPrefix)?;

    // `u32::from_str` accepts a leading '+', identifiers do not.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::InvalidNumber);
    }

    match digits.parse::<u32>() {
        Ok(0) => Err(VersionParseError::Zero),
        Ok(n) => Ok(n),
        Err(_) => Err(VersionParseError::InvalidNumber),
    }
}

/// A validated API version identifier such as `v2`.
///
/// Equality and ordering follow the raw identifier text, matching [`compare`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    raw: Arc<str>,
    number: u32,
}

impl ApiVersion {
    /// Create the version `v{number}`.
    ///
    /// Returns `None` for zero, which is not a valid version.
    pub fn new(number: u32) -> Option<Self> {
        if number == 0 {
            return None;
        }
        Some(Self {
            raw: format!("v{}", number).into(),
            number,
        })
    }

    /// Create version `v1`
    pub fn v1() -> Self {
        Self {
            raw: "v1".into(),
            number: 1,
        }
    }

    /// The numeric part of the identifier
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The identifier as written, e.g. `"v2"`
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The version immediately before this one, if any
    pub fn predecessor(&self) -> Option<ApiVersion> {
        if self.number > 1 {
            ApiVersion::new(self.number - 1)
        } else {
            None
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::v1()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = parse_number(s)?;
        Ok(Self {
            raw: s.into(),
            number,
        })
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.raw.to_string()
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.raw, &other.raw)
    }
}

/// Error type for version parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// Empty version string
    #[error("empty version string")]
    Empty,
    /// The identifier does not start with `v`
    #[error("version must start with 'v'")]
    MissingPrefix,
    /// Invalid number in version string
    #[error("invalid number in version")]
    InvalidNumber,
    /// `v0` is not a version
    #[error("version number must be positive")]
    Zero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("v1".parse::<ApiVersion>().unwrap().number(), 1);
        assert_eq!("v42".parse::<ApiVersion>().unwrap().as_str(), "v42");
        assert_eq!("v01".parse::<ApiVersion>().unwrap().number(), 1);
    }

    #[test]
    fn test_version_parsing_errors() {
        assert_eq!("".parse::<ApiVersion>(), Err(VersionParseError::Empty));
        assert_eq!(
            "1".parse::<ApiVersion>(),
            Err(VersionParseError::MissingPrefix)
        );
        assert_eq!(
            "V1".parse::<ApiVersion>(),
            Err(VersionParseError::MissingPrefix)
        );
        assert_eq!(
            "v".parse::<ApiVersion>(),
            Err(VersionParseError::InvalidNumber)
        );
        assert_eq!(
            "v+1".parse::<ApiVersion>(),
            Err(VersionParseError::InvalidNumber)
        );
        assert_eq!(
            "v1.2".parse::<ApiVersion>(),
            Err(VersionParseError::InvalidNumber)
        );
        assert_eq!(
            "v99999999999".parse::<ApiVersion>(),
            Err(VersionParseError::InvalidNumber)
        );
        assert_eq!("v0".parse::<ApiVersion>(), Err(VersionParseError::Zero));
    }

    #[test]
    fn test_is_valid_version() {
        assert!(is_valid_version("v1"));
        assert!(is_valid_version("v10"));
        assert!(!is_valid_version("v0"));
        assert!(!is_valid_version("version1"));
        assert!(!is_valid_version("latest"));
        assert!(!is_valid_version(""));
    }

    #[test]
    fn test_comparison_is_lexicographic() {
        assert_eq!(compare("v1", "v2"), Ordering::Less);
        assert_eq!(compare("v2", "v2"), Ordering::Equal);
        assert_eq!(compare("v10", "v2"), Ordering::Less);

        let v10: ApiVersion = "v10".parse().unwrap();
        let v2: ApiVersion = "v2".parse().unwrap();
        assert!(v10 < v2);
    }

    #[test]
    fn test_predecessor() {
        assert_eq!(predecessor("v2").as_deref(), Some("v1"));
        assert_eq!(predecessor("v10").as_deref(), Some("v9"));
        assert_eq!(predecessor("v1"), None);
        assert_eq!(predecessor("beta"), None);
        assert_eq!(predecessor("v"), None);

        let v3 = ApiVersion::new(3).unwrap();
        assert_eq!(v3.predecessor(), ApiVersion::new(2));
        assert_eq!(ApiVersion::v1().predecessor(), None);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(ApiVersion::new(0).is_none());
        assert_eq!(ApiVersion::new(7).unwrap().to_string(), "v7");
    }

    #[test]
    fn test_serde_as_string() {
        let v: ApiVersion = serde_json::from_str("\"v3\"").unwrap();
        assert_eq!(v.number(), 3);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"v3\"");
        assert!(serde_json::from_str::<ApiVersion>("\"three\"").is_err());
    }
}
