//! Animal kinds and the image value returned by a successful fetch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// The closed set of animals the service can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimalKind {
    Duck,
    Dog,
    Cat,
}

impl AnimalKind {
    /// All supported animals, in dispatch-table order.
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Duck, AnimalKind::Dog, AnimalKind::Cat];

    /// Lowercase name used on the wire and in tool names.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalKind::Duck => "duck",
            AnimalKind::Dog => "dog",
            AnimalKind::Cat => "cat",
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported animal name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown animal type: {0}")]
pub struct UnknownAnimal(pub String);

impl FromStr for AnimalKind {
    type Err = UnknownAnimal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duck" => Ok(AnimalKind::Duck),
            "dog" => Ok(AnimalKind::Dog),
            "cat" => Ok(AnimalKind::Cat),
            _ => Err(UnknownAnimal(s.to_string())),
        }
    }
}

/// A successfully fetched animal image.
///
/// Only constructed through [`AnimalImage::new`], which rejects anything but
/// absolute HTTP(S) URLs with a host, so holders can use `url` as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalImage {
    pub url: String,
    pub animal: AnimalKind,
}

impl AnimalImage {
    /// Wraps `url` if it parses as an HTTP(S) URL with a non-empty host.
    ///
    /// The trimmed input is kept verbatim rather than the normalized form.
    pub fn new(url: impl Into<String>, animal: AnimalKind) -> Option<Self> {
        let url = url.into();
        let trimmed = url.trim();

        let parsed = Url::parse(trimmed).ok()?;
        let has_host = parsed.host_str().is_some_and(|host| !host.is_empty());

        if matches!(parsed.scheme(), "http" | "https") && has_host {
            Some(Self {
                url: trimmed.to_string(),
                animal,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Duck".parse::<AnimalKind>(), Ok(AnimalKind::Duck));
        assert_eq!(" DOG ".parse::<AnimalKind>(), Ok(AnimalKind::Dog));
        assert_eq!("cat".parse::<AnimalKind>(), Ok(AnimalKind::Cat));
    }

    #[test]
    fn test_parse_unknown_animal() {
        let err = "giraffe".parse::<AnimalKind>().unwrap_err();
        assert_eq!(err, UnknownAnimal("giraffe".to_string()));
        assert_eq!(err.to_string(), "Unknown animal type: giraffe");
    }

    #[test]
    fn test_display_matches_serde() {
        for kind in AnimalKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_image_rejects_blank_and_non_http() {
        assert!(AnimalImage::new("", AnimalKind::Duck).is_none());
        assert!(AnimalImage::new("   ", AnimalKind::Duck).is_none());
        assert!(AnimalImage::new("ftp://x/duck.jpg", AnimalKind::Duck).is_none());
        assert!(AnimalImage::new("/relative/duck.jpg", AnimalKind::Duck).is_none());
        assert!(AnimalImage::new("https://", AnimalKind::Duck).is_none());
        assert!(AnimalImage::new("http://", AnimalKind::Duck).is_none());
        assert!(AnimalImage::new("mailto:duck@x.org", AnimalKind::Duck).is_none());
    }

    #[test]
    fn test_image_accepts_http_and_https() {
        let img = AnimalImage::new("https://x/duck.jpg", AnimalKind::Duck).unwrap();
        assert_eq!(img.url, "https://x/duck.jpg");
        assert_eq!(img.animal, AnimalKind::Duck);

        assert!(AnimalImage::new("http://x/duck.jpg", AnimalKind::Duck).is_some());
    }
}
