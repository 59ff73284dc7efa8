//! Animal image fetching and dispatch.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ApiEndpoints;
use crate::domain::entities::{AnimalImage, AnimalKind};
use crate::domain::errors::{FetchError, classify};
use crate::domain::gateways::HttpTransport;

/// File extensions accepted as dog images.
const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Service fetching one random image per call from the upstream animal APIs.
///
/// The transport, endpoints and timeout are all supplied by the caller; the
/// service owns no network resources of its own and keeps no state between
/// calls.
pub struct AnimalService<T: HttpTransport + ?Sized> {
    transport: Arc<T>,
    endpoints: ApiEndpoints,
    timeout: Duration,
}

impl<T: HttpTransport + ?Sized> AnimalService<T> {
    /// Creates a new animal service.
    pub fn new(transport: Arc<T>, endpoints: ApiEndpoints, timeout: Duration) -> Self {
        Self {
            transport,
            endpoints,
            timeout,
        }
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Fetches an image for an animal given by name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ParseError`] for names outside the supported set,
    /// otherwise whatever the per-animal fetcher returns.
    pub async fn fetch_animal(&self, name: &str) -> Result<AnimalImage, FetchError> {
        match name.parse::<AnimalKind>() {
            Ok(kind) => self.fetch(kind).await,
            Err(e) => {
                warn!(animal = name, "Rejected fetch for unsupported animal");
                Err(FetchError::parse(name, e.to_string()))
            }
        }
    }

    /// Fetches an image for `kind`.
    pub async fn fetch(&self, kind: AnimalKind) -> Result<AnimalImage, FetchError> {
        let result = match kind {
            AnimalKind::Duck => self.fetch_duck().await,
            AnimalKind::Dog => self.fetch_dog().await,
            AnimalKind::Cat => self.fetch_cat().await,
        };

        let outcome = if result.is_ok() { "success" } else { "error" };
        counter!("animal_fetch_total", "animal" => kind.as_str(), "outcome" => outcome)
            .increment(1);

        match &result {
            Ok(image) => info!(animal = %kind, url = %image.url, "Fetched animal image"),
            Err(e) => warn!(animal = %kind, error = %e, "Animal fetch failed"),
        }

        result
    }

    /// Fetches a duck image (`{"url": ...}`).
    ///
    /// # Errors
    ///
    /// Any transport failure is classified; a missing `url` is a
    /// [`FetchError::ParseError`]. No retry is attempted.
    pub async fn fetch_duck(&self) -> Result<AnimalImage, FetchError> {
        let kind = AnimalKind::Duck;
        let body = self.get_json(&self.endpoints.duck_url, kind).await?;

        let url = string_field(&body, "url")
            .ok_or_else(|| FetchError::parse(kind.as_str(), "No 'url' field in response"))?;

        to_image(url, kind)
    }

    /// Fetches a cat image (`[{"url": ...}, ...]`, first element wins).
    ///
    /// # Errors
    ///
    /// An empty array or a first element without `url` is a
    /// [`FetchError::ParseError`].
    pub async fn fetch_cat(&self) -> Result<AnimalImage, FetchError> {
        let kind = AnimalKind::Cat;
        let body = self.get_json(&self.endpoints.cat_url, kind).await?;

        let first = match &body {
            Value::Array(items) => items
                .first()
                .ok_or_else(|| FetchError::parse(kind.as_str(), "Empty response from API"))?,
            _ => {
                return Err(FetchError::parse(
                    kind.as_str(),
                    "Expected a JSON array in response",
                ));
            }
        };

        let url = string_field(first, "url")
            .ok_or_else(|| FetchError::parse(kind.as_str(), "No 'url' field in response"))?;

        to_image(url, kind)
    }

    /// Fetches a dog image, trying the primary API and then the fallback.
    ///
    /// The primary answer (`{"url": ...}`) is only accepted when it points at
    /// an image file; otherwise the fallback (`{"message": ...}`) is asked with
    /// the same check. The fallback is never called once the primary succeeds.
    ///
    /// # Errors
    ///
    /// When both sources fail, returns the primary source's error.
    pub async fn fetch_dog(&self) -> Result<AnimalImage, FetchError> {
        let primary_error = match self
            .fetch_dog_from(&self.endpoints.dog_url, "url")
            .await
        {
            Ok(image) => return Ok(image),
            Err(e) => e,
        };

        info!(error = %primary_error, "Primary dog API failed, trying fallback");
        counter!("dog_fallback_total").increment(1);

        match self
            .fetch_dog_from(&self.endpoints.dog_fallback_url, "message")
            .await
        {
            Ok(image) => Ok(image),
            Err(fallback_error) => {
                warn!(error = %fallback_error, "Fallback dog API failed as well");
                Err(primary_error)
            }
        }
    }

    async fn fetch_dog_from(&self, endpoint: &str, field: &str) -> Result<AnimalImage, FetchError> {
        let kind = AnimalKind::Dog;
        let body = self.get_json(endpoint, kind).await?;
        let url = string_field(&body, field).unwrap_or_default();

        if !has_image_extension(url) {
            return Err(FetchError::parse(
                kind.as_str(),
                format!("Invalid URL format: {url}"),
            ));
        }

        to_image(url, kind)
    }

    /// GETs `endpoint` and decodes a JSON body, classifying every failure.
    async fn get_json(&self, endpoint: &str, kind: AnimalKind) -> Result<Value, FetchError> {
        debug!(animal = %kind, url = endpoint, "Requesting upstream API");

        self.transport
            .get(endpoint, self.timeout)
            .await
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<Value>())
            .map_err(|failure| classify(failure, kind.as_str(), self.timeout))
    }
}

/// Returns a non-blank string field of a JSON object.
fn string_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Case-insensitive check for a known image file extension.
pub fn has_image_extension(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn to_image(url: &str, kind: AnimalKind) -> Result<AnimalImage, FetchError> {
    AnimalImage::new(url, kind)
        .ok_or_else(|| FetchError::parse(kind.as_str(), format!("Invalid URL format: {url}")))
}
