//! Films service
//!
//! The films endpoint is not enveloped. Its response is schema-validated:
//! `total`, `page` and `pageCount` must be positive integers and every film
//! must decode with a string id and an IMDb rating between 0 and 10.

use crate::client::{ApiRequest, Transport};
use crate::error::ApiError;
use crate::types::FilmsResponse;
use crate::validation::{self, Issues, Validate, ValidationError};
use std::ops::RangeInclusive;
use std::sync::Arc;

const RATING_RANGE: RangeInclusive<f64> = 0.0..=10.0;

impl Validate for FilmsResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Issues::default();
        issues.positive("total", self.total);
        issues.positive("page", self.page);
        issues.positive("pageCount", self.page_count);
        for (index, film) in self.data.iter().enumerate() {
            if !RATING_RANGE.contains(&film.rating_imdb) {
                issues.push(
                    format!("data[{index}].ratingImdb"),
                    format!("expected a rating between 0 and 10, got {}", film.rating_imdb),
                );
            }
        }
        issues.finish()
    }
}

/// `GET films`
#[derive(Clone)]
pub struct FilmsApi {
    transport: Arc<dyn Transport>,
}

impl FilmsApi {
    /// Create the module over `transport` (configured with the films base URL)
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch and validate the films page
    ///
    /// # Errors
    ///
    /// Transport and status failures; [`ApiError::Validation`] when the body
    /// does not match the schema.
    pub async fn list(&self) -> Result<FilmsResponse, ApiError> {
        let body = self.transport.request(ApiRequest::get("films")).await?;
        Ok(validation::parse_validated(body)?)
    }
}
