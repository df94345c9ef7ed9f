//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{NewWish, ValidationError, WishId};

/// Create wish request body
#[derive(Debug, Deserialize)]
pub struct CreateWishRequest {
    pub name: String,
    pub wish: String,
}

/// Extract a JSON body and validate it into a [`NewWish`]
pub struct ValidNewWish(pub NewWish);

impl<S> FromRequest<S> for ValidNewWish
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<CreateWishRequest>::from_request(req, state).await?;
        let new = NewWish::new(body.name, body.wish)?;
        Ok(Self(new))
    }
}

/// Extract and validate an integer wish id from path
pub struct ValidWishId(pub WishId);

impl<S> FromRequestParts<S> for ValidWishId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::InvalidId { value: String::new() }))?;

        let id = raw
            .parse::<WishId>()
            .map_err(|_| ApiError::Validation(ValidationError::InvalidId { value: raw.clone() }))?;

        Ok(Self(id))
    }
}
