//! Chat history query extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chatdeck_service::dto::HistoryQuery;

use crate::response::ApiError;

/// `?channel=&limit=` of the history endpoint
///
/// A `limit` that is not a number reads as absent; defaults and the upper
/// bound are applied by the service.
#[derive(Debug, Clone, Default)]
pub struct History(pub HistoryQuery);

#[async_trait]
impl<S> FromRequestParts<S> for History
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<HistoryQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(History(query))
    }
}
