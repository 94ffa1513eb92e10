use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::ValidationError;

use crate::errors::ServiceError;

/// Upper bound on ids accepted by a single batch request
pub const MAX_BATCH_ORDERS: usize = 200;

/// JSON body extractor whose rejections use the API error envelope
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Order id lists must be non-empty, bounded and contain only positive ids
pub fn validate_order_ids(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some("At least one order ID is required".into());
        return Err(err);
    }
    validate_order_id_bounds(ids)
}

/// Size cap and positive ids; an empty list passes
pub fn validate_order_id_bounds(ids: &[i32]) -> Result<(), ValidationError> {
    if ids.len() > MAX_BATCH_ORDERS {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("At most {} orders can be submitted at once", MAX_BATCH_ORDERS).into());
        return Err(err);
    }
    if ids.iter().any(|id| *id <= 0) {
        let mut err = ValidationError::new("range");
        err.message = Some("Order IDs must be positive integers".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1, 2, 3], true)]
    #[case(&[], false)]
    #[case(&[4, 0], false)]
    #[case(&[-7], false)]
    fn order_id_lists(#[case] ids: &[i32], #[case] ok: bool) {
        assert_eq!(validate_order_ids(ids).is_ok(), ok);
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&[9], true)]
    #[case(&[3, -1], false)]
    fn bounds_allow_empty_lists(#[case] ids: &[i32], #[case] ok: bool) {
        assert_eq!(validate_order_id_bounds(ids).is_ok(), ok);
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let ids: Vec<i32> = (1..=(MAX_BATCH_ORDERS as i32 + 1)).collect();
        assert!(validate_order_ids(&ids).is_err());
    }
}
