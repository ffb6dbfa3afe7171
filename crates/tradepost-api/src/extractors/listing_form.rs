//! Multipart listing form: wizard fields plus `photos` files.

use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;
use uuid::Uuid;

use tradepost_core::error::AppError;
use tradepost_service::listing::ListingDraft;

use crate::error::ApiError;

/// A listing submitted as `multipart/form-data`.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub draft: ListingDraft,
    /// Raw photo files in upload order.
    pub photos: Vec<Bytes>,
}

impl<S> FromRequest<S> for ListingForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Expected a multipart form: {e}")))?;

        let mut form = ListingForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "photos" {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                if !data.is_empty() {
                    form.photos.push(data);
                }
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
            apply_field(&mut form.draft, &name, text)?;
        }

        Ok(form)
    }
}

/// Copy one text field into the draft. Unknown fields are ignored.
fn apply_field(draft: &mut ListingDraft, name: &str, value: String) -> Result<(), AppError> {
    match name {
        "category_id" => draft.category_id = parse_id(&value, "category_id")?,
        "condition_id" => draft.condition_id = parse_id(&value, "condition_id")?,
        "title" => draft.title = value,
        "description" => draft.description = value,
        "price" => draft.price = value,
        "location" => draft.location = value,
        _ => {}
    }
    Ok(())
}

fn parse_id(value: &str, field: &str) -> Result<Option<Uuid>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(value)
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid {field}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_field() {
        let mut draft = ListingDraft::default();
        let id = Uuid::new_v4();
        apply_field(&mut draft, "category_id", id.to_string()).unwrap();
        apply_field(&mut draft, "price", "12.50".to_string()).unwrap();
        apply_field(&mut draft, "unknown", "x".to_string()).unwrap();

        assert_eq!(draft.category_id, Some(id));
        assert_eq!(draft.price, "12.50");
    }

    #[test]
    fn test_blank_id_means_unset() {
        let mut draft = ListingDraft::default();
        apply_field(&mut draft, "condition_id", "  ".to_string()).unwrap();
        assert!(draft.condition_id.is_none());
        assert!(apply_field(&mut draft, "condition_id", "nope".to_string()).is_err());
    }
}
