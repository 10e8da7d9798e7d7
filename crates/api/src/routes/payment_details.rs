//! Payment details handlers.
//!
//! There is at most one payment-details record. The admin upsert creates it
//! when absent (full record plus QR image required) and merges into it
//! otherwise; the public read returns it as-is.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::payment::{PaymentDetails, UpsertPaymentDetailsRequest};
use domain::services::CleanupPolicy;
use persistence::repositories::PaymentRepository;

use crate::app::AppState;
use crate::error::{ApiError, MutationError, MutationSuccess};
use crate::routes::store_and_respond;
use crate::services::assets::{cleanup, media_folder, upload_payload};

const TAG: &str = "payment-details";
const FOLDER: &str = "payments";

fn not_found() -> ApiError {
    ApiError::NotFound("Payment details not configured".into())
}

pub async fn get(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(hit) = state.cache.get(TAG) {
        return Ok(Json(hit));
    }

    let repo = PaymentRepository::new(state.pool.clone());
    let details = repo.find_first().await?.ok_or_else(not_found)?;
    store_and_respond(&state.cache, TAG, &[TAG], &details)
}

pub async fn upsert(
    State(state): State<AppState>,
    Json(request): Json<UpsertPaymentDetailsRequest>,
) -> Result<Json<MutationSuccess<PaymentDetails>>, MutationError> {
    request.validate()?;

    let repo = PaymentRepository::new(state.pool.clone());
    let folder = media_folder(&state.config.media, FOLDER);

    let details = match repo.find_first().await? {
        None => {
            let missing = request.missing_for_setup();
            if !missing.is_empty() {
                let message = if missing == ["qr_image"] {
                    "QR code image is required for first-time setup".to_string()
                } else {
                    format!(
                        "Missing required fields for first-time setup: {}",
                        missing.join(", ")
                    )
                };
                return Err(ApiError::Validation(message).into());
            }

            // missing_for_setup() checked all of these.
            let (account_name, account_number, ifsc_code, bank_name, qr_payload) = match (
                &request.account_name,
                &request.account_number,
                &request.ifsc_code,
                &request.bank_name,
                &request.qr_image,
            ) {
                (Some(a), Some(b), Some(c), Some(d), Some(e)) => (a, b, c, d, e),
                _ => return Err(ApiError::Internal("Setup fields vanished".into()).into()),
            };

            let qr_image = upload_payload(state.media.as_ref(), qr_payload, &folder).await?;
            repo.create(
                account_name,
                account_number,
                ifsc_code,
                bank_name,
                request.upi_id.as_deref(),
                &qr_image,
            )
            .await?
        }
        Some(existing) => {
            let uploaded_qr = match &request.qr_image {
                Some(payload) => {
                    cleanup(
                        state.media.as_ref(),
                        &existing.qr_image.public_id,
                        CleanupPolicy::Continue,
                    )
                    .await?;
                    Some(upload_payload(state.media.as_ref(), payload, &folder).await?)
                }
                None => None,
            };

            let fields = request.merge_over(&existing, uploaded_qr);
            repo.update(
                existing.id,
                &fields.account_name,
                &fields.account_number,
                &fields.ifsc_code,
                &fields.bank_name,
                fields.upi_id.as_deref(),
                &fields.qr_image,
            )
            .await?
        }
    };

    state.cache.invalidate(TAG);
    Ok(MutationSuccess::respond(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_field_names() {
        let request = UpsertPaymentDetailsRequest {
            account_name: Some("Charity Trust".to_string()),
            ..Default::default()
        };
        let missing = request.missing_for_setup();
        let message = format!(
            "Missing required fields for first-time setup: {}",
            missing.join(", ")
        );
        assert!(message.contains("account_number"));
        assert!(message.contains("qr_image"));
        assert!(!message.contains("account_name,"));
    }
}
