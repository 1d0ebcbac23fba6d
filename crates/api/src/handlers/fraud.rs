//! Handler for customer fraud reports.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use cardvault_core::alert::AlertSeverity;
use cardvault_core::error::CoreError;
use cardvault_core::types::DbId;
use cardvault_db::models::alert::{alert_types, Alert, CreateAlert};
use cardvault_db::repositories::{AlertRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CustomerAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /fraud/report`.
#[derive(Debug, Deserialize)]
pub struct FraudReportRequest {
    pub transaction_id: DbId,
    pub description: Option<String>,
}

/// Payload returned after a fraud report is accepted.
#[derive(Debug, Serialize)]
pub struct FraudReportResponse {
    pub transaction_id: DbId,
    pub alert: Alert,
    /// Reference id from the core-banking network submission.
    pub network_reference: String,
}

/// POST /api/v1/fraud/report
///
/// Flag an owned transaction as suspected fraud: sets the transaction's
/// fraud flag, raises a high-severity alert for the fraud queue, and
/// submits the flag to the card network.
pub async fn report_fraud(
    State(state): State<AppState>,
    auth: CustomerAuth,
    Json(input): Json<FraudReportRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FraudReportResponse>>)> {
    let transaction =
        TransactionRepo::find_for_customer(&state.pool, input.transaction_id, auth.customer_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Transaction",
                id: input.transaction_id,
            }))?;

    TransactionRepo::set_fraud_flag(&state.pool, transaction.id, auth.customer_id).await?;

    let message = match input.description {
        Some(ref desc) if !desc.trim().is_empty() => {
            format!("Customer reported fraud: {}", desc.trim())
        }
        _ => format!(
            "Customer reported fraud on transaction at {}",
            transaction.merchant_name
        ),
    };

    let alert = AlertRepo::create(
        &state.pool,
        &CreateAlert {
            customer_id: auth.customer_id,
            card_id: transaction.card_id,
            transaction_id: Some(transaction.id),
            alert_type: alert_types::FRAUD.to_string(),
            severity: AlertSeverity::High.as_str().to_string(),
            message,
            action_required: true,
        },
    )
    .await?;

    let ack = state.corebank.flag_transaction_fraud(transaction.id).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(FraudReportResponse {
            transaction_id: transaction.id,
            alert,
            network_reference: ack.reference,
        })),
    ))
}
