use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::models::{CardIdentifier, CardNumber};
use crate::server::error::AppError;
use crate::server::state::AppState;

/// `card_number` arrives either as a JSON string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CardNumberInput {
    Text(String),
    Number(serde_json::Number),
}

impl From<CardNumberInput> for CardNumber {
    fn from(input: CardNumberInput) -> Self {
        match input {
            CardNumberInput::Text(text) => CardNumber(text),
            CardNumberInput::Number(number) => CardNumber(number.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AddCardRequest {
    pub edition_name: Option<String>,
    pub card_name: Option<String>,
    pub card_number: Option<CardNumberInput>,
}

impl AddCardRequest {
    /// Names of required fields that are absent or blank.
    fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.edition_name) {
            missing.push("edition_name");
        }
        if blank(&self.card_name) {
            missing.push("card_name");
        }
        match &self.card_number {
            None => missing.push("card_number"),
            Some(CardNumberInput::Text(text)) if text.trim().is_empty() => missing.push("card_number"),
            Some(_) => {}
        }
        missing
    }

    fn into_identifier(self) -> Result<CardIdentifier, AppError> {
        let missing = self.missing_fields();
        match (self.edition_name, self.card_name, self.card_number) {
            (Some(edition), Some(name), Some(number)) if missing.is_empty() => {
                Ok(CardIdentifier::new(edition, name, number))
            }
            _ => Err(AppError::bad_request(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// POST /add_card
///
/// Extract prices for one card and store the resulting record.
pub async fn add_card(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected add_card body: {}", rejection);
        AppError::bad_request("missing required fields: edition_name, card_name, card_number")
    })?;
    let identifier = request.into_identifier()?;

    let record = state
        .source
        .extract(identifier)
        .await
        .map_err(|_| AppError::bad_request("could not extract card data"))?;

    state.store.insert_card(&record).await.map_err(|e| {
        error!("Failed to insert {}: {:#}", record.url, e);
        AppError::internal(format!("failed to insert card: {}", e))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "card inserted", "card_data": record })),
    ))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "message": "System is running" }))
}
