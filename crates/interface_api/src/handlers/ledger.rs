//! Ledger handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::BookingId;
use crate::{AppState, error::ApiError};
use crate::dto::ledger::*;

/// Lists every booking with the ledger totals
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = state.service.dashboard().await?;
    Ok(Json(dashboard.into()))
}

/// Derives a settlement from any two of the three amounts
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let Json(request) = payload?;
    let known = request.known_amounts()?;
    let delivery = request.delivery()?;

    let settlement = state.service.calculate(known, delivery)?;
    Ok(Json(settlement.into()))
}

/// Records a new booking
pub async fn save_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let booking = request.into_booking()?;

    state.service.save(&booking).await?;
    info!(booking_id = %booking.booking_id, "Booking saved");

    Ok(Json(MessageResponse::new("Data saved successfully!")))
}

/// Overwrites an existing booking
pub async fn update_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let booking = request.into_booking()?;

    state.service.update(&booking).await?;
    info!(booking_id = %booking.booking_id, "Booking updated");

    Ok(Json(MessageResponse::new("Data updated successfully!")))
}

/// Corrects the platform profit of every booking
pub async fn balance(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let rebalanced = state.service.balance().await?;
    info!(rebalanced, "Ledger rebalanced");

    Ok(Json(
        MessageResponse::new("All payments balanced successfully!").with_rebalanced(rebalanced),
    ))
}

/// Gets a booking by ID
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking_id = BookingId::new(booking_id)?;
    let booking = state.service.get(&booking_id).await?;
    Ok(Json(booking.into()))
}
