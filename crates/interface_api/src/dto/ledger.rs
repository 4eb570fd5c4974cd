//! Ledger DTOs
//!
//! Requests accept amounts as JSON numbers or numeric strings. Responses
//! carry amounts as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use core_kernel::{parse_amount, BookingId, MoneyError};
use domain_booking::{
    Booking, BookingAmounts, Dashboard, Delivery, KnownAmounts, LedgerError, LedgerTotals,
    Settlement,
};

#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub user_amount: Value,
    #[serde(default)]
    pub host_amount: Value,
    #[serde(default)]
    pub platform_profit: Value,
    #[serde(default)]
    pub delivery: Value,
}

impl CalculateRequest {
    /// Collects the supplied amounts; `null` and blank strings count as absent
    pub fn known_amounts(&self) -> Result<KnownAmounts, MoneyError> {
        Ok(KnownAmounts {
            user_amount: parse_amount("user_amount", &self.user_amount)?,
            host_amount: parse_amount("host_amount", &self.host_amount)?,
            platform_profit: parse_amount("platform_profit", &self.platform_profit)?,
        })
    }

    pub fn delivery(&self) -> Result<Delivery, LedgerError> {
        parse_delivery(&self.delivery)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1, max = 128, message = "booking_id must be 1 to 128 characters"))]
    pub booking_id: String,
    #[serde(default)]
    pub user_amount: Value,
    #[serde(default)]
    pub host_amount: Value,
    #[serde(default)]
    pub platform_profit: Value,
    #[serde(default)]
    pub insurance: Value,
    #[serde(default)]
    pub gst: Value,
    #[serde(default)]
    pub delivery: Value,
}

impl BookingRequest {
    /// Converts the request into a booking; absent amounts become zero
    pub fn into_booking(self) -> Result<Booking, LedgerError> {
        let amounts = BookingAmounts {
            user_amount: amount_or_zero("user_amount", &self.user_amount)?,
            host_amount: amount_or_zero("host_amount", &self.host_amount)?,
            platform_profit: amount_or_zero("platform_profit", &self.platform_profit)?,
            insurance: amount_or_zero("insurance", &self.insurance)?,
            gst: amount_or_zero("gst", &self.gst)?,
            delivery: parse_delivery(&self.delivery)?,
        };
        Ok(Booking::new(BookingId::new(self.booking_id)?, amounts))
    }
}

fn amount_or_zero(field: &str, value: &Value) -> Result<Decimal, MoneyError> {
    Ok(parse_amount(field, value)?.unwrap_or(Decimal::ZERO))
}

/// Reads the delivery flag
///
/// Accepts booleans, numbers (zero is `No`), `"1"`/`"0"`, and the labels
/// `yes`/`no` or `true`/`false` in any case. Absent, `null` and blank strings mean `No`.
/// Any other string is rejected rather than read as truthy.
pub fn parse_delivery(value: &Value) -> Result<Delivery, LedgerError> {
    match value {
        Value::Null => Ok(Delivery::No),
        Value::Bool(requested) => Ok(Delivery::from(*requested)),
        Value::Number(n) => Ok(Delivery::from(n.as_f64().is_some_and(|v| v != 0.0))),
        Value::String(label) => match label.trim().to_ascii_lowercase().as_str() {
            "" | "no" | "false" | "0" => Ok(Delivery::No),
            "yes" | "true" | "1" => Ok(Delivery::Yes),
            _ => Err(LedgerError::InvalidValue(format!(
                "delivery must be yes or no, got '{}'",
                label
            ))),
        },
        other => Err(LedgerError::InvalidValue(format!(
            "delivery must be a boolean, got {}",
            other
        ))),
    }
}

#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub user_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub host_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub platform_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gst: Decimal,
}

impl From<Settlement> for SettlementResponse {
    fn from(s: Settlement) -> Self {
        Self {
            user_amount: s.user_amount,
            host_amount: s.host_amount,
            platform_profit: s.platform_profit,
            insurance: s.insurance,
            gst: s.gst,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebalanced: Option<u64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rebalanced: None,
        }
    }

    pub fn with_rebalanced(mut self, count: u64) -> Self {
        self.rebalanced = Some(count);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub user_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub host_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub platform_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gst: Decimal,
    pub delivery: Delivery,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let amounts = booking.amounts;
        Self {
            booking_id: booking.booking_id.into(),
            user_amount: amounts.user_amount,
            host_amount: amounts.host_amount,
            platform_profit: amounts.platform_profit,
            insurance: amounts.insurance,
            gst: amounts.gst,
            delivery: amounts.delivery,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_host_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ebitda: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ebitda_percentage: Decimal,
}

impl From<LedgerTotals> for TotalsResponse {
    fn from(t: LedgerTotals) -> Self {
        Self {
            total_profit: t.total_profit,
            total_host_amount: t.total_host_amount,
            total_insurance: t.total_insurance,
            total_sales: t.total_sales,
            profit_percentage: t.profit_percentage,
            ebitda: t.ebitda,
            ebitda_percentage: t.ebitda_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub bookings: Vec<BookingResponse>,
    pub totals: TotalsResponse,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            bookings: dashboard.bookings.into_iter().map(BookingResponse::from).collect(),
            totals: dashboard.totals.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_calculate_request_treats_null_as_absent() {
        let request: CalculateRequest = serde_json::from_value(json!({
            "user_amount": 10000,
            "host_amount": "7000",
            "platform_profit": null
        }))
        .unwrap();

        let known = request.known_amounts().unwrap();
        assert_eq!(known.user_amount, Some(dec!(10000)));
        assert_eq!(known.host_amount, Some(dec!(7000)));
        assert_eq!(known.platform_profit, None);
        assert_eq!(request.delivery().unwrap(), Delivery::No);
    }

    #[test]
    fn test_booking_request_defaults_amounts_to_zero() {
        let request: BookingRequest = serde_json::from_value(json!({
            "booking_id": "BK-1",
            "user_amount": 500,
            "delivery": true
        }))
        .unwrap();

        let booking = request.into_booking().unwrap();
        assert_eq!(booking.amounts.user_amount, dec!(500));
        assert_eq!(booking.amounts.gst, Decimal::ZERO);
        assert_eq!(booking.amounts.delivery, Delivery::Yes);
    }

    #[test]
    fn test_booking_request_rejects_text_amount() {
        let request: BookingRequest = serde_json::from_value(json!({
            "booking_id": "BK-1",
            "gst": "abc"
        }))
        .unwrap();

        assert!(matches!(request.into_booking(), Err(LedgerError::InvalidValue(_))));
    }

    #[test]
    fn test_parse_delivery_labels() {
        assert_eq!(parse_delivery(&json!("Yes")).unwrap(), Delivery::Yes);
        assert_eq!(parse_delivery(&json!("yes")).unwrap(), Delivery::Yes);
        assert_eq!(parse_delivery(&json!("TRUE")).unwrap(), Delivery::Yes);
        assert_eq!(parse_delivery(&json!(" no ")).unwrap(), Delivery::No);
        assert_eq!(parse_delivery(&json!("")).unwrap(), Delivery::No);
        assert_eq!(parse_delivery(&json!(false)).unwrap(), Delivery::No);
    }

    #[test]
    fn test_parse_delivery_numbers() {
        assert_eq!(parse_delivery(&json!(1)).unwrap(), Delivery::Yes);
        assert_eq!(parse_delivery(&json!(0)).unwrap(), Delivery::No);
        assert_eq!(parse_delivery(&json!(0.0)).unwrap(), Delivery::No);
    }

    #[test]
    fn test_parse_delivery_rejects_other_values() {
        assert!(matches!(parse_delivery(&json!("maybe")), Err(LedgerError::InvalidValue(_))));
        assert!(matches!(parse_delivery(&json!("2")), Err(LedgerError::InvalidValue(_))));
        assert!(parse_delivery(&json!([true])).is_err());
    }

    #[test]
    fn test_settlement_response_serializes_numbers() {
        let response = SettlementResponse::from(Settlement {
            user_amount: dec!(10000.00),
            host_amount: dec!(7000.00),
            platform_profit: dec!(1060.00),
            insurance: dec!(1400.00),
            gst: dec!(540.00),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["platform_profit"].as_f64(), Some(1060.0));
    }
}
