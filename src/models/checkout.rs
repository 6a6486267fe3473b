//! Checkout data model: shipping details with field-local validation and
//! the order-creation / payment-verification wire types.

use crate::models::cart::LineItem;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Indian mobile number: exactly 10 digits, leading digit 6-9.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").expect("phone regex"));
// Indian postal code: exactly 6 digits.
static PINCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").expect("pincode regex"));

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("must be a 10-digit number starting with 6-9".into());
        Err(err)
    }
}

fn validate_pincode(pincode: &str) -> Result<(), ValidationError> {
    if PINCODE_RE.is_match(pincode) {
        Ok(())
    } else {
        let mut err = ValidationError::new("pincode");
        err.message = Some("must be exactly 6 digits".into());
        Err(err)
    }
}

/// Shipping form data. Validation is field-local: each failing field is
/// reported individually through `validator::ValidationErrors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ShippingDetails {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(custom = "validate_pincode")]
    pub pincode: String,
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash / pay on delivery
    Cod,
    /// Hosted online payment widget
    Online,
}

/// Body of `POST /checkout/create-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub shipping: ShippingDetails,
    pub cart_items: Vec<LineItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
}

/// Response of `POST /checkout/create-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: i64,
    /// Order handle issued by the payment gateway (online payments)
    #[serde(default)]
    pub gateway_order_id: String,
    /// Amount the gateway expects, in minor units
    #[serde(default)]
    pub gateway_amount: i64,
}

/// Body of `POST /checkout/verify-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub payment_id: String,
    pub gateway_order_id: String,
    pub signature: String,
    pub order_id: i64,
}

/// Response of `POST /checkout/verify-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub order_status: String,
}

/// What the hosted payment widget hands back on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCallback {
    pub payment_id: String,
    pub gateway_order_id: String,
    pub signature: String,
}
