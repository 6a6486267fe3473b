#![allow(dead_code)]

use async_trait::async_trait;
use framecraft::errors::StorefrontError;
use framecraft::events::EventSender;
use framecraft::models::cart::{Cart, FrameSelection, Orientation};
use framecraft::models::checkout::{
    CreateOrderRequest, CreateOrderResponse, ShippingDetails, VerifyPaymentRequest,
    VerifyPaymentResponse,
};
use framecraft::services::cart::CartStore;
use framecraft::services::checkout::{CheckoutService, OrderGateway};
use framecraft::storage::InMemoryCartStorage;
use std::sync::{Arc, Mutex};

/// Cart store over fresh in-memory storage.
pub fn cart_store() -> CartStore {
    CartStore::new(Arc::new(InMemoryCartStorage::new()), EventSender::default())
}

/// A frame selection varying only in the fields the caller cares about.
pub fn selection(size_id: i64, orientation: Orientation) -> FrameSelection {
    FrameSelection {
        size_id,
        size_name: "12×8".to_string(),
        dimensions: "12x8 inches".to_string(),
        color_id: 1,
        color_name: "Classic Black".to_string(),
        color_hex: "#212121".to_string(),
        bead_size_id: 3,
        bead_size_name: "1.5 inch".to_string(),
        border_thickness_id: 1,
        border_thickness_name: "1 inch".to_string(),
        orientation,
        uploaded_image: None,
        is_bulk_order: false,
    }
}

/// Shipping details that pass every field validation.
pub fn valid_shipping() -> ShippingDetails {
    ShippingDetails {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        address: "14 MG Road".to_string(),
        city: "Pune".to_string(),
        state: "Maharashtra".to_string(),
        pincode: "411001".to_string(),
    }
}

/// Asserts the cart's derived fields against its line items.
pub fn assert_cart_invariants(cart: &Cart) {
    let quantity_sum: i32 = cart.items.iter().map(|item| item.quantity).sum();
    let subtotal_sum: rust_decimal::Decimal =
        cart.items.iter().map(|item| item.subtotal).sum();
    assert_eq!(cart.item_count, quantity_sum, "item_count != Σ quantity");
    assert_eq!(cart.subtotal, subtotal_sum, "subtotal != Σ line.subtotal");
    assert_eq!(cart.total, cart.subtotal, "total != subtotal");
    for item in &cart.items {
        assert_eq!(
            item.subtotal,
            item.unit_price * rust_decimal::Decimal::from(item.quantity),
            "line subtotal != unit_price × quantity"
        );
    }
}

/// Recording gateway double: counts every call and returns scripted
/// outcomes.
pub struct RecordingGateway {
    pub create_calls: Mutex<Vec<CreateOrderRequest>>,
    pub verify_calls: Mutex<Vec<VerifyPaymentRequest>>,
    pub fail_create: bool,
    pub verify_success: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            create_calls: Mutex::new(Vec::new()),
            verify_calls: Mutex::new(Vec::new()),
            fail_create: false,
            verify_success: true,
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::new()
        }
    }

    pub fn rejecting_verification() -> Self {
        Self {
            verify_success: false,
            ..Self::new()
        }
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.lock().expect("lock").len()
    }

    pub fn verify_call_count(&self) -> usize {
        self.verify_calls.lock().expect("lock").len()
    }
}

#[async_trait]
impl OrderGateway for RecordingGateway {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, StorefrontError> {
        self.create_calls.lock().expect("lock").push(request.clone());
        if self.fail_create {
            return Err(StorefrontError::ExternalService(
                "backend unavailable".to_string(),
            ));
        }
        Ok(CreateOrderResponse {
            success: true,
            order_id: 1001,
            gateway_order_id: "gw_order_abc123".to_string(),
            gateway_amount: 64_900,
        })
    }

    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, StorefrontError> {
        self.verify_calls.lock().expect("lock").push(request.clone());
        if self.verify_success {
            Ok(VerifyPaymentResponse {
                success: true,
                message: "Payment verified".to_string(),
                order_status: "processing".to_string(),
            })
        } else {
            Ok(VerifyPaymentResponse {
                success: false,
                message: "Signature mismatch".to_string(),
                order_status: "pending".to_string(),
            })
        }
    }
}

/// Checkout service wired to the given gateway over a fresh cart store.
pub fn checkout_harness(gateway: Arc<RecordingGateway>) -> (Arc<CartStore>, CheckoutService) {
    let cart = Arc::new(cart_store());
    let service = CheckoutService::new(cart.clone(), gateway, EventSender::default());
    (cart, service)
}
