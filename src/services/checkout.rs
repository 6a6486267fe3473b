//! The checkout orchestrator: a small forward-only step machine over the
//! cart, the shipping form, and the remote order/payment backend.

use crate::errors::StorefrontError;
use crate::events::{Event, EventSender};
use crate::models::checkout::{
    CreateOrderRequest, CreateOrderResponse, PaymentCallback, PaymentMethod, ShippingDetails,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::services::cart::CartStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Checkout steps. The only backward transition is the explicit
/// `edit_address` action from `Payment` to `Shipping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Success,
}

/// A pending gateway order handle for the hosted payment widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub order_id: i64,
    pub gateway_order_id: String,
    /// Amount in minor units, as the gateway expects
    pub amount: i64,
}

/// Confirmation returned once an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: i64,
}

/// One checkout attempt. Created by [`CheckoutService::start`]; holds the
/// current step, the validated shipping details, and any pending gateway
/// order.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub step: CheckoutStep,
    pub shipping: Option<ShippingDetails>,
    pub pending_order: Option<GatewayOrder>,
}

/// Seam to the remote order/payment backend.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, StorefrontError>;

    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, StorefrontError>;
}

/// HTTP implementation of [`OrderGateway`].
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StorefrontError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StorefrontError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, StorefrontError> {
        self.post_json("checkout/create-order", request).await
    }

    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<VerifyPaymentResponse, StorefrontError> {
        self.post_json("checkout/verify-payment", request).await
    }
}

/// Orchestrates checkout over the cart store and the order gateway.
#[derive(Clone)]
pub struct CheckoutService {
    cart: Arc<CartStore>,
    gateway: Arc<dyn OrderGateway>,
    event_sender: EventSender,
}

impl CheckoutService {
    pub fn new(
        cart: Arc<CartStore>,
        gateway: Arc<dyn OrderGateway>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            cart,
            gateway,
            event_sender,
        }
    }

    /// Starts a checkout session. Checkout is unreachable with an empty
    /// cart: callers redirect away on this error.
    #[instrument(skip(self))]
    pub fn start(&self) -> Result<CheckoutSession, StorefrontError> {
        let cart = self.cart.get()?;
        if cart.is_empty() {
            return Err(StorefrontError::invalid_operation("cart is empty"));
        }
        self.event_sender.send_or_log(Event::CheckoutStarted {
            item_count: cart.item_count,
        });
        Ok(CheckoutSession {
            step: CheckoutStep::Shipping,
            shipping: None,
            pending_order: None,
        })
    }

    /// Validates the shipping form and advances to the payment step. All
    /// fields must pass; failures are reported per field via
    /// [`StorefrontError::Validation`].
    pub fn submit_shipping(
        &self,
        session: &mut CheckoutSession,
        details: ShippingDetails,
    ) -> Result<(), StorefrontError> {
        if session.step != CheckoutStep::Shipping {
            return Err(StorefrontError::invalid_operation(
                "shipping details can only be submitted from the shipping step",
            ));
        }
        details.validate()?;
        session.shipping = Some(details);
        session.step = CheckoutStep::Payment;
        Ok(())
    }

    /// The explicit "edit address" action: the one allowed backward
    /// transition, from payment back to shipping.
    pub fn edit_address(&self, session: &mut CheckoutSession) -> Result<(), StorefrontError> {
        if session.step != CheckoutStep::Payment {
            return Err(StorefrontError::invalid_operation(
                "address can only be edited from the payment step",
            ));
        }
        session.step = CheckoutStep::Shipping;
        Ok(())
    }

    /// Pay-on-delivery: one order-creation call, then straight to success
    /// with the cart emptied. The payment widget is never involved.
    #[instrument(skip(self, session))]
    pub async fn place_cod_order(
        &self,
        session: &mut CheckoutSession,
    ) -> Result<OrderConfirmation, StorefrontError> {
        let request = self.build_order_request(session, PaymentMethod::Cod)?;
        let response = self.create_order(&request).await?;

        self.cart.clear()?;
        session.step = CheckoutStep::Success;
        self.event_sender.send_or_log(Event::CheckoutCompleted {
            order_id: response.order_id,
        });
        info!(order_id = response.order_id, "cod order placed");
        Ok(OrderConfirmation {
            order_id: response.order_id,
        })
    }

    /// Online payment, phase one: create the order remotely and return the
    /// gateway handle for the hosted widget. The session stays in the
    /// payment step until the widget calls back.
    #[instrument(skip(self, session))]
    pub async fn begin_online_payment(
        &self,
        session: &mut CheckoutSession,
    ) -> Result<GatewayOrder, StorefrontError> {
        let request = self.build_order_request(session, PaymentMethod::Online)?;
        let response = self.create_order(&request).await?;

        let pending = GatewayOrder {
            order_id: response.order_id,
            gateway_order_id: response.gateway_order_id,
            amount: response.gateway_amount,
        };
        session.pending_order = Some(pending.clone());
        info!(order_id = pending.order_id, "online payment started");
        Ok(pending)
    }

    /// Online payment, phase two: verify the widget's callback triple. Only
    /// a successful verification reaches success and empties the cart; any
    /// failure leaves the session in the payment step with the cart intact;
    /// the remote order stays unconfirmed for the backend to reconcile.
    #[instrument(skip(self, session, callback))]
    pub async fn confirm_online_payment(
        &self,
        session: &mut CheckoutSession,
        callback: PaymentCallback,
    ) -> Result<OrderConfirmation, StorefrontError> {
        if session.step != CheckoutStep::Payment {
            return Err(StorefrontError::invalid_operation(
                "payment can only be confirmed from the payment step",
            ));
        }
        let pending = session.pending_order.clone().ok_or_else(|| {
            StorefrontError::invalid_operation("no pending gateway order to confirm")
        })?;

        let request = VerifyPaymentRequest {
            payment_id: callback.payment_id,
            gateway_order_id: callback.gateway_order_id,
            signature: callback.signature,
            order_id: pending.order_id,
        };

        let response = match self.gateway.verify_payment(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(order_id = pending.order_id, error = %err, "payment verification errored");
                self.event_sender.send_or_log(Event::PaymentVerificationFailed {
                    order_id: pending.order_id,
                });
                return Err(StorefrontError::PaymentVerificationFailed(err.to_string()));
            }
        };

        if !response.success {
            warn!(
                order_id = pending.order_id,
                message = %response.message,
                "payment verification rejected"
            );
            self.event_sender.send_or_log(Event::PaymentVerificationFailed {
                order_id: pending.order_id,
            });
            return Err(StorefrontError::PaymentVerificationFailed(
                if response.message.is_empty() {
                    "payment could not be verified".to_string()
                } else {
                    response.message
                },
            ));
        }

        self.cart.clear()?;
        session.step = CheckoutStep::Success;
        self.event_sender.send_or_log(Event::CheckoutCompleted {
            order_id: pending.order_id,
        });
        info!(order_id = pending.order_id, "online payment verified");
        Ok(OrderConfirmation {
            order_id: pending.order_id,
        })
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, StorefrontError> {
        let response = self
            .gateway
            .create_order(request)
            .await
            .map_err(|err| StorefrontError::OrderCreationFailed(err.to_string()))?;
        if !response.success {
            return Err(StorefrontError::OrderCreationFailed(
                "order was rejected by the backend".to_string(),
            ));
        }
        Ok(response)
    }

    fn build_order_request(
        &self,
        session: &CheckoutSession,
        payment_method: PaymentMethod,
    ) -> Result<CreateOrderRequest, StorefrontError> {
        if session.step != CheckoutStep::Payment {
            return Err(StorefrontError::invalid_operation(
                "orders can only be placed from the payment step",
            ));
        }
        let shipping = session.shipping.clone().ok_or_else(|| {
            StorefrontError::invalid_operation("shipping details are missing")
        })?;
        let cart = self.cart.get()?;
        if cart.is_empty() {
            return Err(StorefrontError::invalid_operation("cart is empty"));
        }
        Ok(CreateOrderRequest {
            shipping,
            cart_items: cart.items,
            total: cart.total,
            payment_method,
        })
    }
}
