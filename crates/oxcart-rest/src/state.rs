//! Application state for Axum handlers.

use oxcart_service::{
    CartService, OrderService, PaymentService, ProductService, ReviewService, UserInfoService,
};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub cart_service: Arc<dyn CartService>,
    pub order_service: Arc<dyn OrderService>,
    pub product_service: Arc<dyn ProductService>,
    pub review_service: Arc<dyn ReviewService>,
    pub user_info_service: Arc<dyn UserInfoService>,
    pub payment_service: Arc<dyn PaymentService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        cart_service: Arc<dyn CartService>,
        order_service: Arc<dyn OrderService>,
        product_service: Arc<dyn ProductService>,
        review_service: Arc<dyn ReviewService>,
        user_info_service: Arc<dyn UserInfoService>,
        payment_service: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            cart_service,
            order_service,
            product_service,
            review_service,
            user_info_service,
            payment_service,
        }
    }
}
