//! Typed arguments for the operations that take more than a payment id.

use cardgate_core::{
    cart_value, CartItem, Currency, Customer, Language, PayOperation, ReturnMethod, Value,
};

use crate::error::GatewayError;

/// Longest order description the gateway accepts, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 20;

/// Default lifetime of an initiated payment, in seconds.
pub const DEFAULT_TTL_SEC: u32 = 600;

const PAY_METHOD_CARD: &str = "card";

/// Arguments of `payment/init`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInit {
    pub order_no: String,
    /// Amount in hundredths of the currency unit.
    pub total_amount: i64,
    pub return_url: String,
    pub description: String,
    pub customer: Option<Customer>,
    /// When empty, a single item `(description, 1, total_amount)` is sent.
    pub cart: Vec<CartItem>,
    pub merchant_data: Option<String>,
    pub customer_id: Option<String>,
    pub currency: Currency,
    pub language: Language,
    pub close_payment: bool,
    pub return_method: ReturnMethod,
    pub pay_operation: PayOperation,
    pub ttl_sec: u32,
    pub logo_version: Option<u32>,
    pub color_scheme_version: Option<u32>,
}

impl PaymentInit {
    pub fn new(
        order_no: impl Into<String>,
        total_amount: i64,
        return_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            order_no: order_no.into(),
            total_amount,
            return_url: return_url.into(),
            description: description.into(),
            customer: None,
            cart: Vec::new(),
            merchant_data: None,
            customer_id: None,
            currency: Currency::default(),
            language: Language::default(),
            close_payment: true,
            return_method: ReturnMethod::default(),
            pay_operation: PayOperation::default(),
            ttl_sec: DEFAULT_TTL_SEC,
            logo_version: None,
            color_scheme_version: None,
        }
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn cart(mut self, cart: Vec<CartItem>) -> Self {
        self.cart = cart;
        self
    }

    pub fn merchant_data(mut self, data: impl Into<String>) -> Self {
        self.merchant_data = Some(data.into());
        self
    }

    pub fn customer_id(mut self, id: impl Into<String>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn close_payment(mut self, close: bool) -> Self {
        self.close_payment = close;
        self
    }

    pub fn return_method(mut self, method: ReturnMethod) -> Self {
        self.return_method = method;
        self
    }

    pub fn pay_operation(mut self, operation: PayOperation) -> Self {
        self.pay_operation = operation;
        self
    }

    pub fn ttl_sec(mut self, ttl_sec: u32) -> Self {
        self.ttl_sec = ttl_sec;
        self
    }

    pub fn logo_version(mut self, version: u32) -> Self {
        self.logo_version = Some(version);
        self
    }

    pub fn color_scheme_version(mut self, version: u32) -> Self {
        self.color_scheme_version = Some(version);
        self
    }

    /// Request fields in signing order.
    pub fn to_pairs(
        &self,
        merchant_id: &str,
        dttm: &str,
    ) -> Result<Vec<(&'static str, Value)>, GatewayError> {
        let chars = self.description.chars().count();
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(GatewayError::InvalidRequest(format!(
                "description is {chars} characters, at most {MAX_DESCRIPTION_CHARS} allowed"
            )));
        }

        let cart = if self.cart.is_empty() {
            cart_value(&[CartItem::new(self.description.as_str(), 1, self.total_amount)])
        } else {
            cart_value(&self.cart)
        };

        Ok(vec![
            ("merchantId", merchant_id.into()),
            ("orderNo", self.order_no.as_str().into()),
            ("dttm", dttm.into()),
            ("payOperation", self.pay_operation.as_str().into()),
            ("payMethod", PAY_METHOD_CARD.into()),
            ("totalAmount", self.total_amount.into()),
            ("currency", self.currency.code().into()),
            ("closePayment", self.close_payment.into()),
            ("returnUrl", self.return_url.as_str().into()),
            ("returnMethod", self.return_method.as_str().into()),
            ("cart", cart),
            ("customer", self.customer.as_ref().map(Customer::to_value).into()),
            ("merchantData", self.merchant_data.clone().into()),
            ("customerId", self.customer_id.clone().into()),
            ("language", self.language.code().into()),
            ("ttlSec", self.ttl_sec.into()),
            ("logoVersion", self.logo_version.into()),
            ("colorSchemeVersion", self.color_scheme_version.into()),
        ])
    }
}

/// Arguments of `oneclick/init`, a repeat charge against a stored card.
#[derive(Debug, Clone, PartialEq)]
pub struct OneclickInit {
    /// Pay id of the original `oneclickPayment` initiation.
    pub orig_pay_id: String,
    pub order_no: String,
    pub total_amount: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub return_url: String,
    pub return_method: ReturnMethod,
    pub customer: Option<Customer>,
    pub client_initiated: bool,
}

impl OneclickInit {
    pub fn new(orig_pay_id: impl Into<String>, order_no: impl Into<String>, total_amount: i64) -> Self {
        Self {
            orig_pay_id: orig_pay_id.into(),
            order_no: order_no.into(),
            total_amount,
            currency: Currency::default(),
            description: None,
            return_url: "http://localhost".into(),
            return_method: ReturnMethod::Get,
            customer: None,
            client_initiated: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn return_url(mut self, url: impl Into<String>, method: ReturnMethod) -> Self {
        self.return_url = url.into();
        self.return_method = method;
        self
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn client_initiated(mut self, client_initiated: bool) -> Self {
        self.client_initiated = client_initiated;
        self
    }

    /// Request fields in signing order.
    pub fn to_pairs(&self, merchant_id: &str, dttm: &str) -> Vec<(&'static str, Value)> {
        vec![
            ("merchantId", merchant_id.into()),
            ("origPayId", self.orig_pay_id.as_str().into()),
            ("orderNo", self.order_no.as_str().into()),
            ("dttm", dttm.into()),
            ("totalAmount", self.total_amount.into()),
            ("currency", self.currency.code().into()),
            ("description", self.description.clone().into()),
            ("returnUrl", self.return_url.as_str().into()),
            ("returnMethod", self.return_method.as_str().into()),
            ("customer", self.customer.as_ref().map(Customer::to_value).into()),
            ("clientInitiated", self.client_initiated.into()),
        ]
    }
}
