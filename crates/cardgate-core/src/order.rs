//! Typed builders for the nested `cart` and `customer` request fields.

use crate::case::convert_keys_to_camel_case;
use crate::payload::{Payload, Value};

/// One line of the shopping cart.
///
/// Field order is fixed: `name`, `quantity`, `amount`, then the optional
/// `description`. Every value enters the signing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub quantity: u32,
    /// Amount in minor units (hundredths of the currency).
    pub amount: i64,
    pub description: Option<String>,
}

impl CartItem {
    pub fn new(name: impl Into<String>, quantity: u32, amount: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn to_value(&self) -> Value {
        let mut item = Payload::new();
        item.insert("name", self.name.as_str());
        item.insert("quantity", self.quantity);
        item.insert("amount", self.amount);
        if let Some(description) = &self.description {
            item.insert("description", description);
        }
        Value::Object(item)
    }
}

/// Build the `cart` field value from line items.
pub fn cart_value(items: &[CartItem]) -> Value {
    Value::List(items.iter().map(CartItem::to_value).collect())
}

/// Account history of the customer at the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerAccount {
    pub created_at: Option<String>,
    pub changed_at: Option<String>,
}

/// How the customer authenticated at the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerLogin {
    pub auth: Option<String>,
    pub auth_at: Option<String>,
}

/// Customer data sent with payment and one-click inits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub account: Option<CustomerAccount>,
    pub login: Option<CustomerLogin>,
    /// Additional fields, keyed in snake_case or camelCase. Transmitted, not signed.
    pub extra: Payload,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn mobile_phone(mut self, phone: impl Into<String>) -> Self {
        self.mobile_phone = Some(phone.into());
        self
    }

    pub fn account(mut self, account: CustomerAccount) -> Self {
        self.account = Some(account);
        self
    }

    pub fn login(mut self, login: CustomerLogin) -> Self {
        self.login = Some(login);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// The `customer` field value: camelCase keys, absent fields omitted.
    pub fn to_value(&self) -> Value {
        let mut data = Payload::new();
        insert_present(&mut data, "name", &self.name);
        insert_present(&mut data, "email", &self.email);
        insert_present(&mut data, "mobile_phone", &self.mobile_phone);
        if let Some(account) = &self.account {
            let mut nested = Payload::new();
            insert_present(&mut nested, "created_at", &account.created_at);
            insert_present(&mut nested, "changed_at", &account.changed_at);
            if !nested.is_empty() {
                data.insert("account", nested);
            }
        }
        if let Some(login) = &self.login {
            let mut nested = Payload::new();
            insert_present(&mut nested, "auth", &login.auth);
            insert_present(&mut nested, "auth_at", &login.auth_at);
            if !nested.is_empty() {
                data.insert("login", nested);
            }
        }
        for (key, value) in self.extra.iter() {
            data.insert(key, value.clone());
        }
        convert_keys_to_camel_case(&Value::Object(data))
    }
}

fn insert_present(data: &mut Payload, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        data.insert(key, value);
    }
}
