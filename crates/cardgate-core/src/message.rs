//! Canonical signing message.
//!
//! The gateway signs the pipe-joined values of a payload in field order.
//! `cart` and `customer` are flattened with their own rules before joining.

use crate::payload::{Payload, Value};

/// Field holding the cart line items.
pub const CART_FIELD: &str = "cart";
/// Field holding the nested customer object.
pub const CUSTOMER_FIELD: &str = "customer";

/// Signed customer fields, in signing order.
pub const CUSTOMER_KEYS: [&str; 3] = ["name", "email", "mobilePhone"];
/// Signed `customer.account` fields, in signing order.
pub const ACCOUNT_KEYS: [&str; 2] = ["createdAt", "changedAt"];
/// Signed `customer.login` fields, in signing order.
pub const LOGIN_KEYS: [&str; 2] = ["auth", "authAt"];

const SEPARATOR: &str = "|";

/// Build the canonical message text for `payload`.
///
/// Null fields are dropped; `0`, `false` and empty strings are kept.
pub fn canonical_string(payload: &Payload) -> String {
    payload
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match key {
            CART_FIELD if !value.is_empty() => cart_message(value),
            CUSTOMER_FIELD if !value.is_empty() => customer_message(value),
            _ => value.to_message_text(),
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Canonical message as the UTF-8 bytes that get digested.
pub fn canonical_message(payload: &Payload) -> Vec<u8> {
    canonical_string(payload).into_bytes()
}

/// All values of all line items, items in list order.
fn cart_message(cart: &Value) -> String {
    match cart {
        Value::List(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(fields) => join_present(fields.values()),
                other => other.to_message_text(),
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR),
        other => other.to_message_text(),
    }
}

/// Customer, account and login segments, empty segments omitted.
fn customer_message(customer: &Value) -> String {
    let Value::Object(customer) = customer else {
        return customer.to_message_text();
    };
    let account = customer.get("account").and_then(Value::as_object);
    let login = customer.get("login").and_then(Value::as_object);

    [
        fixed_order_values(Some(customer), &CUSTOMER_KEYS),
        fixed_order_values(account, &ACCOUNT_KEYS),
        fixed_order_values(login, &LOGIN_KEYS),
    ]
    .into_iter()
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>()
    .join(SEPARATOR)
}

fn fixed_order_values(data: Option<&Payload>, keys: &[&str]) -> String {
    data.map(|data| join_present(keys.iter().filter_map(|key| data.get(key))))
        .unwrap_or_default()
}

fn join_present<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .filter(|v| !v.is_null())
        .map(Value::to_message_text)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn obj<const N: usize>(pairs: [(&str, Value); N]) -> Value {
        Value::Object(Payload::from_pairs(pairs))
    }

    fn full_customer() -> Value {
        obj([
            ("name", "Jan Novák".into()),
            ("email", "jan.novak@example.com".into()),
            ("mobilePhone", "+420.800300300".into()),
            (
                "account",
                obj([
                    ("createdAt", "2022-01-12T12:10:37+01:00".into()),
                    ("changedAt", "2022-01-15T15:10:12+01:00".into()),
                ]),
            ),
            (
                "login",
                obj([
                    ("auth", "account".into()),
                    ("authAt", "2022-01-25T13:10:03+01:00".into()),
                ]),
            ),
        ])
    }

    #[test]
    fn test_payment_init_message_layout() {
        let payload = Payload::from_pairs([
            ("merchantId", Value::from("M1MIPS0000")),
            ("orderNo", "5547".into()),
            ("dttm", "20220125131559".into()),
            ("payOperation", "payment".into()),
            ("payMethod", "card".into()),
            ("totalAmount", 123400.into()),
            ("currency", "CZK".into()),
            ("closePayment", true.into()),
            ("returnUrl", "https://shop.example.com/return".into()),
            ("returnMethod", "POST".into()),
            (
                "cart",
                Value::List(vec![
                    obj([
                        ("name", "Wireless headphones".into()),
                        ("quantity", 1.into()),
                        ("amount", 123400.into()),
                    ]),
                    obj([
                        ("name", "Shipping".into()),
                        ("quantity", 1.into()),
                        ("amount", 0.into()),
                        ("description", "DPL".into()),
                    ]),
                ]),
            ),
            ("customer", full_customer()),
        ]);

        let expected = concat!(
            "M1MIPS0000|5547|20220125131559|payment|card|123400|CZK|true|https://shop.example.com/return|POST",
            "|Wireless headphones|1|123400|Shipping|1|0|DPL",
            "|Jan Novák|jan.novak@example.com|+420.800300300",
            "|2022-01-12T12:10:37+01:00|2022-01-15T15:10:12+01:00",
            "|account|2022-01-25T13:10:03+01:00",
        );
        assert_eq!(canonical_message(&payload), expected.as_bytes());
    }

    #[test]
    fn test_customer_segments_use_fixed_order() {
        let shuffled = obj([
            ("mobilePhone", "+420.800300300".into()),
            ("email", "jan.novak@example.com".into()),
            ("name", "Jan Novák".into()),
            (
                "login",
                obj([
                    ("authAt", "2022-01-25T13:10:03+01:00".into()),
                    ("auth", "account".into()),
                ]),
            ),
            (
                "account",
                obj([
                    ("changedAt", "2022-01-15T15:10:12+01:00".into()),
                    ("createdAt", "2022-01-12T12:10:37+01:00".into()),
                ]),
            ),
        ]);
        assert_eq!(customer_message(&shuffled), customer_message(&full_customer()));
    }

    #[test]
    fn test_customer_unknown_keys_not_signed() {
        let customer = obj([
            ("name", "Jan Novák".into()),
            ("nonsense", "Test".into()),
            ("account", obj([("createdAt", "2022-01-12".into()), ("nonsense", "Test".into())])),
        ]);
        assert_eq!(customer_message(&customer), "Jan Novák|2022-01-12");
    }

    #[test]
    fn test_customer_missing_segments_omitted() {
        let no_account = obj([
            ("name", "Jan Novák".into()),
            ("login", obj([("auth", "account".into())])),
        ]);
        assert_eq!(customer_message(&no_account), "Jan Novák|account");

        let only_account = obj([("account", obj([("createdAt", "2022-01-12".into())]))]);
        assert_eq!(customer_message(&only_account), "2022-01-12");

        let name_and_phone = obj([
            ("name", "Jan Novák".into()),
            ("mobilePhone", "+420.800300300".into()),
        ]);
        assert_eq!(customer_message(&name_and_phone), "Jan Novák|+420.800300300");
    }

    #[test]
    fn test_null_fields_dropped_but_zero_and_false_kept() {
        let payload = Payload::from_pairs([
            ("merchantId", Value::from("M")),
            ("merchantData", Value::Null),
            ("resultCode", 0.into()),
            ("closePayment", false.into()),
        ]);
        assert_eq!(canonical_string(&payload), "M|0|false");
    }

    #[test]
    fn test_empty_payload_is_empty_message() {
        assert_eq!(canonical_message(&Payload::new()), Vec::<u8>::new());
        let all_null = Payload::from_pairs([("a", Value::Null), ("b", Value::Null)]);
        assert_eq!(canonical_string(&all_null), "");
    }

    #[test]
    fn test_unicode_is_not_escaped() {
        let msg = "Příliš žluťoučký kůň úpěl ďábelské ódy.";
        let payload = Payload::from_pairs([("dttm", "20240101120000"), ("description", msg)]);
        let bytes = canonical_message(&payload);
        assert_eq!(String::from_utf8(bytes).unwrap(), format!("20240101120000|{msg}"));
    }

    fn cart_item() -> impl Strategy<Value = Value> {
        ("[a-zA-Z ]{1,12}", 1i64..100, 0i64..1_000_000).prop_map(|(name, qty, amount)| {
            obj([("name", name.into()), ("quantity", qty.into()), ("amount", amount.into())])
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_cart_equals_pipe_join_of_item_values(
            merchant in "[A-Z0-9]{4,10}",
            items in prop::collection::vec(cart_item(), 1..5),
        ) {
            let with_cart = Payload::from_pairs([
                ("merchantId", Value::from(merchant.clone())),
                ("cart", Value::List(items.clone())),
                ("language", "cs".into()),
            ]);
            let joined = items
                .iter()
                .flat_map(|item| item.as_object().unwrap().values().cloned().collect::<Vec<_>>())
                .map(|v| v.to_message_text())
                .collect::<Vec<_>>()
                .join("|");
            let replaced = Payload::from_pairs([
                ("merchantId", Value::from(merchant)),
                ("cart", Value::from(joined)),
                ("language", "cs".into()),
            ]);
            prop_assert_eq!(canonical_string(&with_cart), canonical_string(&replaced));
        }

        #[test]
        fn test_booleans_render_as_words(flags in prop::collection::vec(any::<bool>(), 1..8)) {
            let payload: Payload = flags
                .iter()
                .enumerate()
                .map(|(i, b)| (format!("f{i}"), Value::Bool(*b)))
                .collect();
            let message = canonical_string(&payload);
            for (segment, flag) in message.split('|').zip(&flags) {
                prop_assert_eq!(segment, if *flag { "true" } else { "false" });
            }
        }
    }
}
