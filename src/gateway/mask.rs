use serde::Serialize;

/// Keeps the last three digits of an msisdn, masking the rest.
pub fn mask_msisdn(msisdn: &str) -> String {
    let len = msisdn.len();
    if len > 3 {
        "*".repeat(len - 3) + &msisdn[len - 3..]
    } else {
        msisdn.to_string()
    }
}

/// Return true if a key name likely holds a subscriber phone number.
fn is_msisdn_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("phone") || k.contains("msisdn") || k == "partya" || k == "party_a"
}

/// Return true if a key name likely holds credential material.
fn is_secret_key(key: &str) -> bool {
    let k = key.to_lowercase();
    k.contains("password")
        || k.contains("passkey")
        || k.contains("secret")
        || k.contains("token")
        || k.contains("authorization")
}

pub fn secure_serializable(v: impl Serialize) -> serde_json::Value {
    let value = serde_json::to_value(v).expect("serialization is infallible");
    secure_value(&value)
}

/// Recursively masks msisdn and credential fields so request/response
/// payloads can be logged without leaking subscriber or merchant data.
pub fn secure_value(v: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let is_msisdn = is_msisdn_key(k);
                let is_secret = is_secret_key(k);
                let new_val = match val {
                    Value::String(_) if is_secret => Value::String("***".to_string()),
                    Value::String(s) if is_msisdn => Value::String(mask_msisdn(s)),
                    Value::Number(n) if is_msisdn => {
                        let s = n.to_string();
                        Value::String(mask_msisdn(&s))
                    }
                    Value::Number(_) if is_secret => Value::String("***".to_string()),
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        // primitives that are not objects: leave them as-is
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_phone_fields_keeping_last_digits() {
        let payload = serde_json::json!({
            "PhoneNumber": "254712345678",
            "PartyA": "254712345678",
            "Amount": 100,
        });
        let secured = secure_value(&payload);
        assert_eq!(secured["PhoneNumber"], "*********678");
        assert_eq!(secured["PartyA"], "*********678");
        assert_eq!(secured["Amount"], 100);
    }

    #[test]
    fn masks_credentials_entirely() {
        let payload = serde_json::json!({
            "Password": "c2hvcnRjb2RlcGFzc2tleQ==",
            "access_token": "abc123",
            "nested": { "ConsumerSecret": "s3cret" },
        });
        let secured = secure_value(&payload);
        assert_eq!(secured["Password"], "***");
        assert_eq!(secured["access_token"], "***");
        assert_eq!(secured["nested"]["ConsumerSecret"], "***");
    }

    #[test]
    fn short_values_are_left_alone() {
        assert_eq!(mask_msisdn("07"), "07");
    }
}
