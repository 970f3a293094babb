//! Persisted browser session state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cookies and per-origin storage captured from a browser context.
///
/// Serialized as `{"cookies": [...], "origins": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageState {
    #[serde(default)]
    pub cookies: Vec<Value>,
    #[serde(default)]
    pub origins: Vec<Value>,
}

impl StorageState {
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.origins.is_empty()
    }

    /// Cookies in the shape accepted by `Storage.setCookies`.
    pub fn cookie_params(&self) -> Vec<Value> {
        self.cookies.iter().filter_map(to_cookie_param).collect()
    }
}

/// Convert a stored cookie into a `Network.CookieParam`.
///
/// Returns `None` for entries missing a name, value or domain. Session
/// cookies (negative expiry) and unknown `sameSite` values are left unset.
pub fn to_cookie_param(cookie: &Value) -> Option<Value> {
    let obj = cookie.as_object()?;
    let name = obj.get("name")?.as_str()?;
    let value = obj.get("value")?.as_str()?;
    let domain = obj.get("domain")?.as_str()?;

    let mut param = Map::new();
    param.insert("name".into(), Value::from(name));
    param.insert("value".into(), Value::from(value));
    param.insert("domain".into(), Value::from(domain));
    param.insert(
        "path".into(),
        Value::from(obj.get("path").and_then(Value::as_str).unwrap_or("/")),
    );

    if let Some(expires) = obj.get("expires").and_then(Value::as_f64) {
        if expires >= 0.0 {
            param.insert("expires".into(), Value::from(expires));
        }
    }
    for flag in ["httpOnly", "secure"] {
        if let Some(b) = obj.get(flag).and_then(Value::as_bool) {
            param.insert(flag.into(), Value::from(b));
        }
    }
    if let Some(same_site) = obj.get("sameSite").and_then(Value::as_str) {
        if matches!(same_site, "Strict" | "Lax" | "None") {
            param.insert("sameSite".into(), Value::from(same_site));
        }
    }

    Some(Value::Object(param))
}
