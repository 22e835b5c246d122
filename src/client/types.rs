use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Key every request carries to name the controller operation.
pub const ACTION_KEY: &str = "action";

/// Key the controller uses for application-level rejections.
pub const ERROR_KEY: &str = "error";

/// Which controller process a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Domain actions and status polling.
    Appliance,
    /// Power operations (start, reboot, shutdown).
    System,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Appliance => write!(f, "appliance"),
            Endpoint::System => write!(f, "system"),
        }
    }
}

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{s}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(x) => serializer.serialize_f64(*x),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Extra request parameters, in the order they are sent.
pub type Params = Vec<(String, Scalar)>;

/// Builds one request parameter.
pub fn param(key: &str, value: impl Into<Scalar>) -> (String, Scalar) {
    (key.to_string(), value.into())
}

/// An action-keyed request. The `action` pair always comes first.
///
/// Keys ending in `[]` are array fields and may repeat; every other key
/// appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pairs: Vec<(String, Scalar)>,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            pairs: vec![(ACTION_KEY.to_string(), Scalar::Text(action.into()))],
        }
    }

    /// Builder form of [`ActionRequest::set`].
    pub fn with(mut self, key: &str, value: impl Into<Scalar>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key`, replacing an earlier value unless the key is an array field.
    pub fn set(&mut self, key: &str, value: impl Into<Scalar>) {
        let value = value.into();
        if !key.ends_with("[]")
            && let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k == key)
        {
            slot.1 = value;
            return;
        }
        self.pairs.push((key.to_string(), value));
    }

    /// Applies `params` on top of this request; later values win.
    pub fn merge(mut self, params: &[(String, Scalar)]) -> Self {
        for (key, value) in params {
            self.set(key, value.clone());
        }
        self
    }

    pub fn action(&self) -> &str {
        match self.get(ACTION_KEY) {
            Some(Scalar::Text(action)) => action,
            _ => "",
        }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn pairs(&self) -> &[(String, Scalar)] {
        &self.pairs
    }
}

/// Builds a request from already-ordered pairs (form serialization).
impl FromIterator<(String, Scalar)> for ActionRequest {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        let mut pairs: Vec<(String, Scalar)> = iter.into_iter().collect();
        match pairs.iter().position(|(k, _)| k == ACTION_KEY) {
            Some(0) => {}
            Some(index) => {
                let action = pairs.remove(index);
                pairs.insert(0, action);
            }
            None => pairs.insert(0, (ACTION_KEY.to_string(), Scalar::Text(String::new()))),
        }
        Self { pairs }
    }
}

/// Opaque controller reply. Only a handful of reserved keys mean anything
/// to the console itself; screens read the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionResponse {
    fields: Map<String, Value>,
}

impl ActionResponse {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Any valid JSON is accepted; non-object bodies carry no fields.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Application-level rejection, delivered as data.
    pub fn error(&self) -> Option<&str> {
        self.str_field(ERROR_KEY)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Value> for ActionResponse {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// The network call itself failed. The controller answering with an
/// `error` field is NOT a transport error.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout.
    Unreachable(String),
    /// Controller answered with a non-success HTTP status.
    Status(u16),
    /// Body was not JSON.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Unreachable(msg) => write!(f, "endpoint unreachable: {msg}"),
            TransportError::Status(code) => write!(f, "unexpected HTTP status {code}"),
            TransportError::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}
