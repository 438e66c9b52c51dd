//! ServiceResponse - JSON body returned by the generation services.

use serde_json::{json, Value};

/// A JSON response from one of the generation services.
///
/// The pipeline only relies on a `url` locator and, loosely, a `status`
/// field; everything else is kept as-is in [`ServiceResponse::body`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    body: Value,
}

impl ServiceResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Synthetic success response used in mock mode.
    ///
    /// The URL is derived from the stage name, e.g. `generate_image` becomes
    /// `https://mock.api/generate_image`.
    pub fn mock(name: &str) -> Self {
        Self::new(json!({
            "status": "success",
            "mock": true,
            "url": format!("https://mock.api/{}", name.to_lowercase()),
        }))
    }

    /// The resource locator of this response.
    ///
    /// Reads the top-level `url` of an object body. Array bodies (the render
    /// service answers with a list of renders) yield the first element's `url`.
    pub fn url(&self) -> Option<&str> {
        let object = match &self.body {
            Value::Array(items) => items.first()?,
            other => other,
        };
        object.get("url").and_then(Value::as_str)
    }

    /// The `status` field, if the service sent one.
    pub fn status(&self) -> Option<&str> {
        let object = match &self.body {
            Value::Array(items) => items.first()?,
            other => other,
        };
        object.get("status").and_then(Value::as_str)
    }

    /// Whether this response was synthesised in mock mode.
    pub fn is_mock(&self) -> bool {
        self.body
            .get("mock")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}
