use opentelemetry::propagation::Injector;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Writes propagated trace context into outgoing HTTP request headers.
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl<'a> Injector for HeaderInjector<'a> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(header_name) = key.parse::<HeaderName>()
            && let Ok(header_value) = HeaderValue::from_str(&value)
        {
            self.0.insert(header_name, header_value);
        }
    }
}
