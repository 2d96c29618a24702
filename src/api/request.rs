//! Request descriptors.

use reqwest::{
    Client, Method, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{ApiError, TokenStore};

const JSON: &str = "application/json";

/// Method, headers and encoded body of one API call.
///
/// Every request advertises JSON in both directions. GET and DELETE never
/// carry a body.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    body: Option<String>,
}

impl RequestOptions {
    /// Options for `method` with the default JSON headers.
    pub fn new(method: Method) -> Self {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));

        Self {
            method,
            headers,
            body: None,
        }
    }

    /// Attach `body` as JSON. Ignored for GET and DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] when the body cannot be serialised.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        if self.method == Method::GET || self.method == Method::DELETE {
            debug!(method = %self.method, "dropping body for body-less method");

            return Ok(self);
        }

        self.body = Some(serde_json::to_string(body).map_err(ApiError::Encode)?);

        Ok(self)
    }

    /// Add or override a header. Names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Header`] for an invalid header name or value.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_err| ApiError::Header(name.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_err| ApiError::Header(name.to_string()))?;

        self.headers.insert(header_name, header_value);

        Ok(self)
    }

    /// Add every `(name, value)` pair in order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Header`] for the first invalid pair.
    pub fn headers<'h>(
        self,
        extra: impl IntoIterator<Item = (&'h str, &'h str)>,
    ) -> Result<Self, ApiError> {
        extra
            .into_iter()
            .try_fold(self, |options, (name, value)| options.header(name, value))
    }

    /// Add `Authorization: Bearer <token>` when `tokens` has one.
    ///
    /// A missing token is not an error; the request goes out without it.
    pub fn bearer_token(mut self, tokens: &dyn TokenStore) -> Self {
        let Some(token) = tokens.token() else {
            warn!("attempted to add token, but no token found in storage");

            return self;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.headers.insert(AUTHORIZATION, value);
            }
            Err(error) => warn!("stored token is not a valid header value: {error}"),
        }

        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request headers
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Encoded JSON body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub(crate) fn into_request(self, http: &Client, url: &str) -> RequestBuilder {
        let request = http.request(self.method, url).headers(self.headers);

        match self.body {
            Some(body) => request.body(body),
            None => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use crate::{api::MockTokenStore, entities::Product};

    use super::*;

    fn header<'a>(options: &'a RequestOptions, name: &str) -> Option<&'a str> {
        options
            .header_map()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    #[test]
    fn defaults_to_json_headers_without_body() {
        let options = RequestOptions::new(Method::GET);

        assert_eq!(header(&options, "content-type"), Some("application/json"));
        assert_eq!(header(&options, "accept"), Some("application/json"));
        assert_eq!(options.body(), None);
    }

    #[test]
    fn post_carries_encoded_body() -> TestResult {
        let product = Product {
            product_id: 0,
            product_name: "Milk".to_string(),
            price: Decimal::new(1250, 2),
            weight: Decimal::from(1000),
        };

        let options = RequestOptions::new(Method::POST).json(&product)?;
        let body: serde_json::Value = serde_json::from_str(options.body().unwrap_or_default())?;

        assert_eq!(
            body,
            serde_json::json!({
                "productId": 0,
                "productName": "Milk",
                "price": 12.5,
                "weight": 1000,
            })
        );

        Ok(())
    }

    #[test]
    fn get_and_delete_never_carry_a_body() -> TestResult {
        let get = RequestOptions::new(Method::GET).json(&serde_json::json!({ "a": 1 }))?;
        let delete = RequestOptions::new(Method::DELETE).json(&serde_json::json!({ "a": 1 }))?;

        assert_eq!(get.body(), None);
        assert_eq!(delete.body(), None);

        Ok(())
    }

    #[test]
    fn extra_headers_override_defaults_case_insensitively() -> TestResult {
        let options = RequestOptions::new(Method::PUT)
            .headers([("Content-type", "application/merge-patch+json"), ("X-Trace", "1")])?;

        assert_eq!(
            header(&options, "CONTENT-TYPE"),
            Some("application/merge-patch+json")
        );
        assert_eq!(header(&options, "x-trace"), Some("1"));
        assert_eq!(options.header_map().get_all(CONTENT_TYPE).iter().count(), 1);

        Ok(())
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let result = RequestOptions::new(Method::GET).header("bad header", "x");

        assert!(
            matches!(&result, Err(ApiError::Header(name)) if name == "bad header"),
            "expected Header error, got {result:?}"
        );
    }

    #[test]
    fn bearer_token_added_when_stored() {
        let mut tokens = MockTokenStore::new();
        tokens
            .expect_token()
            .once()
            .return_const(Some("secret".to_string()));

        let options = RequestOptions::new(Method::GET).bearer_token(&tokens);

        assert_eq!(header(&options, "authorization"), Some("Bearer secret"));
    }

    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    struct LogSinkWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogSinkWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut bytes = self
                .0
                .lock()
                .map_err(|_err| io::Error::other("log sink poisoned"))?;
            bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogSink {
        type Writer = LogSinkWriter;

        fn make_writer(&'a self) -> Self::Writer {
            LogSinkWriter(Arc::clone(&self.0))
        }
    }

    impl LogSink {
        fn contents(&self) -> TestResult<String> {
            let bytes = self.0.lock().map_err(|_err| "log sink poisoned")?;

            Ok(String::from_utf8(bytes.clone())?)
        }
    }

    #[test]
    fn missing_token_proceeds_without_header() -> TestResult {
        let mut tokens = MockTokenStore::new();
        tokens.expect_token().once().return_const(None);

        let sink = LogSink::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_max_level(Level::WARN)
            .with_ansi(false)
            .finish();

        let options = tracing::subscriber::with_default(subscriber, || {
            RequestOptions::new(Method::GET).bearer_token(&tokens)
        });

        assert_eq!(header(&options, "authorization"), None);
        assert_eq!(header(&options, "accept"), Some("application/json"));

        let logs = sink.contents()?;
        assert!(logs.contains("WARN"), "{logs}");
        assert!(
            logs.contains("attempted to add token, but no token found in storage"),
            "{logs}"
        );

        Ok(())
    }
}
