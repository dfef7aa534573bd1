use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::http_client::{
    error::{Error, HttpClientErrorChecker},
    http_client::HttpClient,
    request::{Request, RequestHeaders, RequestMethod},
    response::Response,
};

/// `reqwest` transport. It carries no timeout of its own: the deadline belongs
/// to the caller, which drops the in-flight future to abort the exchange.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, Error> {
        debug!("Sending {} {}", request.method, request.url);

        let reqwest_builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers.into())
            .body(request.body);

        let reqwest_response = reqwest_builder.send().await.map_err(Error::from)?;

        let http_status = reqwest_response.status().as_u16();

        let headers: RequestHeaders = reqwest_response.headers().into();

        let body = reqwest_response.bytes().await.map_err(Error::from)?;

        debug!("Received {} ({} bytes)", http_status, body.len());

        Ok(Response {
            status: http_status,
            headers,
            body,
        })
    }
}

impl HttpClientErrorChecker for reqwest::Error {
    fn is_timeout(&self) -> bool {
        self.is_timeout()
    }

    fn is_connect(&self) -> bool {
        self.is_connect()
    }

    fn is_request(&self) -> bool {
        self.is_request()
    }

    fn error_string(&self) -> String {
        self.to_string()
    }
}

impl<T: HttpClientErrorChecker> From<T> for Error {
    fn from(err: T) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() || err.is_request() {
            Error::Network(err.error_string())
        } else {
            Error::InvalidRequest(err.error_string())
        }
    }
}

impl From<&HeaderMap> for RequestHeaders {
    fn from(headers: &HeaderMap) -> Self {
        let map = headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect();
        RequestHeaders(map)
    }
}

impl From<RequestHeaders> for HeaderMap {
    fn from(h: RequestHeaders) -> Self {
        let mut header_map = HeaderMap::new();
        for (k, v) in h.iter() {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                header_map.insert(name, value);
            }
        }
        header_map
    }
}

impl From<RequestMethod> for reqwest::Method {
    fn from(value: RequestMethod) -> Self {
        match value {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
            RequestMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use http::{HeaderMap, HeaderName, HeaderValue, Method};

    use crate::http_client::{
        error::{Error, MockHttpClientErrorChecker},
        request::{RequestHeaders, RequestMethod},
    };

    #[test]
    fn converts_reqwest_errors_into_domain_variants() {
        let mut mock = MockHttpClientErrorChecker::new();
        mock.expect_is_timeout().return_const(true);
        let result: Error = mock.into();
        assert!(matches!(result, Error::Timeout));

        mock = MockHttpClientErrorChecker::new();
        mock.expect_is_timeout().return_const(false);
        mock.expect_is_connect().return_const(true);
        mock.expect_error_string()
            .return_const("connection refused".to_string());
        let result: Error = mock.into();
        assert!(matches!(result, Error::Network(ref m) if m == "connection refused"));

        mock = MockHttpClientErrorChecker::new();
        mock.expect_is_timeout().return_const(false);
        mock.expect_is_connect().return_const(false);
        mock.expect_is_request().return_const(true);
        mock.expect_error_string()
            .return_const("request error".to_string());
        let result: Error = mock.into();
        assert!(matches!(result, Error::Network(_)));

        mock = MockHttpClientErrorChecker::new();
        mock.expect_is_timeout().return_const(false);
        mock.expect_is_connect().return_const(false);
        mock.expect_is_request().return_const(false);
        mock.expect_error_string()
            .return_const("builder error".to_string());
        let result: Error = mock.into();
        assert!(matches!(result, Error::InvalidRequest(_)));
    }

    #[test]
    fn extracts_only_valid_headers_from_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("abc-123"),
        );
        headers.insert(
            HeaderName::from_static("invalid-header"),
            HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap(),
        );

        let result: RequestHeaders = (&headers).into();

        assert_eq!(result.0.len(), 2);
        assert_eq!(
            result.get("content-type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(result.get("x-request-id"), Some(&"abc-123".to_string()));
        assert_eq!(result.get("invalid-header"), None);
    }

    #[test]
    fn builds_header_map_skipping_invalid_domain_headers() {
        let mut request_headers = RequestHeaders::default();
        request_headers.set("content-type", "application/json");
        request_headers.set("apikey", "anon-key");
        request_headers.set("bad header name", "value");

        let result: HeaderMap = request_headers.into();

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.get("content-type"),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert_eq!(
            result.get("apikey"),
            Some(&HeaderValue::from_static("anon-key"))
        );
    }

    #[test]
    fn converts_domain_http_methods_into_http_methods() {
        assert_eq!(Method::from(RequestMethod::Get), Method::GET);
        assert_eq!(Method::from(RequestMethod::Post), Method::POST);
        assert_eq!(Method::from(RequestMethod::Put), Method::PUT);
        assert_eq!(Method::from(RequestMethod::Delete), Method::DELETE);
        assert_eq!(Method::from(RequestMethod::Patch), Method::PATCH);
    }
}
