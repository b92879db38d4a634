use crate::config::ListingSettings;
use crate::listing::request::OutboundRequest;
use crate::listing::transport::{Transport, TransportError, TransportResponse};
use crate::router::App;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;
use std::sync::{Arc, Mutex};

pub const TEST_ENDPOINT: &str = "https://api.example.com/properties";

type Responder =
    dyn Fn(&OutboundRequest) -> Result<TransportResponse, TransportError> + Send + Sync;

/// Transport that answers from a closure and remembers every request.
pub struct StubTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl StubTransport {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&OutboundRequest) -> Result<TransportResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn json(status: u16, body: serde_json::Value) -> Arc<Self> {
        Self::raw(status, &body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| {
            Ok(TransportResponse {
                status,
                body: body.clone(),
            })
        })
    }

    pub fn unreachable(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::new(move |_| Err(TransportError(message.clone())))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.requests.lock().unwrap().last().map(|r| r.body.clone())
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

pub fn settings() -> ListingSettings {
    ListingSettings {
        endpoint: Some(TEST_ENDPOINT.to_string()),
        ..ListingSettings::default()
    }
}

pub fn app_with(settings: ListingSettings, transport: Arc<StubTransport>) -> App {
    App::new(settings, transport)
}

pub fn get(uri: &str) -> Request {
    request(Method::GET, uri)
}

pub fn request(method: Method, uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_string(mut resp: Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
