use crate::{
    data::{Headers, RequestData, ResponseData},
    error::Error,
    handler::RequestHandler,
    session::TapeSession,
    tape::HttpTape,
};
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

pub trait HttpClient: Debug {
    fn execute(&self, request: &RequestData) -> Result<ResponseData, Error>;
}

#[derive(Debug)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestData) -> Result<ResponseData, Error> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::InvalidMethod(request.method.clone()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_lowercase(name.to_lowercase().as_bytes())?;
            headers.append(name, HeaderValue::from_str(value)?);
        }

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .headers(headers);
        if let Some(body) = request.body_text() {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let protocol = format!("{:?}", response.version());
        let status = response.status();
        let headers = extract_headers(response.headers());
        let body = response.text()?;

        Ok(ResponseData {
            protocol,
            status_code: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body: if body.is_empty() {
                None
            } else {
                Some(Value::String(body))
            },
        })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_headers(header_map: &HeaderMap) -> Headers {
    // header values with opaque bytes are skipped
    header_map
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_lowercase(), v.to_string()))
        })
        .collect()
}

/// Splices tapes into an application's call chain: each outgoing request is
/// offered to the first tape whose `probe` accepts it; that tape either plays
/// back a canned response or the real call goes out and gets recorded.
/// Requests no tape claims pass through untouched.
pub struct InterceptingClient {
    tapes: Vec<Arc<HttpTape>>,
    session: Option<Arc<TapeSession>>,
    inner: Box<dyn HttpClient + Send + Sync>,
}

impl InterceptingClient {
    pub fn new(tapes: Vec<Arc<HttpTape>>, inner: Box<dyn HttpClient + Send + Sync>) -> Self {
        Self {
            tapes,
            session: None,
            inner,
        }
    }

    pub fn with_session(
        session: Arc<TapeSession>,
        inner: Box<dyn HttpClient + Send + Sync>,
    ) -> Self {
        Self {
            tapes: session.tapes().to_vec(),
            session: Some(session),
            inner,
        }
    }

    pub fn execute(&self, request: &RequestData) -> Result<ResponseData, Error> {
        for tape in &self.tapes {
            if tape.probe(request)? {
                if let Some(session) = &self.session {
                    session.before_call();
                }
                let result = self.dispatch(tape, request);
                if let Some(session) = &self.session {
                    session.after_call();
                }
                return result;
            }
        }

        self.inner.execute(request)
    }

    fn dispatch(&self, tape: &HttpTape, request: &RequestData) -> Result<ResponseData, Error> {
        if let Some(response) = tape.on_request(request)? {
            return Ok(response);
        }

        let response = self.inner.execute(request)?;
        tape.on_response(request, response)
    }
}
