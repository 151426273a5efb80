//! The shared HTTP session the client borrows from its host.
//!
//! # Design
//! `HttpSession` is the only I/O seam. Implementations own connection
//! pooling, TLS, timeouts and cancellation; the topic client adds none of
//! its own. A non-2xx response is still `Ok` here, status interpretation
//! belongs to the caller. Only GET bodies must be valid UTF-8; write
//! replies are decoded lossily since nobody reads them.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Minimal async HTTP interface required by `TopicClient`.
///
/// Must be safe to share across concurrent calls.
#[async_trait]
pub trait HttpSession: Send + Sync {
    /// GET `url` with `query` appended.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, ApiError>;

    /// POST `form` to `url` as `application/x-www-form-urlencoded`.
    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<HttpResponse, ApiError>;

    /// Dispatch a prebuilt request to `get` or `post_form`.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        match request.method {
            HttpMethod::Get => self.get(&request.url, &request.query).await,
            HttpMethod::Post => self.post_form(&request.url, &request.form).await,
        }
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_session {
    use async_trait::async_trait;

    use super::HttpSession;
    use crate::error::ApiError;
    use crate::http::HttpResponse;

    #[async_trait]
    impl HttpSession for reqwest::Client {
        async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, ApiError> {
            let response = reqwest::Client::get(self, url)
                .query(query)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            into_response(response, utf8_strict).await
        }

        async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<HttpResponse, ApiError> {
            let response = self
                .post(url)
                .form(form)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            into_response(response, utf8_lossy).await
        }
    }

    async fn into_response(
        response: reqwest::Response,
        decode: fn(Vec<u8>) -> Result<String, ApiError>,
    ) -> Result<HttpResponse, ApiError> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = decode(bytes.to_vec())?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn utf8_strict(bytes: Vec<u8>) -> Result<String, ApiError> {
        String::from_utf8(bytes).map_err(|e| ApiError::ResponseFormat(format!("body is not UTF-8: {e}")))
    }

    fn utf8_lossy(bytes: Vec<u8>) -> Result<String, ApiError> {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Recording session for unit tests. Never touches the network.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::HttpSession;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays queued results in order; once the queue is empty every call
    /// answers `200` with an empty body.
    #[derive(Default)]
    pub(crate) struct RecordingSession {
        pub(crate) sent: Mutex<Vec<HttpRequest>>,
        replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    }

    impl RecordingSession {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn reply(self, status: u16, body: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: body.to_string(),
            }));
            self
        }

        pub(crate) fn fail(self, err: ApiError) -> Self {
            self.replies.lock().unwrap().push_back(Err(err));
            self
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }

        fn next_reply(&self) -> Result<HttpResponse, ApiError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Ok(HttpResponse {
                        status: 200,
                        headers: Vec::new(),
                        body: String::new(),
                    })
                })
        }
    }

    #[async_trait]
    impl HttpSession for RecordingSession {
        async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(HttpRequest {
                method: HttpMethod::Get,
                url: url.to_string(),
                query: query.to_vec(),
                form: Vec::new(),
            });
            self.next_reply()
        }

        async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(HttpRequest {
                method: HttpMethod::Post,
                url: url.to_string(),
                query: Vec::new(),
                form: form.to_vec(),
            });
            self.next_reply()
        }
    }
}
