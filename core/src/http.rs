//! HTTP transport types shared by the request builder and the session.
//!
//! # Design
//! Requests and responses are plain data. `TopicApi` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network;
//! an `HttpSession` implementation performs the round-trip. Query and form
//! parameters stay as key/value pairs so the session owns URL and form
//! encoding.

/// HTTP method for a request. The broker API only uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// `query` is appended to `url` by the session; `form` is sent as an
/// `application/x-www-form-urlencoded` body and is empty for GET requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a form field by name.
    pub fn form_field(&self, name: &str) -> Option<&str> {
        lookup(&self.form, name)
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        lookup(&self.query, name)
    }
}

/// An HTTP response described as plain data.
///
/// Header names are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: String::new(),
        }
    }

    #[test]
    fn success_covers_whole_2xx_range() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(199).is_success());
        assert!(!response(301).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let res = response(200);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        assert_eq!(res.header("x-missing"), None);
    }

    #[test]
    fn form_field_lookup() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            url: "http://localhost/va/addtopic".to_string(),
            query: Vec::new(),
            form: vec![
                ("uid".to_string(), "u1".to_string()),
                ("type".to_string(), "1".to_string()),
            ],
        };
        assert_eq!(req.form_field("type"), Some("1"));
        assert_eq!(req.form_field("name"), None);
        assert_eq!(req.query_param("uid"), None);
    }
}
