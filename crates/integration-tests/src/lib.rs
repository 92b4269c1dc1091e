//! Integration tests for the Insura storefront.
//!
//! Tests drive the full axum router in-process with
//! `tower::ServiceExt::oneshot`. Each [`TestApp`] gets its own in-memory
//! store, so tests are isolated from each other and from any data directory
//! on disk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p insura-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = TestApp::new();
//! app.login(DEMO_EMAIL, DEMO_PASSWORD).await;
//! let page = app.get("/buy/health-1").await;
//! assert_eq!(page.status, StatusCode::OK);
//! ```
//!
//! The visitor's session cookie is captured from `set-cookie` and replayed
//! on later requests, the way a browser would.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use insura_storefront::config::StorefrontConfig;
use insura_storefront::state::AppState;
use insura_storefront::store::{LocalStorage, seed_demo_user};

/// Demo account seeded by [`TestApp::with_demo_user`].
pub const DEMO_EMAIL: &str = "demo@insura.com";
/// Password of the demo account.
pub const DEMO_PASSWORD: &str = "password123";

const MAX_BODY: usize = 4 * 1024 * 1024;

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Whether the body contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }

    /// Assert a `303 See Other` to `location`.
    ///
    /// # Panics
    ///
    /// Panics if the response is not that redirect.
    pub fn assert_redirect(&self, location: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(location));
    }
}

/// A file part for a multipart request.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// One browser talking to a freshly built storefront.
pub struct TestApp {
    router: Router,
    storage: LocalStorage,
    cookie: Option<String>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// A storefront over an empty in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            seed_demo_user: false,
            ..StorefrontConfig::default()
        };
        let storage = LocalStorage::in_memory();
        let state =
            AppState::new(config, storage.clone()).expect("Failed to build application state");

        Self {
            router: insura_storefront::app(state),
            storage,
            cookie: None,
        }
    }

    /// A storefront with the demo account already registered.
    ///
    /// # Panics
    ///
    /// Panics if the demo account cannot be seeded.
    #[must_use]
    pub fn with_demo_user() -> Self {
        let app = Self::new();
        seed_demo_user(&app.storage).expect("Failed to seed demo user");
        app
    }

    /// The store behind the app, for asserting on persisted state.
    #[must_use]
    pub const fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Forget the session cookie, as a new browser would.
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path).body(Body::empty());
        self.send(request).await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)));
        self.send(request).await
    }

    /// Send a `multipart/form-data` POST.
    pub async fn post_multipart(
        &mut self,
        path: &str,
        fields: &[(&str, &str)],
        files: &[FilePart<'_>],
    ) -> TestResponse {
        let boundary = format!("insura-{}", uuid::Uuid::new_v4().simple());
        let request = self
            .request("POST", path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(encode_multipart(&boundary, fields, files)));
        self.send(request).await
    }

    /// Register through the signup form.
    pub async fn signup(&mut self, email: &str, password: &str, name: &str, phone: &str) -> TestResponse {
        self.post_form(
            "/auth/signup",
            &[
                ("email", email),
                ("password", password),
                ("password_confirm", password),
                ("name", name),
                ("phone", phone),
            ],
        )
        .await
    }

    /// Log in through the login form.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form("/auth/login", &[("email", email), ("password", password)])
            .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(
        &mut self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> TestResponse {
        let request = request.expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Encode fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn encode_multipart(boundary: &str, fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    for file in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/jpeg\r\n\r\n",
                file.field, file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form() {
        assert_eq!(
            encode_form(&[("email", "a+b@x.co"), ("name", "Budi Santoso")]),
            "email=a%2Bb%40x.co&name=Budi+Santoso"
        );
    }
}
