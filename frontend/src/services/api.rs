use booking_shared::api::Method;
use booking_shared::{BookingClient, ClientError, ClientResult, HttpRequest, HttpResponse, Transport};
use gloo_net::http::Request;

use crate::services::storage::LocalStorageStore;

/// Empty means same origin, which is how the club site serves the app.
const API_BASE_URL: &str = match option_env!("BOOKING_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

/// `fetch` through `gloo-net`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let url = request.url(API_BASE_URL);

        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        if let Some(content_type) = request.body.content_type() {
            builder = builder.header("Content-Type", content_type);
        }

        let response = match request.body.text() {
            Some(text) => {
                builder
                    .body(text.to_string())
                    .map_err(|e| ClientError::network(format!("Failed to build request: {:?}", e)))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| ClientError::network(format!("{:?}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::network(format!("Failed to read response: {:?}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

pub type ApiClient = BookingClient<GlooTransport, LocalStorageStore>;

pub struct ApiService;

impl ApiService {
    /// Both halves are stateless, so a client is built per use.
    pub fn client() -> ApiClient {
        BookingClient::new(GlooTransport, LocalStorageStore)
    }
}
