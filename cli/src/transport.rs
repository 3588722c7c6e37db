use booking_shared::api::Method;
use booking_shared::{ClientError, ClientResult, HttpRequest, HttpResponse, Transport};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// HTTP through `reqwest` on the tokio runtime
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let url = request.url(&self.base_url);
        let mut builder = self.client.request(reqwest_method(request.method), &url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(content_type) = request.body.content_type() {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(text) = request.body.text() {
            builder = builder.body(text.to_string());
        }

        let response = builder.send().await.map_err(ClientError::network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ClientError::network)?;

        Ok(HttpResponse { status, body })
    }
}
