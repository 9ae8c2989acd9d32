use std::time::{Duration, Instant};

use inv_model::{Id, LogoutResponse, MeResponse, Product, Resource, ValidationErrorBody};
use reqwest::{
    Method, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::Instrument;

use crate::{
    ClientError, InventoryApi, metrics,
    request_id::{REQUEST_ID_HEADER, RequestId},
};

/// Connection settings for [`HttpInventoryApi`]
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8080` (no `/api` suffix)
    pub base_url: String,
    /// Raw `Cookie` header value of an existing backend session
    pub session_cookie: Option<String>,
    /// Per-request timeout; `None` lets slow requests run to completion
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_cookie: None,
            timeout: None,
        }
    }
}

/// [`InventoryApi`] over HTTP/JSON
#[derive(Clone, Debug)]
pub struct HttpInventoryApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpInventoryApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref() {
            headers.insert(header::COOKIE, HeaderValue::from_str(cookie)?);
        }

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Reply, ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request_id = RequestId::new();
        let span = tracing::debug_span!(
            "api_request",
            method = %method,
            path = %path,
            request_id = %request_id,
        );

        async move {
            let start = Instant::now();
            let mut request = self
                .http
                .request(method.clone(), format!("{}{}", self.base_url, path))
                .header(REQUEST_ID_HEADER, request_id.as_str());
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    metrics::record_api_call(
                        method.as_str(),
                        path,
                        None,
                        start.elapsed().as_secs_f64(),
                    );
                    tracing::warn!("Request failed before a response arrived: {e}");
                    return Err(e.into());
                }
            };

            let status = response.status();
            let body = response.text().await?;
            metrics::record_api_call(
                method.as_str(),
                path,
                Some(status.as_u16()),
                start.elapsed().as_secs_f64(),
            );
            tracing::debug!(status = status.as_u16(), bytes = body.len(), "Response received");

            Ok(Reply {
                status,
                path: path.to_string(),
                body,
            })
        }
        .instrument(span)
        .await
    }

    async fn get(&self, path: &str) -> Result<Reply, ClientError> {
        self.send::<()>(Method::GET, path, None).await
    }
}

impl InventoryApi for HttpInventoryApi {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        self.get(&collection_path::<R>()).await?.into_list()
    }

    async fn create<R: Resource>(&self, input: &R::Input) -> Result<R, ClientError> {
        self.send(Method::POST, &collection_path::<R>(), Some(input))
            .await?
            .into_json()
    }

    async fn update<R: Resource>(&self, id: Id, input: &R::Input) -> Result<R, ClientError> {
        self.send(Method::PUT, &record_path::<R>(id), Some(input))
            .await?
            .into_json()
    }

    async fn delete<R: Resource>(&self, id: Id) -> Result<(), ClientError> {
        self.send::<()>(Method::DELETE, &record_path::<R>(id), None)
            .await?
            .check()
    }

    async fn products_by_user(&self, user_id: Id) -> Result<Vec<Product>, ClientError> {
        self.get(&format!("/api/products/user/{user_id}"))
            .await?
            .into_list()
    }

    async fn current_user(&self) -> Result<MeResponse, ClientError> {
        let reply = self.get("/api/auth/me").await?;
        // "not signed in" arrives as 400 with {success: false}
        if reply.status.is_success() || reply.status == StatusCode::BAD_REQUEST {
            if let Ok(me) = serde_json::from_str::<MeResponse>(&reply.body) {
                return Ok(me);
            }
        }
        reply.into_json()
    }

    async fn logout(&self) -> Result<LogoutResponse, ClientError> {
        self.send::<()>(Method::POST, "/api/auth/logout", None)
            .await?
            .into_json()
    }
}

fn collection_path<R: Resource>() -> String {
    format!("/api/{}", R::COLLECTION)
}

fn record_path<R: Resource>(id: Id) -> String {
    format!("/api/{}/{id}", R::COLLECTION)
}

/// A fully read response
#[derive(Debug)]
struct Reply {
    status: StatusCode,
    path: String,
    body: String,
}

impl Reply {
    fn check(&self) -> Result<(), ClientError> {
        if self.status.is_success() {
            return Ok(());
        }

        if self.status == StatusCode::BAD_REQUEST {
            if let Ok(body) = serde_json::from_str::<ValidationErrorBody>(&self.body) {
                if body.is_structured() {
                    return Err(ClientError::Validation(body));
                }
            }
        }

        Err(ClientError::Status {
            status: self.status.as_u16(),
            path: self.path.clone(),
            body: (!self.body.trim().is_empty()).then(|| self.body.clone()),
        })
    }

    fn into_json<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        self.check()?;
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Like [`Reply::into_json`], but `204 No Content` or an empty body is an empty list
    fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>, ClientError> {
        self.check()?;
        if self.status == StatusCode::NO_CONTENT || self.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}
