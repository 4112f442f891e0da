use std::future::Future;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::CollectionKind;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    /// The request never got an answer.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// The `error` field of a rejection body, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            ApiError::Transport(_) => None,
        }
    }
}

/// Body of the batch image deletion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImagesRequest {
    pub image_ids: Vec<String>,
    pub event_id: String,
    pub album_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub fn parse_error_body(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.error)
        .filter(|error| !error.is_empty())
}

/// Server paths of the two batch-delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub all_photos_delete_path: String,
    pub album_delete_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            all_photos_delete_path: "/albums/delete-images-all".to_string(),
            album_delete_path: "/albums/delete-images-album".to_string(),
        }
    }
}

impl Endpoints {
    pub fn batch_delete(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::AllItems => &self.all_photos_delete_path,
            CollectionKind::NamedCollection => &self.album_delete_path,
        }
    }
}

/// Request/response contract of the album backend.
pub trait AlbumApi: Send + Sync {
    fn delete_images(
        &self,
        kind: CollectionKind,
        request: &DeleteImagesRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_album(&self, album_id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn delete_event(&self, event_id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// The server-rendered album page.
    fn fetch_album_page(
        &self,
        album_id: &str,
    ) -> impl Future<Output = Result<String, ApiError>> + Send;
}

impl<T: AlbumApi> AlbumApi for Arc<T> {
    fn delete_images(
        &self,
        kind: CollectionKind,
        request: &DeleteImagesRequest,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).delete_images(kind, request)
    }

    fn delete_album(&self, album_id: &str) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).delete_album(album_id)
    }

    fn delete_event(&self, event_id: &str) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).delete_event(event_id)
    }

    fn fetch_album_page(
        &self,
        album_id: &str,
    ) -> impl Future<Output = Result<String, ApiError>> + Send {
        (**self).fetch_album_page(album_id)
    }
}

#[derive(Clone)]
pub struct HttpAlbumApi {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl HttpAlbumApi {
    pub fn new(
        base_url: &str,
        session_cookie: Option<&str>,
        endpoints: Endpoints,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        }
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let bytes = response.bytes().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status,
        message: parse_error_body(&bytes),
    })
}

impl AlbumApi for HttpAlbumApi {
    async fn delete_images(
        &self,
        kind: CollectionKind,
        request: &DeleteImagesRequest,
    ) -> Result<(), ApiError> {
        let url = self.url(self.endpoints.batch_delete(kind));
        log::debug!("POST {url} with {} image id(s)", request.image_ids.len());
        let response = self.client.post(url).json(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_album(&self, album_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/albums/{album_id}"));
        log::debug!("DELETE {url}");
        let response = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/events/{event_id}"));
        log::debug!("DELETE {url}");
        let response = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_album_page(&self, album_id: &str) -> Result<String, ApiError> {
        let url = self.url(&format!("/albums/{album_id}"));
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.text().await?)
    }
}
