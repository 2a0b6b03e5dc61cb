//! Image responders for scenic pictures and locally stored avatars.

use std::future;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::{StreamExt, TryStreamExt};

use crate::infrastructure::storage::{AssetStore, StorageError};

#[derive(Clone)]
pub struct AssetState {
    pub scenic_images: AssetStore,
    pub uploads: AssetStore,
}

#[utoipa::path(
    get,
    path = "/scenicImg/{imageName}",
    tag = "Assets",
    params(("imageName" = String, Path, description = "Stored image file name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Name is not a plain file name"),
        (status = 404, description = "No such image")
    )
)]
pub async fn scenic_image(State(state): State<AssetState>, Path(name): Path<String>) -> Response {
    serve(&state.scenic_images, name).await
}

/// Deprecated avatar route backing the local upload.
#[utoipa::path(
    get,
    path = "/user/header/{filename}",
    tag = "Assets",
    params(("filename" = String, Path, description = "Stored avatar file name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Name is not a plain file name"),
        (status = 404, description = "No such avatar")
    )
)]
pub async fn user_header(State(state): State<AssetState>, Path(name): Path<String>) -> Response {
    serve(&state.uploads, name).await
}

/// Streams `name` from `store` in fixed-size chunks.
///
/// A read error part way through is logged and ends the body; whatever was
/// already sent stays sent.
pub async fn serve(store: &AssetStore, name: String) -> Response {
    let asset = match store.open(&name).await {
        Ok(asset) => asset,
        Err(StorageError::InvalidName(_)) => {
            tracing::warn!(file = %name, "Rejected asset name");
            return StatusCode::BAD_REQUEST.into_response();
        }
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "Asset unavailable");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let content_type = asset.content_type.clone();
    let len = asset.len;
    let stream = asset
        .into_stream()
        .inspect_err(move |e| tracing::error!(file = %name, error = %e, "Asset read failed mid-stream"))
        .take_while(|chunk| future::ready(chunk.is_ok()));

    let mut response = Response::new(Body::from_stream(stream));
    let headers = response.headers_mut();
    if let Ok(value) = content_type.parse() {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Some(len) = len {
        headers.insert(header::CONTENT_LENGTH, len.into());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn streams_file_with_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let bytes: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(dir.path().join("lake.JPG"), &bytes).unwrap();
        let store = AssetStore::new(dir.path());

        let response = serve(&store, "lake.JPG".to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "20000");
        assert_eq!(body_of(response).await, bytes);
    }

    #[tokio::test]
    async fn traversal_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("images"));
        std::fs::write(dir.path().join("secret.png"), b"x").unwrap();

        for name in ["../secret.png", "..", "a/../../secret.png", ""] {
            let response = serve(&store, name.to_string()).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{name}");
        }
    }

    #[tokio::test]
    async fn missing_file_is_empty_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = serve(&AssetStore::new(dir.path()), "nope.png".to_string()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_of(response).await.is_empty());
    }
}
