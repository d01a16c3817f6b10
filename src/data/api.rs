use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::*;

/// The remote posts API the pipeline reads from.
///
/// Every call resolves to `None` on failure. Failures are logged by the
/// implementation and never cross into the render pipeline as errors.
pub trait Api {
    /// `GET /users`
    fn users(&self) -> impl Future<Output = Option<Vec<User>>> + Send;

    /// `GET /users/{id}`
    fn user(&self, id: UserId) -> impl Future<Output = Option<User>> + Send;

    /// `GET /posts?userId={id}`
    fn user_posts(&self, id: UserId) -> impl Future<Output = Option<Vec<Post>>> + Send;

    /// `GET /posts/{id}/comments`
    fn post_comments(&self, id: PostId) -> impl Future<Output = Option<Vec<Comment>>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// [`Api`] over HTTP.
pub struct HttpApi {
    client: reqwest::Client,
    base: String,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_owned();
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response
            .json()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.get(path).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("There was a problem with the fetch operation: {e}");
                None
            }
        }
    }
}

impl Api for HttpApi {
    async fn users(&self) -> Option<Vec<User>> {
        self.fetch("/users").await
    }

    async fn user(&self, id: UserId) -> Option<User> {
        self.fetch(&format!("/users/{id}")).await
    }

    async fn user_posts(&self, id: UserId) -> Option<Vec<Post>> {
        self.fetch(&format!("/posts?userId={id}")).await
    }

    async fn post_comments(&self, id: PostId) -> Option<Vec<Comment>> {
        self.fetch(&format!("/posts/{id}/comments")).await
    }
}
