use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, HeaderValue};
use std::time::Duration;

use super::requests::{RemoteRequests, RequestBuilder};
use crate::codec::ids::delimited_ids;
use crate::codec::text::{text_decoder, text_encoder};
use crate::codec::{Decoder, Encoder, IdListDecoder};
use crate::store::{Id, Payload, Result, Store, StoreError};

/// Per-request timeout applied unless the builder overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What `list` and `delete` do when the remote round trip fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// `list` answers with an empty list and `delete` reports success. The
    /// swallowed error is logged as a warning. Callers cannot tell an empty
    /// remote store from an unreachable one.
    #[default]
    Lossy,
    /// Both operations return the error.
    Strict,
}

/// Wire conversion for a `RemoteStore`.
pub struct RemoteCodec<V> {
    pub marshal: Encoder<V>,
    pub unmarshal: Decoder<V>,
    pub unmarshal_ids: IdListDecoder,
}

impl<V> RemoteCodec<V>
where
    V: Payload + AsRef<str> + From<String>,
{
    /// Plain text payloads with a delimiter-separated id list.
    pub fn text(separator: &str) -> Self {
        Self {
            marshal: text_encoder(),
            unmarshal: text_decoder(),
            unmarshal_ids: delimited_ids(separator),
        }
    }
}

impl<V> Clone for RemoteCodec<V> {
    fn clone(&self) -> Self {
        Self {
            marshal: self.marshal.clone(),
            unmarshal: self.unmarshal.clone(),
            unmarshal_ids: self.unmarshal_ids.clone(),
        }
    }
}

/// Store backed by a remote HTTP service.
///
/// Holds no local state: every operation is one request/response round trip.
/// No retries are attempted; a hung peer stalls the caller for at most the
/// configured timeout.
pub struct RemoteStore<V> {
    client: reqwest::Client,
    requests: RemoteRequests,
    codec: RemoteCodec<V>,
    timeout: Duration,
    policy: FailurePolicy,
}

pub struct RemoteStoreBuilder<V> {
    requests: RemoteRequests,
    codec: RemoteCodec<V>,
    client: Option<reqwest::Client>,
    timeout: Duration,
    policy: FailurePolicy,
}

impl<V: Payload> RemoteStoreBuilder<V> {
    /// Uses a preconfigured client (proxies, TLS roots, connection pool).
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<RemoteStore<V>> {
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| StoreError::Transport(e.to_string()))?,
        };

        Ok(RemoteStore {
            client,
            requests: self.requests,
            codec: self.codec,
            timeout: self.timeout,
            policy: self.policy,
        })
    }
}

impl<V: Payload> RemoteStore<V> {
    pub fn builder(requests: RemoteRequests, codec: RemoteCodec<V>) -> RemoteStoreBuilder<V> {
        RemoteStoreBuilder {
            requests,
            codec,
            client: None,
            timeout: DEFAULT_TIMEOUT,
            policy: FailurePolicy::default(),
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }

    async fn execute(
        &self,
        build: &RequestBuilder,
        id: &Id,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response> {
        let mut request = build(id)?;
        *request.timeout_mut() = Some(self.timeout);

        if let Some(body) = body {
            request
                .headers_mut()
                .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
            *request.body_mut() = Some(body.into());
        }

        tracing::debug!("RemoteStore: {} {}", request.method(), request.url());

        self.client
            .execute(request)
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }

    async fn try_list(&self) -> Result<Vec<Id>> {
        let response = self.execute(&self.requests.list, &Id::default(), None).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, "listing"));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok((self.codec.unmarshal_ids)(&body[..])?)
    }

    async fn try_delete(&self, id: &Id) -> Result<()> {
        let response = self.execute(&self.requests.delete, id, None).await?;
        let status = response.status();
        // Already absent on the peer.
        if status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !status.is_success() {
            return Err(status_error(status, &format!("deleting {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl<V: Payload> Store<V> for RemoteStore<V> {
    /// Succeeds only on `201 Created` or `204 No Content`.
    async fn put(&self, id: Id, payload: V) -> Result<()> {
        let body = (self.codec.marshal)(&payload)?;
        let response = self.execute(&self.requests.store, &id, Some(body)).await?;

        let status = response.status();
        if status != StatusCode::CREATED && status != StatusCode::NO_CONTENT {
            return Err(status_error(status, &format!("storing {}", id)));
        }
        Ok(())
    }

    async fn get(&self, id: &Id) -> Result<V> {
        let response = self.execute(&self.requests.retrieve, id, None).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.clone()));
        }
        if !status.is_success() {
            return Err(status_error(status, &format!("retrieving {}", id)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok((self.codec.unmarshal)(&body[..])?)
    }

    async fn list(&self) -> Result<Vec<Id>> {
        match self.try_list().await {
            Ok(ids) => Ok(ids),
            Err(e) if self.policy == FailurePolicy::Lossy => {
                tracing::warn!("RemoteStore: list failed, reporting no items: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &Id) -> Result<()> {
        match self.try_delete(id).await {
            Ok(()) => Ok(()),
            Err(e) if self.policy == FailurePolicy::Lossy => {
                tracing::warn!("RemoteStore: delete of {} failed, ignoring: {}", id, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn status_error(status: StatusCode, context: &str) -> StoreError {
    StoreError::Status {
        status: status
            .canonical_reason()
            .unwrap_or(status.as_str())
            .to_string(),
        context: context.to_string(),
    }
}
