use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;

use super::errors::ServeError;
use super::ids::IdGenerator;
use super::logger::{LogSink, TracingSink};
use super::negotiate::{acceptable, media_type};
use super::path::{normalize_base, shift_path, strip_base};
use crate::codec::ids::join_ids;
use crate::codec::{CodecRegistry, Decoder, Encoder, OCTET_STREAM, TEXT_PLAIN};
use crate::store::{Id, Payload, Store};

/// Largest request body read by default (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Mount point stripped from every request path and prefixed to `Location`.
    pub base_path: String,
    /// Bodies larger than this are rejected with 400.
    pub max_body_bytes: usize,
    /// Media type assumed when a request carries no `Content-Type`.
    pub default_content_type: String,
    /// When set, `GET` on the collection root returns all ids joined by this
    /// delimiter instead of failing with 400.
    pub listing: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            default_content_type: OCTET_STREAM.to_string(),
            listing: None,
        }
    }
}

/// REST front-end for any [`Store`].
///
/// | Method | Path | Success |
/// |---|---|---|
/// | POST | `{base}/` | 201 + `Location: {base}/{id}` |
/// | GET | `{base}/{id}` | 200 + encoded body |
/// | PUT | `{base}/{id}` | 204 |
/// | DELETE | `{base}/{id}` | 204 |
///
/// Any other method is answered with 501. Every failure produces one line,
/// `"{METHOD} {PATH} {STATUS TEXT} - {cause}"`, which is both logged and sent
/// as the response body.
///
/// Everything is fixed at construction; the server holds no per-request state.
pub struct DataServer<V> {
    config: ServerConfig,
    codecs: CodecRegistry<V>,
    store: Arc<dyn Store<V>>,
    id_generator: IdGenerator<V>,
    logger: Arc<dyn LogSink>,
}

pub struct DataServerBuilder<V> {
    config: ServerConfig,
    codecs: CodecRegistry<V>,
    store: Arc<dyn Store<V>>,
    id_generator: IdGenerator<V>,
    logger: Arc<dyn LogSink>,
}

impl<V: Payload> DataServerBuilder<V> {
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_path(mut self, base_path: &str) -> Self {
        self.config.base_path = base_path.to_string();
        self
    }

    /// Adds all codecs from `codecs` to the ones already registered.
    pub fn codecs(mut self, codecs: CodecRegistry<V>) -> Self {
        self.codecs = self.codecs.merge(codecs);
        self
    }

    pub fn encoder(mut self, media_type: &str, encoder: Encoder<V>) -> Self {
        self.codecs.register_encoder(media_type, encoder);
        self
    }

    pub fn decoder(mut self, media_type: &str, decoder: Decoder<V>) -> Self {
        self.codecs.register_decoder(media_type, decoder);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = logger;
        self
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.config.max_body_bytes = limit;
        self
    }

    pub fn default_content_type(mut self, media_type: &str) -> Self {
        self.config.default_content_type = media_type.to_ascii_lowercase();
        self
    }

    pub fn listing(mut self, delimiter: &str) -> Self {
        self.config.listing = Some(delimiter.to_string());
        self
    }

    pub fn build(self) -> DataServer<V> {
        let mut config = self.config;
        config.base_path = normalize_base(&config.base_path);

        tracing::debug!(
            "DataServer at '{}' encodes {:?}, decodes {:?}",
            config.base_path,
            self.codecs.encoder_types(),
            self.codecs.decoder_types()
        );

        DataServer {
            config,
            codecs: self.codecs,
            store: self.store,
            id_generator: self.id_generator,
            logger: self.logger,
        }
    }
}

impl<V: Payload> DataServer<V> {
    pub fn builder(store: Arc<dyn Store<V>>, id_generator: IdGenerator<V>) -> DataServerBuilder<V> {
        DataServerBuilder {
            config: ServerConfig::default(),
            codecs: CodecRegistry::new(),
            store,
            id_generator,
            logger: Arc::new(TracingSink::default()),
        }
    }

    /// Normalized mount point (`""` when mounted at the root).
    pub fn base_path(&self) -> &str {
        &self.config.base_path
    }

    pub fn codecs(&self) -> &CodecRegistry<V> {
        &self.codecs
    }

    /// Wraps the server in a router that sends every request, whatever its
    /// method or path, to [`DataServer::handle`].
    pub fn router(self) -> Router {
        Router::new()
            .fallback(dispatch::<V>)
            .with_state(Arc::new(self))
    }

    pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("DataServer listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router()).await
    }

    pub async fn handle(&self, request: Request) -> Response {
        let (parts, body) = request.into_parts();
        let path = strip_base(parts.uri.path(), &self.config.base_path);

        let result = match parts.method {
            Method::POST => self.create(&parts.headers, body).await,
            Method::GET => self.retrieve(path, &parts.headers).await,
            Method::PUT => self.update(path, &parts.headers, body).await,
            Method::DELETE => self.delete(path).await,
            ref other => Err(ServeError::NotImplemented(format!(
                "Invalid Method, {}.",
                other
            ))),
        };

        match result {
            Ok(response) => response,
            Err(error) => self.serve_error(&parts.method, path, error),
        }
    }

    fn serve_error(&self, method: &Method, path: &str, error: ServeError) -> Response {
        let status = error.status();
        let line = format!(
            "{} {} {} - {}",
            method,
            path,
            status.canonical_reason().unwrap_or(status.as_str()),
            error
        );
        self.logger.log(&line);

        (status, [(CONTENT_TYPE, "text/plain; charset=utf-8")], line).into_response()
    }

    async fn create(&self, headers: &HeaderMap, body: Body) -> Result<Response, ServeError> {
        let decoder = self.select_decoder(headers)?;
        let bytes = self.read_body(body).await?;
        let payload = decoder(&bytes[..]).map_err(|e| {
            ServeError::BadRequest(format!("Error decoding the request body, {}", e))
        })?;

        let id = (self.id_generator)(&payload);

        self.store
            .put(id.clone(), payload)
            .await
            .map_err(|e| ServeError::Internal(format!("Error storing the object, {}", e)))?;

        tracing::debug!("Created {}", id);

        Ok((StatusCode::CREATED, [(LOCATION, self.location(&id))]).into_response())
    }

    async fn retrieve(&self, path: &str, headers: &HeaderMap) -> Result<Response, ServeError> {
        let (id, _) = shift_path(path);
        if id.is_empty() {
            if let Some(delimiter) = &self.config.listing {
                return self.list(delimiter).await;
            }
            return Err(ServeError::BadRequest(format!("Invalid URL, {}", path)));
        }

        let accept = headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");
        let (media, encoder) = acceptable(accept, &self.codecs).ok_or_else(|| {
            ServeError::NotAcceptable("No acceptable response format is supported.".to_string())
        })?;

        let payload = self
            .store
            .get(&Id::from(id))
            .await
            .map_err(|e| ServeError::NotFound(format!("The object was not found, {}", e)))?;

        let bytes = encoder(&payload).map_err(|e| {
            ServeError::Internal(format!("Failed to encode the store object, {}", e))
        })?;

        Ok((
            StatusCode::OK,
            [
                (CONTENT_TYPE, media),
                (CONTENT_LENGTH, bytes.len().to_string()),
            ],
            bytes,
        )
            .into_response())
    }

    async fn list(&self, delimiter: &str) -> Result<Response, ServeError> {
        let mut ids = self
            .store
            .list()
            .await
            .map_err(|e| ServeError::Internal(format!("Error listing the store, {}", e)))?;
        ids.sort();

        Ok((
            StatusCode::OK,
            [(CONTENT_TYPE, TEXT_PLAIN)],
            join_ids(&ids, delimiter),
        )
            .into_response())
    }

    async fn update(
        &self,
        path: &str,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<Response, ServeError> {
        let (id, _) = shift_path(path);
        if id.is_empty() {
            return Err(ServeError::BadRequest(format!("Invalid URL, {}", path)));
        }

        let decoder = self.select_decoder(headers)?;
        let bytes = self.read_body(body).await?;
        let payload = decoder(&bytes[..]).map_err(|e| {
            ServeError::BadRequest(format!("Error decoding the request body, {}", e))
        })?;

        self.store
            .put(Id::from(id), payload)
            .await
            .map_err(|e| ServeError::Internal(format!("Error storing the object, {}", e)))?;

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Always 204 for a well-formed path: deleting is idempotent.
    async fn delete(&self, path: &str) -> Result<Response, ServeError> {
        let (id, _) = shift_path(path);
        if id.is_empty() {
            return Err(ServeError::BadRequest(format!("Invalid URL, {}", path)));
        }

        let id = Id::from(id);
        if let Err(e) = self.store.delete(&id).await {
            tracing::warn!("Delete of {} reported an error: {}", id, e);
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }

    fn select_decoder(&self, headers: &HeaderMap) -> Result<&Decoder<V>, ServeError> {
        let media = match headers.get(CONTENT_TYPE) {
            None => self.config.default_content_type.clone(),
            Some(value) => match value.to_str() {
                Ok(raw) if raw.trim().is_empty() => self.config.default_content_type.clone(),
                Ok(raw) => media_type(raw).unwrap_or_else(|| raw.trim().to_ascii_lowercase()),
                Err(_) => return Err(unsupported(&String::from_utf8_lossy(value.as_bytes()))),
            },
        };

        self.codecs.decoder(&media).ok_or_else(|| unsupported(&media))
    }

    async fn read_body(&self, body: Body) -> Result<axum::body::Bytes, ServeError> {
        axum::body::to_bytes(body, self.config.max_body_bytes)
            .await
            .map_err(|e| ServeError::BadRequest(format!("Could not read the request, {}", e)))
    }

    fn location(&self, id: &Id) -> String {
        format!(
            "{}/{}",
            self.config.base_path,
            urlencoding::encode(id.as_str())
        )
    }
}

fn unsupported(media: &str) -> ServeError {
    ServeError::UnsupportedMediaType(format!("Media type, {} is not supported.", media))
}

async fn dispatch<V: Payload>(
    State(server): State<Arc<DataServer<V>>>,
    request: Request,
) -> Response {
    server.handle(request).await
}
