use reqwest::header::HeaderMap;
use reqwest::{Method, Request, Url};
use std::sync::Arc;

use crate::store::{Id, Result, StoreError};

/// Produces the outbound request for one store operation.
///
/// The request carries method, URL and headers; the `RemoteStore` attaches the
/// body where the operation has one. The list operation is built with an
/// empty `Id`.
pub type RequestBuilder = Arc<dyn Fn(&Id) -> Result<Request> + Send + Sync>;

/// Computes the target URL for an identifier below a base URL.
pub type UrlFn = fn(&str, &Id) -> Result<Url>;

/// `{base}/{id}` with the id percent-encoded as a single path segment.
///
/// An empty id addresses the collection itself (`{base}/`).
pub fn append_id_url(base: &str, id: &Id) -> Result<Url> {
    let raw = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(id.as_str())
    );
    Url::parse(&raw).map_err(|e| StoreError::Request(format!("{}: {}", raw, e)))
}

/// Builds every request with the same method, URL scheme and headers.
pub fn simple_request(
    method: Method,
    base: impl Into<String>,
    url_fn: UrlFn,
    headers: HeaderMap,
) -> RequestBuilder {
    let base = base.into();
    Arc::new(move |id: &Id| {
        let url = url_fn(&base, id)?;
        let mut request = Request::new(method.clone(), url);
        *request.headers_mut() = headers.clone();
        Ok(request)
    })
}

/// The four request builders a `RemoteStore` needs, one per operation.
#[derive(Clone)]
pub struct RemoteRequests {
    pub store: RequestBuilder,
    pub retrieve: RequestBuilder,
    pub list: RequestBuilder,
    pub delete: RequestBuilder,
}

impl RemoteRequests {
    /// The conventional mapping onto a `DataServer` mounted at `base`:
    /// `PUT {base}/{id}`, `GET {base}/{id}`, `GET {base}/`, `DELETE {base}/{id}`.
    pub fn rest(base: &str, headers: HeaderMap) -> Self {
        Self {
            store: simple_request(Method::PUT, base, append_id_url, headers.clone()),
            retrieve: simple_request(Method::GET, base, append_id_url, headers.clone()),
            list: simple_request(Method::GET, base, append_id_url, headers.clone()),
            delete: simple_request(Method::DELETE, base, append_id_url, headers),
        }
    }
}
