//! Transport between the session and the playground server.
//!
//! [`Backend`] is the seam the session loads and saves through;
//! [`HttpBackend`] implements it against the server's JSON API with
//! `reqwest`. Neither retries nor sets timeouts beyond the client defaults.

use std::future::Future;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use playground_core::{EditorDocument, Identifier};

use crate::error::ClientError;

/// Loads and saves documents on behalf of a session.
pub trait Backend {
    /// Fetches the raw JSON stored under `id`.
    fn fetch(&self, id: &Identifier) -> impl Future<Output = Result<Value, ClientError>> + Send;

    /// Saves `doc`, overwriting `id` if given. Returns the identifier the
    /// server reports, unvalidated.
    fn save(
        &self,
        id: Option<&Identifier>,
        doc: &EditorDocument,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}

/// `{ "error": false, "data": { "id": ... } }` or `{ "error": "<code>" }`.
#[derive(Debug, Deserialize)]
struct SaveReply {
    #[serde(default)]
    error: Value,
    #[serde(default)]
    data: Option<SaveReplyData>,
}

#[derive(Debug, Deserialize)]
struct SaveReplyData {
    #[serde(default)]
    id: Value,
}

/// HTTP backend for a server at `base`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    /// Creates a backend for the server rooted at `base` (e.g.
    /// `http://127.0.0.1:3000/`).
    pub fn new(base: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base).map_err(|err| ClientError::Url(err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(HttpBackend { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|err| ClientError::Url(err.to_string()))
    }
}

impl Backend for HttpBackend {
    fn fetch(&self, id: &Identifier) -> impl Future<Output = Result<Value, ClientError>> + Send {
        let url = self.endpoint(&format!("data/{}", id.file_name()));
        let client = self.client.clone();
        async move {
            let response = client.get(url?).send().await?;
            if !response.status().is_success() {
                return Err(ClientError::Status(response.status().as_u16()));
            }
            Ok(response.json::<Value>().await?)
        }
    }

    fn save(
        &self,
        id: Option<&Identifier>,
        doc: &EditorDocument,
    ) -> impl Future<Output = Result<String, ClientError>> + Send {
        let url = self.endpoint("save").map(|mut url| {
            if let Some(id) = id {
                url.query_pairs_mut().append_pair("id", id.as_str());
            }
            url
        });
        let client = self.client.clone();
        let body = doc.to_transmitted();
        async move {
            let reply: SaveReply = client.post(url?).json(&body).send().await?.json().await?;

            match reply.error {
                Value::Bool(false) | Value::Null => {}
                Value::String(code) => return Err(ClientError::SaveRejected(code)),
                other => return Err(ClientError::SaveRejected(other.to_string())),
            }

            match reply.data.map(|d| d.id) {
                Some(Value::String(id)) if !id.is_empty() => Ok(id),
                Some(other) => Err(ClientError::InvalidSavedId(other.to_string())),
                None => Err(ClientError::InvalidSavedId("undefined".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:3000/play").unwrap();
        assert_eq!(
            backend.endpoint("save").unwrap().as_str(),
            "http://localhost:3000/play/save"
        );
    }

    #[test]
    fn data_endpoint_uses_json_file_name() {
        let backend = HttpBackend::new("http://localhost:3000").unwrap();
        let id = Identifier::parse("abc").unwrap();
        assert_eq!(
            backend.endpoint(&format!("data/{}", id.file_name())).unwrap().as_str(),
            "http://localhost:3000/data/abc.json"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(HttpBackend::new("not a url"), Err(ClientError::Url(_))));
    }
}
