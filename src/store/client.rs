//! Document store client
//!
//! Minimal REST client for the cloud document store that holds the member
//! roster. The store is read-only from this tool's point of view.

use crate::Result;
use crate::model::Member;
use ohno::{IntoAppError, app_err};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const LOG_TARGET: &str = "     store";

/// One document from the store: an id plus arbitrary fields.
#[derive(Debug, Deserialize)]
struct Document {
    id: String,
    #[serde(default)]
    fields: serde_json::Map<String, Value>,
}

/// Response shape of the document listing endpoint.
#[derive(Debug, Default, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Document>,
}

/// Document store REST client.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
    collection: String,
}

impl Client {
    /// Create a new client with an optional API key and base URL.
    pub fn new(api_key: Option<&str>, base_url: &str, collection: impl Into<String>) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let base_url = Url::parse(base_url).into_app_err_with(|| format!("invalid document store base URL '{base_url}'"))?;

        let mut client_builder = reqwest::Client::builder().user_agent("teampulse");

        if let Some(key) = api_key {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {key}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url,
            collection: collection.into(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Fetch every document in the configured collection as member records.
    ///
    /// Each document's id is merged into its fields before deserialization.
    /// Documents that do not parse as member records are skipped with a
    /// warning rather than failing the whole query.
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let url = self.documents_url()?;

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("querying document store at '{url}'"))?;
        let resp = resp
            .error_for_status()
            .into_app_err_with(|| format!("document store rejected query for collection '{}'", self.collection))?;

        let list: DocumentList = resp.json().await.into_app_err("parsing document store response")?;

        log::debug!(target: LOG_TARGET, "Document store returned {} document(s) from '{}'", list.documents.len(), self.collection);

        Ok(into_members(list))
    }

    /// The document listing endpoint for the configured collection.
    fn documents_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| app_err!("document store base URL '{}' cannot hold a path", self.base_url))?
            .pop_if_empty()
            .extend(["collections", &self.collection, "documents"]);
        Ok(url)
    }
}

/// Merge each document's id into its fields and deserialize the result.
fn into_members(list: DocumentList) -> Vec<Member> {
    let mut members = Vec::with_capacity(list.documents.len());
    for doc in list.documents {
        let mut fields = doc.fields;
        let _ = fields.insert("id".to_string(), Value::String(doc.id.clone()));

        match serde_json::from_value::<Member>(Value::Object(fields)) {
            Ok(member) => members.push(member),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping malformed member document '{}': {e:#}", doc.id);
            }
        }
    }

    members
}
