//! Typed requests and their correlation context.
//!
//! Zellij performs HTTP calls asynchronously and reports each result as a
//! separate event. The only thing that travels with the request is a
//! `BTreeMap<String, String>` context, so every [`ApiRequest`] is serialized
//! as JSON under a single key when sent and decoded back when the result
//! arrives.

use crate::domain::{DexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context key holding the JSON-encoded request.
const CONTEXT_KEY: &str = "dexplorer_request";

/// A read-only call against the catalog API.
///
/// `epoch` is the list-screen request generation at the time the request was
/// issued; responses carrying an older epoch are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiRequest {
    /// One page of the browse list.
    Page { limit: u32, offset: u32, epoch: u64 },
    /// Bulk fetch used for client-side search.
    Search { query: String, limit: u32, epoch: u64 },
    /// Detail record for a single entry.
    Detail { id: u32, epoch: u64 },
}

/// A request bound to the URL it will be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub request: ApiRequest,
}

/// Status and body of a completed web request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body when the status is a success, or an
    /// [`DexError::Http`] carrying the body text otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Http`] for any non-2xx status.
    pub fn success_body(&self) -> Result<&[u8]> {
        if self.is_success() {
            Ok(&self.body)
        } else {
            let text = String::from_utf8_lossy(&self.body).trim().to_string();
            Err(DexError::Http {
                status: self.status,
                message: if text.is_empty() {
                    "request failed".to_string()
                } else {
                    text
                },
            })
        }
    }
}

impl ApiRequest {
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        match self {
            Self::Page { epoch, .. } | Self::Search { epoch, .. } | Self::Detail { epoch, .. } => {
                *epoch
            }
        }
    }

    /// Encodes the request into a web request context map.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Context`] if the request cannot be serialized.
    pub fn to_context(&self) -> Result<BTreeMap<String, String>> {
        let payload = serde_json::to_string(self)
            .map_err(|e| DexError::Context(format!("cannot encode request: {e}")))?;

        Ok(BTreeMap::from([(CONTEXT_KEY.to_string(), payload)]))
    }

    /// Decodes a request from a web request context map.
    ///
    /// Returns `Ok(None)` when the context does not belong to this plugin's
    /// requests at all.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Context`] when the context is ours but its payload
    /// does not decode.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Option<Self>> {
        let Some(payload) = context.get(CONTEXT_KEY) else {
            return Ok(None);
        };

        serde_json::from_str(payload)
            .map(Some)
            .map_err(|e| DexError::Context(format!("cannot decode request: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_survives_the_round_trip() {
        let request = ApiRequest::Search {
            query: "mr mime".to_string(),
            limit: 1500,
            epoch: 9,
        };
        let decoded = ApiRequest::from_context(&request.to_context().unwrap()).unwrap();
        assert_eq!(decoded, Some(request));
    }

    #[test]
    fn context_is_tagged_json_under_one_key() {
        let context = ApiRequest::Page { limit: 20, offset: 40, epoch: 2 }
            .to_context()
            .unwrap();

        assert_eq!(context.len(), 1);
        let payload: serde_json::Value = serde_json::from_str(&context[CONTEXT_KEY]).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "kind": "page", "limit": 20, "offset": 40, "epoch": 2 })
        );
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("other_plugin".to_string(), "x".to_string());
        assert!(ApiRequest::from_context(&context).unwrap().is_none());
    }

    #[test]
    fn broken_context_is_an_error() {
        let mut context = BTreeMap::new();
        context.insert(
            CONTEXT_KEY.to_string(),
            r#"{"kind":"detail","id":"four","epoch":0}"#.to_string(),
        );
        assert!(matches!(
            ApiRequest::from_context(&context),
            Err(DexError::Context(_))
        ));
    }

    #[test]
    fn failed_reply_carries_body_text() {
        let reply = HttpReply {
            status: 503,
            body: b"Service Unavailable".to_vec(),
        };
        let err = reply.success_body().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }
}
