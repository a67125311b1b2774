//! Expanded query results

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of an expanded factory query: ordered links plus the documents they name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    #[serde(default)]
    pub document_links: Vec<String>,
    #[serde(default)]
    pub documents: HashMap<String, T>,
}

impl<T> QueryResult<T> {
    /// Documents in link order; links without a document are skipped
    pub fn into_documents(self) -> Vec<T> {
        let Self {
            document_links,
            mut documents,
        } = self;
        document_links
            .iter()
            .filter_map(|link| documents.remove(link))
            .collect()
    }
}
