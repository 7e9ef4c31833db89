use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::types::Card;
use super::Corpus;

/// Errors raised while fetching or decoding corpus data.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid corpus URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Volatile(#[from] crate::volatile::VolatileError),
}

/// The small index document fetched first. It names the card chunks and
/// carries the published oracle and canonical maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusIndex {
    pub version: u32,
    pub card_count: usize,
    #[serde(default)]
    pub chunks: Vec<String>,
    #[serde(default)]
    pub oracle_id_to_printings: HashMap<Uuid, Vec<Uuid>>,
    #[serde(default)]
    pub canonical_printing_by_oracle_id: HashMap<Uuid, Uuid>,
}

/// One card chunk: a slice of the full printing map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardChunk {
    pub cards: HashMap<Uuid, Card>,
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: Url,
) -> Result<T, LoadError> {
    tracing::debug!(%url, "fetching corpus document");
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Fetch the index document, then all card chunks concurrently, and merge
/// them into a corpus.
pub async fn fetch_corpus(client: &reqwest::Client, base: &Url) -> Result<Corpus, LoadError> {
    let index: CorpusIndex = fetch_json(client, base.join("index.json")?).await?;
    tracing::info!(
        version = index.version,
        cards = index.card_count,
        chunks = index.chunks.len(),
        "corpus index loaded"
    );

    let fetches = index
        .chunks
        .iter()
        .map(|name| {
            let url = base.join(name);
            async move { fetch_json::<CardChunk>(client, url?).await }
        })
        .collect::<Vec<_>>();
    let chunks = futures::future::try_join_all(fetches).await?;

    let corpus = Corpus::from_chunks(&index, chunks);
    tracing::info!(cards = corpus.len(), "corpus ready");
    Ok(corpus)
}

/// Fetch the volatile price/rank blob and decode it.
pub async fn fetch_volatile(
    client: &reqwest::Client,
    url: Url,
) -> Result<HashMap<Uuid, crate::volatile::VolatileRecord>, LoadError> {
    tracing::debug!(%url, "fetching volatile data");
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(crate::volatile::decode(&bytes)?)
}
