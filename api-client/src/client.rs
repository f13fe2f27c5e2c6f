use crate::models::ListResponse;
use crate::models::PokemonResponse;
use crate::models::TypeResponse;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use async_trait::async_trait;
use pokedex_catalog::CatalogConfig;
use pokedex_catalog::CatalogSource;
use pokedex_catalog::DetailRecord;
use pokedex_catalog::EntityId;
use pokedex_catalog::NamedResource;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP-backed [`CatalogSource`].
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Self::with_base_url(&config.api_base_url, config.request_timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid api base url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("api base url '{base_url}' cannot be a base"));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("api base url '{}' cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!(%url, "GET {what}");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("{what} request failed to send"))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("{what} request failed: {status} - {body}"));
        }
        resp.json()
            .await
            .with_context(|| format!("decode {what} response"))
    }

    async fn list(&self, limit: usize) -> Result<ListResponse> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.get_json(url, "listing").await
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn count(&self) -> Result<usize> {
        Ok(self.list(1).await?.count)
    }

    async fn listing(&self, limit: usize) -> Result<Vec<NamedResource>> {
        Ok(self.list(limit).await?.results)
    }

    async fn detail(&self, id: EntityId) -> Result<DetailRecord> {
        let url = self.endpoint(&["pokemon", &id.to_string()])?;
        let response: PokemonResponse = self.get_json(url, "detail").await?;
        Ok(response.into_record())
    }

    async fn category_members(&self, label: &str) -> Result<Vec<NamedResource>> {
        let url = self.endpoint(&["type", label])?;
        let response: TypeResponse = self.get_json(url, "category").await?;
        Ok(response.into_members())
    }
}
