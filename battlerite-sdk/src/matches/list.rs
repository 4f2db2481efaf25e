use super::{resolve_matches, Match};
use crate::{join, Handle, Result};
use std::sync::Arc;

pub struct ListMatchesRequestBuilder {
    url: String,
    handle: Arc<Handle>,
    page_offset: Option<u32>,
    page_limit: Option<u32>,
    sort: Option<String>,
    created_at_start: Option<String>,
    created_at_end: Option<String>,
    player_ids: Vec<String>,
    patch_versions: Vec<String>,
}

impl ListMatchesRequestBuilder {
    pub fn new(handle: Arc<Handle>, url: String) -> Self {
        Self {
            handle,
            url,
            page_offset: None,
            page_limit: None,
            sort: None,
            created_at_start: None,
            created_at_end: None,
            player_ids: Vec::new(),
            patch_versions: Vec::new(),
        }
    }
    pub fn page_offset(mut self, page_offset: u32) -> Self {
        self.page_offset = Some(page_offset);
        self
    }
    /// Set the number of matches to be returned.
    ///
    /// Defaults to the service's page size
    pub fn page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = Some(page_limit);
        self
    }
    /// Sort attribute, e.g. `createdAt` or `-createdAt` for newest first.
    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }
    /// ISO 8601 timestamp of the earliest match to return.
    pub fn created_at_start(mut self, created_at_start: &str) -> Self {
        self.created_at_start = Some(created_at_start.to_string());
        self
    }
    pub fn created_at_end(mut self, created_at_end: &str) -> Self {
        self.created_at_end = Some(created_at_end.to_string());
        self
    }
    pub fn player_ids<I, S>(mut self, player_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_ids.extend(player_ids.into_iter().map(Into::into));
        self
    }
    pub fn patch_versions<I, S>(mut self, patch_versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patch_versions
            .extend(patch_versions.into_iter().map(Into::into));
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page_offset) = self.page_offset {
            query.push(("page[offset]", page_offset.to_string()));
        }
        if let Some(page_limit) = self.page_limit {
            query.push(("page[limit]", page_limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort", sort.clone()));
        }
        if let Some(start) = &self.created_at_start {
            query.push(("filter[createdAt-start]", start.clone()));
        }
        if let Some(end) = &self.created_at_end {
            query.push(("filter[createdAt-end]", end.clone()));
        }
        if !self.player_ids.is_empty() {
            query.push(("filter[playerIds]", join(&self.player_ids)));
        }
        if !self.patch_versions.is_empty() {
            query.push(("filter[patchVersion]", join(&self.patch_versions)));
        }
        query
    }

    pub async fn send(self) -> Result<Vec<Match>> {
        let query = self.query();
        let res = self.handle.get_document(&self.url, &query).await?;
        let matches = resolve_matches(res.many()?, &res.included)?;
        tracing::debug!("Resolved {} matches", matches.len());
        Ok(matches)
    }
}
