use super::{resolve_match, Match};
use crate::{Handle, Result};
use std::sync::Arc;

pub struct DetailsRequestBuilder {
    url: String,
    handle: Arc<Handle>,
}

impl DetailsRequestBuilder {
    pub fn new(handle: Arc<Handle>, url: String) -> Self {
        Self { handle, url }
    }
    pub async fn send(self) -> Result<Match> {
        let res = self.handle.get_document(&self.url, &[]).await?;
        Ok(resolve_match(res.single()?, &res.included)?)
    }
}
