use super::Player;
use crate::{Handle, Result};
use std::sync::Arc;

pub struct GetPlayerRequestBuilder {
    url: String,
    handle: Arc<Handle>,
}

impl GetPlayerRequestBuilder {
    pub fn new(handle: Arc<Handle>, url: String) -> Self {
        Self { handle, url }
    }
    pub async fn send(self) -> Result<Player> {
        let res = self.handle.get_document(&self.url, &[]).await?;
        Ok(res.decode_single()?)
    }
}
