use super::Team;
use crate::{join, Error, Handle, Result};
use std::sync::Arc;

pub struct ListTeamsRequestBuilder {
    url: String,
    handle: Arc<Handle>,
    season: i64,
    player_ids: Vec<i64>,
}

impl ListTeamsRequestBuilder {
    pub fn new(handle: Arc<Handle>, url: String, season: i64, player_ids: Vec<i64>) -> Self {
        Self {
            handle,
            url,
            season,
            player_ids,
        }
    }

    fn query(&self) -> Result<Vec<(&'static str, String)>> {
        if self.season == 0 {
            return Err(Error::InvalidFilter("Team search must contain a season"));
        }
        if self.player_ids.is_empty() {
            return Err(Error::InvalidFilter("Team search must contain player ids"));
        }
        Ok(vec![
            ("tag[season]", self.season.to_string()),
            ("tag[playerIds]", join(&self.player_ids)),
        ])
    }

    pub async fn send(self) -> Result<Vec<Team>> {
        let query = self.query()?;
        let res = self.handle.get_document(&self.url, &query).await?;
        Ok(res.decode_many()?)
    }
}
