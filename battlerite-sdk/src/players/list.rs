use super::Player;
use crate::{join, Handle, Result};
use std::sync::Arc;

pub struct ListPlayersRequestBuilder {
    url: String,
    handle: Arc<Handle>,
    names: Vec<String>,
    user_ids: Vec<i64>,
    steam_ids: Vec<i64>,
}

impl ListPlayersRequestBuilder {
    pub fn new(handle: Arc<Handle>, url: String) -> Self {
        Self {
            handle,
            url,
            names: Vec::new(),
            user_ids: Vec::new(),
            steam_ids: Vec::new(),
        }
    }
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }
    pub fn user_ids(mut self, user_ids: impl IntoIterator<Item = i64>) -> Self {
        self.user_ids.extend(user_ids);
        self
    }
    pub fn steam_ids(mut self, steam_ids: impl IntoIterator<Item = i64>) -> Self {
        self.steam_ids.extend(steam_ids);
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.names.is_empty() {
            query.push(("filter[playerNames]", join(&self.names)));
        }
        if !self.user_ids.is_empty() {
            query.push(("filter[playerIds]", join(&self.user_ids)));
        }
        if !self.steam_ids.is_empty() {
            query.push(("filter[steamIds]", join(&self.steam_ids)));
        }
        query
    }

    pub async fn send(self) -> Result<Vec<Player>> {
        let query = self.query();
        let res = self.handle.get_document(&self.url, &query).await?;
        let players: Vec<Player> = res.decode_many()?;
        tracing::debug!("Decoded {} players", players.len());
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use crate::Client;

    #[test]
    fn builds_filter_query() {
        let client = Client::new("key").unwrap();
        let builder = client
            .players()
            .list()
            .names(["Boetie", "Kai"])
            .steam_ids([76561198000000000]);
        assert_eq!(
            builder.query(),
            vec![
                ("filter[playerNames]", "Boetie,Kai".to_string()),
                ("filter[steamIds]", "76561198000000000".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_has_no_query() {
        let client = Client::new("key").unwrap();
        assert!(client.players().list().query().is_empty());
    }
}
