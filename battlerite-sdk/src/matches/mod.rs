use self::details::DetailsRequestBuilder;
use self::list::ListMatchesRequestBuilder;
use crate::Handle;
use std::sync::Arc;

pub mod details;
pub mod list;
pub mod model;
pub mod resolve;

pub use self::model::{Asset, Match, MatchPlayer, Participant, Roster, Round};
pub use self::resolve::{resolve_match, resolve_matches};

pub struct MatchClient {
    handle: Arc<Handle>,
}
impl MatchClient {
    pub fn new(handle: Arc<Handle>) -> Self {
        Self { handle }
    }
    pub fn get(&self, match_id: &str) -> DetailsRequestBuilder {
        let url = self.handle.shard_url(&format!("matches/{}", match_id));
        DetailsRequestBuilder::new(self.handle.clone(), url)
    }
    /// Search matches. Without filters the service returns its most recent matches.
    pub fn list(&self) -> ListMatchesRequestBuilder {
        let url = self.handle.shard_url("matches");
        ListMatchesRequestBuilder::new(self.handle.clone(), url)
    }
}
