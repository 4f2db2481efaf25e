use self::list::ListTeamsRequestBuilder;
use crate::decode::{self, Decode, Fields};
use crate::response::{opt_to_many, ResourceRef};
use crate::Handle;
use std::sync::Arc;

pub mod list;

pub struct TeamClient {
    handle: Arc<Handle>,
}
impl TeamClient {
    pub fn new(handle: Arc<Handle>) -> Self {
        Self { handle }
    }
    /// Teams for a season containing the given players. Both parameters are required.
    pub fn list(&self, season: i64, player_ids: &[i64]) -> ListTeamsRequestBuilder {
        let url = self.handle.shard_url("teams");
        ListTeamsRequestBuilder::new(self.handle.clone(), url, season, player_ids.to_vec())
    }
}

/// A ranked Battlerite team.
///
/// See <https://battlerite-docs.readthedocs.io/en/master/teams/teams.html>
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Team {
    pub kind: String,
    pub id: i64,
    pub name: String,
    pub shard_id: String,
    pub title_id: String,
    pub placement_games_left: i64,
    pub avatar: i64,
    pub wins: i64,
    pub losses: i64,
    pub members: Vec<i64>,
    pub division: i64,
    pub division_rating: i64,
    pub top_division: i64,
    pub top_division_rating: i64,
    pub league: i64,
    pub top_league: i64,
    pub assets: Vec<ResourceRef>,
}

impl Decode for Team {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        let stats = attributes.object("stats")?;
        let relationships = fields.object("relationships")?;

        Ok(Self {
            kind: fields.string("type")?,
            id: fields.numeric_str("id")?,
            name: attributes.string("name")?,
            shard_id: attributes.string("shardId")?,
            title_id: attributes.string("titleId")?,
            placement_games_left: stats.int("placementGamesLeft")?,
            avatar: stats.int("avatar")?,
            wins: stats.int("wins")?,
            losses: stats.int("losses")?,
            members: stats.int_array("members")?,
            division: stats.int("division")?,
            division_rating: stats.int("divisionRating")?,
            top_division: stats.int("topDivision")?,
            top_division_rating: stats.int("topDivisionRating")?,
            league: stats.int("league")?,
            top_league: stats.int("topLeague")?,
            assets: opt_to_many(&relationships, "assets")?,
        })
    }
}
