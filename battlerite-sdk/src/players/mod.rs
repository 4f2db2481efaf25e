use self::get::GetPlayerRequestBuilder;
use self::list::ListPlayersRequestBuilder;
use crate::champion::{champion_stats, ChampionStats};
use crate::decode::{self, Decode, Fields};
use crate::Handle;
use std::sync::Arc;

pub mod get;
pub mod list;

pub struct PlayerClient {
    handle: Arc<Handle>,
}
impl PlayerClient {
    pub fn new(handle: Arc<Handle>) -> Self {
        Self { handle }
    }
    /// Get a single player by their Battlerite user id
    pub fn get(&self, id: i64) -> GetPlayerRequestBuilder {
        let url = self.handle.shard_url(&format!("players/{}", id));
        GetPlayerRequestBuilder::new(self.handle.clone(), url)
    }
    /// Search players by name, user id or Steam id.
    ///
    /// The service only honours the first filter set, so in most cases only one should be used.
    pub fn list(&self) -> ListPlayersRequestBuilder {
        let url = self.handle.shard_url("players");
        ListPlayersRequestBuilder::new(self.handle.clone(), url)
    }
}

/// A Battlerite user with their lifetime stats.
///
/// See <https://battlerite-docs.readthedocs.io/en/latest/players/players.html>
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Player {
    pub kind: String,
    pub id: i64,
    pub link_self: String,
    pub title_id: String,
    pub name: String,
    pub picture: i64,
    pub wins: i64,
    pub losses: i64,
    pub grade_score: i64,
    pub time_played: i64,
    pub ranked_2v2_wins: i64,
    pub ranked_2v2_losses: i64,
    pub ranked_3v3_wins: i64,
    pub ranked_3v3_losses: i64,
    pub unranked_2v2_wins: i64,
    pub unranked_2v2_losses: i64,
    pub unranked_3v3_wins: i64,
    pub unranked_3v3_losses: i64,
    pub brawl_wins: i64,
    pub brawl_losses: i64,
    pub battlegrounds_wins: i64,
    pub battlegrounds_losses: i64,
    pub account_xp: i64,
    pub account_level: i64,
    pub twitch_account_linked: i64,
    pub vs_ai_played: i64,
    pub rating_mean: i64,
    pub rating_dev: i64,
    pub character: CharacterStats,
}

/// Per-champion breakdown of a player's stats.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CharacterStats {
    pub xp: ChampionStats,
    pub wins: ChampionStats,
    pub losses: ChampionStats,
    pub kills: ChampionStats,
    pub deaths: ChampionStats,
    pub time_played: ChampionStats,
    pub ranked_2v2_wins: ChampionStats,
    pub ranked_2v2_losses: ChampionStats,
    pub ranked_3v3_wins: ChampionStats,
    pub ranked_3v3_losses: ChampionStats,
    pub unranked_2v2_wins: ChampionStats,
    pub unranked_2v2_losses: ChampionStats,
    pub unranked_3v3_wins: ChampionStats,
    pub unranked_3v3_losses: ChampionStats,
    pub brawl_wins: ChampionStats,
    pub brawl_losses: ChampionStats,
    pub battlegrounds_wins: ChampionStats,
    pub battlegrounds_losses: ChampionStats,
    pub levels: ChampionStats,
}

impl Player {
    pub fn win_rate(&self) -> Option<f64> {
        let games = self.wins + self.losses;
        (games > 0).then(|| self.wins as f64 / games as f64)
    }
}

impl Decode for CharacterStats {
    fn decode(stats: &Fields<'_>) -> decode::Result<Self> {
        Ok(Self {
            xp: champion_stats(stats, 11000)?,
            wins: champion_stats(stats, 12000)?,
            losses: champion_stats(stats, 13000)?,
            kills: champion_stats(stats, 14000)?,
            deaths: champion_stats(stats, 15000)?,
            time_played: champion_stats(stats, 16000)?,
            ranked_2v2_wins: champion_stats(stats, 17000)?,
            ranked_2v2_losses: champion_stats(stats, 18000)?,
            ranked_3v3_wins: champion_stats(stats, 19000)?,
            ranked_3v3_losses: champion_stats(stats, 20000)?,
            unranked_2v2_wins: champion_stats(stats, 21000)?,
            unranked_2v2_losses: champion_stats(stats, 22000)?,
            unranked_3v3_wins: champion_stats(stats, 23000)?,
            unranked_3v3_losses: champion_stats(stats, 24000)?,
            brawl_wins: champion_stats(stats, 25000)?,
            brawl_losses: champion_stats(stats, 26000)?,
            battlegrounds_wins: champion_stats(stats, 27000)?,
            battlegrounds_losses: champion_stats(stats, 28000)?,
            levels: champion_stats(stats, 40000)?,
        })
    }
}

impl Decode for Player {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        let stats = attributes.object("stats")?;

        Ok(Self {
            kind: fields.string("type")?,
            id: fields.numeric_str("id")?,
            link_self: fields.object("links")?.string("self")?,
            title_id: attributes.string("titleId")?,
            name: attributes.string("name")?,
            picture: stats.int_or_zero("picture")?,
            wins: stats.int_or_zero("2")?,
            losses: stats.int_or_zero("3")?,
            grade_score: stats.int_or_zero("4")?,
            time_played: stats.int_or_zero("8")?,
            ranked_2v2_wins: stats.int_or_zero("10")?,
            ranked_2v2_losses: stats.int_or_zero("11")?,
            ranked_3v3_wins: stats.int_or_zero("12")?,
            ranked_3v3_losses: stats.int_or_zero("13")?,
            unranked_2v2_wins: stats.int_or_zero("14")?,
            unranked_2v2_losses: stats.int_or_zero("15")?,
            unranked_3v3_wins: stats.int_or_zero("16")?,
            unranked_3v3_losses: stats.int_or_zero("17")?,
            brawl_wins: stats.int_or_zero("18")?,
            brawl_losses: stats.int_or_zero("19")?,
            battlegrounds_wins: stats.int_or_zero("22")?,
            battlegrounds_losses: stats.int_or_zero("23")?,
            account_xp: stats.int_or_zero("25")?,
            account_level: stats.int_or_zero("26")?,
            twitch_account_linked: stats.int_or_zero("27")?,
            vs_ai_played: stats.int_or_zero("56")?,
            rating_mean: stats.int_or_zero("70")?,
            rating_dev: stats.int_or_zero("71")?,
            character: CharacterStats::decode(&stats)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::champion::Champion;
    use crate::decode::DecodeError;
    use crate::Response;
    use serde_json::json;

    fn player_json(id: &str, name: &str) -> serde_json::Value {
        json!({
            "type": "player",
            "id": id,
            "links": { "self": format!("https://api.dc01.gamelockerapp.com/shards/global/players/{}", id) },
            "attributes": {
                "name": name,
                "titleId": "stunlock-studios-battlerite",
                "stats": {
                    "picture": 39003.0,
                    "2": 120.0,
                    "3": 80.0,
                    "8": 360000,
                    "26": 41,
                    "70": null,
                    "12004": 33,
                    "40021": 9
                }
            }
        })
    }

    #[test]
    fn decodes_player_with_sparse_stats() {
        let value = player_json("934791968557563904", "Boetie");
        let player = Player::decode(&Fields::new(&value, "data").unwrap()).unwrap();
        assert_eq!(player.id, 934791968557563904);
        assert_eq!(player.name, "Boetie");
        assert_eq!(player.picture, 39003);
        assert_eq!(player.wins, 120);
        assert_eq!(player.losses, 80);
        assert_eq!(player.account_level, 41);
        assert_eq!(player.rating_mean, 0);
        assert_eq!(player.brawl_wins, 0);
        assert_eq!(player.character.wins[&Champion::Jade], 33);
        assert_eq!(player.character.levels[&Champion::Raigon], 9);
        assert_eq!(player.character.kills[&Champion::Raigon], 0);
        assert_eq!(player.win_rate(), Some(0.6));
    }

    #[test]
    fn decodes_player_collection() {
        let res: Response = serde_json::from_value(json!({
            "data": [player_json("1", "a"), player_json("2", "b")]
        }))
        .unwrap();
        let players: Vec<Player> = res.decode_many().unwrap();
        assert_eq!(
            players.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let value = player_json("abc", "a");
        let err = Player::decode(&Fields::new(&value, "data").unwrap()).unwrap_err();
        assert_eq!(err, DecodeError::mismatch("data.id", "numeric string"));
    }
}
