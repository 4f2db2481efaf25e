//! Records that make up a match graph, each decoded from one JSON:API resource.
use crate::decode::{self, Decode, Fields};
use crate::response::{opt_to_many, to_many, to_one, ResourceRef};
use serde_json::{Map, Value};

/// A single Battlerite match with its rosters, participants and players resolved.
///
/// See <https://battlerite-docs.readthedocs.io/en/master/matches/matches.html>
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Match {
    pub kind: String,
    pub id: String,
    pub link_self: String,
    pub created_at: String,
    pub duration: i64,
    pub game_mode: String,
    pub patch_version: String,
    pub shard_id: String,
    pub title_id: Option<String>,
    pub map_type: String,
    pub map_id: String,
    /// Telemetry download link.
    pub asset: Option<Asset>,
    pub rosters: Vec<Roster>,
    pub participants: Vec<Participant>,
    pub match_players: Vec<MatchPlayer>,
    pub rounds: Vec<Round>,
    pub spectators: Vec<ResourceRef>,
}

impl Match {
    /// Participants that belong to `roster`, in resolution order.
    pub fn roster_participants<'a>(
        &'a self,
        roster: &'a Roster,
    ) -> impl Iterator<Item = &'a Participant> + 'a {
        self.participants
            .iter()
            .filter(move |p| roster.participants.iter().any(|r| r.id == p.id))
    }

    /// The account behind a participant, when it was included in the response.
    pub fn player_of(&self, participant: &Participant) -> Option<&MatchPlayer> {
        self.match_players
            .iter()
            .find(|p| p.id == participant.player.id)
    }

    pub fn winning_roster(&self) -> Option<&Roster> {
        self.rosters.iter().find(|r| r.won)
    }
}

/// A team's presence in one match.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Roster {
    pub kind: String,
    pub id: String,
    pub shard_id: String,
    pub won: bool,
    pub score: i64,
    pub participants: Vec<ResourceRef>,
    pub team: Option<ResourceRef>,
}

impl Decode for Roster {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        let stats = attributes.object("stats")?;
        let relationships = fields.object("relationships")?;

        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
            shard_id: attributes.string("shardId")?,
            won: attributes.loose_bool("won")?,
            score: stats.int("score")?,
            participants: to_many(&relationships, "participants")?,
            team: match relationships.get("team") {
                Some(_) => to_one(&relationships, "team")?,
                None => None,
            },
        })
    }
}

/// One player's performance in a match.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Participant {
    pub kind: String,
    pub id: String,
    pub actor: i64,
    pub shard_id: String,
    pub user_id: i64,
    pub damage_done: i64,
    pub damage_received: i64,
    pub deaths: i64,
    pub energy_gained: i64,
    pub energy_used: i64,
    pub kills: i64,
    pub score: i64,
    pub time_alive: i64,
    pub ability_uses: i64,
    pub disables_done: i64,
    pub disables_received: i64,
    pub emote: i64,
    pub mount: i64,
    pub outfit: i64,
    pub attachment: i64,
    pub healing_done: i64,
    pub healing_received: i64,
    pub side: i64,
    pub player: ResourceRef,
}

impl Decode for Participant {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        let stats = attributes.object("stats")?;
        let relationships = fields.object("relationships")?;
        let player = to_one(&relationships, "player")?.ok_or_else(|| {
            decode::DecodeError::missing(format!(
                "{}.data",
                relationships.child_path("player")
            ))
        })?;

        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
            actor: attributes.numeric_str("actor")?,
            shard_id: attributes.string("shardId")?,
            user_id: stats.numeric_str("userID")?,
            damage_done: stats.int("damageDone")?,
            damage_received: stats.int("damageReceived")?,
            deaths: stats.int("deaths")?,
            energy_gained: stats.int("energyGained")?,
            energy_used: stats.int("energyUsed")?,
            kills: stats.int("kills")?,
            score: stats.int("score")?,
            time_alive: stats.int("timeAlive")?,
            ability_uses: stats.int("abilityUses")?,
            disables_done: stats.int("disablesDone")?,
            disables_received: stats.int("disablesReceived")?,
            emote: stats.int("emote")?,
            mount: stats.int("mount")?,
            outfit: stats.int("outfit")?,
            attachment: stats.int("attachment")?,
            healing_done: stats.int("healingDone")?,
            healing_received: stats.int("healingReceived")?,
            side: stats.int("side")?,
            player,
        })
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct Round {
    pub kind: String,
    pub id: String,
    pub winning_team: i64,
    pub duration: i64,
    pub ordinal: i64,
}

impl Decode for Round {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
            winning_team: attributes.object("stats")?.int("winningTeam")?,
            duration: attributes.int("duration")?,
            ordinal: attributes.int("ordinal")?,
        })
    }
}

/// Match asset, mainly used to pull the match's telemetry.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Asset {
    pub kind: String,
    pub id: String,
    pub url: String,
    pub created_at: String,
    pub description: String,
    pub name: String,
}

impl Decode for Asset {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let attributes = fields.object("attributes")?;
        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
            url: attributes.string("URL")?,
            created_at: attributes.string("createdAt")?,
            description: attributes.string("description")?,
            name: attributes.string("name")?,
        })
    }
}

/// Account level identity of a participant, as embedded in a match response.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MatchPlayer {
    pub kind: String,
    pub id: String,
    pub link_self: Option<String>,
    pub attributes: Map<String, Value>,
    pub assets: Vec<ResourceRef>,
}

impl MatchPlayer {
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }
}

impl Decode for MatchPlayer {
    fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
        let link_self = match fields.opt_object("links")? {
            Some(links) => links.opt_string("self")?,
            None => None,
        };
        let assets = match fields.opt_object("relationships")? {
            Some(relationships) => opt_to_many(&relationships, "assets")?,
            None => Vec::new(),
        };
        let attributes = match fields.opt_object("attributes")? {
            Some(attributes) => attributes.map().clone(),
            None => Map::new(),
        };

        Ok(Self {
            kind: fields.string("type")?,
            id: fields.string("id")?,
            link_self,
            attributes,
            assets,
        })
    }
}

/// Scalar fields of the match primary resource. Children are filled in by the resolver.
pub(crate) fn decode_match_attributes(fields: &Fields<'_>) -> decode::Result<Match> {
    let attributes = fields.object("attributes")?;
    let stats = attributes.object("stats")?;
    let relationships = fields.object("relationships")?;

    Ok(Match {
        kind: fields.string("type")?,
        id: fields.string("id")?,
        link_self: fields.object("links")?.string("self")?,
        created_at: attributes.string("createdAt")?,
        duration: attributes.int("duration")?,
        game_mode: attributes.string("gameMode")?,
        patch_version: attributes.string("patchVersion")?,
        shard_id: attributes.string("shardId")?,
        title_id: attributes.opt_string("titleId")?,
        map_type: stats.string("type")?,
        map_id: stats.string("mapID")?,
        spectators: opt_to_many(&relationships, "spectators")?,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use serde_json::json;

    #[test]
    fn roster_won_as_string_and_null_team() {
        let value = json!({
            "type": "roster",
            "id": "r1",
            "attributes": { "shardId": "global", "won": "true", "stats": { "score": 3.0 } },
            "relationships": {
                "participants": { "data": [{ "type": "participant", "id": "p1" }] },
                "team": { "data": null }
            }
        });
        let roster = Roster::decode(&Fields::new(&value, "included[0]").unwrap()).unwrap();
        assert!(roster.won);
        assert_eq!(roster.score, 3);
        assert_eq!(roster.participants.len(), 1);
        assert_eq!(roster.team, None);
    }

    fn reference(kind: &str, id: &str) -> ResourceRef {
        ResourceRef {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn roster_reads_every_field() {
        let value = json!({
            "type": "roster",
            "id": "r7",
            "attributes": { "shardId": "eu", "won": false, "stats": { "score": 2.0 } },
            "relationships": {
                "participants": {
                    "data": [
                        { "type": "participant", "id": "p1" },
                        { "type": "participant", "id": "p2" }
                    ]
                },
                "team": { "data": { "type": "team", "id": "t9" } }
            }
        });
        let roster = Roster::decode(&Fields::new(&value, "included[0]").unwrap()).unwrap();
        assert_eq!(
            roster,
            Roster {
                kind: "roster".to_string(),
                id: "r7".to_string(),
                shard_id: "eu".to_string(),
                won: false,
                score: 2,
                participants: vec![reference("participant", "p1"), reference("participant", "p2")],
                team: Some(reference("team", "t9")),
            }
        );
    }

    #[test]
    fn participant_reads_every_stat() {
        let value = json!({
            "type": "participant",
            "id": "p3",
            "attributes": {
                "actor": "5",
                "shardId": "global",
                "stats": {
                    "userID": "776001",
                    "damageDone": 1.0, "damageReceived": 2.0, "deaths": 3.0,
                    "energyGained": 4.0, "energyUsed": 5.0, "kills": 6.0,
                    "score": 7.0, "timeAlive": 8.0, "abilityUses": 9.0,
                    "disablesDone": 10.0, "disablesReceived": 11.0, "emote": 12.0,
                    "mount": 13.0, "outfit": 14.0, "attachment": 15.0,
                    "healingDone": 16.0, "healingReceived": 17.0, "side": 18.0
                }
            },
            "relationships": { "player": { "data": { "type": "player", "id": "776001" } } }
        });
        let participant =
            Participant::decode(&Fields::new(&value, "included[2]").unwrap()).unwrap();
        assert_eq!(
            participant,
            Participant {
                kind: "participant".to_string(),
                id: "p3".to_string(),
                actor: 5,
                shard_id: "global".to_string(),
                user_id: 776001,
                damage_done: 1,
                damage_received: 2,
                deaths: 3,
                energy_gained: 4,
                energy_used: 5,
                kills: 6,
                score: 7,
                time_alive: 8,
                ability_uses: 9,
                disables_done: 10,
                disables_received: 11,
                emote: 12,
                mount: 13,
                outfit: 14,
                attachment: 15,
                healing_done: 16,
                healing_received: 17,
                side: 18,
                player: reference("player", "776001"),
            }
        );
    }

    #[test]
    fn round_reads_every_field() {
        let value = json!({
            "type": "round",
            "id": "rd2",
            "attributes": { "duration": 74.6, "ordinal": 3, "stats": { "winningTeam": 2.0 } }
        });
        let round = Round::decode(&Fields::new(&value, "included[4]").unwrap()).unwrap();
        assert_eq!(
            round,
            Round {
                kind: "round".to_string(),
                id: "rd2".to_string(),
                winning_team: 2,
                duration: 74,
                ordinal: 3,
            }
        );
    }

    #[test]
    fn participant_requires_player_reference() {
        let value = json!({
            "type": "participant",
            "id": "p1",
            "attributes": { "actor": "1", "shardId": "global", "stats": {} },
            "relationships": { "player": { "data": null } }
        });
        let err = Participant::decode(&Fields::new(&value, "included[5]").unwrap()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::missing("included[5].relationships.player.data")
        );
    }

    #[test]
    fn match_player_tolerates_sparse_resource() {
        let value = json!({ "type": "player", "id": "776001", "attributes": { "name": "Kai" } });
        let player = MatchPlayer::decode(&Fields::new(&value, "included[1]").unwrap()).unwrap();
        assert_eq!(player.name(), Some("Kai"));
        assert_eq!(player.link_self, None);
        assert!(player.assets.is_empty());
    }

    #[test]
    fn asset_reads_upper_case_url() {
        let value = json!({
            "type": "asset",
            "id": "a1",
            "attributes": {
                "URL": "https://cdn.gamelockerapp.com/telemetry.json",
                "createdAt": "2018-03-10T12:00:00Z",
                "description": "",
                "name": "telemetry"
            }
        });
        let asset = Asset::decode(&Fields::new(&value, "included[0]").unwrap()).unwrap();
        assert_eq!(asset.url, "https://cdn.gamelockerapp.com/telemetry.json");
        assert_eq!(asset.name, "telemetry");
    }
}
