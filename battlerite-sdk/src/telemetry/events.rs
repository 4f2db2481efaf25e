//! Typed telemetry events.
//!
//! Every event arrives as `{ "type", "cursor", "dataObject": { "time", ... } }`.
//! The records below flatten `cursor` next to the data object fields; serializing
//! a record yields its `dataObject` in the service's key spelling.
use crate::decode::{self, Decode, Fields};
use serde::Serialize;
use serde_json::Value;

/// Declares a telemetry record from one list of `field: Type = getter("wireKey")`.
///
/// The wire key feeds both the serde rename used for encoding and the [`Fields`]
/// getter used for decoding. `event` records also carry the envelope's `cursor` and
/// read their fields out of `dataObject`; `nested` records are read in place.
macro_rules! telemetry_record {
    (event $(#[$attr:meta])* $name:ident {
        $($field:ident: $ty:ty = $getter:ident($key:literal)),* $(,)?
    }) => {
        $(#[$attr])*
        #[derive(Default, Debug, Clone, PartialEq, Serialize)]
        pub struct $name {
            #[serde(skip)]
            pub cursor: i64,
            $(
                #[serde(rename = $key)]
                pub $field: $ty,
            )*
        }

        impl Decode for $name {
            fn decode(event: &Fields<'_>) -> decode::Result<Self> {
                let data = event.object("dataObject")?;
                Ok(Self {
                    cursor: event.int("cursor")?,
                    $($field: data.$getter($key)?,)*
                })
            }
        }
    };
    (nested $(#[$attr:meta])* $name:ident {
        $($field:ident: $ty:ty = $getter:ident($key:literal)),* $(,)?
    }) => {
        $(#[$attr])*
        #[derive(Default, Debug, Clone, PartialEq, Serialize)]
        pub struct $name {
            $(
                #[serde(rename = $key)]
                pub $field: $ty,
            )*
        }

        impl Decode for $name {
            fn decode(fields: &Fields<'_>) -> decode::Result<Self> {
                Ok(Self {
                    $($field: fields.$getter($key)?,)*
                })
            }
        }
    };
}

telemetry_record! { event
    /// Start of a match.
    MatchStart {
        time: i64 = int("time"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        version: String = string("version"),
        event_type: String = string("type"),
        game_mode: i64 = int("gameMode"),
        map_id: String = string("mapID"),
        team_size: i64 = int("teamSize"),
        region: String = string("region"),
    }
}

telemetry_record! { event
    /// Something that happened to a user during a round (damage, healing, kills, ...).
    RoundEvent {
        time: i64 = int("time"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        user_id: String = string("userID"),
        round: i64 = int("round"),
        character: i64 = int("character"),
        event_type: String = string("type"),
        value: i64 = int("value"),
        time_into_round: i64 = int("timeIntoRound"),
    }
}

telemetry_record! { event
    /// Ability usage of a character over a round.
    UserRoundSpell {
        time: i64 = int("time"),
        account_id: String = string("accountId"),
        match_id: String = string("matchId"),
        round: i64 = int("round"),
        character: i64 = int("character"),
        type_id: i64 = int("typeId"),
        source_type_id: i64 = int("sourceTypeId"),
        score_type: String = string("scoreType"),
        value: i64 = int("value"),
    }
}

telemetry_record! { event
    DeathEvent {
        time: i64 = int("time"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        user_id: String = string("userID"),
    }
}

telemetry_record! { event
    /// A user reserved into the match, with their loadout and ranking at that time.
    MatchReservedUser {
        time: i64 = int("time"),
        account_id: String = string("accountId"),
        match_id: String = string("matchId"),
        server_type: String = string("serverType"),
        character_level: i64 = int("characterLevel"),
        team_id: String = string("teamId"),
        total_time_played: i64 = int("totalTimePlayed"),
        character_time_played: i64 = int("characterTimePlayed"),
        character: i64 = int("character"),
        team: i64 = int("team"),
        ranking_type: String = string("rankingType"),
        mount: i64 = int("mount"),
        attachment: i64 = int("attachment"),
        outfit: i64 = int("outfit"),
        emote: i64 = int("emote"),
        league: i64 = int("league"),
        division: i64 = int("division"),
        division_rating: i64 = int("divisionRating"),
        season_id: i64 = int("seasonId"),
    }
}

telemetry_record! { event
    /// Matchmaking state of a user while queueing for this match.
    QueueEvent {
        time: i64 = int("time"),
        user_id: String = string("userId"),
        team_id: String = string("teamId"),
        session_id: String = string("sessionId"),
        season: i64 = int("season"),
        event_type: String = string("eventType"),
        time_joined_queue: String = string("timeJoinedQueue"),
        time_in_queue: f64 = float("timeInQueue"),
        character: i64 = int("character"),
        character_archetype: i64 = int("characterArchetype"),
        queue_types: Vec<Value> = values("queueTypes"),
        limit_matchmaking_range: bool = bool("limitMatchmakingRange"),
        region_samples: Vec<RegionSample> = list("regionSamples"),
        preferred_region: String = string("preferredRegion"),
        ranking_type: String = string("rankingType"),
        league: i64 = int("league"),
        division: i64 = int("division"),
        division_rating: i64 = int("divisionRating"),
        team_size: i64 = int("teamSize"),
        team_members: Value = value("teamMembers"),
        placement_games_left: i64 = int("placementGamesLeft"),
        match_id: String = string("matchId"),
        match_region: String = string("matchRegion"),
        team_side: i64 = int("teamSide"),
        auto_matchmaking: bool = bool("autoMatchmaking"),
    }
}

telemetry_record! { nested
    /// Latency to one region, measured while the user was queueing.
    RegionSample {
        region: String = string("region"),
        latency_ms: i64 = int("latencyMS"),
    }
}

telemetry_record! { event
    /// Ranking change of a team once the match is over.
    TeamUpdateEvent {
        time: i64 = int("time"),
        season: i64 = int("season"),
        team_id: String = string("teamID"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        user_ids: Vec<i64> = int_array("userIDs"),
        mode: String = string("mode"),
        league: i64 = int("league"),
        prev_league: i64 = int("prevLeague"),
        prev_division: i64 = int("prevDivision"),
        division: i64 = int("division"),
        prev_division_rating: i64 = int("prevDivisionRating"),
        division_rating: i64 = int("divisionRating"),
        prev_wins: i64 = int("prevWins"),
        wins: i64 = int("wins"),
        prev_losses: i64 = int("prevLosses"),
        losses: i64 = int("losses"),
        ranking_change_type: String = string("rankingChangeType"),
        prev_placement_games_left: i64 = int("prevPlacementGamesLeft"),
        placement_games_left: i64 = int("placementGamesLeft"),
        match_region: String = string("matchRegion"),
    }
}

telemetry_record! { event
    /// The match server closing down.
    ServerShutdown {
        time: i64 = int("time"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        match_time: i64 = int("matchTime"),
        reason: String = string("reason"),
    }
}

telemetry_record! { event
    RoundFinishedEvent {
        time: i64 = int("time"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        round: i64 = int("round"),
        round_length: i64 = int("roundLength"),
        winning_team: i64 = int("winningTeam"),
        player_stats: Vec<PlayerStats> = list("playerStats"),
    }
}

telemetry_record! { nested
    /// One player's totals for a finished round.
    PlayerStats {
        user_id: String = string("userID"),
        kills: i64 = int("kills"),
        deaths: i64 = int("deaths"),
        score: i64 = int("score"),
        damage_done: i64 = int("damageDone"),
        damage_received: i64 = int("damageReceived"),
        healing_done: i64 = int("healingDone"),
        healing_received: i64 = int("healingReceived"),
        disables_done: i64 = int("disablesDone"),
        disables_received: i64 = int("disablesReceived"),
        energy_gained: i64 = int("energyGained"),
        energy_used: i64 = int("energyUsed"),
        time_alive: i64 = int("timeAlive"),
        ability_uses: i64 = int("abilityUses"),
    }
}

telemetry_record! { event
    MatchFinishedEvent {
        time: i64 = int("time"),
        team_one_score: i64 = int("teamOneScore"),
        team_two_score: i64 = int("teamTwoScore"),
        match_length: i64 = int("matchLength"),
        match_id: String = string("matchID"),
        external_match_id: String = string("externalMatchID"),
        leavers: Value = value("leavers"),
        region: String = string("region"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encoded_keys_match_decoded_keys() {
        let value = json!({
            "type": "Structures.RoundFinishedEvent",
            "cursor": 4,
            "dataObject": {
                "time": 11, "matchID": "m", "externalMatchID": "x",
                "round": 2, "roundLength": 60, "winningTeam": 1,
                "playerStats": [{
                    "userID": "u", "kills": 1, "deaths": 2, "score": 3,
                    "damageDone": 4, "damageReceived": 5, "healingDone": 6,
                    "healingReceived": 7, "disablesDone": 8, "disablesReceived": 9,
                    "energyGained": 10, "energyUsed": 11, "timeAlive": 12, "abilityUses": 13
                }]
            }
        });
        let event = RoundFinishedEvent::decode(&Fields::new(&value, "[0]").unwrap()).unwrap();
        assert_eq!(event.cursor, 4);
        assert_eq!(event.player_stats[0].disables_received, 9);
        assert_eq!(serde_json::to_value(&event).unwrap(), value["dataObject"]);
    }

    #[test]
    fn queue_event_keeps_untyped_fields() {
        let value = json!({
            "cursor": 1,
            "dataObject": {
                "time": 1, "userId": "u", "teamId": "t", "sessionId": "s", "season": 8,
                "eventType": "JOINED", "timeJoinedQueue": "now", "timeInQueue": 4.5,
                "character": 17, "characterArchetype": 2,
                "queueTypes": ["QUICK2V2", 3], "limitMatchmakingRange": true,
                "regionSamples": [{ "region": "eu", "latencyMS": 31.0 }],
                "preferredRegion": "eu", "rankingType": "RANKED", "league": 3, "division": 2,
                "divisionRating": 55, "teamSize": 2, "placementGamesLeft": 0,
                "matchId": "m", "matchRegion": "eu", "teamSide": 1, "autoMatchmaking": false
            }
        });
        let event = QueueEvent::decode(&Fields::new(&value, "[0]").unwrap()).unwrap();
        assert_eq!(event.queue_types, vec![json!("QUICK2V2"), json!(3)]);
        assert_eq!(event.team_members, Value::Null);
        assert_eq!(event.region_samples[0].latency_ms, 31);
        assert_eq!(event.time_in_queue, 4.5);
    }
}
