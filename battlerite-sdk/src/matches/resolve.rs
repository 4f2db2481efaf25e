//! Reassembles a match graph from a JSON:API primary resource and its `included` table.
//!
//! The wire format never nests children inside the match. A match references its
//! rosters, rounds and asset by `(type, id)`, each roster references its participants,
//! and each participant references its player, all of them living flat in `included`.
//! Resolution runs in three passes because participant and player membership is only
//! known once the previous level has been resolved.
use super::model::{decode_match_attributes, Asset, Match, MatchPlayer, Participant, Roster, Round};
use crate::decode::{self, Decode, Fields};
use crate::response::to_many;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Resolves a single match against `included`.
///
/// References with no matching resource in `included` are left out of the result.
pub fn resolve_match(primary: &Value, included: &[Value]) -> decode::Result<Match> {
    resolve(&Fields::new(primary, "data")?, &Included::new(included))
}

/// Resolves every match of a collection response against the same shared `included` table.
pub fn resolve_matches(primaries: &[Value], included: &[Value]) -> decode::Result<Vec<Match>> {
    let included = Included::new(included);
    primaries
        .iter()
        .enumerate()
        .map(|(i, primary)| resolve(&Fields::new(primary, format!("data[{}]", i))?, &included))
        .collect()
}

/// `included`, indexed by `(type, id)`.
struct Included<'a> {
    resources: &'a [Value],
    positions: HashMap<(&'a str, &'a str), usize>,
}

impl<'a> Included<'a> {
    fn new(resources: &'a [Value]) -> Self {
        let mut positions = HashMap::new();
        for (i, resource) in resources.iter().enumerate() {
            let kind = resource.get("type").and_then(Value::as_str);
            let id = resource.get("id").and_then(Value::as_str);
            if let (Some(kind), Some(id)) = (kind, id) {
                // first occurrence of a duplicated key wins
                positions.entry((kind, id)).or_insert(i);
            }
        }
        Self {
            resources,
            positions,
        }
    }

    /// Decodes the resources of `kind` whose id is in `ids`, in `included` order.
    fn select<'i, T: Decode>(
        &self,
        kind: &str,
        ids: impl IntoIterator<Item = &'i str>,
    ) -> decode::Result<Vec<T>> {
        let found: BTreeSet<usize> = ids
            .into_iter()
            .filter_map(|id| self.positions.get(&(kind, id)).copied())
            .collect();
        found
            .into_iter()
            .map(|i| T::decode(&Fields::new(&self.resources[i], format!("included[{}]", i))?))
            .collect()
    }
}

fn resolve(primary: &Fields<'_>, included: &Included<'_>) -> decode::Result<Match> {
    let mut game = decode_match_attributes(primary)?;
    let relationships = primary.object("relationships")?;
    let roster_refs = to_many(&relationships, "rosters")?;
    let round_refs = to_many(&relationships, "rounds")?;
    let asset_refs = to_many(&relationships, "assets")?;

    // direct children of the match
    let rosters: Vec<Roster> = included.select("roster", roster_refs.iter().map(|r| r.id.as_str()))?;
    let rounds: Vec<Round> = included.select("round", round_refs.iter().map(|r| r.id.as_str()))?;
    let assets: Vec<Asset> = included.select("asset", asset_refs.iter().map(|r| r.id.as_str()))?;

    // participants belong to the match only through one of its rosters
    let participants: Vec<Participant> = included.select(
        "participant",
        rosters
            .iter()
            .flat_map(|r| r.participants.iter().map(|p| p.id.as_str())),
    )?;

    let match_players: Vec<MatchPlayer> =
        included.select("player", participants.iter().map(|p| p.player.id.as_str()))?;

    tracing::debug!(
        "Resolved match {}: {} rosters, {} participants, {} players, {} rounds",
        game.id,
        rosters.len(),
        participants.len(),
        match_players.len(),
        rounds.len()
    );

    game.asset = assets.into_iter().last();
    game.rosters = rosters;
    game.rounds = rounds;
    game.participants = participants;
    game.match_players = match_players;
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use serde_json::json;

    fn refs(kind: &str, ids: &[&str]) -> Value {
        json!({ "data": ids.iter().map(|id| json!({ "type": kind, "id": id })).collect::<Vec<_>>() })
    }

    fn game(id: &str, rosters: &[&str], rounds: &[&str], assets: &[&str]) -> Value {
        json!({
            "type": "match",
            "id": id,
            "links": { "self": format!("https://api.dc01.gamelockerapp.com/shards/global/matches/{}", id) },
            "attributes": {
                "createdAt": "2018-03-10T12:00:00Z",
                "duration": 412.0,
                "gameMode": "1733162751",
                "patchVersion": "2.3",
                "shardId": "global",
                "titleId": "stunlock-studios-battlerite",
                "stats": { "type": "QUICK2V2", "mapID": "fb6ed2d4-3f15" }
            },
            "relationships": {
                "assets": refs("asset", assets),
                "rosters": refs("roster", rosters),
                "rounds": refs("round", rounds),
                "spectators": { "data": [] }
            }
        })
    }

    fn roster(id: &str, participants: &[&str], won: bool) -> Value {
        json!({
            "type": "roster",
            "id": id,
            "attributes": { "shardId": "global", "won": won.to_string(), "stats": { "score": 3.0 } },
            "relationships": {
                "participants": refs("participant", participants),
                "team": { "data": null }
            }
        })
    }

    fn participant(id: &str, player: &str) -> Value {
        json!({
            "type": "participant",
            "id": id,
            "attributes": {
                "actor": "4",
                "shardId": "global",
                "stats": {
                    "userID": player,
                    "damageDone": 1200.0, "damageReceived": 900.0, "deaths": 2.0,
                    "energyGained": 300.0, "energyUsed": 250.0, "kills": 3.0,
                    "score": 40.0, "timeAlive": 380.0, "abilityUses": 120.0,
                    "disablesDone": 12.0, "disablesReceived": 9.0, "emote": 1.0,
                    "mount": 2.0, "outfit": 3.0, "attachment": 4.0,
                    "healingDone": 500.0, "healingReceived": 420.0, "side": 1.0
                }
            },
            "relationships": { "player": { "data": { "type": "player", "id": player } } }
        })
    }

    fn player(id: &str) -> Value {
        json!({
            "type": "player",
            "id": id,
            "attributes": { "name": format!("player-{}", id) },
            "relationships": { "assets": { "data": [] } },
            "links": { "self": format!("https://api.dc01.gamelockerapp.com/shards/global/players/{}", id) }
        })
    }

    fn round(id: &str, ordinal: i64) -> Value {
        json!({
            "type": "round",
            "id": id,
            "attributes": { "duration": 60.0, "ordinal": ordinal, "stats": { "winningTeam": 1.0 } }
        })
    }

    fn asset(id: &str) -> Value {
        json!({
            "type": "asset",
            "id": id,
            "attributes": {
                "URL": format!("https://cdn.gamelockerapp.com/{}.json", id),
                "createdAt": "2018-03-10T12:00:00Z",
                "description": "",
                "name": "telemetry"
            }
        })
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id(i).to_string()).collect()
    }

    #[test]
    fn participants_are_reached_through_rosters() {
        let primary = game("m1", &["r1", "r2"], &["rd1"], &["a1"]);
        let included = vec![
            participant("p4", "104"),
            roster("r1", &["p1", "p2"], true),
            participant("p1", "101"),
            player("101"),
            participant("p2", "102"),
            roster("r2", &["p3"], false),
            participant("p3", "103"),
            player("102"),
            player("103"),
            player("104"),
            round("rd1", 1),
            asset("a1"),
        ];

        let resolved = resolve_match(&primary, &included).unwrap();
        assert_eq!(ids(&resolved.rosters, |r| &r.id), ["r1", "r2"]);
        assert_eq!(ids(&resolved.participants, |p| &p.id), ["p1", "p2", "p3"]);
        assert_eq!(
            ids(&resolved.match_players, |p| &p.id),
            ["101", "102", "103"]
        );
        assert_eq!(ids(&resolved.rounds, |r| &r.id), ["rd1"]);
        assert_eq!(resolved.asset.as_ref().map(|a| a.id.as_str()), Some("a1"));
        assert_eq!(resolved.map_type, "QUICK2V2");
        assert_eq!(resolved.duration, 412);

        let r1 = &resolved.rosters[0];
        assert_eq!(
            resolved
                .roster_participants(r1)
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>(),
            ["p1", "p2"]
        );
        assert_eq!(resolved.winning_roster().map(|r| r.id.as_str()), Some("r1"));
        let p3 = &resolved.participants[2];
        assert_eq!(
            resolved.player_of(p3).and_then(MatchPlayer::name),
            Some("player-103")
        );
    }

    #[test]
    fn missing_references_are_omitted() {
        let primary = game("m1", &["r1", "gone"], &["rd-gone"], &["a-gone"]);
        let included = vec![roster("r1", &["p1", "p-gone"], true), participant("p1", "101")];

        let resolved = resolve_match(&primary, &included).unwrap();
        assert_eq!(ids(&resolved.rosters, |r| &r.id), ["r1"]);
        assert_eq!(ids(&resolved.participants, |p| &p.id), ["p1"]);
        assert!(resolved.match_players.is_empty());
        assert!(resolved.rounds.is_empty());
        assert!(resolved.asset.is_none());
    }

    #[test]
    fn empty_included_yields_bare_match() {
        let primary = game("m1", &["r1"], &[], &[]);
        let resolved = resolve_match(&primary, &[]).unwrap();
        assert_eq!(resolved.id, "m1");
        assert!(resolved.rosters.is_empty());
        assert!(resolved.participants.is_empty());
    }

    #[test]
    fn output_follows_included_order() {
        let primary = game("m1", &["r2", "r1"], &["rd2", "rd1"], &[]);
        let included = vec![
            round("rd1", 1),
            roster("r1", &[], false),
            round("rd2", 2),
            roster("r2", &[], true),
        ];
        let resolved = resolve_match(&primary, &included).unwrap();
        assert_eq!(ids(&resolved.rosters, |r| &r.id), ["r1", "r2"]);
        assert_eq!(ids(&resolved.rounds, |r| &r.id), ["rd1", "rd2"]);
    }

    #[test]
    fn type_must_match_as_well_as_id() {
        // a round sharing an id with the referenced roster is not a roster
        let primary = game("m1", &["x1"], &[], &[]);
        let included = vec![round("x1", 1)];
        let resolved = resolve_match(&primary, &included).unwrap();
        assert!(resolved.rosters.is_empty());
    }

    #[test]
    fn shared_participant_and_player_surface_once() {
        let primary = game("m1", &["r1", "r2"], &[], &[]);
        let included = vec![
            roster("r1", &["p1"], true),
            roster("r2", &["p1", "p2"], false),
            participant("p1", "101"),
            participant("p2", "101"),
            player("101"),
        ];
        let resolved = resolve_match(&primary, &included).unwrap();
        assert_eq!(ids(&resolved.participants, |p| &p.id), ["p1", "p2"]);
        assert_eq!(ids(&resolved.match_players, |p| &p.id), ["101"]);
    }

    #[test]
    fn batch_matches_do_not_share_children() {
        let primaries = vec![game("A", &["r1"], &[], &["a1"]), game("B", &["r2"], &[], &["a2"])];
        let included = vec![
            roster("r2", &["p2"], true),
            roster("r1", &["p1"], false),
            participant("p1", "101"),
            participant("p2", "102"),
            player("101"),
            player("102"),
            asset("a1"),
            asset("a2"),
        ];

        let resolved = resolve_matches(&primaries, &included).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(ids(&resolved[0].rosters, |r| &r.id), ["r1"]);
        assert_eq!(ids(&resolved[1].rosters, |r| &r.id), ["r2"]);
        assert_eq!(ids(&resolved[0].participants, |p| &p.id), ["p1"]);
        assert_eq!(ids(&resolved[1].participants, |p| &p.id), ["p2"]);
        assert_eq!(ids(&resolved[0].match_players, |p| &p.id), ["101"]);
        assert_eq!(ids(&resolved[1].match_players, |p| &p.id), ["102"]);
        assert_eq!(resolved[0].asset.as_ref().unwrap().id, "a1");
        assert_eq!(resolved[1].asset.as_ref().unwrap().id, "a2");
    }

    #[test]
    fn malformed_referenced_resource_fails_the_call() {
        let primary = game("m1", &["r1"], &[], &[]);
        let mut bad = roster("r1", &[], true);
        bad["attributes"]["stats"]["score"] = json!("high");
        let included = vec![player("9"), bad];

        let err = resolve_match(&primary, &included).unwrap_err();
        assert_eq!(
            err,
            DecodeError::mismatch("included[1].attributes.stats.score", "number")
        );
    }

    #[test]
    fn malformed_unreferenced_resource_is_ignored() {
        let primary = game("m1", &["r1"], &[], &[]);
        let included = vec![roster("r1", &[], true), json!({ "type": "roster", "id": "r9" })];
        assert!(resolve_match(&primary, &included).is_ok());
    }

    #[test]
    fn match_requires_relationships() {
        let mut primary = game("m1", &[], &[], &[]);
        primary["relationships"]
            .as_object_mut()
            .unwrap()
            .remove("rounds");
        let err = resolve_match(&primary, &[]).unwrap_err();
        assert_eq!(err, DecodeError::missing("data.relationships.rounds"));

        let err = resolve_matches(&[json!([])], &[]).unwrap_err();
        assert_eq!(err, DecodeError::mismatch("data[0]", "object"));
    }
}
