use crate::decode::{self, Fields};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Battlerite champions, identified in player stats by their numeric mapping id.
///
/// See <https://github.com/gamelocker/battlerite-assets/tree/master/mappings>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Champion {
    Lucie,
    Sirius,
    Iva,
    Jade,
    RuhKaan,
    Oldur,
    Ashka,
    Varesh,
    Pearl,
    Taya,
    Poloma,
    Croak,
    Freya,
    Jumong,
    Shifu,
    Ezmo,
    Bakko,
    Rook,
    Pestilus,
    Destiny,
    Raigon,
    Blossom,
    Thorn,
    Zander,
    Ulric,
    Alysia,
    Jamila,
}

impl Champion {
    pub const ALL: [Champion; 27] = [
        Champion::Lucie,
        Champion::Sirius,
        Champion::Iva,
        Champion::Jade,
        Champion::RuhKaan,
        Champion::Oldur,
        Champion::Ashka,
        Champion::Varesh,
        Champion::Pearl,
        Champion::Taya,
        Champion::Poloma,
        Champion::Croak,
        Champion::Freya,
        Champion::Jumong,
        Champion::Shifu,
        Champion::Ezmo,
        Champion::Bakko,
        Champion::Rook,
        Champion::Pestilus,
        Champion::Destiny,
        Champion::Raigon,
        Champion::Blossom,
        Champion::Thorn,
        Champion::Zander,
        Champion::Ulric,
        Champion::Alysia,
        Champion::Jamila,
    ];

    /// Mapping id, also used as the `character` field of telemetry events.
    pub fn id(&self) -> i64 {
        match self {
            Champion::Lucie => 1,
            Champion::Sirius => 2,
            Champion::Iva => 3,
            Champion::Jade => 4,
            Champion::RuhKaan => 5,
            Champion::Oldur => 6,
            Champion::Ashka => 7,
            Champion::Varesh => 8,
            Champion::Pearl => 9,
            Champion::Taya => 10,
            Champion::Poloma => 11,
            Champion::Croak => 12,
            Champion::Freya => 13,
            Champion::Jumong => 14,
            Champion::Shifu => 15,
            Champion::Ezmo => 16,
            Champion::Bakko => 17,
            Champion::Rook => 18,
            Champion::Pestilus => 19,
            Champion::Destiny => 20,
            Champion::Raigon => 21,
            Champion::Blossom => 22,
            Champion::Thorn => 25,
            Champion::Zander => 35,
            Champion::Ulric => 39,
            Champion::Alysia => 41,
            Champion::Jamila => 43,
        }
    }

    /// Name of the Bloodline Champions character the champion was based on.
    pub fn internal_name(&self) -> &'static str {
        match self {
            Champion::Lucie => "Alchemist",
            Champion::Sirius => "Astronomer",
            Champion::Iva => "Engineer",
            Champion::Jade => "Gunner",
            Champion::RuhKaan => "Harbinger",
            Champion::Oldur => "Herald",
            Champion::Ashka => "Igniter",
            Champion::Varesh => "Inhibitor",
            Champion::Pearl => "Inquisitor",
            Champion::Taya => "Nomad",
            Champion::Poloma => "Psychopomp",
            Champion::Croak => "Ranid",
            Champion::Freya => "Ravener",
            Champion::Jumong => "Seeker",
            Champion::Shifu => "Spearmaster",
            Champion::Ezmo => "Stormcaller",
            Champion::Bakko => "Vanguard",
            Champion::Rook => "Glutton",
            Champion::Pestilus => "BloodPriest",
            Champion::Destiny => "MetalWarden",
            Champion::Raigon => "Swordmaster",
            Champion::Blossom => "Druid",
            Champion::Thorn => "Thorn",
            Champion::Zander => "MirrorMage",
            Champion::Ulric => "Paladin",
            Champion::Alysia => "FrostMage",
            Champion::Jamila => "Stalker",
        }
    }

    pub fn from_id(id: i64) -> Option<Champion> {
        Champion::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl Display for Champion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Champion::RuhKaan => "Ruh Kaan",
            other => return write!(f, "{:?}", other),
        };
        write!(f, "{}", name)
    }
}

/// One value per champion, read from a player's stats block.
pub type ChampionStats = BTreeMap<Champion, i64>;

/// Reads the per-champion table stored at `offset + champion id` keys.
/// Champions the player never touched read as zero.
pub(crate) fn champion_stats(stats: &Fields<'_>, offset: i64) -> decode::Result<ChampionStats> {
    Champion::ALL
        .into_iter()
        .map(|champion| {
            let key = (offset + champion.id()).to_string();
            Ok((champion, stats.int_or_zero(&key)?))
        })
        .collect()
}
