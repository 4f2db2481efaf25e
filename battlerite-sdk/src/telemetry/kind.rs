use super::events::{
    DeathEvent, MatchFinishedEvent, MatchReservedUser, MatchStart, QueueEvent, RoundEvent,
    RoundFinishedEvent, ServerShutdown, TeamUpdateEvent, UserRoundSpell,
};
use crate::decode::{self, Decode, Fields};
use serde_json::{json, Value};
use std::fmt::Display;

/// The telemetry event kinds this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MatchStart,
    RoundEvent,
    UserRoundSpell,
    DeathEvent,
    MatchReservedUser,
    QueueEvent,
    TeamUpdateEvent,
    ServerShutdown,
    RoundFinishedEvent,
    MatchFinishedEvent,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::MatchStart,
        EventKind::RoundEvent,
        EventKind::UserRoundSpell,
        EventKind::DeathEvent,
        EventKind::MatchReservedUser,
        EventKind::QueueEvent,
        EventKind::TeamUpdateEvent,
        EventKind::ServerShutdown,
        EventKind::RoundFinishedEvent,
        EventKind::MatchFinishedEvent,
    ];

    /// The `type` string the service tags this kind with.
    pub fn discriminator(&self) -> &'static str {
        match self {
            EventKind::MatchStart => "Structures.MatchStart",
            EventKind::RoundEvent => "Structures.RoundEvent",
            EventKind::UserRoundSpell => "Structures.UserRoundSpell",
            EventKind::DeathEvent => "Structures.DeathEvent",
            EventKind::MatchReservedUser => "Structures.MatchReservedUser",
            EventKind::QueueEvent => "com.stunlock.service.matchmaking.avro.QueueEvent",
            EventKind::TeamUpdateEvent => "com.stunlock.battlerite.team.TeamUpdateEvent",
            EventKind::ServerShutdown => "Structures.ServerShutdown",
            EventKind::RoundFinishedEvent => "Structures.RoundFinishedEvent",
            EventKind::MatchFinishedEvent => "Structures.MatchFinishedEvent",
        }
    }

    /// Exact, case sensitive lookup. `None` for kinds the service added after this crate.
    pub fn from_discriminator(discriminator: &str) -> Option<EventKind> {
        let kind = match discriminator {
            "Structures.MatchStart" => EventKind::MatchStart,
            "Structures.RoundEvent" => EventKind::RoundEvent,
            "Structures.UserRoundSpell" => EventKind::UserRoundSpell,
            "Structures.DeathEvent" => EventKind::DeathEvent,
            "Structures.MatchReservedUser" => EventKind::MatchReservedUser,
            "com.stunlock.service.matchmaking.avro.QueueEvent" => EventKind::QueueEvent,
            "com.stunlock.battlerite.team.TeamUpdateEvent" => EventKind::TeamUpdateEvent,
            "Structures.ServerShutdown" => EventKind::ServerShutdown,
            "Structures.RoundFinishedEvent" => EventKind::RoundFinishedEvent,
            "Structures.MatchFinishedEvent" => EventKind::MatchFinishedEvent,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether a match carries at most one event of this kind.
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            EventKind::MatchStart | EventKind::ServerShutdown | EventKind::MatchFinishedEvent
        )
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::MatchStart => "MatchStart",
            EventKind::RoundEvent => "RoundEvent",
            EventKind::UserRoundSpell => "UserRoundSpell",
            EventKind::DeathEvent => "DeathEvent",
            EventKind::MatchReservedUser => "MatchReservedUser",
            EventKind::QueueEvent => "QueueEvent",
            EventKind::TeamUpdateEvent => "TeamUpdateEvent",
            EventKind::ServerShutdown => "ServerShutdown",
            EventKind::RoundFinishedEvent => "RoundFinishedEvent",
            EventKind::MatchFinishedEvent => "MatchFinishedEvent",
        };
        write!(f, "{}", name)
    }
}

/// One decoded telemetry event.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    MatchStart(MatchStart),
    RoundEvent(RoundEvent),
    UserRoundSpell(UserRoundSpell),
    DeathEvent(DeathEvent),
    MatchReservedUser(MatchReservedUser),
    QueueEvent(QueueEvent),
    TeamUpdateEvent(TeamUpdateEvent),
    ServerShutdown(ServerShutdown),
    RoundFinishedEvent(RoundFinishedEvent),
    MatchFinishedEvent(MatchFinishedEvent),
}

impl TelemetryEvent {
    /// Decodes `event` as `kind`, ignoring its own `type` tag.
    pub fn decode(kind: EventKind, event: &Fields<'_>) -> decode::Result<Self> {
        let event = match kind {
            EventKind::MatchStart => TelemetryEvent::MatchStart(Decode::decode(event)?),
            EventKind::RoundEvent => TelemetryEvent::RoundEvent(Decode::decode(event)?),
            EventKind::UserRoundSpell => TelemetryEvent::UserRoundSpell(Decode::decode(event)?),
            EventKind::DeathEvent => TelemetryEvent::DeathEvent(Decode::decode(event)?),
            EventKind::MatchReservedUser => {
                TelemetryEvent::MatchReservedUser(Decode::decode(event)?)
            }
            EventKind::QueueEvent => TelemetryEvent::QueueEvent(Decode::decode(event)?),
            EventKind::TeamUpdateEvent => TelemetryEvent::TeamUpdateEvent(Decode::decode(event)?),
            EventKind::ServerShutdown => TelemetryEvent::ServerShutdown(Decode::decode(event)?),
            EventKind::RoundFinishedEvent => {
                TelemetryEvent::RoundFinishedEvent(Decode::decode(event)?)
            }
            EventKind::MatchFinishedEvent => {
                TelemetryEvent::MatchFinishedEvent(Decode::decode(event)?)
            }
        };
        Ok(event)
    }

    pub fn kind(&self) -> EventKind {
        match self {
            TelemetryEvent::MatchStart(_) => EventKind::MatchStart,
            TelemetryEvent::RoundEvent(_) => EventKind::RoundEvent,
            TelemetryEvent::UserRoundSpell(_) => EventKind::UserRoundSpell,
            TelemetryEvent::DeathEvent(_) => EventKind::DeathEvent,
            TelemetryEvent::MatchReservedUser(_) => EventKind::MatchReservedUser,
            TelemetryEvent::QueueEvent(_) => EventKind::QueueEvent,
            TelemetryEvent::TeamUpdateEvent(_) => EventKind::TeamUpdateEvent,
            TelemetryEvent::ServerShutdown(_) => EventKind::ServerShutdown,
            TelemetryEvent::RoundFinishedEvent(_) => EventKind::RoundFinishedEvent,
            TelemetryEvent::MatchFinishedEvent(_) => EventKind::MatchFinishedEvent,
        }
    }

    pub fn cursor(&self) -> i64 {
        match self {
            TelemetryEvent::MatchStart(e) => e.cursor,
            TelemetryEvent::RoundEvent(e) => e.cursor,
            TelemetryEvent::UserRoundSpell(e) => e.cursor,
            TelemetryEvent::DeathEvent(e) => e.cursor,
            TelemetryEvent::MatchReservedUser(e) => e.cursor,
            TelemetryEvent::QueueEvent(e) => e.cursor,
            TelemetryEvent::TeamUpdateEvent(e) => e.cursor,
            TelemetryEvent::ServerShutdown(e) => e.cursor,
            TelemetryEvent::RoundFinishedEvent(e) => e.cursor,
            TelemetryEvent::MatchFinishedEvent(e) => e.cursor,
        }
    }

    /// Encodes the event back into the service's `{ type, cursor, dataObject }` shape.
    pub fn to_wire(&self) -> serde_json::Result<Value> {
        let data = match self {
            TelemetryEvent::MatchStart(e) => serde_json::to_value(e)?,
            TelemetryEvent::RoundEvent(e) => serde_json::to_value(e)?,
            TelemetryEvent::UserRoundSpell(e) => serde_json::to_value(e)?,
            TelemetryEvent::DeathEvent(e) => serde_json::to_value(e)?,
            TelemetryEvent::MatchReservedUser(e) => serde_json::to_value(e)?,
            TelemetryEvent::QueueEvent(e) => serde_json::to_value(e)?,
            TelemetryEvent::TeamUpdateEvent(e) => serde_json::to_value(e)?,
            TelemetryEvent::ServerShutdown(e) => serde_json::to_value(e)?,
            TelemetryEvent::RoundFinishedEvent(e) => serde_json::to_value(e)?,
            TelemetryEvent::MatchFinishedEvent(e) => serde_json::to_value(e)?,
        };
        Ok(json!({
            "type": self.kind().discriminator(),
            "cursor": self.cursor(),
            "dataObject": data,
        }))
    }
}
