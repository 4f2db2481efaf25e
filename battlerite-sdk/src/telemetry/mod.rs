use crate::decode::{self, Fields};
use crate::{Handle, Result};
use serde_json::Value;
use std::sync::Arc;

pub mod events;
pub mod kind;

pub use self::events::{
    DeathEvent, MatchFinishedEvent, MatchReservedUser, MatchStart, PlayerStats, QueueEvent,
    RegionSample, RoundEvent, RoundFinishedEvent, ServerShutdown, TeamUpdateEvent,
    UserRoundSpell,
};
pub use self::kind::{EventKind, TelemetryEvent};

pub struct TelemetryRequestBuilder {
    url: String,
    handle: Arc<Handle>,
}

impl TelemetryRequestBuilder {
    pub fn new(handle: Arc<Handle>, url: String) -> Self {
        Self { handle, url }
    }
    pub async fn send(self) -> Result<Telemetry> {
        // telemetry is a bare array, not a JSON:API document
        let events: Vec<Value> = self.handle.get_json(&self.url, &[]).await?;
        let telemetry = classify(&events)?;
        tracing::debug!("Classified {} telemetry events", events.len());
        Ok(telemetry)
    }
}

/// A match's telemetry, partitioned by event kind.
///
/// Sequences keep the order events had on the wire. A match has at most one
/// `MatchStart`, `ServerShutdown` and `MatchFinishedEvent`; when absent these
/// hold their default value.
///
/// See <https://battlerite-docs.readthedocs.io/en/master/telemetry/telemetry.html>
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Telemetry {
    pub match_start: MatchStart,
    pub round_events: Vec<RoundEvent>,
    pub user_round_spells: Vec<UserRoundSpell>,
    pub death_events: Vec<DeathEvent>,
    pub match_reserved_users: Vec<MatchReservedUser>,
    pub queue_events: Vec<QueueEvent>,
    pub team_update_events: Vec<TeamUpdateEvent>,
    pub server_shutdown: ServerShutdown,
    pub round_finished_events: Vec<RoundFinishedEvent>,
    pub match_finished_event: MatchFinishedEvent,
    seen: Singletons,
}

/// Which singleton slots were filled from the stream rather than left at default.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
struct Singletons {
    match_start: bool,
    server_shutdown: bool,
    match_finished_event: bool,
}

impl Telemetry {
    /// Decodes a raw telemetry download.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let events: Vec<Value> = serde_json::from_slice(bytes)?;
        Ok(classify(&events)?)
    }

    /// Files `event` into its slot.
    ///
    /// Singleton kinds are overwritten, so the last one seen wins. Whether the service
    /// ever sends more than one is unverified.
    pub fn push(&mut self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::MatchStart(e) => {
                self.match_start = e;
                self.seen.match_start = true;
            }
            TelemetryEvent::RoundEvent(e) => self.round_events.push(e),
            TelemetryEvent::UserRoundSpell(e) => self.user_round_spells.push(e),
            TelemetryEvent::DeathEvent(e) => self.death_events.push(e),
            TelemetryEvent::MatchReservedUser(e) => self.match_reserved_users.push(e),
            TelemetryEvent::QueueEvent(e) => self.queue_events.push(e),
            TelemetryEvent::TeamUpdateEvent(e) => self.team_update_events.push(e),
            TelemetryEvent::ServerShutdown(e) => {
                self.server_shutdown = e;
                self.seen.server_shutdown = true;
            }
            TelemetryEvent::RoundFinishedEvent(e) => self.round_finished_events.push(e),
            TelemetryEvent::MatchFinishedEvent(e) => {
                self.match_finished_event = e;
                self.seen.match_finished_event = true;
            }
        }
    }

    /// Number of events held per kind; singletons count as 0 or 1.
    pub fn count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::MatchStart => usize::from(self.seen.match_start),
            EventKind::RoundEvent => self.round_events.len(),
            EventKind::UserRoundSpell => self.user_round_spells.len(),
            EventKind::DeathEvent => self.death_events.len(),
            EventKind::MatchReservedUser => self.match_reserved_users.len(),
            EventKind::QueueEvent => self.queue_events.len(),
            EventKind::TeamUpdateEvent => self.team_update_events.len(),
            EventKind::ServerShutdown => usize::from(self.seen.server_shutdown),
            EventKind::RoundFinishedEvent => self.round_finished_events.len(),
            EventKind::MatchFinishedEvent => usize::from(self.seen.match_finished_event),
        }
    }
}

/// Sorts a raw telemetry array into a [`Telemetry`].
///
/// Events with an unknown or missing `type` are skipped so that new event kinds on
/// the service side never break decoding. A known event that fails to decode fails
/// the whole call; no partial aggregate is returned.
pub fn classify(events: &[Value]) -> decode::Result<Telemetry> {
    let mut telemetry = Telemetry::default();

    for (i, value) in events.iter().enumerate() {
        let event = Fields::new(value, format!("[{}]", i)).map_err(|e| e.at_index(i))?;
        let Some(kind) = event
            .get("type")
            .and_then(Value::as_str)
            .and_then(EventKind::from_discriminator)
        else {
            continue;
        };
        let decoded = TelemetryEvent::decode(kind, &event).map_err(|e| e.at_index(i))?;
        telemetry.push(decoded);
    }

    Ok(telemetry)
}
