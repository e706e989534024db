//! Wire shapes for the transport boundary.
//!
//! The engine has no wire format of its own; these are the intent and event
//! shapes the natural transport wrapping exchanges over a persistent
//! per-room connection. Tags and field names follow the client convention:
//! kebab-case message types, camelCase fields.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Color, GameRng, Phase, PlayerId, Symbol};
use crate::view::ClientState;

/// Client-originated intents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientIntent {
    CreateRoom { player_name: String, target_score: u32 },
    JoinRoom { room_id: String, player_name: String },
    StartGame,
    ConfirmBots { confirm: bool },
    PlayCard { card_id: CardId },
    PlayDouble { card_id1: CardId, card_id2: CardId },
    DeclareSymbol { symbol: Symbol },
    DeclareColor { color: Color },
    DrawCard,
    Pass,
    MatchCard { card_id: CardId },
    AnnounceLastCard,
    ChallengeLastCard { target_player_id: PlayerId },
    NextRound,
    GetRooms,
}

/// One room as listed in the lobby browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: String,
    pub player_count: usize,
    pub phase: Phase,
}

/// One seat as carried by a room update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatSummary {
    pub id: PlayerId,
    pub name: String,
    pub connected: bool,
    pub is_bot: bool,
}

/// Server-originated events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    RoomCreated {
        room_id: String,
    },
    RoomJoined {
        room_id: String,
    },
    RoomUpdate {
        room_id: String,
        host_id: PlayerId,
        players: Vec<SeatSummary>,
        spectators: Vec<SeatSummary>,
        phase: Phase,
    },
    GameState {
        #[serde(flatten)]
        state: ClientState,
    },
    Error {
        message: String,
    },
    LastCardAnnounced {
        player_name: String,
    },
    LastCardChallenge {
        challenger_name: String,
        target_name: String,
    },
    SuggestBots {
        current_count: usize,
        bots_needed: usize,
    },
    RoomsAvailable {
        rooms: Vec<RoomSummary>,
    },
}

/// Length of a room code.
pub const ROOM_CODE_LEN: usize = 5;

const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A short human-shareable room identifier: 5 uppercase alphanumerics.
///
/// Uniqueness within the live process is sufficient; the registry retries
/// on collision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a fresh code from the given RNG.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        let code: String = (0..ROOM_CODE_LEN)
            .map(|_| {
                let idx = rng.gen_range_usize(0..ROOM_CODE_CHARSET.len());
                ROOM_CODE_CHARSET[idx] as char
            })
            .collect();
        Self(code)
    }

    /// Parse a client-supplied code, normalizing case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        let valid = upper.len() == ROOM_CODE_LEN
            && upper.bytes().all(|b| ROOM_CODE_CHARSET.contains(&b));
        valid.then_some(Self(upper))
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
