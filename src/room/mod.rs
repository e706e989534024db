//! The orchestration boundary: rooms and the room registry.
//!
//! The engine proper is a pure value-to-value transformer; everything
//! concurrent lives here. A `Room` owns exactly one `GameState` and exposes
//! a single `&mut self` entry point per intent, which gives the required
//! at-most-one-in-flight-mutation guarantee as long as the host serializes
//! calls per room (one logical queue or actor keyed by room code).
//!
//! Timers stay outside: the host schedules `close_match_window` after
//! `config.match_window_ms`, drives bots by calling `run_bot_action` with
//! whatever pacing it likes, and calls `mark_disconnected` / `drop_player`
//! around the reconnect grace period. Because the window-close timer and a
//! just-in-time match race, both paths re-check the `match_window_open`
//! flag inside the serialized entry point; whichever arrives second is a
//! no-op.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::bot::compute_bot_action;
use crate::core::{
    Action, CardId, Color, GameConfig, GameRng, GameState, Phase, Player, PlayerId, Symbol,
};
use crate::error::GameError;
use crate::lifecycle::{check_round_over, remove_player, start_round};
use crate::protocol::{ClientIntent, RoomCode, RoomSummary, SeatSummary, ServerEvent};
use crate::rules::{can_play, is_match};
use crate::turn::{
    advance_turn, apply_double, apply_dragon_declaration, apply_peacock_declaration, apply_play,
    draw_cards, resolve_match,
};
use crate::view::{build_client_view, ClientState};

/// Fewest seats a game can start with.
pub const MIN_SEATS: usize = 2;

/// Seats a table is filled to when bots are confirmed.
pub const FULL_TABLE: usize = 4;

/// Most seats a room accepts; later joiners become spectators.
pub const MAX_SEATS: usize = 8;

// Bot ids live above this base so they never collide with registry ids.
const BOT_ID_BASE: u32 = 1_000_000;

/// One live game room.
pub struct Room {
    code: RoomCode,
    host: PlayerId,
    state: GameState,
    spectators: Vec<SeatSummary>,
    bot_rng: GameRng,
    next_bot_serial: u32,
}

impl Room {
    /// Create a room with its host already seated.
    #[must_use]
    pub fn new(
        code: RoomCode,
        host_id: PlayerId,
        host_name: impl Into<String>,
        target_score: u32,
        config: GameConfig,
        seed: u64,
    ) -> Self {
        let mut state = GameState::new(config, target_score, seed);
        state.seat(Player::human(host_id, host_name));
        Self {
            code,
            host: host_id,
            state,
            spectators: Vec::new(),
            bot_rng: GameRng::new(seed ^ 0x5eed_b07),
            next_bot_serial: 0,
        }
    }

    /// The room's shareable code.
    #[must_use]
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// The current host.
    #[must_use]
    pub fn host_id(&self) -> PlayerId {
        self.host
    }

    /// Read-only view of the authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seat a joining player, or register them as a spectator when the
    /// game is already running or the table is full. Returns true if seated.
    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.state.phase == Phase::Lobby && self.state.player_count() < MAX_SEATS {
            self.state.seat(Player::human(id, name));
            true
        } else {
            self.spectators.push(SeatSummary {
                id,
                name,
                connected: true,
                is_bot: false,
            });
            false
        }
    }

    /// Handle one validated-transport intent from `actor`.
    ///
    /// On rejection the state is untouched and the error names the reason;
    /// the host forwards it to the offending actor only.
    pub fn handle_intent(
        &mut self,
        actor: PlayerId,
        intent: ClientIntent,
    ) -> Result<Vec<ServerEvent>, GameError> {
        match intent {
            ClientIntent::StartGame => self.start_game(actor),
            ClientIntent::ConfirmBots { confirm } => self.confirm_bots(actor, confirm),
            ClientIntent::PlayCard { card_id } => self.play_card(actor, card_id),
            ClientIntent::PlayDouble { card_id1, card_id2 } => {
                self.play_double(actor, card_id1, card_id2)
            }
            ClientIntent::DeclareSymbol { symbol } => self.declare_symbol(actor, symbol),
            ClientIntent::DeclareColor { color } => self.declare_color(actor, color),
            ClientIntent::DrawCard => self.draw(actor),
            ClientIntent::Pass => self.pass(actor),
            ClientIntent::MatchCard { card_id } => self.match_card(actor, card_id),
            ClientIntent::AnnounceLastCard => self.announce_last_card(actor),
            ClientIntent::ChallengeLastCard { target_player_id } => {
                self.challenge_last_card(actor, target_player_id)
            }
            ClientIntent::NextRound => self.next_round(actor),
            // Registry-level intents that reached a room are silent no-ops.
            ClientIntent::CreateRoom { .. }
            | ClientIntent::JoinRoom { .. }
            | ClientIntent::GetRooms => {
                warn!(room = %self.code, "registry intent routed to a room");
                Ok(Vec::new())
            }
        }
    }

    /// Close the match window when the host's timer fires.
    ///
    /// A no-op if a match already closed it (the timer lost the race).
    /// Otherwise runs the round-over check, which was deferred while the
    /// window was open.
    pub fn close_match_window(&mut self) -> Vec<ServerEvent> {
        if !self.state.match_window_open {
            return Vec::new();
        }
        self.state.match_window_open = false;
        check_round_over(&mut self.state);
        Vec::new()
    }

    /// Drive one bot action if the current actor is a bot.
    ///
    /// Returns the resulting events; `Ok(empty)` when it is not a bot's
    /// turn. The host schedules repeated calls with its pacing delays.
    pub fn run_bot_action(&mut self) -> Result<Vec<ServerEvent>, GameError> {
        if self.state.phase != Phase::Playing {
            return Ok(Vec::new());
        }
        let Some(bot) = self.state.current_player().filter(|p| p.is_bot) else {
            return Ok(Vec::new());
        };
        let bot_id = bot.id;
        let action = compute_bot_action(&self.state, bot_id, &mut self.bot_rng);
        debug!(room = %self.code, bot = %bot_id, ?action, "bot action");
        match action {
            Action::PlayCard(id) => self.play_card(bot_id, id),
            Action::PlayDouble(a, b) => self.play_double(bot_id, a, b),
            Action::DeclareSymbol(s) => self.declare_symbol(bot_id, s),
            Action::DeclareColor(c) => self.declare_color(bot_id, c),
            Action::Draw => self.draw(bot_id),
            Action::Pass => self.pass(bot_id),
            Action::MatchCard(id) => self.match_card(bot_id, id),
        }
    }

    /// Record a transport disconnect.
    ///
    /// The reconnect grace timer is the host's; until it expires (and
    /// `drop_player` runs) the player keeps their seat but is skipped by
    /// turn advancement. If it was their turn, the turn moves on
    /// immediately: a pending declaration is auto-resolved and a stacked
    /// penalty is force-drawn first so neither lands on the next player.
    pub fn mark_disconnected(&mut self, player_id: PlayerId) {
        if let Some(player) = self.state.player_mut(player_id) {
            player.connected = false;
        } else {
            return;
        }

        if self.state.phase == Phase::Playing
            && self.state.current_player_id() == Some(player_id)
        {
            if self.state.waiting_for_declaration {
                let action = compute_bot_action(&self.state, player_id, &mut self.bot_rng);
                match action {
                    Action::DeclareSymbol(s) => apply_dragon_declaration(&mut self.state, s),
                    Action::DeclareColor(c) => apply_peacock_declaration(&mut self.state, c),
                    _ => {}
                }
            } else {
                if self.state.pending_draw_count > 0 {
                    let owed = usize::from(self.state.pending_draw_count);
                    self.state.pending_draw_count = 0;
                    draw_cards(&mut self.state, player_id, owed);
                }
                advance_turn(&mut self.state, 1, Player::is_active);
            }
        }
    }

    /// Record a reconnect within the grace period.
    pub fn mark_reconnected(&mut self, player_id: PlayerId) {
        if let Some(player) = self.state.player_mut(player_id) {
            player.connected = true;
        }
    }

    /// Remove a player whose grace period expired (or a leaving spectator).
    pub fn drop_player(&mut self, player_id: PlayerId) {
        self.spectators.retain(|s| s.id != player_id);
        if remove_player(&mut self.state, player_id).is_some() && self.host == player_id {
            if let Some(next_host) = self.state.players.first() {
                self.host = next_host.id;
            }
        }
    }

    /// Per-observer redacted views for broadcast: every seated player plus
    /// every spectator.
    #[must_use]
    pub fn views(&self) -> Vec<(PlayerId, ClientState)> {
        let mut out: Vec<(PlayerId, ClientState)> = self
            .state
            .players
            .iter()
            .map(|p| (p.id, build_client_view(&self.state, Some(p.id))))
            .collect();
        for spectator in &self.spectators {
            out.push((spectator.id, build_client_view(&self.state, None)));
        }
        out
    }

    /// The room-update event describing seats and phase.
    #[must_use]
    pub fn room_update(&self) -> ServerEvent {
        ServerEvent::RoomUpdate {
            room_id: self.code.to_string(),
            host_id: self.host,
            players: self
                .state
                .players
                .iter()
                .map(|p| SeatSummary {
                    id: p.id,
                    name: p.name.clone(),
                    connected: p.connected,
                    is_bot: p.is_bot,
                })
                .collect(),
            spectators: self.spectators.clone(),
            phase: self.state.phase,
        }
    }

    /// The lobby-browser summary line.
    #[must_use]
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.code.to_string(),
            player_count: self.state.player_count(),
            phase: self.state.phase,
        }
    }

    // === Intent handlers ===

    fn start_game(&mut self, actor: PlayerId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_host(actor)?;
        self.ensure_phase(Phase::Lobby)?;

        let seats = self.state.player_count();
        if seats < FULL_TABLE {
            return Ok(vec![ServerEvent::SuggestBots {
                current_count: seats,
                bots_needed: FULL_TABLE - seats,
            }]);
        }
        start_round(&mut self.state);
        Ok(vec![self.room_update()])
    }

    fn confirm_bots(&mut self, actor: PlayerId, confirm: bool) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_host(actor)?;
        self.ensure_phase(Phase::Lobby)?;

        if confirm {
            while self.state.player_count() < FULL_TABLE {
                self.next_bot_serial += 1;
                let id = PlayerId::new(BOT_ID_BASE + self.next_bot_serial);
                let name = format!("Bot {}", self.next_bot_serial);
                self.state.seat(Player::bot(id, name));
            }
        } else if self.state.player_count() < MIN_SEATS {
            return Err(GameError::NotEnoughPlayers(MIN_SEATS));
        }
        start_round(&mut self.state);
        Ok(vec![self.room_update()])
    }

    fn play_card(&mut self, actor: PlayerId, card_id: CardId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending_declaration()?;
        self.ensure_turn(actor)?;

        let card = self
            .state
            .player(actor)
            .and_then(|p| p.card(card_id))
            .cloned()
            .ok_or(GameError::CardNotHeld)?;
        if !can_play(&card, &self.state) {
            return Err(GameError::IllegalPlay);
        }

        let card = self
            .state
            .remove_from_hand(actor, card_id)
            .ok_or(GameError::CardNotHeld)?;
        apply_play(&mut self.state, actor, card);
        self.state.record(actor, Action::PlayCard(card_id));
        self.after_play();
        Ok(Vec::new())
    }

    fn play_double(
        &mut self,
        actor: PlayerId,
        first_id: CardId,
        second_id: CardId,
    ) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending_declaration()?;
        self.ensure_turn(actor)?;

        if first_id == second_id {
            return Err(GameError::IllegalDouble);
        }
        let player = self.state.player(actor).ok_or(GameError::UnknownPlayer)?;
        let first = player.card(first_id).cloned().ok_or(GameError::CardNotHeld)?;
        let second = player.card(second_id).cloned().ok_or(GameError::CardNotHeld)?;
        let hand_len = player.hand.len();

        if !is_match(&first, &second) || !can_play(&first, &self.state) {
            return Err(GameError::IllegalDouble);
        }
        if hand_len <= 2 {
            return Err(GameError::CannotGoOutOnDouble);
        }

        let first = self
            .state
            .remove_from_hand(actor, first_id)
            .ok_or(GameError::CardNotHeld)?;
        let second = self
            .state
            .remove_from_hand(actor, second_id)
            .ok_or(GameError::CardNotHeld)?;
        apply_double(&mut self.state, actor, first, second);
        self.state.record(actor, Action::PlayDouble(first_id, second_id));
        self.after_play();
        Ok(Vec::new())
    }

    fn declare_symbol(&mut self, actor: PlayerId, symbol: Symbol) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_turn(actor)?;
        if !self.state.waiting_for_declaration {
            return Err(GameError::NoDeclarationPending);
        }
        if self.state.top_discard().map(|c| c.power()) != Some(Some(crate::core::Power::Dragon)) {
            return Err(GameError::IllegalPlay);
        }

        apply_dragon_declaration(&mut self.state, symbol);
        self.state.record(actor, Action::DeclareSymbol(symbol));
        self.after_play();
        Ok(Vec::new())
    }

    fn declare_color(&mut self, actor: PlayerId, color: Color) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_turn(actor)?;
        if !self.state.waiting_for_declaration {
            return Err(GameError::NoDeclarationPending);
        }
        if self.state.top_discard().map(|c| c.power()) != Some(Some(crate::core::Power::Peacock)) {
            return Err(GameError::IllegalPlay);
        }

        apply_peacock_declaration(&mut self.state, color);
        self.state.record(actor, Action::DeclareColor(color));
        self.after_play();
        Ok(Vec::new())
    }

    fn draw(&mut self, actor: PlayerId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending_declaration()?;
        self.ensure_turn(actor)?;

        if self.state.pending_draw_count > 0 {
            // Forced penalty draw: does not consume the voluntary draw and
            // the drawer keeps the turn.
            let owed = usize::from(self.state.pending_draw_count);
            self.state.pending_draw_count = 0;
            draw_cards(&mut self.state, actor, owed);
        } else {
            if self.state.drawn_this_turn {
                return Err(GameError::AlreadyDrawn);
            }
            draw_cards(&mut self.state, actor, 1);
            self.state.drawn_this_turn = true;
        }
        self.state.record(actor, Action::Draw);
        Ok(Vec::new())
    }

    fn pass(&mut self, actor: PlayerId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending_declaration()?;
        self.ensure_turn(actor)?;

        if self.state.pending_draw_count > 0 || !self.state.drawn_this_turn {
            return Err(GameError::MustDrawFirst);
        }
        self.state.record(actor, Action::Pass);
        advance_turn(&mut self.state, 1, Player::is_active);
        Ok(Vec::new())
    }

    fn match_card(&mut self, actor: PlayerId, card_id: CardId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        self.ensure_no_pending_declaration()?;
        if !self.state.match_window_open {
            return Err(GameError::MatchWindowClosed);
        }
        if self.state.current_player_id() == Some(actor) {
            return Err(GameError::CannotMatchOwnTurn);
        }

        let card = self
            .state
            .player(actor)
            .and_then(|p| p.card(card_id))
            .cloned()
            .ok_or(GameError::CardNotHeld)?;
        let top_matches = self
            .state
            .top_discard()
            .is_some_and(|top| is_match(&card, top));
        if !top_matches {
            return Err(GameError::NotAMatch);
        }

        let card = self
            .state
            .remove_from_hand(actor, card_id)
            .ok_or(GameError::CardNotHeld)?;
        resolve_match(&mut self.state, actor, card);
        self.state.record(actor, Action::MatchCard(card_id));
        self.after_play();
        Ok(Vec::new())
    }

    fn announce_last_card(&mut self, actor: PlayerId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        let player = self.state.player_mut(actor).ok_or(GameError::UnknownPlayer)?;
        if player.hand.len() != 1 {
            return Err(GameError::AnnounceNotAllowed);
        }
        player.announced_last_card = true;
        let player_name = player.name.clone();
        Ok(vec![ServerEvent::LastCardAnnounced { player_name }])
    }

    fn challenge_last_card(
        &mut self,
        actor: PlayerId,
        target: PlayerId,
    ) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::Playing)?;
        let challenger_name = self
            .state
            .player(actor)
            .map(|p| p.name.clone())
            .ok_or(GameError::UnknownPlayer)?;
        let target_player = self.state.player(target).ok_or(GameError::UnknownPlayer)?;

        // A challenge only lands on an unannounced single-card hand;
        // anything else is a silent no-op, not an error.
        if target_player.hand.len() != 1 || target_player.announced_last_card {
            return Ok(Vec::new());
        }
        let target_name = target_player.name.clone();
        draw_cards(&mut self.state, target, 2);
        Ok(vec![ServerEvent::LastCardChallenge {
            challenger_name,
            target_name,
        }])
    }

    fn next_round(&mut self, _actor: PlayerId) -> Result<Vec<ServerEvent>, GameError> {
        self.ensure_phase(Phase::RoundOver)?;
        start_round(&mut self.state);
        Ok(vec![self.room_update()])
    }

    // === Precondition helpers ===

    fn ensure_phase(&self, phase: Phase) -> Result<(), GameError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase(self.state.phase))
        }
    }

    fn ensure_turn(&self, actor: PlayerId) -> Result<(), GameError> {
        if self.state.current_player_id() == Some(actor) {
            Ok(())
        } else {
            Err(GameError::NotYourTurn)
        }
    }

    fn ensure_no_pending_declaration(&self) -> Result<(), GameError> {
        if self.state.waiting_for_declaration {
            Err(GameError::AwaitingDeclaration)
        } else {
            Ok(())
        }
    }

    fn ensure_host(&self, actor: PlayerId) -> Result<(), GameError> {
        if self.host == actor {
            Ok(())
        } else {
            Err(GameError::NotHost)
        }
    }

    /// Once a play fully resolves (no declaration outstanding), the match
    /// window opens; the host schedules `close_match_window` after
    /// `config.match_window_ms`. A Power play instead closes any window
    /// left over from the previous play, since nothing may interrupt a
    /// pending declaration. The round-over check is deferred to the window
    /// close so a last-instant match can still land.
    fn after_play(&mut self) {
        self.state.match_window_open = !self.state.waiting_for_declaration;
    }
}

/// In-process registry of live rooms.
///
/// The host serializes intents per room; the registry itself only resolves
/// codes, allocates player ids, and handles lobby-level intents.
pub struct RoomRegistry {
    rooms: FxHashMap<RoomCode, Room>,
    config: GameConfig,
    rng: GameRng,
    next_player_id: u32,
}

impl RoomRegistry {
    /// Create a registry with the default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    /// Create a registry with an explicit configuration.
    #[must_use]
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self {
            rooms: FxHashMap::default(),
            config,
            rng: GameRng::new(seed),
            next_player_id: 0,
        }
    }

    /// Allocate a fresh session id for a connecting client.
    pub fn alloc_player_id(&mut self) -> PlayerId {
        self.next_player_id += 1;
        PlayerId::new(self.next_player_id)
    }

    /// Create a room and seat its host. Returns the assigned id and the
    /// events for the creator.
    pub fn create_room(
        &mut self,
        player_name: impl Into<String>,
        target_score: u32,
    ) -> (RoomCode, PlayerId, Vec<ServerEvent>) {
        let host_id = self.alloc_player_id();
        let code = loop {
            let candidate = RoomCode::generate(&mut self.rng);
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };
        let seed = (u64::from(self.next_player_id) << 32)
            ^ self.rng.gen_range_usize(0..usize::MAX) as u64;
        let room = Room::new(
            code.clone(),
            host_id,
            player_name,
            target_score,
            self.config.clone(),
            seed,
        );
        debug!(room = %code, host = %host_id, "room created");

        let events = vec![
            ServerEvent::RoomCreated {
                room_id: code.to_string(),
            },
            room.room_update(),
        ];
        self.rooms.insert(code.clone(), room);
        (code, host_id, events)
    }

    /// Join a room by client-supplied code.
    pub fn join_room(
        &mut self,
        raw_code: &str,
        player_name: impl Into<String>,
    ) -> Result<(RoomCode, PlayerId, Vec<ServerEvent>), GameError> {
        let code = RoomCode::parse(raw_code).ok_or(GameError::UnknownRoom)?;
        let player_id = self.alloc_player_id();
        let room = self.rooms.get_mut(&code).ok_or(GameError::UnknownRoom)?;
        room.join(player_id, player_name);

        let events = vec![
            ServerEvent::RoomJoined {
                room_id: code.to_string(),
            },
            room.room_update(),
        ];
        Ok((code, player_id, events))
    }

    /// The lobby browser listing.
    #[must_use]
    pub fn rooms_available(&self) -> ServerEvent {
        ServerEvent::RoomsAvailable {
            rooms: self.rooms.values().map(Room::summary).collect(),
        }
    }

    /// Look up a room.
    #[must_use]
    pub fn room(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    /// Look up a room mutably.
    pub fn room_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    /// Drop a finished or abandoned room.
    pub fn remove_room(&mut self, code: &RoomCode) -> Option<Room> {
        self.rooms.remove(code)
    }

    /// Number of live rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
