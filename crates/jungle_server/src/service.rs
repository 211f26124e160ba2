//! Game service: named sessions and the operations clients call on them.
//!
//! Each session sits behind its own async mutex. AI turns run on a blocking
//! worker while that lock is held, so a chosen move is applied before the
//! next request for the same session is served.

use crate::config::ServerConfig;
use derive_more::Display;
use derive_new::new;
use jungle_game::{
    AiEngine, Coord, Difficulty, GameMode, GameSession, Move, Player, RuleError, RuleSet,
    SessionSnapshot,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Session identifier chosen by the client.
pub type SessionId = String;

/// Session used when a request names none.
pub const DEFAULT_SESSION: &str = "default";

/// Error returned by service operations.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ServiceError {
    /// The rule engine rejected the request.
    #[display("{_0}")]
    Rule(RuleError),

    /// No session with this id exists.
    #[display("Session {_0} not found")]
    SessionNotFound(SessionId),

    /// The AI worker stopped before answering.
    #[display("AI worker failed: {_0}")]
    Worker(String),
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Rule(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RuleError> for ServiceError {
    fn from(err: RuleError) -> Self {
        ServiceError::Rule(err)
    }
}

/// A move as exchanged with clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveView {
    /// Source row.
    pub from_row: usize,
    /// Source column.
    pub from_col: usize,
    /// Destination row.
    pub to_row: usize,
    /// Destination column.
    pub to_col: usize,
}

impl From<Move> for MoveView {
    fn from(mv: Move) -> Self {
        Self::new(mv.from.row(), mv.from.col(), mv.to.row(), mv.to.col())
    }
}

/// Result of an AI turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct AiTurn {
    /// The move the AI played, or `None` if it had none.
    #[serde(rename = "move")]
    pub mv: Option<MoveView>,
    /// Session state after the turn.
    pub snapshot: SessionSnapshot,
}

/// One session and the engine that plays its AI seats.
struct Table {
    session: GameSession,
    engine: AiEngine,
}

impl Table {
    /// Plays one AI move for the side to move.
    ///
    /// A side with no move concedes.
    fn ai_turn(&mut self, difficulty: Difficulty) -> Result<Option<Move>, RuleError> {
        match self.engine.select_move(&self.session, difficulty) {
            Some(mv) => {
                self.session.apply_move(mv.from, mv.to)?;
                Ok(Some(mv))
            }
            None => {
                self.session.concede_if_immobilized();
                Ok(None)
            }
        }
    }

    /// Lets the AI answer while it holds the seat to move.
    fn auto_reply(&mut self) -> Result<(), RuleError> {
        if !self.session.outcome().is_over()
            && self.session.mode().is_ai(self.session.current_player())
        {
            let difficulty = self.session.difficulty();
            self.ai_turn(difficulty)?;
        }
        Ok(())
    }
}

type SharedTable = Arc<Mutex<Table>>;

struct Slot {
    table: SharedTable,
    last_used: u64,
}

/// Open sessions with a use counter for least-recently-used eviction.
///
/// The default session is never evicted; named sessions are capped.
#[derive(Default)]
struct Registry {
    slots: HashMap<SessionId, Slot>,
    clock: u64,
}

impl Registry {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn touch(&mut self, id: &str) -> Option<SharedTable> {
        let now = self.tick();
        self.slots.get_mut(id).map(|slot| {
            slot.last_used = now;
            Arc::clone(&slot.table)
        })
    }

    fn named(&self) -> usize {
        self.slots
            .keys()
            .filter(|id| id.as_str() != DEFAULT_SESSION)
            .count()
    }

    fn least_recent(&self) -> Option<SessionId> {
        self.slots
            .iter()
            .filter(|(id, _)| id.as_str() != DEFAULT_SESSION)
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(id, _)| id.clone())
    }

    /// Inserts or replaces `id`, returning the session evicted to make room.
    fn insert(&mut self, id: &str, table: Table, max_named: usize) -> Option<SessionId> {
        let mut evicted = None;
        if id != DEFAULT_SESSION && !self.slots.contains_key(id) && self.named() >= max_named {
            evicted = self.least_recent();
            if let Some(old) = &evicted {
                self.slots.remove(old);
            }
        }
        let last_used = self.tick();
        self.slots.insert(
            id.to_string(),
            Slot {
                table: Arc::new(Mutex::new(table)),
                last_used,
            },
        );
        evicted
    }
}

/// Session registry and request handling.
#[derive(Clone)]
pub struct GameService {
    registry: Arc<Mutex<Registry>>,
    max_sessions: usize,
    default_mode: GameMode,
    default_difficulty: Difficulty,
    rules: RuleSet,
    time_budget: Option<Duration>,
    auto_reply: bool,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("default_mode", &self.default_mode)
            .field("default_difficulty", &self.default_difficulty)
            .field("rules", &self.rules)
            .field("auto_reply", &self.auto_reply)
            .field("max_sessions", &self.max_sessions)
            .finish_non_exhaustive()
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}

impl GameService {
    /// Creates a service with the default session already open.
    #[instrument(skip(config))]
    pub fn new(config: &ServerConfig) -> Self {
        let service = Self {
            registry: Arc::default(),
            max_sessions: (*config.max_sessions()).max(1),
            default_mode: *config.default_mode(),
            default_difficulty: *config.default_difficulty(),
            rules: config.rules(),
            time_budget: config.ai_time_budget(),
            auto_reply: *config.auto_reply(),
        };
        let mut registry = Registry::default();
        let table = service.table(service.default_mode, service.default_difficulty);
        registry.insert(DEFAULT_SESSION, table, service.max_sessions);
        let service = Self {
            registry: Arc::new(Mutex::new(registry)),
            ..service
        };
        info!(max_sessions = service.max_sessions, "Game service ready");
        service
    }

    fn table(&self, mode: GameMode, difficulty: Difficulty) -> Table {
        let mut engine = AiEngine::new();
        if let Some(budget) = self.time_budget {
            engine = engine.with_time_budget(budget);
        }
        Table {
            session: GameSession::new(mode, difficulty).with_rules(self.rules),
            engine,
        }
    }

    async fn lookup(&self, id: &str) -> Result<SharedTable, ServiceError> {
        let mut registry = self.registry.lock().await;
        registry.touch(id).ok_or_else(|| {
            warn!(session_id = id, "Unknown session");
            ServiceError::SessionNotFound(id.to_string())
        })
    }

    async fn open(&self, id: &str, table: Table) -> SessionSnapshot {
        let snapshot = table.session.snapshot();
        let mut registry = self.registry.lock().await;
        if let Some(evicted) = registry.insert(id, table, self.max_sessions) {
            info!(session_id = %evicted, "Evicted least recently used session");
        }
        snapshot
    }

    /// Lists open session ids.
    pub async fn session_ids(&self) -> Vec<SessionId> {
        let registry = self.registry.lock().await;
        let mut ids: Vec<SessionId> = registry.slots.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Closes a session and frees its game.
    ///
    /// A closed default session is reopened by the next `init_game`.
    #[instrument(skip(self))]
    pub async fn close_session(&self, session_id: &str) -> Result<(), ServiceError> {
        let mut registry = self.registry.lock().await;
        match registry.slots.remove(session_id) {
            Some(_) => {
                info!("Session closed");
                Ok(())
            }
            None => {
                warn!("Close requested for unknown session");
                Err(ServiceError::SessionNotFound(session_id.to_string()))
            }
        }
    }

    /// Starts a fresh game with the configured defaults.
    #[instrument(skip(self))]
    pub async fn init_game(&self, session_id: &str) -> SessionSnapshot {
        info!("Initializing session");
        let table = self.table(self.default_mode, self.default_difficulty);
        self.open(session_id, table).await
    }

    /// Starts a fresh game with the given seats and AI strength.
    #[instrument(skip(self))]
    pub async fn new_game(
        &self,
        session_id: &str,
        mode: Option<GameMode>,
        difficulty: Option<Difficulty>,
    ) -> SessionSnapshot {
        let mode = mode.unwrap_or(self.default_mode);
        let difficulty = difficulty.unwrap_or(self.default_difficulty);
        info!(%mode, %difficulty, "Starting new game");
        let table = self.table(mode, difficulty);
        self.open(session_id, table).await
    }

    /// Current state of a session.
    #[instrument(skip(self))]
    pub async fn state(&self, session_id: &str) -> Result<SessionSnapshot, ServiceError> {
        let table = self.lookup(session_id).await?;
        let table = table.lock().await;
        Ok(table.session.snapshot())
    }

    /// Legal moves of `player`'s piece on `(row, col)`.
    ///
    /// Empty for an empty cell or an enemy piece.
    #[instrument(skip(self))]
    pub async fn legal_moves(
        &self,
        session_id: &str,
        row: usize,
        col: usize,
        player: Player,
    ) -> Result<Vec<MoveView>, ServiceError> {
        let from = Coord::new(row, col)?;
        let table = self.lookup(session_id).await?;
        let table = table.lock().await;
        let moves: Vec<MoveView> = table
            .session
            .legal_moves(from, player)
            .into_iter()
            .map(|to| MoveView::from(Move::new(from, to)))
            .collect();
        debug!(count = moves.len(), "Listed legal moves");
        Ok(moves)
    }

    /// Applies a human move; in pve the AI answers before this returns.
    #[instrument(skip(self))]
    pub async fn apply_move(
        &self,
        session_id: &str,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<SessionSnapshot, ServiceError> {
        let from = Coord::new(from.0, from.1)?;
        let to = Coord::new(to.0, to.1)?;
        let table = self.lookup(session_id).await?;
        let mut guard = table.lock_owned().await;
        guard.session.apply_move(from, to)?;

        if !self.auto_reply || guard.session.mode() != GameMode::Pve {
            return Ok(guard.session.snapshot());
        }

        tokio::task::spawn_blocking(move || {
            guard.auto_reply()?;
            Ok::<_, RuleError>(guard.session.snapshot())
        })
        .await
        .map_err(|e| ServiceError::Worker(e.to_string()))?
        .map_err(ServiceError::from)
    }

    /// Plays the side to move with the AI.
    ///
    /// With no legal move the side concedes and the move is `None`. In aivai
    /// the other side answers as well when automatic replies are on.
    #[instrument(skip(self))]
    pub async fn ai_move(
        &self,
        session_id: &str,
        difficulty: Option<Difficulty>,
    ) -> Result<AiTurn, ServiceError> {
        let table = self.lookup(session_id).await?;
        let mut guard = table.lock_owned().await;
        if guard.session.outcome().is_over() {
            warn!("AI move requested after game end");
            return Err(RuleError::GameAlreadyOver.into());
        }
        let difficulty = difficulty.unwrap_or(guard.session.difficulty());
        let chain = self.auto_reply && guard.session.mode() == GameMode::Aivai;

        tokio::task::spawn_blocking(move || {
            let mv = guard.ai_turn(difficulty)?;
            if mv.is_some() && chain && !guard.session.outcome().is_over() {
                guard.ai_turn(difficulty)?;
            }
            Ok::<_, RuleError>(AiTurn::new(mv.map(MoveView::from), guard.session.snapshot()))
        })
        .await
        .map_err(|e| ServiceError::Worker(e.to_string()))?
        .map_err(ServiceError::from)
    }
}
