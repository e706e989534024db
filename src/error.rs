//! Error taxonomy for the orchestration boundary.
//!
//! All of these are non-fatal precondition violations, surfaced to the
//! offending actor only. The engine mutators themselves never produce
//! errors: the room layer checks these conditions first, and on rejection
//! the state is left untouched.

use thiserror::Error;

use crate::core::Phase;

/// A rejected intent. Always a named message for the actor, never a crash.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("not your turn")]
    NotYourTurn,

    #[error("action not allowed in the {0:?} phase")]
    WrongPhase(Phase),

    #[error("waiting for a declaration")]
    AwaitingDeclaration,

    #[error("no declaration is pending")]
    NoDeclarationPending,

    #[error("you do not hold that card")]
    CardNotHeld,

    #[error("that card cannot be played now")]
    IllegalPlay,

    #[error("those cards do not form a legal double")]
    IllegalDouble,

    #[error("you cannot go out on a double")]
    CannotGoOutOnDouble,

    #[error("you must draw before passing")]
    MustDrawFirst,

    #[error("you have already drawn this turn")]
    AlreadyDrawn,

    #[error("the match window is closed")]
    MatchWindowClosed,

    #[error("that card does not match the top card")]
    NotAMatch,

    #[error("you cannot match on your own turn")]
    CannotMatchOwnTurn,

    #[error("you can only announce with one card left")]
    AnnounceNotAllowed,

    #[error("at least {0} players are needed to start")]
    NotEnoughPlayers(usize),

    #[error("only the host can do that")]
    NotHost,

    #[error("unknown room")]
    UnknownRoom,

    #[error("unknown player")]
    UnknownPlayer,
}
