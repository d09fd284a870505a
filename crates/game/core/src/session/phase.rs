//! Round phases.
//!
//! ```text
//! PlayerEffectTick → DeathCheck(player)
//!   → PlayerAction → DeathCheck(opponent)
//!   → OpponentEffectTick → DeathCheck(opponent)
//!   → OpponentAction → DeathCheck(player)
//!   → Advance
//! ```
//!
//! The opponent's death is always checked (and settled) before it may act, so
//! a round where both sides would drop to zero counts as a player win.

use core::fmt;

/// Side examined by a death check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Opponent,
}

/// Where in the round a death check sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Checkpoint {
    AfterPlayerTick,
    AfterPlayerAction,
    AfterOpponentTick,
    AfterOpponentAction,
}

impl Checkpoint {
    pub const fn side(self) -> Side {
        match self {
            Self::AfterPlayerTick | Self::AfterOpponentAction => Side::Player,
            Self::AfterPlayerAction | Self::AfterOpponentTick => Side::Opponent,
        }
    }

    const fn resume(self) -> RoundPhase {
        match self {
            Self::AfterPlayerTick => RoundPhase::PlayerAction,
            Self::AfterPlayerAction => RoundPhase::OpponentEffectTick,
            Self::AfterOpponentTick => RoundPhase::OpponentAction,
            Self::AfterOpponentAction => RoundPhase::Advance,
        }
    }
}

/// One step of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    PlayerEffectTick,
    PlayerAction,
    OpponentEffectTick,
    OpponentAction,
    /// Ends the round if the checked side is at zero HP.
    DeathCheck(Checkpoint),
    Advance,
}

impl RoundPhase {
    pub const FIRST: Self = Self::PlayerEffectTick;

    /// Phase that follows `self` when nobody has died. `None` after `Advance`.
    pub const fn next(self) -> Option<RoundPhase> {
        match self {
            Self::PlayerEffectTick => Some(Self::DeathCheck(Checkpoint::AfterPlayerTick)),
            Self::PlayerAction => Some(Self::DeathCheck(Checkpoint::AfterPlayerAction)),
            Self::OpponentEffectTick => Some(Self::DeathCheck(Checkpoint::AfterOpponentTick)),
            Self::OpponentAction => Some(Self::DeathCheck(Checkpoint::AfterOpponentAction)),
            Self::DeathCheck(checkpoint) => Some(checkpoint.resume()),
            Self::Advance => None,
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerEffectTick => f.write_str("player-effect-tick"),
            Self::PlayerAction => f.write_str("player-action"),
            Self::OpponentEffectTick => f.write_str("opponent-effect-tick"),
            Self::OpponentAction => f.write_str("opponent-action"),
            Self::DeathCheck(checkpoint) => match checkpoint.side() {
                Side::Player => f.write_str("death-check(player)"),
                Side::Opponent => f.write_str("death-check(opponent)"),
            },
            Self::Advance => f.write_str("advance"),
        }
    }
}
