//! 回合状态机、动作处理与牌数守恒账本

pub mod action;
pub mod claim;
pub mod engine;
pub mod ledger;
pub mod state;

pub use action::{Action, ClaimKind};
pub use claim::{GangHandler, PengHandler};
pub use engine::{ActionError, SetupError};
pub use ledger::{audit, LedgerReport};
pub use state::{ExposedMeld, GangKind, PendingDiscard, PlayerState, RoundState, Stage};
