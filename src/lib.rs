/// 山东麻将 AI 辅助引擎
///
/// 带财神（百搭）的胡牌判定、对手听牌估计、弃牌风险与回合状态机

pub mod advisor;
pub mod ai;
pub mod game;
pub mod tile;

// 重新导出常用类型
pub use tile::{Hand, Suit, Tile, Wall, WinChecker, WinKind};
pub use game::action::{Action, ClaimKind};
pub use game::claim::{GangHandler, PengHandler};
pub use game::engine::{ActionError, SetupError};
pub use game::ledger::{audit, LedgerReport};
pub use game::state::{ExposedMeld, GangKind, PlayerState, RoundState, Stage};
pub use ai::opponent::{estimate_opponent, estimate_opponents, OpponentRead};
pub use ai::risk::{discard_risk, evaluate_gang, evaluate_peng, recommend_discard, ClaimAdvice, DiscardAdvice};
pub use ai::shape::{discard_shape_loss, shape_score};
pub use advisor::{
    reconcile, AdvisoryDecision, AdvisoryExchange, AdvisoryRequest, AdvisoryResponse,
    ChatHistory, SnapshotKey,
};
