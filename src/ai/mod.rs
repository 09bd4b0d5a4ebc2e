//! 出牌辅助：形状评分、对手读牌与点炮风险

pub mod opponent;
pub mod risk;
pub mod shape;

pub use opponent::{estimate_opponent, estimate_opponents, OpponentRead};
pub use risk::{
    discard_risk, evaluate_gang, evaluate_peng, recommend_discard, ClaimAdvice, DiscardAdvice,
};
pub use shape::{discard_shape_loss, shape_score};
