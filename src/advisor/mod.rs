//! 顾问（LLM）网关：请求构建、响应容错解析与过期丢弃
//!
//! 顾问只提供参考意见，权威推荐始终由本地风险引擎独立计算。
//! 网关异步返回，期间局面可能已经变化，所以每个请求都带上发起时
//! 快照的 `(回合, 座位, 阶段)` 键，响应到达时键不匹配即整条丢弃。

pub mod request;
pub mod response;

pub use request::{AdvisoryRequest, ChatHistory, ChatMessage, OpponentContext, MAX_HISTORY};
pub use response::{AdvisoryResponse, RiskLevel};

use crate::ai::risk::recommend_discard;
use crate::game::state::{RoundState, Stage};
use crate::tile::Tile;

/// 快照标识键
///
/// 同一键意味着顾问看到的局面与当前局面等价，响应仍然有效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SnapshotKey {
    /// 回合数
    pub turn: u32,
    /// 行动座位
    pub seat: u8,
    /// 阶段
    pub stage: Stage,
}

impl SnapshotKey {
    /// 取快照的标识键
    pub fn of(state: &RoundState) -> Self {
        Self {
            turn: state.turn,
            seat: state.current_seat,
            stage: state.stage,
        }
    }
}

/// 采纳顾问意见后的最终出牌决定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryDecision {
    /// 最终建议打出的牌（手牌为空时为 None）
    pub discard: Option<Tile>,
    /// 是否采纳了顾问的建议（false 表示换成了本地推荐）
    pub from_advisor: bool,
}

/// 核对顾问建议并给出最终出牌决定
///
/// 顾问建议的牌必须能解析且确实在手牌里，否则替换为本地风险
/// 引擎的推荐。
pub fn reconcile(state: &RoundState, seat: u8, response: &AdvisoryResponse) -> AdvisoryDecision {
    if let Some(text) = &response.discard {
        if let Ok(tile) = text.parse::<Tile>() {
            if state.player(seat).hand.has_tile(tile) {
                return AdvisoryDecision {
                    discard: Some(tile),
                    from_advisor: true,
                };
            }
        }
    }
    AdvisoryDecision {
        discard: recommend_discard(state, seat).map(|advice| advice.tile),
        from_advisor: false,
    }
}

/// 顾问调用的在途守卫
///
/// 同一时刻最多一个在途请求：请求发出时记下快照键，响应回来时
/// 校验两件事——是不是当前在途的那个请求、局面是否还停在发起时
/// 的键上。任何一项不满足都整条丢弃。
#[derive(Debug, Clone, Default)]
pub struct AdvisoryExchange {
    in_flight: Option<SnapshotKey>,
}

impl AdvisoryExchange {
    /// 创建空守卫
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一次请求
    ///
    /// # Returns
    ///
    /// - `Some(key)`：登记成功，key 随请求一起发出
    /// - `None`：已有在途请求，本次发起被拒
    pub fn begin(&mut self, state: &RoundState) -> Option<SnapshotKey> {
        if self.in_flight.is_some() {
            return None;
        }
        let key = SnapshotKey::of(state);
        self.in_flight = Some(key);
        Some(key)
    }

    /// 是否有在途请求
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// 接收响应
    ///
    /// 无论是否采纳都会清除对应的在途标记。键与当前局面不匹配
    /// （响应过期）时返回 None。
    pub fn accept(
        &mut self,
        state: &RoundState,
        key: SnapshotKey,
        body: &str,
    ) -> Option<AdvisoryResponse> {
        if self.in_flight == Some(key) {
            self.in_flight = None;
        }
        if key != SnapshotKey::of(state) {
            return None;
        }
        Some(AdvisoryResponse::parse(body))
    }

    /// 主动放弃在途请求
    pub fn cancel(&mut self) {
        self.in_flight = None;
    }
}
