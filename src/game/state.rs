use crate::game::action::ClaimKind;
use crate::tile::{Hand, Tile, Wall};
use smallvec::SmallVec;

/// 回合阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    /// 等待当前座位摸牌
    Draw,
    /// 当前座位 14 张，等待出牌（或自摸决定）
    Discard,
    /// 弃牌悬空，吃胡窗口开启
    Wait,
}

/// 杠的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GangKind {
    /// 直杠（手中三张 + 别家弃牌）
    Claimed,
    /// 暗杠（手中四张）
    Concealed,
    /// 加杠（已碰刻子补第四张）
    Added,
}

/// 亮在桌面的牌组
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ExposedMeld {
    /// 碰出的刻子（3 张）
    Triplet { tile: Tile },
    /// 杠（4 张）
    Quad { tile: Tile, kind: GangKind },
}

impl ExposedMeld {
    /// 该牌组占用的实体牌数
    pub fn tile_count(&self) -> usize {
        match self {
            ExposedMeld::Triplet { .. } => 3,
            ExposedMeld::Quad { .. } => 4,
        }
    }
}

/// 单个座位的状态
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerState {
    /// 座位号（0-3）
    pub seat: u8,
    /// 暗牌
    pub hand: Hand,
    /// 弃牌（按时间顺序，只增不删）
    pub discards: Vec<Tile>,
    /// 亮出的碰/杠
    pub melds: Vec<ExposedMeld>,
    /// 已亮神的财神张数（信息性，供对手模型使用）
    pub revealed_magic: u8,
}

impl PlayerState {
    /// 创建空座位
    pub fn new(seat: u8) -> Self {
        Self {
            seat,
            hand: Hand::new(),
            discards: Vec::new(),
            melds: Vec::new(),
            revealed_magic: 0,
        }
    }

    /// 已碰刻子数
    pub fn peng_count(&self) -> usize {
        self.melds
            .iter()
            .filter(|m| matches!(m, ExposedMeld::Triplet { .. }))
            .count()
    }

    /// 已杠数
    pub fn gang_count(&self) -> usize {
        self.melds
            .iter()
            .filter(|m| matches!(m, ExposedMeld::Quad { .. }))
            .count()
    }

    /// 是否毫无公开信息（无弃牌、无碰杠、未亮神）
    pub fn no_public_exposure(&self) -> bool {
        self.discards.is_empty() && self.melds.is_empty() && self.revealed_magic == 0
    }
}

/// 悬空弃牌与吃胡窗口
///
/// 弃牌在窗口关闭前不落入弃牌堆：被要走则归要牌者，无人要则补记
/// 到出牌者的弃牌列表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDiscard {
    /// 悬空的牌
    pub tile: Tile,
    /// 出牌座位
    pub seat: u8,
    /// 已登记的要求（座位，类型）
    pub bids: SmallVec<[(u8, ClaimKind); 3]>,
    /// 各座位是否已放弃（出牌者恒为 true）
    pub passed: [bool; 4],
}

impl PendingDiscard {
    /// 创建新窗口
    pub fn new(tile: Tile, seat: u8) -> Self {
        let mut passed = [false; 4];
        passed[seat as usize] = true;
        Self {
            tile,
            seat,
            bids: SmallVec::new(),
            passed,
        }
    }

    /// 某座位是否已表态（要求或放弃）
    pub fn has_responded(&self, seat: u8) -> bool {
        self.passed[seat as usize] || self.bids.iter().any(|&(s, _)| s == seat)
    }

    /// 三家是否都已表态
    pub fn all_responded(&self) -> bool {
        (0..4u8).all(|s| s == self.seat || self.has_responded(s))
    }
}

/// 一局的权威状态快照
///
/// 快照不可变：所有状态演化经 `RoundState::apply` 从旧快照产生新快照，
/// 被拒绝的动作不产生任何可见的部分变更。
#[derive(Debug, Clone)]
pub struct RoundState {
    /// 四个座位
    pub players: [PlayerState; 4],
    /// 牌墙（前端摸牌，尾端杠后补牌）
    pub wall: Wall,
    /// 本局财神面（开局翻出的指示牌，整局不变）
    pub magic: Tile,
    /// 当前行动座位
    pub current_seat: u8,
    /// 当前阶段
    pub stage: Stage,
    /// 悬空弃牌（仅 Wait 阶段为 Some）
    pub pending: Option<PendingDiscard>,
    /// 自摸胡提示挂起（摸牌后手牌已成胡型，等待胡/继续的决定）
    pub self_draw_win: bool,
    /// 回合计数（每次摸牌递增）
    pub turn: u32,
    /// 本局是否结束
    pub finished: bool,
    /// 胡牌座位（荒牌为 None）
    pub winner: Option<u8>,
}

impl RoundState {
    /// 吃胡窗口是否开启
    pub fn claim_window_open(&self) -> bool {
        self.stage == Stage::Wait && self.pending.is_some()
    }

    /// 当前座位（只读）
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current_seat as usize]
    }

    /// 指定座位（只读）
    pub fn player(&self, seat: u8) -> &PlayerState {
        &self.players[seat as usize]
    }
}
