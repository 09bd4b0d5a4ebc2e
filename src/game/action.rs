use crate::tile::Tile;

/// 回合动作
///
/// 所有动作都作用于当前快照，经 `RoundState::apply` 产生新快照。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 当前座位从牌墙前端摸牌
    Draw,
    /// 当前座位出牌（打开吃胡窗口）
    Discard { tile: Tile },
    /// 当前座位宣告自摸胡
    DeclareWin,
    /// 当前座位放弃自摸提示，继续本回合
    DeclineWin,
    /// 窗口期内某座位对弃牌提出要求（胡/杠/碰）
    Claim { seat: u8, kind: ClaimKind },
    /// 窗口期内某座位放弃要求
    Pass { seat: u8 },
    /// 当前座位暗杠（手中四张）
    ConcealedGang { tile: Tile },
    /// 当前座位加杠（已碰刻子 + 手中第四张）
    AddedGang { tile: Tile },
    /// 当前座位亮神（亮出一张财神并从墙尾补牌）
    RevealMagic,
}

/// 弃牌要求类型，按优先级排列：胡 > 杠 > 碰
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClaimKind {
    /// 点炮胡
    Win,
    /// 直杠（手中三张 + 弃牌）
    Gang,
    /// 碰（手中两张 + 弃牌）
    Peng,
}
