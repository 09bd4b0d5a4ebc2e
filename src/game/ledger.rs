use crate::game::state::RoundState;

/// 牌数守恒账本
///
/// 任何时刻，一局的 108 张实体牌按去向分账：牌墙、四家暗牌、
/// 四家弃牌堆、悬空弃牌、碰/杠亮牌、已亮的财神、财神指示牌。
/// 各项相加必须恒等于 108，不平账即为引擎缺陷。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LedgerReport {
    /// 牌墙剩余
    pub wall: usize,
    /// 四家暗牌合计
    pub hands: usize,
    /// 四家弃牌堆合计
    pub discards: usize,
    /// 悬空弃牌（吃胡窗口期内为 1）
    pub pending: usize,
    /// 碰/杠亮牌合计
    pub melds: usize,
    /// 已亮的财神合计
    pub revealed_magic: usize,
    /// 财神指示牌（恒为 1）
    pub indicator: usize,
    /// 总计
    pub total: usize,
}

impl LedgerReport {
    /// 账本是否平衡
    pub fn balanced(&self) -> bool {
        self.total == crate::tile::Tile::TOTAL_COUNT
    }
}

/// 清点一个快照的全部牌去向
pub fn audit(state: &RoundState) -> LedgerReport {
    let wall = state.wall.remaining_count();
    let mut hands = 0;
    let mut discards = 0;
    let mut melds = 0;
    let mut revealed_magic = 0;
    for player in &state.players {
        hands += player.hand.total_count();
        discards += player.discards.len();
        melds += player.melds.iter().map(|m| m.tile_count()).sum::<usize>();
        revealed_magic += player.revealed_magic as usize;
    }
    let pending = if state.pending.is_some() { 1 } else { 0 };
    let indicator = 1;

    LedgerReport {
        wall,
        hands,
        discards,
        pending,
        melds,
        revealed_magic,
        indicator,
        total: wall + hands + discards + pending + melds + revealed_magic + indicator,
    }
}
