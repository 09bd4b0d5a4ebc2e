use crate::ai::opponent::{estimate_opponents, OpponentRead};
use crate::ai::shape::{discard_shape_loss, shape_score};
use crate::game::state::{PlayerState, RoundState};
use crate::tile::{Tile, WinChecker};

/// 出牌建议
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DiscardAdvice {
    /// 建议打出的牌
    pub tile: Tile,
    /// 该牌的点炮风险
    pub risk: f64,
    /// 该牌的形状损失
    pub shape_loss: f64,
}

/// 碰/杠决策建议
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ClaimAdvice {
    /// 是否建议要牌
    pub worthwhile: bool,
    /// 要牌前的听牌面数
    pub ting_before: usize,
    /// 要牌（并打出最优弃牌）后的听牌面数
    pub ting_after: usize,
    /// 形状变化（含亮出牌组的价值）
    pub shape_delta: f64,
}

/// 某张牌的点炮风险，范围 [0.03, 0.95]
///
/// 对三个对手分别算局部风险（听牌概率 × 花色权重），套用该对手
/// 弃牌给出的安全折扣（筋、中筋、早外），取平均后再按全局牌面
/// 可见度做壁修正。财神面不参与筋/壁推理：它对谁都是百搭，
/// 花色数字没有信息量。
pub fn discard_risk(state: &RoundState, seat: u8, tile: Tile) -> f64 {
    let is_magic = tile.is_magic(state.magic);

    let mut sum = 0.0;
    for (opp_seat, read) in estimate_opponents(state, seat) {
        sum += local_risk(state.player(opp_seat), &read, tile, state.magic, is_magic);
    }
    let averaged = sum / 3.0;

    let (kabe_factor, residual) = if is_magic {
        (1.0, 0.024)
    } else {
        kabe_correction(state, seat, tile)
    };
    (averaged * kabe_factor + residual).clamp(0.03, 0.95)
}

/// 对单个对手的局部风险
fn local_risk(
    opponent: &PlayerState,
    read: &OpponentRead,
    tile: Tile,
    magic: Tile,
    is_magic: bool,
) -> f64 {
    let suit_weight = match read.dangerous_suit {
        Some(suit) if suit == tile.suit() => 0.78,
        Some(_) => 0.34,
        None => 0.45,
    };
    let mut risk = read.ting_probability * suit_weight;
    if !is_magic {
        risk *= safety_discount(opponent, tile, magic);
    }
    risk
}

/// 安全折扣：筋、中筋、早外三项独立判定，乘积落在 [0.35, 1]
///
/// 所有读法只看该对手自己的弃牌，且跳过弃出的财神（财神不代表
/// 它自己的数字）。
fn safety_discount(opponent: &PlayerState, tile: Tile, magic: Tile) -> f64 {
    let rank = tile.rank();
    let suit = tile.suit();
    let discarded = |r: u8| {
        opponent
            .discards
            .iter()
            .any(|t| !t.is_magic(magic) && t.suit() == suit && t.rank() == r)
    };

    let mut factor: f64 = 1.0;

    // 筋：两面听穿过本牌所需的中张已被该对手弃出
    let suji_middle = match rank {
        1 | 7 => Some(4),
        2 | 8 => Some(5),
        3 | 9 => Some(6),
        _ => None,
    };
    if let Some(middle) = suji_middle {
        if discarded(middle) {
            factor *= 0.84;
        }
    }

    // 中筋：4-6 的牌，两侧各隔三位的牌都已弃出
    if (4..=6).contains(&rank) && discarded(rank - 3) && discarded(rank + 3) {
        factor *= 0.82;
    }

    // 早外：开局前三张就弃中张（4-6 同花色），该花色外侧牌更安全，
    // 弃得越早折扣越深
    if matches!(rank, 1 | 2 | 8 | 9) {
        let early = opponent.discards.iter().take(3).position(|t| {
            !t.is_magic(magic) && t.suit() == suit && t.is_middle()
        });
        if let Some(position) = early {
            factor *= [0.72, 0.79, 0.86][position];
        }
    }

    factor.clamp(0.35, 1.0)
}

/// 壁修正：按全局可见牌面统计本牌还剩多少两面听的可能
///
/// 两面听潜力 = 相邻数字对 (r-2,r-1) 与 (r+1,r+2) 上
/// `剩余(a) × 剩余(b)` 之和，`剩余(x) = clamp(4 - 可见(x), 0, 4)`。
fn kabe_correction(state: &RoundState, seat: u8, tile: Tile) -> (f64, f64) {
    let visible = visible_counts(state, seat);
    let remaining = |rank: i32| -> i32 {
        if !(1..=9).contains(&rank) {
            return 0;
        }
        let face = tile
            .suit()
            .tile(rank as u8)
            .expect("数字已校验")
            .face_index();
        (4 - visible[face] as i32).clamp(0, 4)
    };

    let rank = tile.rank() as i32;
    let potential = remaining(rank - 2) * remaining(rank - 1)
        + remaining(rank + 1) * remaining(rank + 2);

    if potential <= 0 {
        (0.5, 0.012)
    } else if potential <= 4 {
        (0.74, 0.018)
    } else {
        (1.0, 0.024)
    }
}

/// 从本座位视角可见的全部牌面计数
///
/// 自己的暗牌、四家弃牌、悬空弃牌、碰杠亮牌、已亮的财神、
/// 财神指示牌。对手的暗牌不可见。
fn visible_counts(state: &RoundState, seat: u8) -> [u8; Tile::FACE_COUNT] {
    let mut counts = state.player(seat).hand.face_counts();
    for player in &state.players {
        for tile in &player.discards {
            counts[tile.face_index()] += 1;
        }
        for meld in &player.melds {
            let tile = match meld {
                crate::game::state::ExposedMeld::Triplet { tile } => tile,
                crate::game::state::ExposedMeld::Quad { tile, .. } => tile,
            };
            counts[tile.face_index()] += meld.tile_count() as u8;
        }
        counts[state.magic.face_index()] += player.revealed_magic;
    }
    if let Some(pending) = &state.pending {
        counts[pending.tile.face_index()] += 1;
    }
    // 指示牌本身
    counts[state.magic.face_index()] += 1;
    counts
}

/// 出牌推荐：在唯一牌面里最小化 `1.3 × 形状损失 + 10 × 风险`
///
/// 并列时取排序靠前（花色、数字最小）的牌。手牌为空返回 None。
pub fn recommend_discard(state: &RoundState, seat: u8) -> Option<DiscardAdvice> {
    let hand = &state.player(seat).hand;
    let mut best: Option<(f64, DiscardAdvice)> = None;

    for tile in hand.distinct_tiles() {
        let shape_loss = discard_shape_loss(hand, tile);
        let risk = discard_risk(state, seat, tile);
        let cost = 1.3 * shape_loss + 10.0 * risk;
        let advice = DiscardAdvice {
            tile,
            risk,
            shape_loss,
        };
        match &best {
            Some((best_cost, _)) if cost >= *best_cost => {}
            _ => best = Some((cost, advice)),
        }
    }
    best.map(|(_, advice)| advice)
}

/// 评估碰别家弃牌是否划算
///
/// 模拟碰后打出最优一张，比较前后的听牌面数与形状。听面增加
/// 即建议碰；听面持平时看形状是否改善。
pub fn evaluate_peng(state: &RoundState, seat: u8, tile: Tile) -> ClaimAdvice {
    let hand = &state.player(seat).hand;
    let ting_before = WinChecker::ting_tiles(hand, state.magic).len();
    let shape_before = shape_score(hand);

    let mut after = hand.clone();
    after.remove_tile(tile);
    after.remove_tile(tile);

    // 碰完要出一张：取出牌后听面最多的一种
    let mut ting_after = 0;
    for discard in after.distinct_tiles() {
        let mut trimmed = after.clone();
        trimmed.remove_tile(discard);
        ting_after = ting_after.max(WinChecker::ting_tiles(&trimmed, state.magic).len());
    }

    let shape_delta = shape_score(&after) + 3.0 - shape_before;
    ClaimAdvice {
        worthwhile: ting_after > ting_before
            || (ting_after == ting_before && ting_after > 0)
            || (ting_before == 0 && shape_delta > 0.0),
        ting_before,
        ting_after,
        shape_delta,
    }
}

/// 评估直杠别家弃牌是否划算
///
/// 杠送一张补牌，只要不破坏听牌就建议杠。
pub fn evaluate_gang(state: &RoundState, seat: u8, tile: Tile) -> ClaimAdvice {
    let hand = &state.player(seat).hand;
    let ting_before = WinChecker::ting_tiles(hand, state.magic).len();
    let shape_before = shape_score(hand);

    let mut after = hand.clone();
    for _ in 0..3 {
        after.remove_tile(tile);
    }
    let ting_after = WinChecker::ting_tiles(&after, state.magic).len();
    let shape_delta = shape_score(&after) + 3.0 - shape_before;

    ClaimAdvice {
        worthwhile: ting_after >= ting_before,
        ting_before,
        ting_after,
        shape_delta,
    }
}
