use crate::game::state::{PlayerState, RoundState};
use crate::tile::Suit;

/// 对单个对手的读牌结果
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OpponentRead {
    /// 听牌概率（有公开信息时落在 [0.03, 0.95]，零信息为 0）
    pub ting_probability: f64,
    /// 危险花色（该对手最可能在做的花色），判断不了为 None
    pub dangerous_suit: Option<Suit>,
}

/// 估计某对手的听牌概率与危险花色
///
/// 纯函数：只读公开信息（弃牌、碰杠、亮神、牌墙余量），不碰暗牌。
/// 先验由弃牌数给出，再按弃牌纹理（近期幺九牌比例）、攻击性
/// （碰杠亮神次数）和局面深度（牌墙余量）逐项修正，全部在赔率域
/// 上相乘后转回概率。
pub fn estimate_opponent(state: &RoundState, seat: u8) -> OpponentRead {
    let player = state.player(seat);
    if player.no_public_exposure() {
        return OpponentRead {
            ting_probability: 0.0,
            dangerous_suit: None,
        };
    }

    let dangerous_suit = read_dangerous_suit(player);
    let discard_count = player.discards.len();

    // 先验：弃牌越多越接近听牌
    let base = ((discard_count as f64 - 1.0) / 24.0).clamp(0.04, 0.45);
    let mut odds = base / (1.0 - base);

    // 近 5 张弃牌里的幺九牌：大量打边张是收牌信号
    let recent = &player.discards[discard_count.saturating_sub(5)..];
    let edge_count = recent.iter().filter(|t| t.is_terminal()).count();
    if edge_count >= 4 {
        odds *= 2.2;
    } else if edge_count == 3 {
        odds *= 1.45;
    } else if edge_count <= 1 {
        odds *= 0.85;
    }

    // 最后 3 张全是幺九牌：守牌连击，另计
    if discard_count >= 3 && player.discards[discard_count - 3..].iter().all(|t| t.is_terminal()) {
        odds *= 1.35;
    }

    // 攻击性：碰、杠、亮神都抬高估计
    let aggression = (0.5
        + 0.12 * player.peng_count() as f64
        + 0.2 * player.gang_count() as f64
        + 0.06 * player.revealed_magic as f64)
        .clamp(0.25, 0.98);
    odds *= aggression;

    // 局面深度：牌墙越薄，在听的人越多
    let wall = state.wall.remaining_count();
    if wall < 30 {
        odds *= 1.25;
    } else if wall < 55 {
        odds *= 1.1;
    }

    // 开局太早又没碰杠：信息不足，压低估计
    if discard_count < 5 && player.melds.is_empty() {
        odds *= 0.75;
    }

    OpponentRead {
        ting_probability: (odds / (1.0 + odds)).clamp(0.03, 0.95),
        dangerous_suit,
    }
}

/// 估计全部三个对手（按座位升序，跳过自己）
pub fn estimate_opponents(state: &RoundState, own_seat: u8) -> [(u8, OpponentRead); 3] {
    let mut result = [(0u8, OpponentRead { ting_probability: 0.0, dangerous_suit: None }); 3];
    let mut slot = 0;
    for seat in 0..4u8 {
        if seat == own_seat {
            continue;
        }
        result[slot] = (seat, estimate_opponent(state, seat));
        slot += 1;
    }
    result
}

/// 危险花色：弃得最少的花色最可能是其手里在做的
///
/// 三个花色弃牌数全部相同则判断不了。并列取花色序（万、筒、条）
/// 靠前者。
fn read_dangerous_suit(player: &PlayerState) -> Option<Suit> {
    let mut counts = [0usize; 3];
    for tile in &player.discards {
        counts[tile.suit() as usize] += 1;
    }
    if counts[0] == counts[1] && counts[1] == counts[2] {
        return None;
    }
    let min = counts.iter().copied().min().unwrap_or(0);
    Suit::all().into_iter().find(|&s| counts[s as usize] == min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    fn fixture() -> RoundState {
        let hand0: Vec<Tile> = (1..=9)
            .map(Tile::Wan)
            .chain([Tile::Tong(1), Tile::Tong(1), Tile::Tong(2), Tile::Tong(3)])
            .collect();
        let hand1: Vec<Tile> = (1..=9)
            .map(Tile::Tiao)
            .chain([Tile::Tong(4), Tile::Tong(4), Tile::Tong(5), Tile::Tong(6)])
            .collect();
        let hand2: Vec<Tile> = (1..=9)
            .map(Tile::Wan)
            .chain([Tile::Tong(7), Tile::Tong(7), Tile::Tong(8), Tile::Tong(9)])
            .collect();
        let hand3: Vec<Tile> = (1..=9)
            .map(Tile::Tiao)
            .chain([Tile::Tong(1), Tile::Tong(2), Tile::Tong(3), Tile::Tong(9)])
            .collect();
        RoundState::with_hands([hand0, hand1, hand2, hand3], Tile::Tong(5), 0).unwrap()
    }

    #[test]
    fn test_zero_exposure_reads_zero() {
        let state = fixture();
        let read = estimate_opponent(&state, 1);
        assert_eq!(read.ting_probability, 0.0);
        assert_eq!(read.dangerous_suit, None);
    }

    #[test]
    fn test_probability_stays_in_bounds() {
        let mut state = fixture();
        // 大量弃牌 + 碰杠：概率抬高但不越界
        state.players[1].discards = (1..=9)
            .map(Tile::Wan)
            .chain((1..=9).map(Tile::Tong))
            .collect();
        state.players[1].melds.push(crate::game::state::ExposedMeld::Triplet {
            tile: Tile::Tiao(5),
        });
        let read = estimate_opponent(&state, 1);
        assert!(read.ting_probability >= 0.03);
        assert!(read.ting_probability <= 0.95);
    }

    #[test]
    fn test_dangerous_suit_least_discarded() {
        let mut state = fixture();
        state.players[2].discards = vec![
            Tile::Wan(1),
            Tile::Wan(5),
            Tile::Tong(2),
            Tile::Tong(8),
            Tile::Tiao(3),
        ];
        let read = estimate_opponent(&state, 2);
        assert_eq!(read.dangerous_suit, Some(Suit::Tiao));
    }

    #[test]
    fn test_dangerous_suit_unknown_when_tied() {
        let mut state = fixture();
        state.players[3].discards = vec![Tile::Wan(1), Tile::Tong(2), Tile::Tiao(3)];
        let read = estimate_opponent(&state, 3);
        assert_eq!(read.dangerous_suit, None);
        // 有弃牌即有概率
        assert!(read.ting_probability >= 0.03);
    }

    #[test]
    fn test_edge_streak_raises_estimate() {
        let mut state = fixture();
        state.players[1].discards = vec![
            Tile::Wan(4),
            Tile::Tong(5),
            Tile::Wan(1),
            Tile::Wan(9),
            Tile::Tiao(1),
            Tile::Tiao(9),
            Tile::Tong(1),
        ];
        let edgy = estimate_opponent(&state, 1).ting_probability;

        state.players[1].discards = vec![
            Tile::Wan(4),
            Tile::Tong(5),
            Tile::Wan(3),
            Tile::Wan(6),
            Tile::Tiao(4),
            Tile::Tiao(5),
            Tile::Tong(6),
        ];
        let plain = estimate_opponent(&state, 1).ting_probability;
        assert!(edgy > plain);
    }
}
