use crate::tile::{Hand, Tile};

/// 手牌形状评分
///
/// 贪心估值，用于出牌比较而非精确向听数：
/// - 刻子 3 分、顺子 2 分、对子 1 分；
/// - 拆剩的单张若在原手牌里有同花色相邻牌（±1），记 0.25 分。
///
/// 每个花色独立拆解：先取刻子，再从小到大扫顺子，最后配对子。
/// 贪心不保证最优拆解，但同一手牌的评分稳定，足以比较两次出牌的优劣。
pub fn shape_score(hand: &Hand) -> f64 {
    let full = hand.face_counts();
    let mut score = 0.0;

    for suit in 0..3 {
        let base = suit * 9;
        let mut counts = [0u8; 9];
        counts.copy_from_slice(&full[base..base + 9]);

        // 刻子
        for count in counts.iter_mut() {
            if *count >= 3 {
                *count -= 3;
                score += 3.0;
            }
        }

        // 顺子：从小到大，能组则组
        for start in 0..7 {
            while counts[start] > 0 && counts[start + 1] > 0 && counts[start + 2] > 0 {
                counts[start] -= 1;
                counts[start + 1] -= 1;
                counts[start + 2] -= 1;
                score += 2.0;
            }
        }

        // 对子
        for count in counts.iter_mut() {
            if *count >= 2 {
                *count -= 2;
                score += 1.0;
            }
        }

        // 相邻单张：以原手牌判断邻居是否存在
        for (offset, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let has_left = offset > 0 && full[base + offset - 1] > 0;
            let has_right = offset < 8 && full[base + offset + 1] > 0;
            if has_left || has_right {
                score += 0.25 * count as f64;
            }
        }
    }
    score
}

/// 打出一张牌造成的形状损失（非负）
pub fn discard_shape_loss(hand: &Hand, tile: Tile) -> f64 {
    let before = shape_score(hand);
    let mut after_hand = hand.clone();
    if !after_hand.remove_tile(tile) {
        return 0.0;
    }
    (before - shape_score(&after_hand)).max(0.0)
}
