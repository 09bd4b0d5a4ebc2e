use super::hand::Hand;
use super::tile::Tile;
use smallvec::SmallVec;

/// 胡牌牌型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WinKind {
    /// 四扑一将（4 组顺子/刻子 + 1 对将）
    Standard,
    /// 七对（允许混花色，本实现的既定变体规则）
    SevenPairs,
}

/// 胡牌判定器
///
/// 两种牌型任一成立即胡。财神为百搭：顺子、刻子、将牌的任何缺口都可以
/// 用财神补，多余的财神自身凑成纯财神刻子/对子。
///
/// # 算法
///
/// 1. 牌数门槛：只有 `n % 3 == 2`（14、11、8、5、2）的牌数才可能胡。
/// 2. 七对快速路径：自然对子 + 财神补单张 + 剩余财神互相配对。
/// 3. 四扑一将：枚举每种可行的将牌选择，再对剩余计数做递归回溯，
///    每次消耗最低位牌面（刻子或顺子起点），财神补缺口。
pub struct WinChecker;

impl WinChecker {
    /// 判定手牌是否胡牌
    pub fn is_winning_hand(hand: &Hand, magic: Tile) -> bool {
        Self::win_kind(hand, magic).is_some()
    }

    /// 判定胡牌并返回牌型
    pub fn win_kind(hand: &Hand, magic: Tile) -> Option<WinKind> {
        if hand.total_count() % 3 != 2 {
            return None;
        }
        let (mut counts, magic_count) = hand.counts27(magic);

        if Self::check_seven_pairs(&counts, magic_count) {
            return Some(WinKind::SevenPairs);
        }
        if Self::check_standard(&mut counts, magic_count) {
            return Some(WinKind::Standard);
        }
        None
    }

    /// 判定 13 张手牌吃进一张弃牌后能否胡
    pub fn would_win_with_claim(hand: &Hand, claimed: Tile, magic: Tile) -> bool {
        let mut test_hand = hand.clone();
        if !test_hand.add_tile(claimed) {
            return false;
        }
        Self::is_winning_hand(&test_hand, magic)
    }

    /// 听牌列表：加上哪些牌面即可胡
    pub fn ting_tiles(hand: &Hand, magic: Tile) -> SmallVec<[Tile; 8]> {
        let mut result = SmallVec::new();
        for face in Tile::all_faces() {
            if hand.tile_count(face) >= 4 {
                continue;
            }
            if Self::would_win_with_claim(hand, face, magic) {
                result.push(face);
            }
        }
        result
    }

    /// 七对检查
    ///
    /// 自然对子尽数配对，剩余单张每张用一个财神补，再多的财神两两互配。
    /// 对子总数 ≥ 7 即胡。不要求同一花色（混色七对为既定变体规则）。
    fn check_seven_pairs(counts: &[u8; Tile::FACE_COUNT], magic_count: u8) -> bool {
        let mut pairs = 0u8;
        let mut singles = 0u8;
        for &count in counts {
            pairs += count / 2;
            singles += count % 2;
        }
        if magic_count < singles {
            return false;
        }
        let leftover_magic = magic_count - singles;
        pairs + singles + leftover_magic / 2 >= 7
    }

    /// 四扑一将检查：枚举将牌，再递归拆解剩余计数
    ///
    /// 将牌的三种来源按序尝试：两张自然牌、一张自然牌 + 一个财神、
    /// 两个财神。任一将牌选择能完成拆解即胡（只取第一个成功的）。
    fn check_standard(counts: &mut [u8; Tile::FACE_COUNT], magic_count: u8) -> bool {
        // 两张自然牌或一张 + 财神做将
        for i in 0..Tile::FACE_COUNT {
            if counts[i] >= 2 {
                counts[i] -= 2;
                let ok = Self::can_form_melds(counts, magic_count);
                counts[i] += 2;
                if ok {
                    return true;
                }
            }
            if counts[i] == 1 && magic_count >= 1 {
                counts[i] -= 1;
                let ok = Self::can_form_melds(counts, magic_count - 1);
                counts[i] += 1;
                if ok {
                    return true;
                }
            }
        }
        // 纯财神将
        if magic_count >= 2 && Self::can_form_melds(counts, magic_count - 2) {
            return true;
        }
        false
    }

    /// 递归回溯：剩余计数能否全部拆成顺子/刻子
    ///
    /// 每层取最低位有牌的牌面，尝试两类消耗：
    /// - 刻子：三张自然牌，或全部自然牌 + 财神补足三张；
    /// - 顺子：数字 ≤ 7 时以该牌面起顺，三个位置的缺口用财神补，
    ///   不跨花色（索引 `i % 9 <= 6` 保证）。
    ///
    /// 基例：计数全空且剩余财神恰为 3 的倍数（纯财神刻子）。
    fn can_form_melds(counts: &mut [u8; Tile::FACE_COUNT], magic_count: u8) -> bool {
        let first = match counts.iter().position(|&c| c > 0) {
            Some(i) => i,
            None => return magic_count % 3 == 0,
        };

        // 刻子：三张自然牌
        if counts[first] >= 3 {
            counts[first] -= 3;
            let ok = Self::can_form_melds(counts, magic_count);
            counts[first] += 3;
            if ok {
                return true;
            }
        }

        // 刻子：自然牌不足三张，财神补
        if counts[first] < 3 {
            let shortfall = 3 - counts[first];
            if magic_count >= shortfall {
                let natural = counts[first];
                counts[first] = 0;
                let ok = Self::can_form_melds(counts, magic_count - shortfall);
                counts[first] = natural;
                if ok {
                    return true;
                }
            }
        }

        // 顺子：以 first 起顺，不跨花色
        if first % 9 <= 6 {
            let mut shortfall = 0u8;
            let mut taken = [false; 3];
            for (offset, slot) in taken.iter_mut().enumerate() {
                if counts[first + offset] > 0 {
                    *slot = true;
                } else {
                    shortfall += 1;
                }
            }
            if magic_count >= shortfall {
                for (offset, &slot) in taken.iter().enumerate() {
                    if slot {
                        counts[first + offset] -= 1;
                    }
                }
                let ok = Self::can_form_melds(counts, magic_count - shortfall);
                for (offset, &slot) in taken.iter().enumerate() {
                    if slot {
                        counts[first + offset] += 1;
                    }
                }
                if ok {
                    return true;
                }
            }
        }

        false
    }
}

/// 便捷函数：检查手牌是否胡牌
pub fn is_win(hand: &Hand, magic: Tile) -> bool {
    WinChecker::is_winning_hand(hand, magic)
}
