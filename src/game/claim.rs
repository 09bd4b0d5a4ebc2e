use crate::game::state::{ExposedMeld, GangKind, PlayerState};
use crate::tile::{Hand, Tile};

/// 碰处理器
///
/// 碰 = 手中两张同面牌 + 别家弃牌，亮成刻子。
pub struct PengHandler;

impl PengHandler {
    /// 是否可以碰指定弃牌
    pub fn can_claim(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) >= 2
    }

    /// 兑现碰：移除两张手牌，亮出刻子
    ///
    /// 调用前必须通过 `can_claim` 校验。
    pub fn apply(player: &mut PlayerState, tile: Tile) {
        for _ in 0..2 {
            player.hand.remove_tile(tile);
        }
        player.melds.push(ExposedMeld::Triplet { tile });
    }
}

/// 杠处理器
///
/// 三种杠：直杠（三张 + 弃牌）、暗杠（四张）、加杠（已碰刻子补第四张）。
/// 任何杠之后都从牌墙尾端补一张牌，补牌由引擎负责。
pub struct GangHandler;

impl GangHandler {
    /// 是否可以直杠指定弃牌
    pub fn can_claim(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) >= 3
    }

    /// 是否可以暗杠
    pub fn can_conceal(hand: &Hand, tile: Tile) -> bool {
        hand.tile_count(tile) >= 4
    }

    /// 是否可以加杠（已碰该面刻子且手中有第四张）
    pub fn can_add(player: &PlayerState, tile: Tile) -> bool {
        player.hand.has_tile(tile)
            && player
                .melds
                .iter()
                .any(|m| matches!(m, ExposedMeld::Triplet { tile: t } if *t == tile))
    }

    /// 兑现直杠：移除三张手牌，亮出明杠
    pub fn apply_claimed(player: &mut PlayerState, tile: Tile) {
        for _ in 0..3 {
            player.hand.remove_tile(tile);
        }
        player.melds.push(ExposedMeld::Quad {
            tile,
            kind: GangKind::Claimed,
        });
    }

    /// 兑现暗杠：移除四张手牌，亮出暗杠
    pub fn apply_concealed(player: &mut PlayerState, tile: Tile) {
        for _ in 0..4 {
            player.hand.remove_tile(tile);
        }
        player.melds.push(ExposedMeld::Quad {
            tile,
            kind: GangKind::Concealed,
        });
    }

    /// 兑现加杠：移除第四张手牌，升级已碰刻子
    pub fn apply_added(player: &mut PlayerState, tile: Tile) {
        player.hand.remove_tile(tile);
        for meld in &mut player.melds {
            if matches!(meld, ExposedMeld::Triplet { tile: t } if *t == tile) {
                *meld = ExposedMeld::Quad {
                    tile,
                    kind: GangKind::Added,
                };
                return;
            }
        }
    }
}
