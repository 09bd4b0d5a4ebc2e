use super::tile::{Suit, Tile};
use rand::seq::SliceRandom;
use rand::Rng;

/// 牌墙
///
/// 108 张牌的有序牌堆。正常摸牌从前端取，杠后补牌从尾端（牌墙尾相当于
/// 死墙）取，两端相遇即为荒牌。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Wall {
    /// 牌堆
    tiles: Vec<Tile>,
    /// 前端已摸牌数
    drawn_front: usize,
    /// 尾端已摸牌数
    drawn_back: usize,
}

impl Wall {
    /// 创建一副完整的牌墙（108 张，未洗）
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);
        for suit in Suit::all() {
            for rank in Tile::MIN_RANK..=Tile::MAX_RANK {
                let tile = suit.tile(rank).expect("数字有效");
                for _ in 0..4 {
                    tiles.push(tile);
                }
            }
        }
        Self {
            tiles,
            drawn_front: 0,
            drawn_back: 0,
        }
    }

    /// 从给定牌序创建牌墙（用于测试固定局面）
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            drawn_front: 0,
            drawn_back: 0,
        }
    }

    /// 洗牌（Fisher-Yates）
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
        self.drawn_front = 0;
        self.drawn_back = 0;
    }

    /// 从前端摸一张牌
    ///
    /// # Returns
    ///
    /// - `Some(Tile)`：成功摸牌
    /// - `None`：牌墙已空
    pub fn draw(&mut self) -> Option<Tile> {
        if self.is_empty() {
            return None;
        }
        let tile = self.tiles[self.drawn_front];
        self.drawn_front += 1;
        Some(tile)
    }

    /// 从尾端摸一张补牌（杠后/亮神后）
    pub fn draw_tail(&mut self) -> Option<Tile> {
        if self.is_empty() {
            return None;
        }
        self.drawn_back += 1;
        let index = self.tiles.len() - self.drawn_back;
        Some(self.tiles[index])
    }

    /// 剩余牌数
    pub fn remaining_count(&self) -> usize {
        self.tiles
            .len()
            .saturating_sub(self.drawn_front + self.drawn_back)
    }

    /// 牌墙是否已空
    pub fn is_empty(&self) -> bool {
        self.remaining_count() == 0
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}
