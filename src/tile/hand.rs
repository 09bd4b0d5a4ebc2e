use super::tile::{Suit, Tile};
use smallvec::SmallVec;
use std::collections::HashMap;

/// 手牌（无序多重集）
///
/// 使用 HashMap 存储每种牌面的数量，添加、移除和查询都是 O(1)。
/// 胡牌判定和风险计算需要的 27 格计数视图由 `counts27` 提供。
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hand {
    /// 牌面 -> 数量（1-4）
    tiles: HashMap<Tile, u8>,
    /// 总牌数（缓存）
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 从牌列表创建手牌
    ///
    /// 超出 4 张的同面牌会被丢弃（理论上不应发生）。
    pub fn from_tiles<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        let mut hand = Self::new();
        for tile in tiles {
            hand.add_tile(tile);
        }
        hand
    }

    /// 添加一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：该牌面已有 4 张
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        let count = self.tiles.entry(tile).or_insert(0);
        if *count >= 4 {
            return false;
        }
        *count += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张牌
    ///
    /// # Returns
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total_count -= 1;
                if *count == 0 {
                    self.tiles.remove(&tile);
                }
                true
            }
            _ => false,
        }
    }

    /// 检查是否持有某张牌
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 27 格牌面计数（含财神在内的原始计数）
    pub fn face_counts(&self) -> [u8; Tile::FACE_COUNT] {
        let mut counts = [0u8; Tile::FACE_COUNT];
        for (tile, &count) in &self.tiles {
            counts[tile.face_index()] += count;
        }
        counts
    }

    /// 拆分计数：非财神牌的 27 格计数 + 财神张数
    ///
    /// 胡牌判定把财神从计数里摘出来作为百搭预算。
    pub fn counts27(&self, magic: Tile) -> ([u8; Tile::FACE_COUNT], u8) {
        let mut counts = self.face_counts();
        let magic_count = counts[magic.face_index()];
        counts[magic.face_index()] = 0;
        (counts, magic_count)
    }

    /// 持有的财神张数
    pub fn magic_count(&self, magic: Tile) -> u8 {
        self.tile_count(magic)
    }

    /// 转换为排序后的牌向量（花色优先、数字其次）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count);
        for suit in Suit::all() {
            for rank in Tile::MIN_RANK..=Tile::MAX_RANK {
                let tile = suit.tile(rank).expect("数字有效");
                for _ in 0..self.tile_count(tile) {
                    result.push(tile);
                }
            }
        }
        result
    }

    /// 获取所有不同的牌面（升序）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 14]> {
        let mut result: SmallVec<[Tile; 14]> = self.tiles.keys().copied().collect();
        result.sort();
        result
    }

    /// 牌面数量映射（只读）
    pub fn tiles_map(&self) -> &HashMap<Tile, u8> {
        &self.tiles
    }
}
