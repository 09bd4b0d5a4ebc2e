use std::fmt;
use std::str::FromStr;

/// 麻将牌
///
/// 山东麻将使用 108 张牌：万、筒、条各 36 张（1-9 各 4 张），不含字牌。
/// 每局开局翻出一张牌作为财神（百搭），财神面由 `Tile` 值直接表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    /// 万子（1-9）
    Wan(u8),
    /// 筒子（1-9）
    Tong(u8),
    /// 条子（1-9）
    Tiao(u8),
}

impl Tile {
    /// 总牌数：108 张
    pub const TOTAL_COUNT: usize = 108;

    /// 不同牌面数：27 种
    pub const FACE_COUNT: usize = 27;

    /// 每种花色的数字范围：1-9
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;

    /// 创建一张牌，验证数字有效性
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return None;
        }
        Some(match suit {
            Suit::Wan => Tile::Wan(rank),
            Suit::Tong => Tile::Tong(rank),
            Suit::Tiao => Tile::Tiao(rank),
        })
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        match self {
            Tile::Wan(_) => Suit::Wan,
            Tile::Tong(_) => Suit::Tong,
            Tile::Tiao(_) => Suit::Tiao,
        }
    }

    /// 获取数字（1-9）
    pub fn rank(&self) -> u8 {
        match self {
            Tile::Wan(r) | Tile::Tong(r) | Tile::Tiao(r) => *r,
        }
    }

    /// 牌面索引（0-26）：花色 × 9 + 数字 - 1
    ///
    /// 胡牌判定与风险计算都在 27 格计数数组上进行。
    pub fn face_index(&self) -> usize {
        self.suit() as usize * 9 + (self.rank() - 1) as usize
    }

    /// 从牌面索引创建牌（0-26）
    pub fn from_face_index(index: usize) -> Option<Self> {
        if index >= Self::FACE_COUNT {
            return None;
        }
        let rank = (index % 9) as u8 + 1;
        match index / 9 {
            0 => Some(Tile::Wan(rank)),
            1 => Some(Tile::Tong(rank)),
            2 => Some(Tile::Tiao(rank)),
            _ => None,
        }
    }

    /// 是否为本局财神
    pub fn is_magic(&self, magic: Tile) -> bool {
        *self == magic
    }

    /// 是否为幺九牌（1 或 9）
    pub fn is_terminal(&self) -> bool {
        self.rank() == 1 || self.rank() == 9
    }

    /// 是否为中张（4-6）
    pub fn is_middle(&self) -> bool {
        (4..=6).contains(&self.rank())
    }

    /// 全部 27 种牌面
    pub fn all_faces() -> impl Iterator<Item = Tile> {
        (0..Self::FACE_COUNT).map(|i| Tile::from_face_index(i).expect("索引在范围内"))
    }
}

/// 牌面文本形式：`5万`、`3筒`、`7条`
///
/// 顾问网关的请求/响应都以此格式传牌。
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.suit() {
            Suit::Wan => "万",
            Suit::Tong => "筒",
            Suit::Tiao => "条",
        };
        write!(f, "{}{}", self.rank(), name)
    }
}

/// 牌面解析错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTileError;

impl fmt::Display for ParseTileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "无法解析的牌面")
    }
}

impl std::error::Error for ParseTileError {}

impl FromStr for Tile {
    type Err = ParseTileError;

    /// 解析 `5万` / `3筒` / `7条` 形式的牌面
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let rank_ch = chars.next().ok_or(ParseTileError)?;
        let rank = rank_ch.to_digit(10).ok_or(ParseTileError)? as u8;
        let suit = match chars.next() {
            Some('万') => Suit::Wan,
            Some('筒') => Suit::Tong,
            Some('条') => Suit::Tiao,
            _ => return Err(ParseTileError),
        };
        if chars.next().is_some() {
            return Err(ParseTileError);
        }
        Tile::new(suit, rank).ok_or(ParseTileError)
    }
}

/// 花色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Wan = 0,
    Tong = 1,
    Tiao = 2,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 3] {
        [Suit::Wan, Suit::Tong, Suit::Tiao]
    }

    /// 用花色和数字组一张牌（数字必须有效）
    pub fn tile(self, rank: u8) -> Option<Tile> {
        Tile::new(self, rank)
    }
}
