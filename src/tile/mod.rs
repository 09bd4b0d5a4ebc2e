//! 牌、手牌、牌墙与胡牌判定

pub mod hand;
pub mod tile;
pub mod wall;
pub mod win_check;

pub use hand::Hand;
pub use tile::{ParseTileError, Suit, Tile};
pub use wall::Wall;
pub use win_check::{is_win, WinChecker, WinKind};
