use crate::game::state::{RoundState, Stage};
use std::collections::VecDeque;

/// 对话历史保留的最大条数，超出后丢弃最旧的
pub const MAX_HISTORY: usize = 12;

/// 对话消息
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    /// 角色（user / assistant）
    pub role: String,
    /// 正文
    pub content: String,
}

/// 有界对话历史
///
/// 先进先出，容量固定为 `MAX_HISTORY`。
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatHistory {
    messages: VecDeque<ChatMessage>,
}

impl ChatHistory {
    /// 创建空历史
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条消息，超容时丢弃最旧的
    pub fn push(&mut self, role: &str, content: &str) {
        if self.messages.len() >= MAX_HISTORY {
            self.messages.pop_front();
        }
        self.messages.push_back(ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        });
    }

    /// 当前条数
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 按时间顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

/// 请求里的单个对手上下文（只含公开信息）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpponentContext {
    /// 座位号
    pub seat: u8,
    /// 弃牌（文本牌面，按时间顺序）
    pub discards: Vec<String>,
    /// 已碰刻子数
    pub peng_count: usize,
    /// 已杠数
    pub gang_count: usize,
    /// 暗牌张数
    pub hand_count: usize,
    /// 已亮神次数
    pub magic_reveals: u8,
}

/// 发给顾问网关的序列化上下文
///
/// 牌面一律用 `5万` 形式的文本传输，网关侧无需理解内部编码。
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdvisoryRequest {
    /// 本家暗牌
    pub hand: Vec<String>,
    /// 财神面
    pub magic: String,
    /// 三个对手的公开信息
    pub opponents: Vec<OpponentContext>,
    /// 牌墙剩余
    pub wall_remaining: usize,
    /// 回合数
    pub turn: u32,
    /// 当前阶段
    pub stage: Stage,
    /// 用户自由输入
    pub message: String,
    /// 有界对话历史
    pub history: Vec<ChatMessage>,
}

impl AdvisoryRequest {
    /// 从快照构建请求
    pub fn from_state(
        state: &RoundState,
        seat: u8,
        message: &str,
        history: &ChatHistory,
    ) -> Self {
        let player = state.player(seat);
        let opponents = (0..4u8)
            .filter(|&s| s != seat)
            .map(|s| {
                let opp = state.player(s);
                OpponentContext {
                    seat: s,
                    discards: opp.discards.iter().map(|t| t.to_string()).collect(),
                    peng_count: opp.peng_count(),
                    gang_count: opp.gang_count(),
                    hand_count: opp.hand.total_count(),
                    magic_reveals: opp.revealed_magic,
                }
            })
            .collect();

        Self {
            hand: player.hand.to_sorted_vec().iter().map(|t| t.to_string()).collect(),
            magic: state.magic.to_string(),
            opponents,
            wall_remaining: state.wall.remaining_count(),
            turn: state.turn,
            stage: state.stage,
            message: message.to_string(),
            history: history.iter().cloned().collect(),
        }
    }
}
