use crate::game::action::{Action, ClaimKind};
use crate::game::claim::{GangHandler, PengHandler};
use crate::game::state::{PendingDiscard, PlayerState, RoundState, Stage};
use crate::tile::{Hand, Tile, Wall, WinChecker};
use rand::Rng;

/// 动作被拒绝的原因
///
/// 任何拒绝都是无副作用的：返回 `Err` 时旧快照保持原样。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// 本局已结束
    RoundOver,
    /// 动作与当前阶段不符
    WrongStage,
    /// 座位号无效或轮不到该座位
    InvalidSeat,
    /// 手牌中没有要打出/要杠的牌
    TileNotInHand,
    /// 吃胡窗口未开启或该座位已表态
    WindowClosed,
    /// 要求不成立（牌数不足或并不能胡）
    ClaimNotAllowed,
    /// 没有挂起的自摸提示，或手牌并非胡型
    NotWinning,
}

/// 开局参数错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// 手牌不是 13 张
    WrongHandSize,
    /// 某牌面超过 4 张
    TooManyCopies,
    /// 座位号无效
    InvalidSeat,
}

impl RoundState {
    /// 洗牌发牌开局：4 × 13 张，翻一张指示牌定财神
    pub fn deal<R: Rng>(rng: &mut R, starting_seat: u8) -> Result<Self, SetupError> {
        if starting_seat >= 4 {
            return Err(SetupError::InvalidSeat);
        }
        let mut wall = Wall::new();
        wall.shuffle(rng);

        let mut players = [
            PlayerState::new(0),
            PlayerState::new(1),
            PlayerState::new(2),
            PlayerState::new(3),
        ];
        for player in &mut players {
            for _ in 0..13 {
                let tile = wall.draw().expect("整墙发 13 张不会摸空");
                player.hand.add_tile(tile);
            }
        }
        // 开神：翻出指示牌，其牌面即本局财神
        let magic = wall.draw().expect("发牌后墙不为空");

        Ok(Self {
            players,
            wall,
            magic,
            current_seat: starting_seat,
            stage: Stage::Draw,
            pending: None,
            self_draw_win: false,
            turn: 0,
            finished: false,
            winner: None,
        })
    }

    /// 用外部录入的手牌开局（辅助模式）
    ///
    /// 牌墙由剩余牌按牌面顺序构成，保证 108 张守恒账本成立。
    /// 对手的暗牌同样由调用方提供，引擎信任而不校验其来源。
    pub fn with_hands(
        hands: [Vec<Tile>; 4],
        magic: Tile,
        starting_seat: u8,
    ) -> Result<Self, SetupError> {
        if starting_seat >= 4 {
            return Err(SetupError::InvalidSeat);
        }
        let mut used = [0u8; Tile::FACE_COUNT];
        used[magic.face_index()] += 1; // 指示牌占一张实体牌
        for hand in &hands {
            if hand.len() != 13 {
                return Err(SetupError::WrongHandSize);
            }
            for tile in hand {
                used[tile.face_index()] += 1;
            }
        }
        if used.iter().any(|&c| c > 4) {
            return Err(SetupError::TooManyCopies);
        }

        let mut wall_tiles = Vec::with_capacity(Tile::TOTAL_COUNT - 53);
        for face in Tile::all_faces() {
            for _ in 0..(4 - used[face.face_index()]) {
                wall_tiles.push(face);
            }
        }

        let mut players = [
            PlayerState::new(0),
            PlayerState::new(1),
            PlayerState::new(2),
            PlayerState::new(3),
        ];
        for (player, tiles) in players.iter_mut().zip(hands) {
            player.hand = Hand::from_tiles(tiles);
        }

        Ok(Self {
            players,
            wall: Wall::from_tiles(wall_tiles),
            magic,
            current_seat: starting_seat,
            stage: Stage::Draw,
            pending: None,
            self_draw_win: false,
            turn: 0,
            finished: false,
            winner: None,
        })
    }

    /// 应用一个动作，产生新快照
    ///
    /// 完整提交或整体拒绝：`Err` 表示无操作，旧快照不变。
    pub fn apply(&self, action: Action) -> Result<RoundState, ActionError> {
        if self.finished {
            return Err(ActionError::RoundOver);
        }
        match action {
            Action::Draw => self.apply_draw(),
            Action::Discard { tile } => self.apply_discard(tile),
            Action::DeclareWin => self.apply_declare_win(),
            Action::DeclineWin => self.apply_decline_win(),
            Action::Claim { seat, kind } => self.apply_claim(seat, kind),
            Action::Pass { seat } => self.apply_pass(seat),
            Action::ConcealedGang { tile } => self.apply_concealed_gang(tile),
            Action::AddedGang { tile } => self.apply_added_gang(tile),
            Action::RevealMagic => self.apply_reveal_magic(),
        }
    }

    /// 摸牌：墙空则荒牌终局
    fn apply_draw(&self) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Draw {
            return Err(ActionError::WrongStage);
        }
        let mut next = self.clone();
        next.turn += 1;

        let tile = match next.wall.draw() {
            Some(tile) => tile,
            None => {
                // 荒牌：无人胡，定义内的终局而非错误
                next.finished = true;
                next.winner = None;
                return Ok(next);
            }
        };
        let seat = next.current_seat as usize;
        next.players[seat].hand.add_tile(tile);
        next.stage = Stage::Discard;
        next.self_draw_win =
            WinChecker::is_winning_hand(&next.players[seat].hand, next.magic);
        Ok(next)
    }

    /// 出牌：弃牌悬空，开启吃胡窗口
    fn apply_discard(&self, tile: Tile) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Discard {
            return Err(ActionError::WrongStage);
        }
        if !self.current_player().hand.has_tile(tile) {
            return Err(ActionError::TileNotInHand);
        }
        let mut next = self.clone();
        let seat = next.current_seat;
        next.players[seat as usize].hand.remove_tile(tile);
        next.self_draw_win = false;
        next.stage = Stage::Wait;
        next.pending = Some(PendingDiscard::new(tile, seat));
        Ok(next)
    }

    /// 自摸胡：要求手牌确为胡型
    fn apply_declare_win(&self) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Discard {
            return Err(ActionError::WrongStage);
        }
        if !WinChecker::is_winning_hand(&self.current_player().hand, self.magic) {
            return Err(ActionError::NotWinning);
        }
        let mut next = self.clone();
        next.self_draw_win = false;
        next.finished = true;
        next.winner = Some(next.current_seat);
        Ok(next)
    }

    /// 放弃自摸提示，继续出牌
    fn apply_decline_win(&self) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Discard || !self.self_draw_win {
            return Err(ActionError::NotWinning);
        }
        let mut next = self.clone();
        next.self_draw_win = false;
        Ok(next)
    }

    /// 登记弃牌要求
    ///
    /// 点炮胡没有更高优先级的要求，立即兑现；杠/碰先登记，
    /// 待三家表态齐后按优先级结算。
    fn apply_claim(&self, seat: u8, kind: ClaimKind) -> Result<RoundState, ActionError> {
        if seat >= 4 {
            return Err(ActionError::InvalidSeat);
        }
        let pending = match (&self.pending, self.stage) {
            (Some(p), Stage::Wait) => p,
            _ => return Err(ActionError::WindowClosed),
        };
        if seat == pending.seat || pending.has_responded(seat) {
            return Err(ActionError::WindowClosed);
        }

        let claimer = self.player(seat);
        match kind {
            ClaimKind::Win => {
                if !WinChecker::would_win_with_claim(&claimer.hand, pending.tile, self.magic) {
                    return Err(ActionError::ClaimNotAllowed);
                }
                // 胡的优先级最高，立即兑现并关窗
                let mut next = self.clone();
                let tile = pending.tile;
                next.players[seat as usize].hand.add_tile(tile);
                next.pending = None;
                next.finished = true;
                next.winner = Some(seat);
                return Ok(next);
            }
            ClaimKind::Gang => {
                if !GangHandler::can_claim(&claimer.hand, pending.tile) {
                    return Err(ActionError::ClaimNotAllowed);
                }
            }
            ClaimKind::Peng => {
                if !PengHandler::can_claim(&claimer.hand, pending.tile) {
                    return Err(ActionError::ClaimNotAllowed);
                }
            }
        }

        let mut next = self.clone();
        let pending = next.pending.as_mut().expect("窗口已校验开启");
        pending.bids.push((seat, kind));
        if pending.all_responded() {
            next.resolve_window();
        }
        Ok(next)
    }

    /// 放弃要求；三家齐后结算窗口
    fn apply_pass(&self, seat: u8) -> Result<RoundState, ActionError> {
        if seat >= 4 {
            return Err(ActionError::InvalidSeat);
        }
        let pending = match (&self.pending, self.stage) {
            (Some(p), Stage::Wait) => p,
            _ => return Err(ActionError::WindowClosed),
        };
        if seat == pending.seat || pending.has_responded(seat) {
            return Err(ActionError::WindowClosed);
        }
        let mut next = self.clone();
        let pending = next.pending.as_mut().expect("窗口已校验开启");
        pending.passed[seat as usize] = true;
        if pending.all_responded() {
            next.resolve_window();
        }
        Ok(next)
    }

    /// 窗口结算：杠 > 碰，无人要则弃牌落堆、下家摸牌
    ///
    /// 点炮胡在登记时已兑现，不会进入这里。
    fn resolve_window(&mut self) {
        let pending = self.pending.take().expect("结算时窗口必然开启");
        let tile = pending.tile;

        let gang_bid = pending.bids.iter().find(|&&(_, k)| k == ClaimKind::Gang);
        let peng_bid = pending.bids.iter().find(|&&(_, k)| k == ClaimKind::Peng);

        if let Some(&(seat, _)) = gang_bid {
            GangHandler::apply_claimed(&mut self.players[seat as usize], tile);
            self.current_seat = seat;
            self.stage = Stage::Discard;
            self.supplemental_draw(seat);
        } else if let Some(&(seat, _)) = peng_bid {
            PengHandler::apply(&mut self.players[seat as usize], tile);
            self.current_seat = seat;
            self.stage = Stage::Discard;
        } else {
            // 无人要：弃牌落入出牌者的弃牌堆，轮到下家
            self.players[pending.seat as usize].discards.push(tile);
            self.current_seat = (pending.seat + 1) % 4;
            self.stage = Stage::Draw;
        }
    }

    /// 暗杠：手中四张，杠后从墙尾补牌
    fn apply_concealed_gang(&self, tile: Tile) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Discard {
            return Err(ActionError::WrongStage);
        }
        if !GangHandler::can_conceal(&self.current_player().hand, tile) {
            return Err(ActionError::TileNotInHand);
        }
        let mut next = self.clone();
        let seat = next.current_seat;
        GangHandler::apply_concealed(&mut next.players[seat as usize], tile);
        next.self_draw_win = false;
        next.supplemental_draw(seat);
        Ok(next)
    }

    /// 加杠：升级已碰的刻子，杠后从墙尾补牌
    fn apply_added_gang(&self, tile: Tile) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Discard {
            return Err(ActionError::WrongStage);
        }
        if !GangHandler::can_add(self.current_player(), tile) {
            return Err(ActionError::ClaimNotAllowed);
        }
        let mut next = self.clone();
        let seat = next.current_seat;
        GangHandler::apply_added(&mut next.players[seat as usize], tile);
        next.self_draw_win = false;
        next.supplemental_draw(seat);
        Ok(next)
    }

    /// 亮神：亮出一张财神并从墙尾补牌，手牌张数不变
    fn apply_reveal_magic(&self) -> Result<RoundState, ActionError> {
        if self.stage != Stage::Discard {
            return Err(ActionError::WrongStage);
        }
        if !self.current_player().hand.has_tile(self.magic) {
            return Err(ActionError::TileNotInHand);
        }
        let mut next = self.clone();
        let seat = next.current_seat;
        let magic = next.magic;
        {
            let player = &mut next.players[seat as usize];
            player.hand.remove_tile(magic);
            player.revealed_magic += 1;
        }
        next.self_draw_win = false;
        next.supplemental_draw(seat);
        Ok(next)
    }

    /// 墙尾补牌；墙已空则荒牌终局。补到胡型重新挂起自摸提示（杠上开花）。
    fn supplemental_draw(&mut self, seat: u8) {
        match self.wall.draw_tail() {
            Some(tile) => {
                self.players[seat as usize].hand.add_tile(tile);
                self.self_draw_win =
                    WinChecker::is_winning_hand(&self.players[seat as usize].hand, self.magic);
            }
            None => {
                self.finished = true;
                self.winner = None;
            }
        }
    }
}
