/// 回合状态机与守恒账本的集成测试

use sdai_engine::{
    audit, recommend_discard, Action, ClaimKind, RoundState, Stage, Tile,
};

/// 每一步都清点 108 张账本
fn assert_balanced(state: &RoundState) {
    let report = audit(state);
    assert!(
        report.balanced(),
        "账本不平：{:?}（合计 {}）",
        report,
        report.total
    );
}

#[test]
fn test_ledger_holds_through_random_round() {
    let mut rng = rand::thread_rng();
    let mut state = RoundState::deal(&mut rng, 0).unwrap();
    assert_balanced(&state);

    // 按风险引擎推荐打满整局（或打到上限）
    for _ in 0..200 {
        if state.finished {
            break;
        }
        state = state.apply(Action::Draw).unwrap();
        assert_balanced(&state);
        if state.finished {
            break;
        }

        if state.self_draw_win {
            state = state.apply(Action::DeclareWin).unwrap();
            assert_balanced(&state);
            break;
        }

        let seat = state.current_seat;
        let advice = recommend_discard(&state, seat).unwrap();
        state = state.apply(Action::Discard { tile: advice.tile }).unwrap();
        assert_balanced(&state);

        for other in 0..4u8 {
            if state.stage != Stage::Wait {
                break;
            }
            if other != seat {
                state = state.apply(Action::Pass { seat: other }).unwrap();
                assert_balanced(&state);
            }
        }
    }
    assert_balanced(&state);
}

fn claim_priority_fixture() -> RoundState {
    // 座位 1 听 5条（5条5条 做将），座位 2 手握两张 5条 可碰
    let hand0: Vec<Tile> = vec![
        Tile::Tiao(5),
        Tile::Wan(7),
        Tile::Wan(7),
        Tile::Wan(8),
        Tile::Wan(8),
        Tile::Wan(9),
        Tile::Wan(9),
        Tile::Tong(1),
        Tile::Tong(1),
        Tile::Tong(2),
        Tile::Tong(2),
        Tile::Tong(3),
        Tile::Tong(3),
    ];
    let hand1: Vec<Tile> = vec![
        Tile::Wan(1),
        Tile::Wan(2),
        Tile::Wan(3),
        Tile::Wan(4),
        Tile::Wan(5),
        Tile::Wan(6),
        Tile::Tong(7),
        Tile::Tong(8),
        Tile::Tong(9),
        Tile::Tiao(2),
        Tile::Tiao(3),
        Tile::Tiao(4),
        Tile::Tiao(5),
    ];
    let hand2: Vec<Tile> = vec![
        Tile::Tiao(5),
        Tile::Tiao(5),
        Tile::Tong(4),
        Tile::Tong(4),
        Tile::Tong(5),
        Tile::Tong(5),
        Tile::Tong(6),
        Tile::Tong(6),
        Tile::Tiao(1),
        Tile::Tiao(1),
        Tile::Tiao(6),
        Tile::Tiao(6),
        Tile::Tiao(7),
    ];
    let hand3: Vec<Tile> = vec![
        Tile::Wan(1),
        Tile::Wan(2),
        Tile::Wan(3),
        Tile::Wan(4),
        Tile::Wan(5),
        Tile::Wan(6),
        Tile::Tong(7),
        Tile::Tong(8),
        Tile::Tong(9),
        Tile::Tiao(2),
        Tile::Tiao(3),
        Tile::Tiao(4),
        Tile::Tiao(8),
    ];
    RoundState::with_hands([hand0, hand1, hand2, hand3], Tile::Tiao(9), 0).unwrap()
}

#[test]
fn test_win_claim_beats_peng_claim() {
    // 碰先登记，胡后到：胡立即兑现，碰作废
    let state = claim_priority_fixture();
    let state = state.apply(Action::Draw).unwrap();
    let state = state.apply(Action::Discard { tile: Tile::Tiao(5) }).unwrap();
    assert!(state.claim_window_open());

    let state = state
        .apply(Action::Claim { seat: 2, kind: ClaimKind::Peng })
        .unwrap();
    assert!(state.claim_window_open());

    let state = state
        .apply(Action::Claim { seat: 1, kind: ClaimKind::Win })
        .unwrap();
    assert!(state.finished);
    assert_eq!(state.winner, Some(1));
    // 座位 2 的碰从未被兑现
    assert!(state.player(2).melds.is_empty());
    assert_eq!(state.player(2).hand.tile_count(Tile::Tiao(5)), 2);
    assert_balanced(&state);
}

#[test]
fn test_win_claim_closes_window_before_peng() {
    // 胡先到：窗口即刻关闭，后来的碰被拒
    let state = claim_priority_fixture();
    let state = state.apply(Action::Draw).unwrap();
    let state = state.apply(Action::Discard { tile: Tile::Tiao(5) }).unwrap();

    let state = state
        .apply(Action::Claim { seat: 1, kind: ClaimKind::Win })
        .unwrap();
    assert_eq!(state.winner, Some(1));
    assert!(state
        .apply(Action::Claim { seat: 2, kind: ClaimKind::Peng })
        .is_err());
    assert_balanced(&state);
}

#[test]
fn test_invalid_win_claim_rejected() {
    // 座位 3 并不能胡 5条：要求被拒且局面不变
    let state = claim_priority_fixture();
    let state = state.apply(Action::Draw).unwrap();
    let state = state.apply(Action::Discard { tile: Tile::Tiao(5) }).unwrap();

    assert!(state
        .apply(Action::Claim { seat: 3, kind: ClaimKind::Win })
        .is_err());
    assert!(state.claim_window_open());
    assert!(!state.finished);
}

#[test]
fn test_peng_resolves_when_no_win() {
    // 无人能胡时，碰在三家表态齐后兑现，控制权转给碰家
    let state = claim_priority_fixture();
    let state = state.apply(Action::Draw).unwrap();
    let state = state.apply(Action::Discard { tile: Tile::Tiao(5) }).unwrap();

    let state = state
        .apply(Action::Claim { seat: 2, kind: ClaimKind::Peng })
        .unwrap();
    let state = state.apply(Action::Pass { seat: 1 }).unwrap();
    let state = state.apply(Action::Pass { seat: 3 }).unwrap();

    assert!(!state.claim_window_open());
    assert_eq!(state.current_seat, 2);
    assert_eq!(state.stage, Stage::Discard);
    assert_eq!(state.player(2).peng_count(), 1);
    assert_eq!(state.player(2).hand.tile_count(Tile::Tiao(5)), 0);
    assert_balanced(&state);
}

#[test]
fn test_self_draw_prompt_and_decline() {
    // 财神 5万，手牌五对 + 两张财神 + 单张：摸任何牌都凑成七对
    let hand0: Vec<Tile> = vec![
        Tile::Wan(1),
        Tile::Wan(1),
        Tile::Wan(2),
        Tile::Wan(2),
        Tile::Wan(3),
        Tile::Wan(3),
        Tile::Wan(4),
        Tile::Wan(4),
        Tile::Tong(6),
        Tile::Tong(6),
        Tile::Wan(5),
        Tile::Wan(5),
        Tile::Tiao(8),
    ];
    let hand1: Vec<Tile> = (1..=9)
        .map(Tile::Tiao)
        .chain([Tile::Tong(1), Tile::Tong(2), Tile::Tong(3), Tile::Tong(4)])
        .collect();
    let hand2: Vec<Tile> = (1..=9)
        .map(Tile::Tong)
        .chain([Tile::Tiao(1), Tile::Tiao(2), Tile::Tiao(3), Tile::Tiao(4)])
        .collect();
    let hand3: Vec<Tile> = (1..=9)
        .map(Tile::Wan)
        .chain([Tile::Tong(7), Tile::Tong(8), Tile::Tong(9), Tile::Tiao(5)])
        .collect();
    let state =
        RoundState::with_hands([hand0, hand1, hand2, hand3], Tile::Wan(5), 0).unwrap();

    let state = state.apply(Action::Draw).unwrap();
    assert!(state.self_draw_win, "摸任何牌都应触发自摸提示");
    assert_eq!(state.stage, Stage::Discard);

    // 放弃自摸：留在出牌阶段，14 张手牌原样保留
    let state = state.apply(Action::DeclineWin).unwrap();
    assert!(!state.self_draw_win);
    assert_eq!(state.stage, Stage::Discard);
    assert_eq!(state.current_player().hand.total_count(), 14);
    assert!(!state.finished);

    // 再次放弃被拒（提示已消费）
    assert!(state.apply(Action::DeclineWin).is_err());
    assert_balanced(&state);
}

#[test]
fn test_gang_draws_replacement_from_tail() {
    // 座位 0 手握四张 7万 可暗杠
    let hand0: Vec<Tile> = vec![
        Tile::Wan(7),
        Tile::Wan(7),
        Tile::Wan(7),
        Tile::Wan(7),
        Tile::Wan(1),
        Tile::Wan(2),
        Tile::Wan(3),
        Tile::Tong(1),
        Tile::Tong(2),
        Tile::Tong(3),
        Tile::Tiao(1),
        Tile::Tiao(2),
        Tile::Tiao(3),
    ];
    let hand1: Vec<Tile> = (1..=9)
        .map(Tile::Tiao)
        .chain([Tile::Tong(4), Tile::Tong(5), Tile::Tong(6), Tile::Tong(7)])
        .collect();
    let hand2: Vec<Tile> = (1..=9)
        .map(Tile::Tong)
        .chain([Tile::Tiao(4), Tile::Tiao(5), Tile::Tiao(6), Tile::Tiao(7)])
        .collect();
    let hand3: Vec<Tile> = (1..=9)
        .map(Tile::Tong)
        .chain([Tile::Tong(8), Tile::Tong(9), Tile::Tiao(8), Tile::Tiao(9)])
        .collect();
    let state =
        RoundState::with_hands([hand0, hand1, hand2, hand3], Tile::Tiao(9), 0).unwrap();

    let state = state.apply(Action::Draw).unwrap();
    let before_wall = state.wall.remaining_count();

    let state = state.apply(Action::ConcealedGang { tile: Tile::Wan(7) }).unwrap();
    // 杠完补一张：手牌张数不变（-4 亮出 +1 补牌），墙少一张
    assert_eq!(state.wall.remaining_count(), before_wall - 1);
    assert_eq!(state.player(0).gang_count(), 1);
    assert_eq!(state.player(0).hand.total_count(), 11);
    assert_eq!(state.stage, Stage::Discard);
    assert_balanced(&state);
}

#[test]
fn test_reveal_magic_keeps_hand_size() {
    // 座位 0 持一张财神（9条），亮神后补牌，手牌张数不变
    let hand0: Vec<Tile> = vec![
        Tile::Tiao(9),
        Tile::Wan(1),
        Tile::Wan(2),
        Tile::Wan(3),
        Tile::Wan(5),
        Tile::Wan(6),
        Tile::Wan(7),
        Tile::Tong(1),
        Tile::Tong(2),
        Tile::Tong(3),
        Tile::Tiao(1),
        Tile::Tiao(2),
        Tile::Tiao(3),
    ];
    let hand1: Vec<Tile> = (1..=9)
        .map(Tile::Tiao)
        .chain([Tile::Tong(4), Tile::Tong(5), Tile::Tong(6), Tile::Tong(7)])
        .collect();
    let hand2: Vec<Tile> = (1..=9)
        .map(Tile::Tong)
        .chain([Tile::Tiao(4), Tile::Tiao(5), Tile::Tiao(6), Tile::Tiao(7)])
        .collect();
    let hand3: Vec<Tile> = (1..=9)
        .map(Tile::Wan)
        .chain([Tile::Wan(1), Tile::Wan(2), Tile::Wan(3), Tile::Wan(4)])
        .collect();
    let state =
        RoundState::with_hands([hand0, hand1, hand2, hand3], Tile::Tiao(9), 0).unwrap();

    let state = state.apply(Action::Draw).unwrap();
    let before = state.current_player().hand.total_count();

    let state = state.apply(Action::RevealMagic).unwrap();
    assert_eq!(state.player(0).revealed_magic, 1);
    assert_eq!(state.player(0).hand.total_count(), before);
    assert_balanced(&state);
}
