/// 顾问网关的集成测试：过期丢弃、在途守卫与建议核对

use sdai_engine::{
    reconcile, Action, AdvisoryExchange, AdvisoryResponse, ChatHistory, AdvisoryRequest,
    RoundState, SnapshotKey, Tile,
};

fn fixture() -> RoundState {
    let hand0: Vec<Tile> = (1..=9)
        .map(Tile::Wan)
        .chain([Tile::Tong(1), Tile::Tong(1), Tile::Tong(2), Tile::Tong(3)])
        .collect();
    let hand1: Vec<Tile> = (1..=9)
        .map(Tile::Tiao)
        .chain([Tile::Tong(4), Tile::Tong(4), Tile::Tong(5), Tile::Tong(6)])
        .collect();
    let hand2: Vec<Tile> = (1..=9)
        .map(Tile::Wan)
        .chain([Tile::Tong(7), Tile::Tong(7), Tile::Tong(8), Tile::Tong(9)])
        .collect();
    let hand3: Vec<Tile> = (1..=9)
        .map(Tile::Tiao)
        .chain([Tile::Tong(1), Tile::Tong(2), Tile::Tong(3), Tile::Tong(9)])
        .collect();
    RoundState::with_hands([hand0, hand1, hand2, hand3], Tile::Tong(5), 0).unwrap()
}

#[test]
fn test_stale_response_discarded_on_arrival() {
    let state = fixture();
    let mut exchange = AdvisoryExchange::new();
    let key = exchange.begin(&state).unwrap();

    // 响应回来前局面已前进一个回合
    let advanced = state.apply(Action::Draw).unwrap();
    assert!(exchange.accept(&advanced, key, r#"{"discard":"1万"}"#).is_none());
    // 在途标记已清除，可以再次发起
    assert!(!exchange.is_in_flight());
    assert!(exchange.begin(&advanced).is_some());
}

#[test]
fn test_fresh_response_accepted() {
    let state = fixture();
    let mut exchange = AdvisoryExchange::new();
    let key = exchange.begin(&state).unwrap();

    let response = exchange
        .accept(&state, key, r#"{"strategy":"进攻","discard":"9万"}"#)
        .unwrap();
    assert_eq!(response.strategy, "进攻");
    assert_eq!(response.discard.as_deref(), Some("9万"));
}

#[test]
fn test_in_flight_guard_blocks_second_request() {
    let state = fixture();
    let mut exchange = AdvisoryExchange::new();

    assert!(exchange.begin(&state).is_some());
    // 同一时刻只允许一个在途请求
    assert!(exchange.begin(&state).is_none());

    exchange.cancel();
    assert!(exchange.begin(&state).is_some());
}

#[test]
fn test_reconcile_adopts_valid_suggestion() {
    let state = fixture().apply(Action::Draw).unwrap();
    let response = AdvisoryResponse::parse(r#"{"discard":"9万"}"#);

    let decision = reconcile(&state, 0, &response);
    assert!(decision.from_advisor);
    assert_eq!(decision.discard, Some(Tile::Wan(9)));
}

#[test]
fn test_reconcile_substitutes_tile_not_in_hand() {
    let state = fixture().apply(Action::Draw).unwrap();
    // 顾问建议的 9条 不在手里：换成本地推荐
    let response = AdvisoryResponse::parse(r#"{"discard":"9条"}"#);

    let decision = reconcile(&state, 0, &response);
    assert!(!decision.from_advisor);
    let tile = decision.discard.unwrap();
    assert!(state.player(0).hand.has_tile(tile));
}

#[test]
fn test_reconcile_substitutes_malformed_response() {
    let state = fixture().apply(Action::Draw).unwrap();
    let response = AdvisoryResponse::parse("满屏乱码");

    let decision = reconcile(&state, 0, &response);
    assert!(!decision.from_advisor);
    assert!(decision.discard.is_some());
}

#[test]
fn test_request_snapshot_key_tracks_state() {
    let state = fixture();
    let key = SnapshotKey::of(&state);
    let advanced = state.apply(Action::Draw).unwrap();
    assert_ne!(key, SnapshotKey::of(&advanced));

    // 请求内容来自公开信息 + 本家暗牌
    let mut history = ChatHistory::new();
    history.push("user", "帮我看看这手牌");
    let request = AdvisoryRequest::from_state(&advanced, 0, "现在打什么", &history);
    assert_eq!(request.turn, advanced.turn);
    assert_eq!(request.hand.len(), 14);
    assert_eq!(request.history.len(), 1);
}
