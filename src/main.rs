/// 可执行文件入口（用于测试和调试）

use sdai_engine::{audit, recommend_discard, Action, RoundState, Stage};

fn main() {
    println!("山东麻将辅助引擎测试");

    let mut rng = rand::thread_rng();
    let mut state = match RoundState::deal(&mut rng, 0) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("开局失败：{:?}", err);
            return;
        }
    };
    println!("开局完成，财神：{}，牌墙剩余：{} 张", state.magic, state.wall.remaining_count());

    // 每个座位按风险引擎推荐打几轮
    for _ in 0..12 {
        if state.finished {
            break;
        }
        state = match state.apply(Action::Draw) {
            Ok(next) => next,
            Err(err) => {
                eprintln!("摸牌失败：{:?}", err);
                return;
            }
        };
        if state.finished {
            break;
        }
        if state.self_draw_win {
            println!("座位 {} 自摸！", state.current_seat);
            state = match state.apply(Action::DeclareWin) {
                Ok(next) => next,
                Err(err) => {
                    eprintln!("宣告胡牌失败：{:?}", err);
                    return;
                }
            };
            break;
        }

        let seat = state.current_seat;
        let advice = match recommend_discard(&state, seat) {
            Some(advice) => advice,
            None => break,
        };
        println!(
            "座位 {} 打出 {}（风险 {:.3}，形状损失 {:.2}）",
            seat, advice.tile, advice.risk, advice.shape_loss
        );
        state = match state.apply(Action::Discard { tile: advice.tile }) {
            Ok(next) => next,
            Err(err) => {
                eprintln!("出牌失败：{:?}", err);
                return;
            }
        };

        // 无人要牌
        for other in 0..4u8 {
            if state.stage != Stage::Wait {
                break;
            }
            if other != seat {
                state = match state.apply(Action::Pass { seat: other }) {
                    Ok(next) => next,
                    Err(err) => {
                        eprintln!("过牌失败：{:?}", err);
                        return;
                    }
                };
            }
        }
    }

    let report = audit(&state);
    println!(
        "账本：墙 {} + 手牌 {} + 弃牌 {} + 亮牌 {} + 指示牌 {} = {}（平衡：{}）",
        report.wall,
        report.hands,
        report.discards,
        report.melds,
        report.indicator,
        report.total,
        report.balanced()
    );
}
