use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fishbowl::{Card, EngineConfig, GameEngine, GameRng, NullStore, Rules, SnapshotCodec, Stage};
use std::hint::black_box;

fn ready_game(cards: usize, codec: SnapshotCodec) -> GameEngine<NullStore> {
    let config = EngineConfig::default().with_seed(42).with_codec(codec);
    let mut engine = GameEngine::with_config(NullStore, config);
    engine.set_rules(Rules::new(4, cards, 60)).unwrap();
    for i in 0..cards {
        engine.add_card(Card::new(format!("clue {i}"))).unwrap();
    }
    engine.finalize_cards().unwrap();
    engine
}

fn bench_shuffle(c: &mut Criterion) {
    let mut rng = GameRng::new(7);
    c.bench_function("shuffled_order/100", |b| {
        b.iter(|| black_box(rng.shuffled_order(black_box(100))))
    });
}

fn bench_full_game(c: &mut Criterion) {
    for (name, codec) in [("json", SnapshotCodec::Json), ("binary", SnapshotCodec::Binary)] {
        c.bench_function(&format!("full_game/50_cards/{name}"), |b| {
            b.iter_batched(
                || ready_game(50, codec),
                |mut engine| {
                    while engine.stage() != Stage::Done {
                        if engine.stage() == Stage::Ready {
                            engine.start_playing().unwrap();
                        }
                        engine.pass().unwrap();
                        engine.got_it().unwrap();
                    }
                    black_box(engine.standings().len())
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench_shuffle, bench_full_game);
criterion_main!(benches);
