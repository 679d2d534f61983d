use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizset_core::bank::QuestionBank;
use quizset_core::ledger::ScoreLedger;
use quizset_core::model::{Category, CategoryRule, Difficulty, Question, QuestionId};
use quizset_core::selection::select_with_rng;
use quizset_core::store::MemoryScoreStore;

fn make_bank(per_tier: u64) -> QuestionBank {
    let mut bank = QuestionBank::new();
    let mut id = 1;
    for difficulty in Difficulty::ALL {
        for _ in 0..per_tier {
            bank.insert(Question {
                id: QuestionId(id),
                category: Category::Coding,
                difficulty,
                text: String::new(),
                answer: None,
                time_limits: vec![],
            })
            .unwrap();
            id += 1;
        }
    }
    bank
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let rule = CategoryRule::new(9, 2, 2, 0).unwrap();

    for per_tier in [10u64, 100, 1000] {
        let bank = make_bank(per_tier);
        let mut rng = StdRng::seed_from_u64(0);
        group.bench_function(format!("per_tier={per_tier}"), |b| {
            b.iter(|| select_with_rng(Category::Coding, black_box(&rule), &bank, &mut rng))
        });
    }

    let wide = CategoryRule::new(300, 50, 50, 50).unwrap();
    let bank = make_bank(1000);
    let mut rng = StdRng::seed_from_u64(0);
    group.bench_function("large_budget", |b| {
        b.iter(|| select_with_rng(Category::Coding, black_box(&wide), &bank, &mut rng))
    });

    group.finish();
}

fn bench_append(c: &mut Criterion) {
    let ledger = ScoreLedger::new(MemoryScoreStore::new());
    let mut qid = 0u64;

    c.bench_function("append_points/memory", |b| {
        b.iter(|| {
            qid = qid % 1000 + 1;
            ledger
                .append_points("bench", QuestionId(qid), black_box(3))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_select, bench_append);
criterion_main!(benches);
