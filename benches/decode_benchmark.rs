use acurite_rs::validate::{validate_five_in_one, validate_th592};
use acurite_rs::{CandidateFrame, CandidateRow, Dispatcher};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn benchmark_validators(c: &mut Criterion) {
    let five_in_one = CandidateRow::new(&hex_to_bytes("3bed8ef9e4fefa9001"), 65).unwrap();
    let th592 = CandidateRow::new(&hex_to_bytes("ce1c44b2093f28"), 56).unwrap();

    c.bench_function("validate_five_in_one", |b| {
        b.iter(|| {
            let _ = black_box(validate_five_in_one(black_box(five_in_one.bytes())));
        })
    });
    c.bench_function("validate_th592", |b| {
        b.iter(|| {
            let _ = black_box(validate_th592(black_box(th592.bytes())));
        })
    });
}

fn benchmark_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::default();

    // a realistic batch: repeated noise rows followed by the real frame
    let mut batch = CandidateFrame::new();
    for _ in 0..24 {
        batch.push_row(&hex_to_bytes("a55a0ff00ff0a55a"), 64).unwrap();
    }
    batch.push_row(&hex_to_bytes("ce1c44b2093f28"), 56).unwrap();

    c.bench_function("dispatch_noisy_batch", |b| {
        let mut state = dispatcher.new_state();
        b.iter(|| {
            let _ = black_box(dispatcher.decode(black_box(&batch), &mut state));
        })
    });
}

criterion_group!(benches, benchmark_validators, benchmark_dispatch);
criterion_main!(benches);
