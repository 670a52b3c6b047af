use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keywalk::counting::{count, Memo};
use keywalk::enumerate::Enumerator;
use keywalk::key::Key;
use keywalk::key::KeyId;
use keywalk::keyboard::Keyboard;

/// A small ring keyboard (26 keys, each neighboring the next) used to
/// exercise both engines over a nontrivial branching graph.
fn ring_keyboard(size: usize) -> Keyboard {
    let letters: Vec<char> = ('a'..).take(size).collect();
    let mut keys: Vec<Key> = letters
        .iter()
        .map(|&c| Key::init_character(c, vec![], true))
        .collect();
    for i in 0..size {
        let next = (i + 1) % size;
        let prev = (i + size - 1) % size;
        keys[i].init_neighbors(vec![KeyId(prev), KeyId(next)]);
    }
    Keyboard::new(keys)
}

fn count_dry_run(c: &mut Criterion) {
    let kb = ring_keyboard(26);
    c.bench_function("COUNT DRY RUN OVER RING KEYBOARD", |b| {
        b.iter(|| {
            let mut memo = Memo::new();
            for start in kb.ids() {
                count(&kb, &mut memo, black_box(start), 1, 8).unwrap();
            }
        })
    });
}

fn enumerate_ring(c: &mut Criterion) {
    let kb = ring_keyboard(26);
    let start = kb.find_by_char('a').unwrap();
    c.bench_function("ENUMERATE OVER RING KEYBOARD", |b| {
        b.iter(|| {
            let mut total = 0usize;
            let mut enumerator = Enumerator::seed(&kb, black_box(start), 1, 6);
            enumerator
                .run(&mut |_: &str| total += 1)
                .unwrap();
            total
        })
    });
}

criterion_group!(benches, count_dry_run, enumerate_ring);
criterion_main!(benches);
