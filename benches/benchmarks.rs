use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bwt_rust::index::fid::FidIndex;
use bwt_rust::index::{bwt, sa};

fn make_text(len: usize) -> Vec<u8> {
    // 符号取 1..=250，0 留给终结符
    let mut x: u32 = 42;
    let mut v = Vec::with_capacity(len);
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        v.push((1 + (x >> 16) % 250) as u8);
    }
    v
}

fn make_terminated_text(len: usize) -> Vec<u8> {
    let mut text = make_text(len);
    text.push(0);
    text
}

fn bench_build_sa(c: &mut Criterion) {
    let text = make_terminated_text(10_000);

    c.bench_function("build_sa_10k", |b| {
        b.iter(|| {
            black_box(sa::build_sa(black_box(&text)).unwrap());
        })
    });
}

fn bench_build_bwt(c: &mut Criterion) {
    let text = make_terminated_text(10_000);
    let sa_arr = sa::build_sa(&text).unwrap();

    c.bench_function("build_bwt_10k", |b| {
        b.iter(|| {
            black_box(bwt::build_bwt(black_box(&text), black_box(&sa_arr)));
        })
    });
}

fn bench_invert_bwt(c: &mut Criterion) {
    let text = make_terminated_text(10_000);
    let sa_arr = sa::build_sa(&text).unwrap();
    let encoded = bwt::build_bwt(&text, &sa_arr);

    c.bench_function("invert_bwt_10k", |b| {
        b.iter(|| {
            black_box(bwt::invert_bwt(black_box(&encoded), 256).unwrap());
        })
    });
}

fn bench_fid_build(c: &mut Criterion) {
    let bytes = make_text(65_536);

    c.bench_function("fid_build_64k", |b| {
        b.iter(|| {
            let mut fid = FidIndex::new(black_box(bytes.clone()));
            fid.build();
            black_box(fid);
        })
    });
}

fn bench_fid_rank(c: &mut Criterion) {
    let mut fid = FidIndex::new(make_text(65_536));
    fid.build();
    let n_bits = fid.len_bits();

    c.bench_function("fid_rank", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i.wrapping_mul(31) + 12_345) % (n_bits + 1);
            black_box(fid.rank(black_box(i), 1).unwrap());
        })
    });
}

fn bench_fid_select(c: &mut Criterion) {
    let mut fid = FidIndex::new(make_text(65_536));
    fid.build();
    let total = fid.rank(fid.len_bits(), 1).unwrap();

    c.bench_function("fid_select", |b| {
        let mut n = 0usize;
        b.iter(|| {
            n = n % total + 1;
            black_box(fid.select(black_box(n), 1).unwrap());
        })
    });
}

criterion_group!(
    benches,
    bench_build_sa,
    bench_build_bwt,
    bench_invert_bwt,
    bench_fid_build,
    bench_fid_rank,
    bench_fid_select
);
criterion_main!(benches);
