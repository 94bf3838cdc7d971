criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_log_binomial,
        computing_exact_pvalue,
        computing_chernoff_pvalue,
        computing_union_bound_factor,
        profiling_synthetic_dataset,
        certifying_binomial_tfis,
        computing_negative_border,
}

fn computing_log_binomial(c: &mut criterion::Criterion) {
    c.bench_function("log_binomial(10_000, 4_000)", |b| {
        b.iter(|| tfi::stats::log_binomial(10_000, 4_000))
    });
}

fn computing_exact_pvalue(c: &mut criterion::Criterion) {
    c.bench_function("exact pvalue, n=10_000", |b| {
        b.iter(|| tfi::stats::pvalue(tfi::stats::PValueMode::Exact, 4_200.0, 10_000, 0.4))
    });
}

fn computing_chernoff_pvalue(c: &mut criterion::Criterion) {
    c.bench_function("chernoff pvalue, n=10_000", |b| {
        b.iter(|| tfi::stats::pvalue(tfi::stats::PValueMode::Chernoff, 4_200.0, 10_000, 0.4))
    });
}

fn computing_union_bound_factor(c: &mut criterion::Criterion) {
    c.bench_function("union_bound_factor(1_000, 20)", |b| {
        b.iter(|| tfi::stats::union_bound_factor(1_000, 20))
    });
}

fn synthetic_dataset() -> String {
    use std::fmt::Write;
    let mut out = String::new();
    for t in 0..5_000u32 {
        let base = t % 200;
        writeln!(out, "{} {} {}", base, base + 1, base + 2).unwrap();
    }
    out
}

fn profiling_synthetic_dataset(c: &mut criterion::Criterion) {
    let data = synthetic_dataset();
    c.bench_function("profile_dataset, 5_000 transactions", |b| {
        b.iter(|| tfi::profile::profile_dataset(std::io::Cursor::new(data.as_bytes())).unwrap())
    });
}

fn certifying_binomial_tfis(c: &mut criterion::Criterion) {
    use std::collections::{BTreeSet, HashMap};
    let stats = tfi::profile::DatasetStats {
        size: 10_000,
        items: BTreeSet::new(),
        numitems: 200,
        maxlen: 3,
        maxsupp: 9_000,
        lengths: HashMap::new(),
        dindex: 1,
    };
    let supports: Vec<tfi::io::ItemsetSupport> = (0u32..200)
        .map(|item| tfi::io::ItemsetSupport {
            itemset: tfi::itemsets::Itemset::singleton(item),
            support: 500 + (item as u64 * 10) % 9_000,
        })
        .collect();
    let params = tfi::engine::BinomialParams {
        delta: 0.05,
        theta: 0.05,
        mode: tfi::stats::PValueMode::Chernoff,
        use_additional_knowledge: false,
    };
    c.bench_function("binomial_tfi, 200 singleton candidates", |b| {
        b.iter(|| tfi::engine::binomial_tfi(&supports, &stats, &params))
    });
}

fn computing_negative_border(c: &mut criterion::Criterion) {
    let frequent: tfi::itemsets::ItemsetCollection = (0u32..50)
        .map(|i| (tfi::itemsets::Itemset::singleton(i), 0.5))
        .chain(std::iter::once((
            tfi::itemsets::Itemset::new((0..10).collect()),
            0.3,
        )))
        .collect();
    let maximal_itemsets = vec![tfi::itemsets::Itemset::new((0..10).collect())];
    let frequent_items: Vec<u32> = (0..50).collect();
    c.bench_function("negative_border, 50-item universe", |b| {
        b.iter(|| tfi::itemsets::negative_border(&frequent, &maximal_itemsets, &frequent_items))
    });
}
