// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0


use criterion::{criterion_group, criterion_main};
use switch_to_latest_bench::{bench_switch_to_latest, bench_switch_to_latest_bounded};

criterion_group!(
    flow_benches,
    bench_switch_to_latest,
    bench_switch_to_latest_bounded
);
criterion_main!(flow_benches);
