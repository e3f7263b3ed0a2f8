// Benchmark for stripe aggregation and allocation
// Measures a full week classification at each zoom level, cold and cached

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weekly_planner::models::grid::{Granularity, DAYS_PER_WEEK, SLOTS_PER_DAY};
use weekly_planner::models::plan::Plan;
use weekly_planner::services::aggregation::{classify_day, StripeCache};
use weekly_planner::services::allocation::AllocationSummary;
use weekly_planner::services::paint::{PaintEngine, PointerButton};

/// A busy week: every activity painted in short runs so most coarse rows
/// are mixed.
fn busy_plan() -> Plan {
    let mut plan = Plan::new("Bench week");
    let ids = plan.activities().ids();
    let mut paint = PaintEngine::new();

    for day in 0..DAYS_PER_WEEK {
        for slot in (0..SLOTS_PER_DAY).step_by(2) {
            let id = &ids[(day + slot / 2) % ids.len()];
            plan.select_activity(Some(id));
            paint.begin_stroke(&mut plan, day, slot, PointerButton::Primary, Granularity::FiveMinutes);
            paint.end_stroke();
        }
    }
    plan
}

fn bench_classify_week(c: &mut Criterion) {
    let plan = busy_plan();
    let mut group = c.benchmark_group("classify_week");

    for granularity in Granularity::ALL.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(granularity.label()),
            granularity,
            |b, &granularity| {
                b.iter(|| {
                    for day in 0..DAYS_PER_WEEK {
                        black_box(classify_day(black_box(&plan), day, granularity));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_cached_week(c: &mut Criterion) {
    let plan = busy_plan();
    let mut cache = StripeCache::new();
    // Warm the cache once; iterations then only hit entries
    cache.week(&plan, Granularity::FifteenMinutes);

    c.bench_function("cached_week_15m", |b| {
        b.iter(|| black_box(cache.week(black_box(&plan), Granularity::FifteenMinutes)));
    });
}

fn bench_allocation(c: &mut Criterion) {
    let plan = busy_plan();

    c.bench_function("allocation_summary", |b| {
        b.iter(|| AllocationSummary::compute(black_box(&plan)));
    });
}

criterion_group!(
    benches,
    bench_classify_week,
    bench_cached_week,
    bench_allocation
);
criterion_main!(benches);
