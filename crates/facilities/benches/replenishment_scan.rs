//! Benchmarks for the facility-wide replenishment scans.
//!
//! Run with: `cargo bench -p superstore-facilities`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use superstore_catalog::{Category, Item, ReplenishmentParams, Subcategory};
use superstore_core::{CategoryId, ItemCode, StoreId, SubcategoryId, WarehouseId};
use superstore_facilities::{Facility, Store, Warehouse};

/// Build a tree of `categories × 10 subcategories × 50 items`.
fn populate<F: Facility>(facility: &mut F, categories: usize) {
    for c in 0..categories {
        let category_id = CategoryId::new(format!("C{c:04}"));
        let mut category = Category::new(category_id.clone(), format!("Category {c}"));
        for s in 0..10 {
            let sub_id = SubcategoryId::new(format!("C{c:04}-S{s:02}"));
            let mut sub = Subcategory::new(sub_id.clone(), format!("Sub {s}"), category_id.clone());
            for i in 0..50 {
                let n = (c * 500 + s * 50 + i) as f64;
                let params = ReplenishmentParams {
                    avg_daily_usage: 1.0 + (n % 17.0),
                    avg_lead_time_days: 1.0 + (n % 5.0),
                    max_daily_usage: 2.0 + (n % 19.0),
                    max_lead_time_days: 2.0 + (n % 7.0),
                    ..ReplenishmentParams::default()
                };
                sub.add_item(
                    Item::new(
                        ItemCode::new(format!("C{c:04}-S{s:02}-I{i:02}")),
                        format!("Item {i}"),
                        sub_id.clone(),
                    )
                    .with_params(params)
                    .with_inventory_level((n as i64 * 7) % 200),
                );
            }
            category.add_subcategory(sub);
        }
        facility.add_category(category);
    }
}

fn bench_reorder_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("warehouse_reorder_scan");

    for categories in [1usize, 10, 40] {
        let mut warehouse = Warehouse::new(WarehouseId::new("W001"), "Central");
        populate(&mut warehouse, categories);

        group.bench_with_input(
            BenchmarkId::from_parameter(categories * 500),
            &warehouse,
            |b, warehouse| {
                b.iter(|| black_box(warehouse.items_needing_reorder().len()));
            },
        );
    }

    group.finish();
}

fn bench_out_of_stock_scan(c: &mut Criterion) {
    let mut store = Store::new(StoreId::new("S001"), "City Store");
    populate(&mut store, 10);

    c.bench_function("store_out_of_stock_scan_5000_items", |b| {
        b.iter(|| black_box(store.out_of_stock_items().len()));
    });
}

criterion_group!(benches, bench_reorder_scan, bench_out_of_stock_scan);
criterion_main!(benches);
