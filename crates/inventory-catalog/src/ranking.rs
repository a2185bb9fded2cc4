//! Sort-and-limit over a catalog snapshot.
//!
//! Pure functions: no I/O, no cache access, same input same output.

use crate::model::{ProductRecord, SortKey};
use crate::CatalogSnapshot;

/// How many records the top-products query returns.
pub const TOP_N: usize = 5;

/// The first [`TOP_N`] records ordered ascending by `key`.
///
/// The sort is stable: records that compare equal keep their catalog order.
pub fn top_products(records: &[ProductRecord], key: SortKey) -> Vec<ProductRecord> {
    let mut ranked: Vec<&ProductRecord> = records.iter().collect();
    match key {
        SortKey::Price => ranked.sort_by_key(|record| record.price()),
        SortKey::Quantity => ranked.sort_by_key(|record| record.quantity()),
        SortKey::Name => ranked.sort_by(|a, b| a.name().cmp(b.name())),
    }
    ranked.into_iter().take(TOP_N).cloned().collect()
}

/// Ranks a snapshot by a raw sort key as received from a caller.
pub fn rank(snapshot: &CatalogSnapshot, key: Option<&str>) -> Vec<ProductRecord> {
    top_products(snapshot.items(), SortKey::parse(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use snapshot_cache::Snapshot;
    use tokio::time::Instant;

    fn record(name: &str, price: i64, quantity: u32) -> ProductRecord {
        ProductRecord::new(name, Decimal::from(price), quantity).unwrap()
    }

    fn sample() -> Vec<ProductRecord> {
        vec![
            record("A", 10, 1),
            record("B", 5, 2),
            record("C", 5, 9),
            record("D", 1, 0),
            record("E", 20, 3),
        ]
    }

    fn names(records: &[ProductRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_price_order_is_stable_on_ties() {
        let ranked = top_products(&sample(), SortKey::Price);
        assert_eq!(names(&ranked), vec!["D", "B", "C", "A", "E"]);
    }

    #[test]
    fn test_quantity_order() {
        let ranked = top_products(&sample(), SortKey::Quantity);
        assert_eq!(names(&ranked), vec!["D", "A", "B", "E", "C"]);
    }

    #[test]
    fn test_unknown_or_missing_key_orders_by_name() {
        let mut records = sample();
        records.reverse();
        records.push(record("Aardvark", 3, 3));
        let snapshot = Snapshot::new(records, Instant::now());

        let expected = vec!["A", "Aardvark", "B", "C", "D"];
        assert_eq!(names(&rank(&snapshot, Some("bogus"))), expected);
        assert_eq!(names(&rank(&snapshot, None)), expected);
    }

    #[test]
    fn test_limits_to_top_n() {
        let records: Vec<_> = (0..12).map(|i| record(&format!("P{:02}", i), 12 - i, 1)).collect();
        let ranked = top_products(&records, SortKey::Price);

        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(names(&ranked), vec!["P11", "P10", "P09", "P08", "P07"]);
    }

    #[test]
    fn test_fewer_records_than_limit() {
        let records = vec![record("Only", 1, 1)];
        assert_eq!(top_products(&records, SortKey::Name).len(), 1);
        assert!(top_products(&[], SortKey::Price).is_empty());
    }

    #[test]
    fn test_price_compares_numerically_across_scales() {
        let records = vec![
            ProductRecord::new("Ten", "10.00".parse().unwrap(), 1).unwrap(),
            ProductRecord::new("Nine", "9.5".parse().unwrap(), 1).unwrap(),
            ProductRecord::new("Cheap", "0.999".parse().unwrap(), 1).unwrap(),
        ];
        let ranked = top_products(&records, SortKey::Price);
        assert_eq!(names(&ranked), vec!["Cheap", "Nine", "Ten"]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let snapshot = Snapshot::new(sample(), Instant::now());
        for key in [Some("price"), Some("quantity"), Some("name"), None] {
            assert_eq!(rank(&snapshot, key), rank(&snapshot, key));
        }
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot.items()[0].name(), "A");
    }
}
