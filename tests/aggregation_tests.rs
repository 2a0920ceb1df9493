use chrono::NaiveDate;
use gexpenses_core::ledger::{aggregate, aggregate_until, Granularity, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sale(y: i32, m: u32, d: u32, amount: f64) -> Transaction {
    Transaction::sale(date(y, m, d), "Consulting", amount, "Acme").unwrap()
}

fn expense(y: i32, m: u32, d: u32, amount: f64) -> Transaction {
    Transaction::expense(date(y, m, d), "Hosting", amount, "Infra").unwrap()
}

#[test]
fn empty_input_yields_no_buckets() {
    assert!(aggregate(&[], Granularity::Monthly).is_empty());
    assert!(aggregate_until(&[], Granularity::Daily, date(2024, 6, 1)).is_empty());
}

#[test]
fn single_transaction_yields_exactly_one_bucket() {
    let buckets = aggregate(&[sale(2024, 5, 17, 80.0)], Granularity::Weekly);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].sales, 80.0);
    assert_eq!(buckets[0].expenses, 0.0);
    assert_eq!(buckets[0].profit, 80.0);
}

#[test]
fn monthly_example_produces_two_buckets() {
    let txns = vec![
        sale(2024, 1, 2, 100.0),
        expense(2024, 1, 15, 40.0),
        sale(2024, 2, 1, 200.0),
    ];
    let buckets = aggregate(&txns, Granularity::Monthly);
    assert_eq!(buckets.len(), 2);

    assert_eq!(buckets[0].key, "2024-01");
    assert_eq!(buckets[0].label, "Jan 2024");
    assert_eq!(buckets[0].sales, 100.0);
    assert_eq!(buckets[0].expenses, 40.0);
    assert_eq!(buckets[0].profit, 60.0);

    assert_eq!(buckets[1].key, "2024-02");
    assert_eq!(buckets[1].sales, 200.0);
    assert_eq!(buckets[1].expenses, 0.0);
    assert_eq!(buckets[1].profit, 200.0);
}

#[test]
fn bucket_totals_preserve_input_sums() {
    let txns = vec![
        sale(2023, 11, 3, 120.0),
        expense(2023, 12, 24, 45.0),
        sale(2024, 1, 9, 310.0),
        expense(2024, 2, 2, 15.0),
        sale(2024, 2, 28, 5.0),
    ];
    for granularity in [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
        Granularity::Yearly,
    ] {
        let buckets = aggregate(&txns, granularity);
        let sales: f64 = buckets.iter().map(|b| b.sales).sum();
        let expenses: f64 = buckets.iter().map(|b| b.expenses).sum();
        assert_eq!(sales, 435.0, "sales lost in {:?} bucketing", granularity);
        assert_eq!(expenses, 60.0, "expenses lost in {:?} bucketing", granularity);
        for bucket in &buckets {
            assert_eq!(bucket.profit, bucket.sales - bucket.expenses);
        }
    }
}

#[test]
fn aggregation_is_idempotent() {
    let txns = vec![sale(2024, 1, 2, 100.0), expense(2024, 3, 15, 40.0)];
    let first = aggregate(&txns, Granularity::Weekly);
    let second = aggregate(&txns, Granularity::Weekly);
    assert_eq!(first, second);
}

#[test]
fn sunday_joins_the_preceding_mondays_week() {
    // Monday 2024-01-01 and Sunday 2024-01-07 share a week; Monday
    // 2024-01-08 starts the next one.
    let txns = vec![
        sale(2024, 1, 1, 10.0),
        sale(2024, 1, 7, 20.0),
        sale(2024, 1, 8, 40.0),
    ];
    let buckets = aggregate(&txns, Granularity::Weekly);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].key, "2024-01-01");
    assert_eq!(buckets[0].sales, 30.0);
    assert_eq!(buckets[1].key, "2024-01-08");
    assert_eq!(buckets[1].sales, 40.0);
}

#[test]
fn interior_gap_periods_are_emitted_zeroed() {
    let txns = vec![sale(2024, 1, 10, 100.0), sale(2024, 3, 10, 50.0)];
    let buckets = aggregate(&txns, Granularity::Monthly);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[1].key, "2024-02");
    assert_eq!(buckets[1].sales, 0.0);
    assert_eq!(buckets[1].expenses, 0.0);
    assert_eq!(buckets[1].profit, 0.0);
}

#[test]
fn daily_buckets_cover_every_day_in_range() {
    let txns = vec![sale(2024, 1, 1, 10.0), sale(2024, 1, 4, 20.0)];
    let buckets = aggregate(&txns, Granularity::Daily);
    let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
}

#[test]
fn yearly_buckets_span_calendar_years() {
    let txns = vec![sale(2022, 6, 1, 10.0), expense(2024, 2, 1, 5.0)];
    let buckets = aggregate(&txns, Granularity::Yearly);
    let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, vec!["2022", "2023", "2024"]);
    assert_eq!(buckets[2].profit, -5.0);
}

#[test]
fn aggregate_until_emits_trailing_zero_buckets() {
    let txns = vec![sale(2024, 1, 15, 100.0)];
    let buckets = aggregate_until(&txns, Granularity::Monthly, date(2024, 3, 10));
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].sales, 100.0);
    assert_eq!(buckets[1].sales, 0.0);
    assert_eq!(buckets[2].sales, 0.0);
}

#[test]
fn aggregate_until_clamps_an_end_before_the_data() {
    let txns = vec![sale(2024, 1, 15, 100.0)];
    let buckets = aggregate_until(&txns, Granularity::Monthly, date(2023, 11, 1));
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].key, "2024-01");
}

#[test]
fn buckets_are_chronologically_ascending() {
    let txns = vec![sale(2024, 3, 1, 1.0), sale(2024, 1, 1, 1.0), sale(2024, 2, 1, 1.0)];
    let buckets = aggregate(&txns, Granularity::Monthly);
    let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}
