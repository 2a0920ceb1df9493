use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Calendar period length used when bucketing transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    /// Floors a date to the start of its period. Weeks start on Monday
    /// (ISO convention), months on day 1, years on January 1.
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Weekly => {
                let delta = date.weekday().num_days_from_monday() as i64;
                date - Duration::days(delta)
            }
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
            Granularity::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Start of the period following the given period start.
    pub fn next_period(self, start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => start + Duration::days(1),
            Granularity::Weekly => start + Duration::weeks(1),
            Granularity::Monthly => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start)
            }
            Granularity::Yearly => {
                NaiveDate::from_ymd_opt(start.year() + 1, 1, 1).unwrap_or(start)
            }
        }
    }

    /// Stable grouping key for the period containing `date`. Keys are ISO
    /// ordered, so their lexicographic order is chronological.
    pub fn key(self, date: NaiveDate) -> String {
        let start = self.period_start(date);
        match self {
            Granularity::Daily | Granularity::Weekly => start.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => start.format("%Y-%m").to_string(),
            Granularity::Yearly => start.format("%Y").to_string(),
        }
    }

    /// Human-readable axis label for a period start.
    pub fn label(self, start: NaiveDate) -> String {
        match self {
            Granularity::Daily | Granularity::Weekly => start.format("%b %-d").to_string(),
            Granularity::Monthly => start.format("%b %Y").to_string(),
            Granularity::Yearly => start.format("%Y").to_string(),
        }
    }
}

/// Aggregation result for one calendar period. Recomputed on every call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    pub key: String,
    pub label: String,
    pub sales: f64,
    pub expenses: f64,
    pub profit: f64,
}

impl PeriodBucket {
    fn zeroed(key: String, label: String) -> Self {
        Self {
            key,
            label,
            sales: 0.0,
            expenses: 0.0,
            profit: 0.0,
        }
    }
}

/// Buckets transactions into calendar periods spanning the data range,
/// gap-filling periods with zero activity. The range ends at the latest
/// transaction date. Returns buckets in chronological order; an empty
/// input yields no buckets.
pub fn aggregate(transactions: &[Transaction], granularity: Granularity) -> Vec<PeriodBucket> {
    let Some(end) = transactions.iter().map(|t| t.occurred_at).max() else {
        return Vec::new();
    };
    aggregate_range(transactions, granularity, end)
}

/// Like [`aggregate`], but extends the range to `end` (typically "today"),
/// emitting trailing zero buckets past the last transaction. An `end`
/// before the data range is clamped to the latest transaction date.
pub fn aggregate_until(
    transactions: &[Transaction],
    granularity: Granularity,
    end: NaiveDate,
) -> Vec<PeriodBucket> {
    let Some(latest) = transactions.iter().map(|t| t.occurred_at).max() else {
        return Vec::new();
    };
    aggregate_range(transactions, granularity, end.max(latest))
}

fn aggregate_range(
    transactions: &[Transaction],
    granularity: Granularity,
    end: NaiveDate,
) -> Vec<PeriodBucket> {
    let Some(start) = transactions.iter().map(|t| t.occurred_at).min() else {
        return Vec::new();
    };

    let mut buckets: BTreeMap<String, PeriodBucket> = BTreeMap::new();
    let mut cursor = granularity.period_start(start);
    let last = granularity.period_start(end);
    while cursor <= last {
        buckets.insert(
            granularity.key(cursor),
            PeriodBucket::zeroed(granularity.key(cursor), granularity.label(cursor)),
        );
        cursor = granularity.next_period(cursor);
    }

    for txn in transactions {
        let key = granularity.key(txn.occurred_at);
        match buckets.get_mut(&key) {
            Some(bucket) => {
                if txn.is_sale() {
                    bucket.sales += txn.amount;
                } else {
                    bucket.expenses += txn.amount;
                }
            }
            None => {
                // Cannot happen while the range spans all transactions, but
                // a stray record must never poison the whole report.
                tracing::warn!(id = %txn.id, %key, "transaction outside aggregation range, skipped");
            }
        }
    }

    for bucket in buckets.values_mut() {
        bucket.profit = bucket.sales - bucket.expenses;
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_floor_lands_on_monday() {
        // 2024-01-07 is a Sunday; its week begins Monday 2024-01-01.
        let start = Granularity::Weekly.period_start(date(2024, 1, 7));
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(Granularity::Weekly.period_start(date(2024, 1, 1)), start);
    }

    #[test]
    fn monthly_floor_and_step() {
        assert_eq!(
            Granularity::Monthly.period_start(date(2024, 12, 19)),
            date(2024, 12, 1)
        );
        assert_eq!(
            Granularity::Monthly.next_period(date(2024, 12, 1)),
            date(2025, 1, 1)
        );
    }

    #[test]
    fn keys_are_chronologically_ordered() {
        assert!(Granularity::Monthly.key(date(2024, 9, 1)) < Granularity::Monthly.key(date(2024, 10, 1)));
        assert!(Granularity::Daily.key(date(2024, 1, 9)) < Granularity::Daily.key(date(2024, 1, 10)));
    }

    #[test]
    fn labels_follow_granularity() {
        assert_eq!(Granularity::Daily.label(date(2024, 1, 2)), "Jan 2");
        assert_eq!(Granularity::Monthly.label(date(2024, 1, 1)), "Jan 2024");
        assert_eq!(Granularity::Yearly.label(date(2024, 1, 1)), "2024");
    }
}
