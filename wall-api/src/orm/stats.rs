//! Dashboard aggregation over the submissions table.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use serde::Serialize;
use ts_rs::TS;

/// Submissions received on one calendar day (UTC).
#[derive(Serialize, Debug, PartialEq, TS)]
#[ts(export)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: i64,
}

#[derive(Serialize, Debug, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub total_submissions: i64,
    pub unviewed_count: i64,
    pub today_count: i64,
    pub week_count: i64,
    pub category_breakdown: BTreeMap<String, i64>,
    pub sentiment_breakdown: BTreeMap<String, i64>,
    /// Per-day counts over the trailing 7 days, ascending by date. Days
    /// with no submissions are omitted.
    pub recent_activity: Vec<DailyCount>,
}

/// Computes the full dashboard snapshot in one pass over the table.
///
/// "Today" starts at UTC midnight; the week window covers today plus the
/// six preceding days. All zeros and empty maps on an empty table.
pub fn dashboard_stats(
    conn: &mut SqliteConnection,
) -> Result<DashboardStats, diesel::result::Error> {
    use crate::schema::submissions::dsl::*;

    let now = Utc::now().naive_utc();
    let today_start = midnight_of(now);
    let week_start = today_start - Duration::days(6);

    let total_submissions: i64 = submissions.count().get_result(conn)?;
    let unviewed_count: i64 = submissions
        .filter(viewed.eq(false))
        .count()
        .get_result(conn)?;
    let today_count: i64 = submissions
        .filter(created_at.ge(today_start))
        .count()
        .get_result(conn)?;
    let week_count: i64 = submissions
        .filter(created_at.ge(week_start))
        .count()
        .get_result(conn)?;

    let category_breakdown: BTreeMap<String, i64> = submissions
        .group_by(category)
        .select((category, count_star()))
        .load::<(String, i64)>(conn)?
        .into_iter()
        .collect();

    let sentiment_breakdown: BTreeMap<String, i64> = submissions
        .group_by(sentiment)
        .select((sentiment, count_star()))
        .load::<(String, i64)>(conn)?
        .into_iter()
        .collect();

    // BTreeMap keyed by ISO date gives the ascending order for free.
    let mut per_day: BTreeMap<String, i64> = BTreeMap::new();
    let week_rows: Vec<NaiveDateTime> = submissions
        .filter(created_at.ge(week_start))
        .select(created_at)
        .load(conn)?;
    for ts in week_rows {
        *per_day.entry(ts.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
    }
    let recent_activity = per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();

    Ok(DashboardStats {
        total_submissions,
        unviewed_count,
        today_count,
        week_count,
        category_breakdown,
        sentiment_breakdown,
        recent_activity,
    })
}

fn midnight_of(ts: NaiveDateTime) -> NaiveDateTime {
    // and_hms_opt(0,0,0) on a valid date never fails.
    ts.date()
        .and_hms_opt(0, 0, 0)
        .unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_midnight_of() {
        let ts = NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_opt(17, 45, 12)
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(midnight_of(ts), expected);
    }
}
