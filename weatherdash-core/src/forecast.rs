//! Reduction of 3-hourly forecast samples to one entry per calendar day.

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::model::{DailyForecast, ForecastSample};

/// Maximum number of days kept in the daily forecast strip.
pub const MAX_DAYS: usize = 5;

/// Group samples by calendar day in the viewer's local time zone.
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    aggregate_in(samples, &Local)
}

/// Keep the first sample of each calendar day (as seen in `tz`), in input
/// order, stopping after [`MAX_DAYS`] distinct days.
///
/// Input is assumed chronological; nothing is re-sorted.
pub fn aggregate_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::with_capacity(MAX_DAYS);

    for sample in samples {
        let Some(date) = local_date(sample.timestamp_unix, tz) else {
            tracing::warn!(
                timestamp = sample.timestamp_unix,
                "Skipping forecast sample with out-of-range timestamp"
            );
            continue;
        };

        if days.iter().any(|day| day.date == date) {
            continue;
        }

        days.push(DailyForecast { date, sample: sample.clone() });
        if days.len() == MAX_DAYS {
            break;
        }
    }

    days
}

fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz).date_naive())
}
