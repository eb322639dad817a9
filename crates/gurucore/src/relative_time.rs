//! Human-readable elapsed time ("3 hours ago", "for 2 dager siden").
//!
//! Bucketing follows the conventional chat-bot thresholds: every unit is
//! rounded first, then the smallest bucket whose threshold holds wins.

use chrono::{DateTime, TimeZone, Utc};
use fluent_templates::fluent_bundle::FluentArgs;
use unic_langid::LanguageIdentifier;

use crate::i18n;

/// Seconds below which we just say "a few seconds".
const SECONDS_THRESHOLD: f64 = 45.0;
/// Minutes below which we count minutes.
const MINUTES_THRESHOLD: f64 = 45.0;
/// Hours below which we count hours.
const HOURS_THRESHOLD: f64 = 22.0;
/// Days below which we count days.
const DAYS_THRESHOLD: f64 = 26.0;
/// Months below which we count months.
const MONTHS_THRESHOLD: f64 = 11.0;

/// Average Gregorian month, expressed as days per 4800 months.
const DAYS_PER_4800_MONTHS: f64 = 146_097.0;

/// Bucket an elapsed duration falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    FewSeconds,
    Minute,
    Minutes(i64),
    Hour,
    Hours(i64),
    Day,
    Days(i64),
    Month,
    Months(i64),
    Year,
    Years(i64),
}

impl RelativeUnit {
    /// Classifies an absolute duration in whole seconds.
    pub fn classify(elapsed_secs: u64) -> Self {
        Self::classify_millis(elapsed_secs.saturating_mul(1_000))
    }

    /// Classifies an absolute duration in milliseconds.
    pub fn classify_millis(elapsed_ms: u64) -> Self {
        let secs = elapsed_ms as f64 / 1_000.0;
        let seconds = secs.round();
        let minutes = (secs / 60.0).round();
        let hours = (secs / 3_600.0).round();
        let days_exact = secs / 86_400.0;
        let days = days_exact.round();
        let months_exact = days_exact * 4_800.0 / DAYS_PER_4800_MONTHS;
        let months = months_exact.round();
        let years = (months_exact / 12.0).round();

        if seconds < SECONDS_THRESHOLD {
            RelativeUnit::FewSeconds
        } else if minutes <= 1.0 {
            RelativeUnit::Minute
        } else if minutes < MINUTES_THRESHOLD {
            RelativeUnit::Minutes(minutes as i64)
        } else if hours <= 1.0 {
            RelativeUnit::Hour
        } else if hours < HOURS_THRESHOLD {
            RelativeUnit::Hours(hours as i64)
        } else if days <= 1.0 {
            RelativeUnit::Day
        } else if days < DAYS_THRESHOLD {
            RelativeUnit::Days(days as i64)
        } else if months <= 1.0 {
            RelativeUnit::Month
        } else if months < MONTHS_THRESHOLD {
            RelativeUnit::Months(months as i64)
        } else if years <= 1.0 {
            RelativeUnit::Year
        } else {
            RelativeUnit::Years(years as i64)
        }
    }

    fn localize(self, lang: &LanguageIdentifier) -> String {
        let counted = |key: &str, count: i64| {
            let mut args = FluentArgs::new();
            args.set("count", count);
            i18n::t_args(lang, key, &args)
        };

        match self {
            RelativeUnit::FewSeconds => i18n::t(lang, "time-seconds"),
            RelativeUnit::Minute => i18n::t(lang, "time-minute"),
            RelativeUnit::Minutes(n) => counted("time-minutes", n),
            RelativeUnit::Hour => i18n::t(lang, "time-hour"),
            RelativeUnit::Hours(n) => counted("time-hours", n),
            RelativeUnit::Day => i18n::t(lang, "time-day"),
            RelativeUnit::Days(n) => counted("time-days", n),
            RelativeUnit::Month => i18n::t(lang, "time-month"),
            RelativeUnit::Months(n) => counted("time-months", n),
            RelativeUnit::Year => i18n::t(lang, "time-year"),
            RelativeUnit::Years(n) => counted("time-years", n),
        }
    }
}

/// Phrase for `then` as seen from `now`: past gets "... ago", future "in ...".
pub fn relative_phrase<Tz: TimeZone>(lang: &LanguageIdentifier, then: &DateTime<Tz>, now: &DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then.with_timezone(&Utc));
    let elapsed = delta.num_milliseconds().unsigned_abs();
    let mut args = FluentArgs::new();
    args.set("duration", RelativeUnit::classify_millis(elapsed).localize(lang));

    if delta.num_milliseconds() >= 0 {
        i18n::t_args(lang, "time-past", &args)
    } else {
        i18n::t_args(lang, "time-future", &args)
    }
}

/// Phrase for `then` relative to the current time.
pub fn from_now<Tz: TimeZone>(lang: &LanguageIdentifier, then: &DateTime<Tz>) -> String {
    relative_phrase(lang, then, &Utc::now())
}

/// Phrase for a Unix timestamp (seconds) relative to the current time.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn from_unix(lang: &LanguageIdentifier, epoch_secs: i64) -> Option<String> {
    let then = Utc.timestamp_opt(epoch_secs, 0).single()?;
    Some(from_now(lang, &then))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::lang_from_code;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(RelativeUnit::classify(0), RelativeUnit::FewSeconds);
        assert_eq!(RelativeUnit::classify(44), RelativeUnit::FewSeconds);
        assert_eq!(RelativeUnit::classify(45), RelativeUnit::Minute);
        assert_eq!(RelativeUnit::classify_millis(44_499), RelativeUnit::FewSeconds);
        assert_eq!(RelativeUnit::classify_millis(44_500), RelativeUnit::Minute);
        assert_eq!(RelativeUnit::classify(89), RelativeUnit::Minute);
        assert_eq!(RelativeUnit::classify(90), RelativeUnit::Minutes(2));
        assert_eq!(RelativeUnit::classify(44 * 60), RelativeUnit::Minutes(44));
        assert_eq!(RelativeUnit::classify(45 * 60), RelativeUnit::Hour);
        assert_eq!(RelativeUnit::classify(3 * 3_600), RelativeUnit::Hours(3));
        assert_eq!(RelativeUnit::classify(22 * 3_600), RelativeUnit::Day);
        assert_eq!(RelativeUnit::classify(36 * 3_600), RelativeUnit::Days(2));
        assert_eq!(RelativeUnit::classify(25 * 86_400), RelativeUnit::Days(25));
        assert_eq!(RelativeUnit::classify(26 * 86_400), RelativeUnit::Month);
        assert_eq!(RelativeUnit::classify(100 * 86_400), RelativeUnit::Months(3));
        assert_eq!(RelativeUnit::classify(340 * 86_400), RelativeUnit::Year);
        assert_eq!(RelativeUnit::classify(3 * 365 * 86_400), RelativeUnit::Years(3));
    }

    #[test]
    fn test_past_phrase_per_language() {
        let now = Utc::now();
        let then = now - Duration::hours(3);

        assert_eq!(relative_phrase(&lang_from_code("en"), &then, &now), "3 hours ago");
        assert_eq!(relative_phrase(&lang_from_code("nb"), &then, &now), "3 timer siden");
        assert_eq!(relative_phrase(&lang_from_code("nn"), &then, &now), "3 timar sidan");
    }

    #[test]
    fn test_single_units() {
        let en = lang_from_code("en");
        let now = Utc::now();

        assert_eq!(relative_phrase(&en, &(now - Duration::seconds(5)), &now), "a few seconds ago");
        assert_eq!(relative_phrase(&en, &(now - Duration::minutes(1)), &now), "a minute ago");
        assert_eq!(relative_phrase(&en, &(now - Duration::hours(1)), &now), "an hour ago");
        assert_eq!(relative_phrase(&en, &(now - Duration::hours(30)), &now), "a day ago");
    }

    #[test]
    fn test_sub_second_part_counts_when_rounding() {
        let en = lang_from_code("en");
        let now = Utc::now();

        assert_eq!(
            relative_phrase(&en, &(now - Duration::milliseconds(44_700)), &now),
            "a minute ago"
        );
        assert_eq!(
            relative_phrase(&en, &(now - Duration::milliseconds(44_300)), &now),
            "a few seconds ago"
        );
    }

    #[test]
    fn test_future_phrase() {
        let now = Utc::now();
        let then = now + Duration::minutes(10);

        assert_eq!(relative_phrase(&lang_from_code("en"), &then, &now), "in 10 minutes");
        assert_eq!(relative_phrase(&lang_from_code("nb"), &then, &now), "om 10 minutter");
    }

    #[test]
    fn test_from_unix_out_of_range() {
        assert!(from_unix(&lang_from_code("en"), i64::MAX).is_none());
        assert!(from_unix(&lang_from_code("en"), 1_479_142_931).is_some());
    }
}
