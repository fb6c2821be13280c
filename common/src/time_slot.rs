//! 会計日時から時間帯（ランチ/ディナー/その他/不明）を判定
//!
//! 日時の読み取りに失敗してもエラーにはせず、`Timestamp::Invalid` として保持する。
//! 不明な日時のレコードは全体ランキングには含まれ、時間帯別ランキングからは外れる。

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::ops::Range;

/// ランチ帯 [11, 15)
pub const LUNCH_HOURS: Range<u32> = 11..15;
/// ディナー帯 [17, 22)
pub const DINNER_HOURS: Range<u32> = 17..22;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y年%m月%d日 %H:%M:%S",
    "%Y年%m月%d日 %H:%M",
    "%Y年%m月%d日 %H時%M分",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// 会計日時セルの値
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    DateTime(NaiveDateTime),
    /// 時刻のみ（例: "12:30"）
    TimeOfDay(NaiveTime),
    /// 読み取れなかった値（元の文字列を保持）
    Invalid(String),
    Missing,
}

impl Timestamp {
    /// 文字列から日時を読み取る。失敗しても `Invalid` を返し、エラーにはしない
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return Timestamp::Missing;
        }

        // タイムゾーン付きは現地時刻のまま扱う
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Timestamp::DateTime(dt.naive_local());
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Timestamp::DateTime(dt);
            }
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                return Timestamp::DateTime(date.and_time(NaiveTime::default()));
            }
        }

        for format in TIME_FORMATS {
            if let Ok(time) = NaiveTime::parse_from_str(text, format) {
                return Timestamp::TimeOfDay(time);
            }
        }

        Timestamp::Invalid(text.to_string())
    }

    /// 時（0-23）。読み取れていない場合は None
    pub fn hour(&self) -> Option<u32> {
        match self {
            Timestamp::DateTime(dt) => Some(dt.hour()),
            Timestamp::TimeOfDay(t) => Some(t.hour()),
            Timestamp::Invalid(_) | Timestamp::Missing => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Timestamp::TimeOfDay(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Timestamp::Invalid(raw) => write!(f, "{}", raw),
            Timestamp::Missing => Ok(()),
        }
    }
}

/// 時間帯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    Lunch,
    Dinner,
    Other,
    Unknown,
}

impl TimeSlot {
    /// ランキング表示の対象になる時間帯
    pub const RANKED: [TimeSlot; 2] = [TimeSlot::Lunch, TimeSlot::Dinner];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Lunch => "ランチ",
            TimeSlot::Dinner => "ディナー",
            TimeSlot::Other => "その他",
            TimeSlot::Unknown => "不明",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 時（0-23）から時間帯を判定
pub fn classify_hour(hour: u32) -> TimeSlot {
    if LUNCH_HOURS.contains(&hour) {
        TimeSlot::Lunch
    } else if DINNER_HOURS.contains(&hour) {
        TimeSlot::Dinner
    } else {
        TimeSlot::Other
    }
}

/// 会計日時から時間帯を判定
pub fn classify(timestamp: &Timestamp) -> TimeSlot {
    timestamp.hour().map(classify_hour).unwrap_or(TimeSlot::Unknown)
}
