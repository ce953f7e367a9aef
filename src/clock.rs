// ==========================================
// 苗圃育苗排产系统 - 时钟能力
// ==========================================
// 职责: 将"现在/今天"显式注入,纯函数不得自行读系统时钟
// 红线: 引擎与缓存的时间判定必须可用固定时钟复现
// ==========================================

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::sync::Mutex;

/// 时钟能力
///
/// 缓存用 now_utc 判定过期;排产判定用 today_local
/// (过期/紧迫度按本地日历日比较,不看墙钟时刻)。
pub trait Clock: Send + Sync {
    /// 当前 UTC 时刻
    fn now_utc(&self) -> DateTime<Utc>;

    /// 本地日历日
    fn today_local(&self) -> NaiveDate;
}

// ==========================================
// SystemClock - 系统时钟
// ==========================================
/// 系统时钟(生产环境默认)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today_local(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

// ==========================================
// FixedClock - 固定时钟
// ==========================================
/// 固定时钟
///
/// 测试用: 时刻可手动推进,TTL 边界行为可以毫秒级断言。
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// 以指定 UTC 时刻创建
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// 以指定日历日的零点创建
    pub fn at_day(day: NaiveDate) -> Self {
        let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
        Self::new(Utc.from_utc_datetime(&midnight))
    }

    /// 推进时钟
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = match self.now.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *now = *now + delta;
    }

    /// 直接设定时刻
    pub fn set(&self, now: DateTime<Utc>) {
        let mut guard = match self.now.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = now;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn today_local(&self) -> NaiveDate {
        // 固定时钟不区分时区,直接取 UTC 日历日
        self.now_utc().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fixed_clock_advance() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let clock = FixedClock::at_day(day);
        assert_eq!(clock.today_local(), day);

        clock.advance(Duration::days(2));
        assert_eq!(
            clock.today_local(),
            NaiveDate::from_ymd_opt(2024, 5, 12).unwrap()
        );
    }

    #[test]
    fn test_fixed_clock_millisecond_precision() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let clock = FixedClock::at_day(day);
        let before = clock.now_utc();

        clock.advance(Duration::milliseconds(59_999));
        assert_eq!(clock.now_utc() - before, Duration::milliseconds(59_999));
    }
}
