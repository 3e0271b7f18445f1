//! 时间工具函数 - 业务时区转换
//!
//! 存储层只保存 `i64` Unix millis；日历日筛选在这里换算到配置时区。

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Unix millis → 业务时区的日历日
pub fn millis_to_local_date(millis: i64, tz: Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
}

/// 时间戳是否落在业务时区的某一天
pub fn is_on_date(millis: i64, date: NaiveDate, tz: Tz) -> bool {
    millis_to_local_date(millis, tz) == Some(date)
}
