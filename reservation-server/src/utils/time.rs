//! 时间工具函数 — 日期解析与时间戳转换
//!
//! 所有日期字符串→时间戳转换统一在 API handler 层完成，
//! repository 层和 booking 层只接收 `i64` Unix millis。
//!
//! 请求日期格式: `YYYY-MM-DD HH:MM:SS.ffffff` (naive, 无时区)。
//! 如果客户端附带了时区后缀 (`Z` / `+02:00`)，剥掉后按 naive 解析。

use chrono::{DateTime, NaiveDateTime};

use super::{AppError, AppResult};

/// 写路径和查询路径共用的日期格式 (微秒精度，小数部分可省略)
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// 解析请求日期字符串
///
/// 缺失和无法解析都映射为 NotFound —— 与上游 API 的 404 行为保持
/// 兼容 (缺少日期参数和未知资源在源系统里是同一种响应)。
pub fn parse_request_date(raw: Option<&str>) -> AppResult<NaiveDateTime> {
    let raw = raw.ok_or_else(|| AppError::not_found("Missing date parameter"))?;
    let stripped = strip_timezone(raw.trim());
    NaiveDateTime::parse_from_str(stripped, REQUEST_DATE_FORMAT)
        .map_err(|_| AppError::not_found(format!("Unparseable date: {raw}")))
}

/// 剥掉时区后缀 (时区信息不被采纳)
///
/// 时间部分从第 11 个字节开始，日期里的 `-` 不会被误切。
/// `get(11..)` 处理字节 11 不在字符边界上的输入 (非 ASCII 垃圾日期
/// 原样返回，交给解析失败路径)。
fn strip_timezone(s: &str) -> &str {
    let s = s.strip_suffix('Z').unwrap_or(s);
    if let Some(tail) = s.get(11..)
        && let Some(pos) = tail.find(['+', '-'])
    {
        return &s[..11 + pos];
    }
    s
}

/// Naive datetime → Unix millis
///
/// Naive 时刻一律按 UTC 解释，读写两侧一致即可。
pub fn naive_to_millis(naive: NaiveDateTime) -> i64 {
    naive.and_utc().timestamp_millis()
}

/// Unix millis → naive datetime
///
/// 库里只存我们自己写入的 millis，超出 chrono 范围的值不可能出现。
pub fn millis_to_naive(millis: i64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

/// 所在日历日的区间 [day_start, day_end) — day-bucket 查询用
///
/// 返回当日 00:00:00 和次日 00:00:00 的 millis，调用方使用
/// `>= start AND < end` 语义。
pub fn day_bounds_millis(start: NaiveDateTime) -> (i64, i64) {
    let date = start.date();
    let day_start = date.and_hms_opt(0, 0, 0).unwrap();
    let day_end = date
        .succ_opt()
        .unwrap_or(date)
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (naive_to_millis(day_start), naive_to_millis(day_end))
}

/// Millis → 响应日期字符串 (微秒精度)
pub fn format_millis(millis: i64) -> String {
    millis_to_naive(millis)
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string()
}

/// Millis → 邮件日期字符串 (`YYYY-MM-DD HH:MM`)
pub fn format_millis_hm(millis: i64) -> String {
    millis_to_naive(millis).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_microsecond_format() {
        let dt = parse_request_date(Some("2021-10-19 16:22:50.123456")).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string(), "2021-10-19 16:22:50.123456");
    }

    #[test]
    fn parses_without_fraction() {
        let dt = parse_request_date(Some("2021-10-19 16:00:00")).unwrap();
        assert_eq!(format_millis_hm(naive_to_millis(dt)), "2021-10-19 16:00");
    }

    #[test]
    fn strips_timezone_suffix() {
        let plain = parse_request_date(Some("2021-10-19 16:00:00")).unwrap();
        let offset = parse_request_date(Some("2021-10-19 16:00:00+02:00")).unwrap();
        let zulu = parse_request_date(Some("2021-10-19 16:00:00.000Z")).unwrap();
        assert_eq!(plain, offset);
        assert_eq!(plain, zulu);
    }

    #[test]
    fn missing_and_garbage_dates_are_not_found() {
        assert!(matches!(parse_request_date(None), Err(AppError::NotFound(_))));
        assert!(matches!(
            parse_request_date(Some("19/10/2021")),
            Err(AppError::NotFound(_))
        ));
    }

    // Multi-byte input where byte 11 falls inside a character must
    // come back as a parse failure, not slice out of the string
    #[test]
    fn non_ascii_dates_are_not_found() {
        assert!(matches!(
            parse_request_date(Some("ééééééé")),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            parse_request_date(Some("2021-10-19 16:00:00é")),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn day_bounds_cover_the_calendar_day() {
        let dt = parse_request_date(Some("2021-10-19 16:22:50.123")).unwrap();
        let (start, end) = day_bounds_millis(dt);
        assert_eq!(format_millis_hm(start), "2021-10-19 00:00");
        assert_eq!(format_millis_hm(end), "2021-10-20 00:00");
        let ms = naive_to_millis(dt);
        assert!(start <= ms && ms < end);
    }

    #[test]
    fn millis_round_trip() {
        let dt = parse_request_date(Some("2021-10-19 16:22:50.123")).unwrap();
        assert_eq!(millis_to_naive(naive_to_millis(dt)), dt);
    }
}
