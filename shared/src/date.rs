//! 时间辅助模块
//!
//! 表单 `<input type="date">` / `<input type="datetime-local">` 与
//! DTO 中 `chrono` 类型之间的转换，以及列表中的统一显示格式。

use chrono::{NaiveDate, NaiveDateTime};

const FORM_DATE_FORMAT: &str = "%Y-%m-%d";
const FORM_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";
const DISPLAY_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// 解析日期输入框的值，空串或格式错误返回 None
pub fn parse_form_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), FORM_DATE_FORMAT).ok()
}

/// 解析 datetime-local 输入框的值（允许带秒）
pub fn parse_form_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, FORM_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// 转为日期输入框可以回填的值
pub fn to_form_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(FORM_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn to_form_datetime(dt: Option<NaiveDateTime>) -> String {
    dt.map(|d| d.format(FORM_DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn display_datetime(dt: NaiveDateTime) -> String {
    dt.format(DISPLAY_DATETIME_FORMAT).to_string()
}

/// 可选日期的显示，缺失时显示占位符
pub fn display_opt_date(date: Option<NaiveDate>) -> String {
    date.map(display_date).unwrap_or_else(|| "-".to_string())
}

pub fn display_opt_datetime(dt: Option<NaiveDateTime>) -> String {
    dt.map(display_datetime).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_date_roundtrip() {
        let date = parse_form_date("2024-02-29").unwrap();
        assert_eq!(to_form_date(Some(date)), "2024-02-29");
        assert_eq!(display_date(date), "29.02.2024");
    }

    #[test]
    fn test_invalid_form_values() {
        assert_eq!(parse_form_date(""), None);
        assert_eq!(parse_form_date("2023-02-29"), None);
        assert_eq!(parse_form_datetime("yesterday"), None);
        assert_eq!(display_opt_date(None), "-");
    }

    #[test]
    fn test_datetime_with_and_without_seconds() {
        let a = parse_form_datetime("2024-05-01T08:30").unwrap();
        let b = parse_form_datetime("2024-05-01T08:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(to_form_datetime(Some(a)), "2024-05-01T08:30");
        assert_eq!(display_datetime(a), "01.05.2024 08:30");
    }
}
