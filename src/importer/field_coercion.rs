// ==========================================
// 旧版数据迁移引擎 - 字段强制转换
// ==========================================
// 职责: 原始文本 → 强类型值（整数 / 布尔 / 日期时间 / 文本）
// 红线: 全部为纯函数，永不 panic、永不返回错误
//       无法解析或为空 → Null
// ==========================================

use crate::domain::value::{CoercedValue, FieldKind};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// 视为 NULL 的文本标记（大小写不敏感）
const NULL_MARKERS: [&str; 2] = ["null", "none"];

/// 布尔真值文本
pub const TRUTHY_VALUES: [&str; 6] = ["true", "1", "yes", "y", "-1", "on"];

/// 布尔假值文本（空字符串为显式假值）
pub const FALSY_VALUES: [&str; 6] = ["false", "0", "no", "n", "off", ""];

// ==========================================
// 日期时间格式表（按顺序尝试，首个成功者胜出）
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct TimestampPattern {
    pub format: &'static str,
    pub with_time: bool,
    pub two_digit_year: bool,
}

pub const TIMESTAMP_PATTERNS: [TimestampPattern; 6] = [
    // "04/05/22 15:39:11"
    TimestampPattern { format: "%m/%d/%y %H:%M:%S", with_time: true, two_digit_year: true },
    // "04/05/2022 15:39:11"
    TimestampPattern { format: "%m/%d/%Y %H:%M:%S", with_time: true, two_digit_year: false },
    // "2022-04-05 15:39:11"
    TimestampPattern { format: "%Y-%m-%d %H:%M:%S", with_time: true, two_digit_year: false },
    // "04/05/22"
    TimestampPattern { format: "%m/%d/%y", with_time: false, two_digit_year: true },
    // "04/05/2022"
    TimestampPattern { format: "%m/%d/%Y", with_time: false, two_digit_year: false },
    // "2022-04-05"
    TimestampPattern { format: "%Y-%m-%d", with_time: false, two_digit_year: false },
];

/// 去空白；空串与 NULL 标记视为无值
fn meaningful(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    if value.is_empty() || NULL_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m)) {
        None
    } else {
        Some(value)
    }
}

// ==========================================
// 强类型解析（返回 Option）
// ==========================================

/// 解析整数；小数按向零截断（"3.0" → 3，"2.9" → 2）
pub fn parse_int(raw: Option<&str>) -> Option<i64> {
    let value = meaningful(raw)?;
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }

    let f = value.parse::<f64>().ok()?;
    if !f.is_finite() {
        return None;
    }
    let truncated = f.trunc();
    // i64::MAX as f64 == 2^63，已超出范围
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// 解析布尔值
///
/// # 返回
/// - Some(true): 真值文本
/// - Some(false): 假值文本（含空串）
/// - None: 缺失或无法识别
pub fn parse_bool(raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim().to_lowercase();
    if TRUTHY_VALUES.contains(&value.as_str()) {
        Some(true)
    } else if FALSY_VALUES.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// 解析日期时间；两位年份一律解释为 2000 + YY
pub fn parse_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
    let value = meaningful(raw)?;
    TIMESTAMP_PATTERNS
        .iter()
        .find_map(|pattern| try_pattern(value, pattern))
}

/// 解析文本（去首尾空白）
pub fn parse_text(raw: Option<&str>) -> Option<String> {
    meaningful(raw).map(str::to_string)
}

fn try_pattern(value: &str, pattern: &TimestampPattern) -> Option<NaiveDateTime> {
    let parsed = if pattern.with_time {
        NaiveDateTime::parse_from_str(value, pattern.format).ok()?
    } else {
        NaiveDate::parse_from_str(value, pattern.format)
            .ok()?
            .and_hms_opt(0, 0, 0)?
    };

    if pattern.two_digit_year {
        into_current_century(parsed)
    } else if year_token(value, pattern).len() == 4 {
        Some(parsed)
    } else {
        None
    }
}

// chrono 的 %Y 接受任意位数，四位年份格式需自行校验年份位数
fn year_token<'a>(value: &'a str, pattern: &TimestampPattern) -> &'a str {
    let rest = if pattern.format.starts_with("%Y") {
        value
    } else {
        value.splitn(3, '/').nth(2).unwrap_or("")
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    &rest[..end]
}

// chrono 对 %y 采用 POSIX 规则（70-99 → 19xx），这里统一平移到 20xx
fn into_current_century(parsed: NaiveDateTime) -> Option<NaiveDateTime> {
    let year = parsed.year();
    if year >= 2000 {
        return Some(parsed);
    }
    let date = parsed.date().with_year(year + 100)?;
    Some(date.and_time(parsed.time()))
}

// ==========================================
// CoercedValue 形式（供 Record Validator 使用）
// ==========================================

pub fn coerce_int(raw: Option<&str>) -> CoercedValue {
    parse_int(raw).map_or(CoercedValue::Null, CoercedValue::Integer)
}

pub fn coerce_bool(raw: Option<&str>) -> CoercedValue {
    parse_bool(raw).map_or(CoercedValue::Null, CoercedValue::Boolean)
}

pub fn coerce_timestamp(raw: Option<&str>) -> CoercedValue {
    parse_timestamp(raw).map_or(CoercedValue::Null, CoercedValue::Timestamp)
}

pub fn coerce_text(raw: Option<&str>) -> CoercedValue {
    parse_text(raw).map_or(CoercedValue::Null, CoercedValue::Text)
}

/// 按字段类型分派
pub fn coerce(kind: FieldKind, raw: Option<&str>) -> CoercedValue {
    match kind {
        FieldKind::Integer => coerce_int(raw),
        FieldKind::Text => coerce_text(raw),
        FieldKind::Timestamp => coerce_timestamp(raw),
        FieldKind::Boolean => coerce_bool(raw),
    }
}
