//! 金额换算模块
//!
//! 价格在整个系统中以整数「分」存储和传输，只在两个地方穿过边界：
//! - 渲染时 `format_cents` 转为「元」字符串显示
//! - 表单提交时 `parse_major` 把用户输入的「元」转回整数「分」
//!
//! 所有换算集中在此模块，避免浮点误差散落各处。

/// 将整数「分」格式化为两位小数的「元」字符串
///
/// `4550` -> `"45.50"`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// 解析用户输入的「元」金额，四舍五入为整数「分」
///
/// 只接受大于零的数值；无法解析或非正数时返回 `None`，
/// 调用方以此阻止提交。
pub fn parse_major(input: &str) -> Option<i64> {
    let value: f64 = input.trim().parse().ok()?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Some((value * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_two_decimals() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(4550), "45.50");
        assert_eq!(format_cents(10000), "100.00");
        assert_eq!(format_cents(-1250), "-12.50");
    }

    #[test]
    fn parse_rounds_to_cents() {
        assert_eq!(parse_major("45"), Some(4500));
        assert_eq!(parse_major("45.5"), Some(4550));
        assert_eq!(parse_major("45.55"), Some(4555));
        // 超过两位小数按四舍五入
        assert_eq!(parse_major("0.015"), Some(2));
        assert_eq!(parse_major("  80.00 "), Some(8000));
    }

    #[test]
    fn parse_rejects_non_positive_and_garbage() {
        assert_eq!(parse_major("0"), None);
        assert_eq!(parse_major("-3"), None);
        assert_eq!(parse_major("0.0"), None);
        assert_eq!(parse_major(""), None);
        assert_eq!(parse_major("abc"), None);
        assert_eq!(parse_major("NaN"), None);
        assert_eq!(parse_major("inf"), None);
    }

    #[test]
    fn round_trips_inputs_with_two_decimals() {
        for input in ["45.50", "0.05", "100.00", "12.34"] {
            let cents = parse_major(input).unwrap();
            assert_eq!(format_cents(cents), input);
        }
    }
}
