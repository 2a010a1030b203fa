//! 便当表单状态模块
//!
//! 将零散的 signal 整合为 `MealFormState` 结构体，负责：
//! - 数据的持有与重置
//! - 编辑时从列表行回填
//! - 提交前校验并转换为请求体

use leptos::prelude::*;

use lunchbox_shared::money::{format_cents, parse_major};
use lunchbox_shared::{Meal, MealPayload};

/// 校验并组装请求体（纯函数）
///
/// 价格必须能解析为正数，否则返回文案阻止提交（不发网络请求）；
/// 换算 `round(元 * 100)`，上送始终为整数「分」。
fn build_payload(
    name: &str,
    price_input: &str,
    canteen_id: Option<i64>,
    is_active: bool,
) -> Result<MealPayload, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("请输入便当名称。".to_string());
    }
    let Some(price) = parse_major(price_input) else {
        return Err("请输入有效的价格。".to_string());
    };
    let Some(canteen_id) = canteen_id else {
        return Err("请选择所属餐厅。".to_string());
    };
    Ok(MealPayload {
        name: name.to_string(),
        price,
        canteen_id,
        is_active,
    })
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct MealFormState {
    /// 编辑目标 id；`None` 即新增，提交时据此选择创建或更新
    pub meal_id: RwSignal<Option<i64>>,
    pub name: RwSignal<String>,
    /// 用户输入的价格（元），提交时才换算为分
    pub price_input: RwSignal<String>,
    pub canteen_id: RwSignal<Option<i64>>,
    pub is_active: RwSignal<bool>,
}

impl MealFormState {
    pub fn new() -> Self {
        Self {
            meal_id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            price_input: RwSignal::new(String::new()),
            canteen_id: RwSignal::new(None),
            is_active: RwSignal::new(true),
        }
    }

    /// 重置为「新增」空表单
    pub fn reset(&self) {
        self.meal_id.set(None);
        self.name.set(String::new());
        self.price_input.set(String::new());
        self.canteen_id.set(None);
        self.is_active.set(true);
    }

    /// 以列表行回填「编辑」表单；价格由分转为元显示
    pub fn load(&self, meal: &Meal) {
        self.meal_id.set(Some(meal.id));
        self.name.set(meal.name.clone());
        self.price_input.set(format_cents(meal.price));
        self.canteen_id.set(Some(meal.canteen_id));
        self.is_active.set(meal.is_active);
    }

    /// 校验并转换为请求体
    pub fn to_payload(&self) -> Result<MealPayload, String> {
        build_payload(
            &self.name.get_untracked(),
            &self.price_input.get_untracked(),
            self.canteen_id.get_untracked(),
            self.is_active.get_untracked(),
        )
    }
}

impl Default for MealFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_entered_in_major_units_is_submitted_as_cents() {
        let payload = build_payload("排骨便当", "85.50", Some(1), true).unwrap();
        assert_eq!(payload.price, 8550);
        // 回显时等于原始输入
        assert_eq!(format_cents(payload.price), "85.50");
    }

    #[test]
    fn invalid_price_blocks_submission() {
        assert!(build_payload("排骨便当", "0", Some(1), true).is_err());
        assert!(build_payload("排骨便当", "-5", Some(1), true).is_err());
        assert!(build_payload("排骨便当", "abc", Some(1), true).is_err());
        assert!(build_payload("排骨便当", "", Some(1), true).is_err());
    }

    #[test]
    fn missing_name_or_canteen_blocks_submission() {
        assert!(build_payload("  ", "80", Some(1), true).is_err());
        assert!(build_payload("排骨便当", "80", None, true).is_err());
    }
}
