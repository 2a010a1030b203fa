use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod money;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTH: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Access Token 有效秒数
    pub expires_in: u64,
}

/// GET /auth/protected 的响应：当前会话的身份与权限
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: i64,
    pub is_admin: bool,
}

// =========================================================
// 公开菜单 (Public Menu)
// =========================================================

/// 员工菜单中的单个便当
///
/// `price` 为整数「分」，仅在渲染时除以 100 显示为「元」。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MenuMeal {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

/// 员工菜单按餐厅分组
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MenuCanteen {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub meals: Vec<MenuMeal>,
}

// =========================================================
// 总务管理 (Admin CRUD)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Canteen {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// 新增/修改餐厅的请求体
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CanteenPayload {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    /// 价格（分）
    pub price: i64,
    pub canteen_id: i64,
    pub canteen_name: String,
    pub is_active: bool,
}

/// 新增/修改便当的请求体，价格为整数「分」
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealPayload {
    pub name: String,
    pub price: i64,
    pub canteen_id: i64,
    pub is_active: bool,
}

// =========================================================
// 订单 (Orders)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderRequest {
    pub meal_id: i64,
}

/// 单笔订单。`meal_name` 与 `price` 是下单时的快照，
/// 之后修改便当不会影响历史订单。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub meal_id: i64,
    pub meal_name: String,
    pub order_date: NaiveDate,
    pub price: i64,
    pub is_paid: bool,
}

/// 当日订单统计（总务视图）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderSummary {
    pub order_date: NaiveDate,
    pub total_orders: u32,
    /// 未结算总金额（分）
    pub total_amount: i64,
    pub meal_summary: Vec<MealSummary>,
}

/// 按便当分组的统计行，`order_ids` 驱动批量结算
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealSummary {
    pub meal_name: String,
    pub order_count: u32,
    pub total_price: i64,
    pub order_ids: Vec<i64>,
}

// =========================================================
// 错误响应 (Error Envelope)
// =========================================================

/// 后端错误响应体约定：JSON 中带 `message` 字段
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiMessage {
    pub message: String,
}
