//! 后端 REST 客户端
//!
//! 所有出站请求集中在此模块：统一附加 Bearer 凭证、统一规范化
//! 成功/失败形态、统一识别会话过期。调用方只会看到 `Result`，
//! 这里不向外抛任何 panic。
//!
//! 规范化规则：
//! - 网络层拿不到响应 -> `ApiError::Unreachable`（哨兵状态码 0）
//! - 401 / 422（任意端点）-> 清空会话并返回 `ApiError::SessionExpired`
//! - 409 -> `ApiError::Conflict`，保留服务端文案
//! - 其他非 2xx -> `ApiError::Status`，优先取错误体的 `message` 字段
//! - 204 -> 无内容成功路径

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::use_context;
use lunchbox_shared::{
    ApiMessage, BEARER_PREFIX, Canteen, CanteenPayload, HEADER_AUTH, LoginRequest, Meal,
    MealPayload, MenuCanteen, Order, OrderRequest, OrderSummary, SessionClaims, TokenResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::auth::SessionContext;

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 网络或服务器连接错误（没有拿到任何响应）
    #[error("无法连接服务器，请检查后端是否运行。")]
    Unreachable,
    /// 会话失效（401/422），全局登出已经触发
    #[error("认证失败或已过期，请重新登录。")]
    SessionExpired,
    /// 领域冲突（409），例如当日重复订购
    #[error("{0}")]
    Conflict(String),
    /// 其他 4xx/5xx
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx 但响应体无法解析
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl ApiError {
    /// 对应的 HTTP 状态码；网络不可达与解析失败以 0 作为哨兵值
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unreachable | ApiError::Decode(_) => 0,
            ApiError::SessionExpired => 401,
            ApiError::Conflict(_) => 409,
            ApiError::Status { status, .. } => *status,
        }
    }
}

/// 非 2xx 状态码到错误的映射；与具体端点无关
fn error_for_status(status: u16, server_message: Option<String>) -> ApiError {
    match status {
        401 | 422 => ApiError::SessionExpired,
        409 => ApiError::Conflict(server_message.unwrap_or_else(|| "资源冲突。".to_string())),
        status => ApiError::Status {
            status,
            message: server_message.unwrap_or_else(|| format!("API 请求失败: {status}")),
        },
    }
}

/// REST 客户端
///
/// 只持有会话上下文（`Copy`），可随意在组件间传递；
/// 令牌在每次请求时按当前会话状态读取。
#[derive(Clone, Copy)]
pub struct Api {
    session: SessionContext,
}

impl Api {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// 按需附加 Bearer 凭证头
    fn with_auth(&self, builder: RequestBuilder, auth_required: bool) -> RequestBuilder {
        if auth_required {
            if let Some(token) = self.session.token() {
                return builder.header(HEADER_AUTH, &format!("{BEARER_PREFIX}{token}"));
            }
        }
        builder
    }

    /// 统一响应检查
    ///
    /// 401/422 在这里触发全局会话清理，调用方无需各自处理；
    /// 路由服务监听认证信号后会强制跳回登录页。
    async fn check(&self, sent: Result<Response, gloo_net::Error>) -> Result<Response, ApiError> {
        let res = match sent {
            Ok(res) => res,
            Err(err) => {
                web_sys::console::error_1(&format!("[Api] 网络或服务器连接错误: {err}").into());
                return Err(ApiError::Unreachable);
            }
        };

        let status = res.status();
        if status == 401 || status == 422 {
            self.session.invalidate();
            return Err(ApiError::SessionExpired);
        }
        if res.ok() {
            return Ok(res);
        }

        // 尝试从错误体中取服务端文案，取不到则退回状态码提示
        let message = res.json::<ApiMessage>().await.ok().map(|m| m.message);
        Err(error_for_status(status, message))
    }

    /// 无请求体，期望 JSON 响应
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        auth_required: bool,
    ) -> Result<T, ApiError> {
        let sent = self.with_auth(builder, auth_required).send().await;
        let res = self.check(sent).await?;
        res.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// 携带 JSON 请求体，期望 JSON 响应
    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
        auth_required: bool,
    ) -> Result<T, ApiError> {
        let request = self
            .with_auth(builder, auth_required)
            .json(body)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let res = self.check(request.send().await).await?;
        res.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// 无请求体，期望 204 No Content
    async fn send_no_content(
        &self,
        builder: RequestBuilder,
        auth_required: bool,
    ) -> Result<(), ApiError> {
        let sent = self.with_auth(builder, auth_required).send().await;
        self.check(sent).await?;
        Ok(())
    }

    // ---------------------------------------------------------
    // 认证
    // ---------------------------------------------------------

    /// 登录，换取访问令牌
    pub async fn login(&self, body: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.send_json(Request::post("/auth/login"), body, false)
            .await
    }

    /// 会话校验：返回身份与权限
    pub async fn whoami(&self) -> Result<SessionClaims, ApiError> {
        self.fetch_json(Request::get("/auth/protected"), true).await
    }

    // ---------------------------------------------------------
    // 公开菜单
    // ---------------------------------------------------------

    /// 获取当前可订购的餐厅与菜单（无需登录）
    pub async fn public_menu(&self) -> Result<Vec<MenuCanteen>, ApiError> {
        self.fetch_json(Request::get("/public/menu"), false).await
    }

    // ---------------------------------------------------------
    // 订单
    // ---------------------------------------------------------

    /// 创建今日订单；当日已订购时服务端返回 409
    pub async fn create_order(&self, meal_id: i64) -> Result<Order, ApiError> {
        self.send_json(Request::post("/orders"), &OrderRequest { meal_id }, true)
            .await
    }

    /// 查询自己的历史订单
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch_json(Request::get("/orders/mine"), true).await
    }

    /// 删除一笔订单
    pub async fn delete_order(&self, id: i64) -> Result<(), ApiError> {
        self.send_no_content(Request::delete(&format!("/orders/del/{id}")), true)
            .await
    }

    /// 今日订单统计（总务）
    pub async fn order_summary(&self) -> Result<OrderSummary, ApiError> {
        self.fetch_json(Request::get("/orders/summary"), true).await
    }

    /// 标记单笔订单为已缴款（总务）
    pub async fn mark_paid(&self, id: i64) -> Result<Order, ApiError> {
        self.fetch_json(Request::put(&format!("/orders/{id}/paid")), true)
            .await
    }

    // ---------------------------------------------------------
    // 总务管理：餐厅
    // ---------------------------------------------------------

    pub async fn list_canteens(&self) -> Result<Vec<Canteen>, ApiError> {
        self.fetch_json(Request::get("/admin/canteens"), true).await
    }

    pub async fn create_canteen(&self, payload: &CanteenPayload) -> Result<Canteen, ApiError> {
        self.send_json(Request::post("/admin/canteens"), payload, true)
            .await
    }

    pub async fn update_canteen(
        &self,
        id: i64,
        payload: &CanteenPayload,
    ) -> Result<Canteen, ApiError> {
        self.send_json(Request::put(&format!("/admin/canteens/{id}")), payload, true)
            .await
    }

    pub async fn delete_canteen(&self, id: i64) -> Result<(), ApiError> {
        self.send_no_content(Request::delete(&format!("/admin/canteens/{id}")), true)
            .await
    }

    // ---------------------------------------------------------
    // 总务管理：便当
    // ---------------------------------------------------------

    pub async fn list_meals(&self) -> Result<Vec<Meal>, ApiError> {
        self.fetch_json(Request::get("/admin/meals"), true).await
    }

    pub async fn create_meal(&self, payload: &MealPayload) -> Result<Meal, ApiError> {
        self.send_json(Request::post("/admin/meals"), payload, true)
            .await
    }

    pub async fn update_meal(&self, id: i64, payload: &MealPayload) -> Result<Meal, ApiError> {
        self.send_json(Request::put(&format!("/admin/meals/{id}")), payload, true)
            .await
    }

    pub async fn delete_meal(&self, id: i64) -> Result<(), ApiError> {
        self.send_no_content(Request::delete(&format!("/admin/meals/{id}")), true)
            .await
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expiry_statuses_classify_uniformly() {
        // 401 与 422 无论来自哪个端点都视为会话失效
        assert_eq!(error_for_status(401, None), ApiError::SessionExpired);
        assert_eq!(
            error_for_status(422, Some("Signature verification failed".into())),
            ApiError::SessionExpired
        );
    }

    #[test]
    fn conflict_keeps_server_message() {
        let err = error_for_status(409, Some("您今天已经订购过了。".into()));
        assert_eq!(err, ApiError::Conflict("您今天已经订购过了。".into()));
        assert_eq!(err.status(), 409);
    }

    #[test]
    fn other_statuses_fall_back_to_status_coded_message() {
        let err = error_for_status(500, None);
        match &err {
            ApiError::Status { status, message } => {
                assert_eq!(*status, 500);
                assert!(message.contains("500"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        let err = error_for_status(403, Some("您没有权限删除此订单。".into()));
        assert_eq!(err.to_string(), "您没有权限删除此订单。");
        assert_eq!(err.status(), 403);
    }

    #[test]
    fn unreachable_uses_sentinel_status_zero() {
        assert_eq!(ApiError::Unreachable.status(), 0);
    }
}
