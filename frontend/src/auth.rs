//! 会话模块
//!
//! 管理登录状态，与路由系统解耦：
//! 路由服务通过注入的认证/权限信号来执行守卫和重定向，
//! 这里只负责状态转移（login / logout / 启动恢复）。
//!
//! 客户端唯一持久化的是访问令牌；身份与权限每次启动都由
//! `/auth/protected` 重新确认，不落盘。

use leptos::prelude::*;

use crate::api::{Api, ApiError};
use crate::web::LocalStorage;
use lunchbox_shared::LoginRequest;

/// 令牌的持久化键
const STORAGE_TOKEN_KEY: &str = "lunchbox_token";

/// 会话状态
#[derive(Clone, Default)]
pub struct SessionState {
    /// 访问令牌（仅此字段持久化）
    pub token: Option<String>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否总务（管理员）
    pub is_admin: bool,
    /// 当前用户 id
    pub current_user_id: Option<i64>,
    /// 启动恢复是否仍在进行
    pub is_loading: bool,
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    /// 创建新的会话上下文；`is_loading` 为 true 直到启动恢复完成
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState {
            is_loading: true,
            ..Default::default()
        });
        Self { state, set_state }
    }

    /// 认证信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 管理员信号（用于路由服务注入）
    pub fn is_admin_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_admin)
    }

    /// 当前令牌（非响应式读取，供 API 客户端附加请求头）
    pub fn token(&self) -> Option<String> {
        self.state.get_untracked().token
    }

    /// 清空全部会话字段并删除持久化令牌；幂等
    ///
    /// API 客户端在收到 401/422 时直接调用；
    /// 路由服务监听认证信号，会自动跳回登录页。
    pub fn invalidate(&self) {
        LocalStorage::delete(STORAGE_TOKEN_KEY);
        self.set_state.update(|state| {
            state.token = None;
            state.is_authenticated = false;
            state.is_admin = false;
            state.current_user_id = None;
            state.is_loading = false;
        });
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 启动恢复：存在持久化令牌则校验并填充身份
///
/// - 无令牌：保持未认证，默认路由即登录页
/// - 校验成功：填充 `is_admin` / `current_user_id`，路由服务
///   监听到认证信号变化后按身份跳转落地页
/// - 校验失败（含令牌过期）：登出
pub async fn init_session(ctx: SessionContext, api: Api) {
    let Some(token) = LocalStorage::get(STORAGE_TOKEN_KEY) else {
        ctx.set_state.update(|state| state.is_loading = false);
        return;
    };

    ctx.set_state
        .update(|state| state.token = Some(token.clone()));

    match api.whoami().await {
        Ok(claims) => ctx.set_state.update(|state| {
            state.is_authenticated = true;
            state.is_admin = claims.is_admin;
            state.current_user_id = Some(claims.sub);
            state.is_loading = false;
        }),
        // 令牌无效或服务器不可达：统一强制登出
        Err(_) => ctx.invalidate(),
    }
}

/// 登录：换取令牌后走与启动恢复一致的身份确认流程
pub async fn login(
    ctx: SessionContext,
    api: Api,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    let token = api.login(&LoginRequest { username, password }).await?;

    LocalStorage::set(STORAGE_TOKEN_KEY, &token.access_token);
    ctx.set_state
        .update(|state| state.token = Some(token.access_token));

    let claims = match api.whoami().await {
        Ok(claims) => claims,
        Err(err) => {
            ctx.invalidate();
            return Err(err);
        }
    };

    ctx.set_state.update(|state| {
        state.is_authenticated = true;
        state.is_admin = claims.is_admin;
        state.current_user_id = Some(claims.sub);
        state.is_loading = false;
    });
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: SessionContext) {
    ctx.invalidate();
}
