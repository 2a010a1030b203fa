//! LunchBox 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 后端 REST 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod canteen_dialog;
    pub mod dashboard;
    pub mod history;
    pub mod login;
    pub mod meal_dialog;
    pub mod navbar;
    pub mod order;
}

use crate::api::Api;
use crate::auth::{SessionContext, init_session};
use crate::components::dashboard::DashboardPage;
use crate::components::history::HistoryPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::order::OrderPage;

use leptos::prelude::*;
use leptos::task::spawn_local;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;

    /// 原生确认框
    pub fn confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    /// 原生警告框
    pub fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Order => view! { <OrderPage /> }.into_any(),
        AppRoute::History => view! { <HistoryPage /> }.into_any(),
        AppRoute::Admin => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文与 API 客户端
    let session = SessionContext::new();
    provide_context(session);

    let api = Api::new(session);
    provide_context(api);

    // 2. 启动时恢复令牌并验证（异步；完成后认证信号驱动跳转）
    Effect::new(move |_| {
        spawn_local(async move {
            init_session(session, api).await;
        });
    });

    // 3. 获取认证/身份信号，注入路由服务（解耦）
    let is_authenticated = session.is_authenticated_signal();
    let is_admin = session.is_admin_signal();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router is_authenticated=is_authenticated is_admin=is_admin>
            <div class="min-h-screen bg-base-200">
                <Navbar />
                <RouterOutlet matcher=route_matcher />
            </div>
        </Router>
    }
}
