//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 员工订餐页（需要认证）
    Order,
    /// 员工订单历史页（需要认证）
    History,
    /// 总务管理面板（需要认证，组件内再校验管理员身份）
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/order" => Self::Order,
            "/history" => Self::History,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Order => "/order",
            Self::History => "/history",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Order | Self::History | Self::Admin)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    ///
    /// 总务进入管理面板，普通员工进入订餐页。
    pub fn auth_success_redirect(is_admin: bool) -> Self {
        if is_admin { Self::Admin } else { Self::Order }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Order,
            AppRoute::History,
            AppRoute::Admin,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/nonexistent"), AppRoute::NotFound);
    }

    #[test]
    fn protected_routes_require_auth() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::Order.requires_auth());
        assert!(AppRoute::History.requires_auth());
        assert!(AppRoute::Admin.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn success_redirect_depends_on_role() {
        assert_eq!(AppRoute::auth_success_redirect(true), AppRoute::Admin);
        assert_eq!(AppRoute::auth_success_redirect(false), AppRoute::Order);
    }
}
