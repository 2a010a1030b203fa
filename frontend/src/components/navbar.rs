//! 导航栏组件
//!
//! 链接列表是会话状态的纯函数（`nav_links`），推导与渲染分离，
//! 规则可以脱离网络和 DOM 单独测试。

use leptos::prelude::*;

use crate::auth::{SessionState, logout, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 点击导航项触发的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Goto(AppRoute),
    Logout,
}

/// 单个导航项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub action: NavAction,
}

/// 「首页」的落地路由：按身份回到各自的主页面
fn home_target(state: &SessionState) -> AppRoute {
    if !state.is_authenticated {
        AppRoute::Login
    } else if state.is_admin {
        AppRoute::Admin
    } else {
        AppRoute::Order
    }
}

/// 由会话状态推导导航链接（纯函数）
///
/// 首页始终存在；已认证用户看到订餐/订单入口和登出，
/// 总务额外看到管理入口；未认证只看到登录。
pub fn nav_links(state: &SessionState) -> Vec<NavLink> {
    let mut links = vec![NavLink {
        label: "首页",
        action: NavAction::Goto(home_target(state)),
    }];

    if state.is_authenticated {
        links.push(NavLink {
            label: "我要订餐",
            action: NavAction::Goto(AppRoute::Order),
        });
        links.push(NavLink {
            label: "我的订单",
            action: NavAction::Goto(AppRoute::History),
        });
        if state.is_admin {
            links.push(NavLink {
                label: "总务管理",
                action: NavAction::Goto(AppRoute::Admin),
            });
        }
        links.push(NavLink {
            label: "登出",
            action: NavAction::Logout,
        });
    } else {
        links.push(NavLink {
            label: "登录",
            action: NavAction::Goto(AppRoute::Login),
        });
    }

    links
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let on_click = move |action: NavAction| match action {
        NavAction::Goto(route) => router.goto(route),
        NavAction::Logout => logout(session),
    };

    view! {
        <div class="navbar bg-base-100 shadow-lg px-4">
            <div class="flex-1">
                <span class="text-xl font-bold">"LunchBox 订餐"</span>
            </div>
            <div class="flex-none">
                <ul class="menu menu-horizontal px-1 gap-1">
                    <For
                        each=move || nav_links(&session.state.get())
                        key=|link| link.label
                        children=move |link: NavLink| {
                            let action = link.action;
                            let class = if action == NavAction::Logout {
                                "btn btn-outline btn-error btn-sm"
                            } else {
                                "btn btn-ghost btn-sm"
                            };
                            view! {
                                <li>
                                    <a class=class on:click=move |_| on_click(action)>
                                        {link.label}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(authenticated: bool, admin: bool) -> SessionState {
        SessionState {
            is_authenticated: authenticated,
            is_admin: admin,
            ..Default::default()
        }
    }

    fn labels(state: &SessionState) -> Vec<&'static str> {
        nav_links(state).iter().map(|link| link.label).collect()
    }

    #[test]
    fn guest_sees_only_home_and_login() {
        assert_eq!(labels(&state(false, false)), vec!["首页", "登录"]);
    }

    #[test]
    fn employee_sees_order_pages_but_no_admin_entry() {
        assert_eq!(
            labels(&state(true, false)),
            vec!["首页", "我要订餐", "我的订单", "登出"]
        );
    }

    #[test]
    fn admin_sees_admin_entry() {
        assert_eq!(
            labels(&state(true, true)),
            vec!["首页", "我要订餐", "我的订单", "总务管理", "登出"]
        );
    }

    #[test]
    fn home_lands_on_role_page() {
        assert_eq!(home_target(&state(false, false)), AppRoute::Login);
        assert_eq!(home_target(&state(true, false)), AppRoute::Order);
        assert_eq!(home_target(&state(true, true)), AppRoute::Admin);
    }
}
