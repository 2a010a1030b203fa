//! 员工订餐页
//!
//! 进入页面即拉取公开菜单（刷新式失效策略：每次进入都重新获取，
//! 总务改动菜单后员工下次进入即见最新）。下单在途期间禁用全部
//! 订购按钮，防止连点重复提交。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, use_api};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use lunchbox_shared::MenuCanteen;
use lunchbox_shared::money::format_cents;

/// 状态横幅种类
#[derive(Clone, Copy, PartialEq)]
enum StatusKind {
    Progress,
    Success,
    Error,
}

/// 下单失败的用户提示
///
/// 409 冲突使用重复订购专用文案，与通用失败文案区分。
fn order_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Conflict(msg) => format!("订购失败：{msg}（今天已订过，不可重复订购）"),
        other => format!("订购失败: {other}"),
    }
}

#[component]
pub fn OrderPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (menu, set_menu) = signal(Vec::<MenuCanteen>::new());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (placing, set_placing) = signal(false);
    let (status, set_status) = signal(Option::<(String, StatusKind)>::None);

    let load_menu = move || {
        set_loading.set(true);
        set_load_error.set(None);
        spawn_local(async move {
            match api.public_menu().await {
                Ok(data) => set_menu.set(data),
                Err(err) => set_load_error.set(Some(format!("加载菜单失败: {err}"))),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| load_menu());

    let place_order = move |meal_id: i64, meal_name: String| {
        set_placing.set(true);
        set_status.set(Some((
            format!("正在提交 {meal_name} 的订单..."),
            StatusKind::Progress,
        )));

        spawn_local(async move {
            match api.create_order(meal_id).await {
                Ok(_) => {
                    set_status.set(Some((
                        format!("{meal_name} 订单创建成功！您今天已订购。"),
                        StatusKind::Success,
                    )));
                    // 切到订单历史页看到新订单；按钮保持禁用，页面即将离开
                    router.goto(AppRoute::History);
                }
                Err(err) => {
                    set_status.set(Some((order_failure_message(&err), StatusKind::Error)));
                    set_placing.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 space-y-4">
            <h2 class="text-2xl font-bold">"今日菜单"</h2>

            <Show when=move || status.get().is_some()>
                <div
                    role="alert"
                    class=move || match status.get().map(|(_, kind)| kind) {
                        Some(StatusKind::Progress) => "alert alert-warning",
                        Some(StatusKind::Success) => "alert alert-success",
                        _ => "alert alert-error",
                    }
                >
                    <span>{move || status.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || loading.get()>
                <div class="flex justify-center py-8">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || load_error.get().is_some()>
                <div class="alert alert-error">
                    <span>{move || load_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || !loading.get() && load_error.get().is_none() && menu.with(|m| m.is_empty())>
                <div class="alert alert-info">"今天没有可订购的菜单项目。"</div>
            </Show>

            <For
                each=move || menu.get()
                key=|canteen| canteen.id
                children=move |canteen: MenuCanteen| {
                    let canteen_name = canteen.name.clone();
                    let canteen_desc = canteen
                        .description
                        .clone()
                        .unwrap_or_else(|| "无描述".to_string());
                    let meals = canteen.meals.clone();
                    view! {
                        <div class="mt-4">
                            <h3 class="text-xl font-semibold">
                                {canteen_name}
                                <span class="text-sm text-base-content/60 ml-2">"(" {canteen_desc} ")"</span>
                            </h3>
                            <div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 gap-4 mt-3">
                                <For
                                    each=move || meals.clone()
                                    key=|meal| meal.id
                                    children=move |meal| {
                                        let meal_id = meal.id;
                                        let meal_name = meal.name.clone();
                                        view! {
                                            <div class="card bg-base-100 shadow-sm h-full">
                                                <div class="card-body">
                                                    <h5 class="card-title">{meal.name.clone()}</h5>
                                                    <p class="text-success text-lg">
                                                        "NT$ " {format_cents(meal.price)}
                                                    </p>
                                                    <div class="card-actions">
                                                        <button
                                                            class="btn btn-primary"
                                                            disabled=move || placing.get()
                                                            on:click=move |_| place_order(meal_id, meal_name.clone())
                                                        >
                                                            "我要订购"
                                                        </button>
                                                    </div>
                                                </div>
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_gets_duplicate_wording() {
        let msg = order_failure_message(&ApiError::Conflict("您今天已经订购过了。".into()));
        assert!(msg.contains("不可重复订购"));
        assert!(msg.contains("您今天已经订购过了。"));
    }

    #[test]
    fn other_failures_get_generic_wording() {
        let msg = order_failure_message(&ApiError::Status {
            status: 400,
            message: "该便当目前已暂停贩售。".into(),
        });
        assert!(msg.contains("订购失败"));
        assert!(!msg.contains("不可重复订购"));

        let msg = order_failure_message(&ApiError::Unreachable);
        assert!(!msg.contains("不可重复订购"));
    }
}
