//! 总务管理面板
//!
//! 今日订单统计、按便当批量结算、餐厅/便当管理列表。
//! 进入面板时统计与两个管理列表依次加载，全部完成后视图才算就绪。
//! 批量结算对每个订单 id 并发发出独立请求：彼此无顺序保证、
//! 无原子性、失败不回滚，只向总务汇报成功/失败笔数。

use std::time::Duration;

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{logout, use_session};
use crate::components::canteen_dialog::CanteenDialog;
use crate::components::meal_dialog::MealDialog;
use crate::web::{alert, confirm};
use lunchbox_shared::money::format_cents;
use lunchbox_shared::{Canteen, Meal, MealSummary, OrderSummary};

/// 结算结果汇总文案
fn settlement_summary(success: usize, failure: usize) -> String {
    if failure == 0 {
        format!("结算完成！成功标记 {success} 笔订单为已付款。")
    } else {
        format!("结算完成，成功 {success} 笔，失败 {failure} 笔。请刷新页面检查。")
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();

    let (summary, set_summary) = signal(Option::<OrderSummary>::None);
    let (loading_summary, set_loading_summary) = signal(true);
    let (canteens, set_canteens) = signal(Vec::<Canteen>::new());
    let (loading_canteens, set_loading_canteens) = signal(true);
    let (meals, set_meals) = signal(Vec::<Meal>::new());
    let (loading_meals, set_loading_meals) = signal(true);
    let (settling, set_settling) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 文案, 是否错误

    // 防御性入口检查：非总务弹窗并强制登出（真正的控制在服务端）
    Effect::new(move |_| {
        let state = session.state.get();
        if !state.is_loading && state.is_authenticated && !state.is_admin {
            alert("权限不足，无法进入管理界面！");
            logout(session);
        }
    });

    let load_summary = move || async move {
        set_loading_summary.set(true);
        match api.order_summary().await {
            Ok(data) => set_summary.set(Some(data)),
            Err(err) => set_notification.set(Some((format!("加载统计数据失败: {err}"), true))),
        }
        set_loading_summary.set(false);
    };

    let load_canteens = move || async move {
        set_loading_canteens.set(true);
        match api.list_canteens().await {
            Ok(data) => set_canteens.set(data),
            Err(err) => set_notification.set(Some((format!("加载餐厅列表失败: {err}"), true))),
        }
        set_loading_canteens.set(false);
    };

    let load_meals = move || async move {
        set_loading_meals.set(true);
        match api.list_meals().await {
            Ok(data) => set_meals.set(data),
            Err(err) => set_notification.set(Some((format!("加载便当列表失败: {err}"), true))),
        }
        set_loading_meals.set(false);
    };

    // 初始加载：统计与管理列表依次完成
    Effect::new(move |_| {
        spawn_local(async move {
            load_summary().await;
            load_canteens().await;
            load_meals().await;
        });
    });

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                Duration::from_secs(3),
            );
        }
    });

    let settle_by_meal = move |meal_name: String, order_ids: Vec<i64>| {
        if !confirm(&format!(
            "您确定要结算所有未付清的 [{meal_name}] 订单吗？这将标记为已付款。"
        )) {
            return;
        }
        set_settling.set(true);
        spawn_local(async move {
            // 结算接口是单笔的，这里并发发出；各请求独立成败
            let results = join_all(order_ids.into_iter().map(|id| api.mark_paid(id))).await;
            let success = results.iter().filter(|r| r.is_ok()).count();
            let failure = results.len() - success;

            set_notification.set(Some((settlement_summary(success, failure), failure > 0)));
            set_settling.set(false);

            // 结算改变结账状态：重拉统计。订单历史页采用
            // 进入即重拉的失效策略，员工下次打开即见已结账。
            load_summary().await;
        });
    };

    // 对话框状态
    let canteen_dialog_open = RwSignal::new(false);
    let editing_canteen = RwSignal::new(Option::<Canteen>::None);
    let meal_dialog_open = RwSignal::new(false);
    let editing_meal = RwSignal::new(Option::<Meal>::None);

    let on_lists_changed = move |_: ()| {
        spawn_local(async move {
            load_canteens().await;
            load_meals().await;
        });
    };

    let delete_canteen = move |canteen: Canteen| {
        if !confirm(&format!("确定要删除 [{}] 吗？此操作不可逆！", canteen.name)) {
            return;
        }
        spawn_local(async move {
            match api.delete_canteen(canteen.id).await {
                Ok(()) => {
                    set_notification.set(Some((format!("{} 删除成功！", canteen.name), false)));
                    load_canteens().await;
                }
                Err(err) => set_notification.set(Some((
                    format!("删除 {} 失败 ({}): {}", canteen.name, err.status(), err),
                    true,
                ))),
            }
        });
    };

    let delete_meal = move |meal: Meal| {
        if !confirm(&format!("确定要删除 [{}] 吗？此操作不可逆！", meal.name)) {
            return;
        }
        spawn_local(async move {
            match api.delete_meal(meal.id).await {
                Ok(()) => {
                    set_notification.set(Some((format!("{} 删除成功！", meal.name), false)));
                    load_meals().await;
                }
                Err(err) => set_notification.set(Some((
                    format!("删除 {} 失败 ({}): {}", meal.name, err.status(), err),
                    true,
                ))),
            }
        });
    };

    view! {
        <div class="max-w-7xl mx-auto p-4 space-y-6">
            // 通知提示框
            <Show when=move || notification.get().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div class=move || {
                        if notification.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                            "alert alert-error shadow-lg"
                        } else {
                            "alert alert-success shadow-lg"
                        }
                    }>
                        <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                    </div>
                </div>
            </Show>

            <h2 class="text-2xl font-bold">"总务管理"</h2>

            // 今日统计
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"总订单笔数"</div>
                    <div class="stat-value text-primary">
                        {move || summary.get().map(|s| s.total_orders).unwrap_or(0)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"总金额（未结算）"</div>
                    <div class="stat-value text-success">
                        "NT$ " {move || summary.get().map(|s| format_cents(s.total_amount)).unwrap_or_else(|| "0.00".to_string())}
                    </div>
                </div>
            </div>

            // 按便当分类的结算表
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"今日订单结算"</h3>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"便当"</th>
                                    <th>"数量"</th>
                                    <th>"金额"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading_summary.get()>
                                    <tr>
                                        <td colspan="4" class="text-center py-6">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " 载入中..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || {
                                    !loading_summary.get()
                                        && summary.with(|s| s.as_ref().map(|s| s.meal_summary.is_empty()).unwrap_or(true))
                                }>
                                    <tr>
                                        <td colspan="4" class="text-center py-6 text-base-content/50">
                                            "今日尚无订单。"
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || summary.get().map(|s| s.meal_summary).unwrap_or_default()
                                    key=|row| row.meal_name.clone()
                                    children=move |row: MealSummary| {
                                        let meal_name = row.meal_name.clone();
                                        let order_ids = row.order_ids.clone();
                                        let count = row.order_count;
                                        view! {
                                            <tr>
                                                <td>{row.meal_name.clone()}</td>
                                                <td>{row.order_count} " 份"</td>
                                                <td>"NT$ " {format_cents(row.total_price)}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-sm btn-primary"
                                                        disabled=move || settling.get()
                                                        on:click=move |_| settle_by_meal(meal_name.clone(), order_ids.clone())
                                                    >
                                                        {format!("批量结算 ({count} 笔)")}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                // 餐厅管理
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h3 class="card-title">"餐厅管理"</h3>
                            <button
                                class="btn btn-primary btn-sm"
                                on:click=move |_| {
                                    editing_canteen.set(None);
                                    canteen_dialog_open.set(true);
                                }
                            >
                                "新增餐厅"
                            </button>
                        </div>

                        <Show when=move || loading_canteens.get()>
                            <div class="py-4 text-center">
                                <span class="loading loading-spinner loading-md"></span>
                                " 载入中..."
                            </div>
                        </Show>
                        <Show when=move || !loading_canteens.get() && canteens.with(|c| c.is_empty())>
                            <div class="alert alert-info">"尚未创建任何餐厅。"</div>
                        </Show>

                        <ul class="divide-y divide-base-200">
                            <For
                                each=move || canteens.get()
                                key=|canteen| canteen.id
                                children=move |canteen: Canteen| {
                                    let edit_target = canteen.clone();
                                    let delete_target = canteen.clone();
                                    let (badge_class, badge_text) = if canteen.is_active {
                                        ("badge badge-success", "活跃")
                                    } else {
                                        ("badge badge-neutral", "下架")
                                    };
                                    view! {
                                        <li class="flex items-center justify-between py-2">
                                            <div class="flex items-center gap-2">
                                                <strong>{canteen.name.clone()}</strong>
                                                <span class="text-sm text-base-content/60">
                                                    {canteen.description.clone().unwrap_or_else(|| "无描述".to_string())}
                                                </span>
                                                <span class=badge_class>{badge_text}</span>
                                            </div>
                                            <div class="flex gap-2">
                                                <button
                                                    class="btn btn-sm btn-warning"
                                                    on:click=move |_| {
                                                        editing_canteen.set(Some(edit_target.clone()));
                                                        canteen_dialog_open.set(true);
                                                    }
                                                >
                                                    "编辑"
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-error"
                                                    on:click=move |_| delete_canteen(delete_target.clone())
                                                >
                                                    "删除"
                                                </button>
                                            </div>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </div>

                // 便当管理
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h3 class="card-title">"便当管理"</h3>
                            <button
                                class="btn btn-primary btn-sm"
                                on:click=move |_| {
                                    editing_meal.set(None);
                                    meal_dialog_open.set(true);
                                }
                            >
                                "新增便当"
                            </button>
                        </div>

                        <Show when=move || loading_meals.get()>
                            <div class="py-4 text-center">
                                <span class="loading loading-spinner loading-md"></span>
                                " 载入中..."
                            </div>
                        </Show>
                        <Show when=move || !loading_meals.get() && meals.with(|m| m.is_empty())>
                            <div class="alert alert-info">"尚未创建任何便当。"</div>
                        </Show>

                        <ul class="divide-y divide-base-200">
                            <For
                                each=move || meals.get()
                                key=|meal| meal.id
                                children=move |meal: Meal| {
                                    let edit_target = meal.clone();
                                    let delete_target = meal.clone();
                                    let (badge_class, badge_text) = if meal.is_active {
                                        ("badge badge-success", "供应中")
                                    } else {
                                        ("badge badge-neutral", "停售")
                                    };
                                    view! {
                                        <li class="flex items-center justify-between py-2">
                                            <div class="flex items-center gap-2">
                                                <strong>{meal.name.clone()}</strong>
                                                <span class="text-sm text-success">
                                                    "NT$ " {format_cents(meal.price)}
                                                </span>
                                                <span class="text-sm text-base-content/60">
                                                    "(" {meal.canteen_name.clone()} ")"
                                                </span>
                                                <span class=badge_class>{badge_text}</span>
                                            </div>
                                            <div class="flex gap-2">
                                                <button
                                                    class="btn btn-sm btn-warning"
                                                    on:click=move |_| {
                                                        editing_meal.set(Some(edit_target.clone()));
                                                        meal_dialog_open.set(true);
                                                    }
                                                >
                                                    "编辑"
                                                </button>
                                                <button
                                                    class="btn btn-sm btn-error"
                                                    on:click=move |_| delete_meal(delete_target.clone())
                                                >
                                                    "删除"
                                                </button>
                                            </div>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </div>
                </div>
            </div>

            <CanteenDialog
                open=canteen_dialog_open
                editing=editing_canteen
                on_saved=on_lists_changed
            />
            <MealDialog
                open=meal_dialog_open
                editing=editing_meal
                canteens=canteens
                on_saved=on_lists_changed
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_success_reports_count_without_failure_wording() {
        let msg = settlement_summary(5, 0);
        assert!(msg.contains('5'));
        assert!(!msg.contains("失败"));
    }

    #[test]
    fn partial_failure_reports_both_counts() {
        let msg = settlement_summary(3, 2);
        assert!(msg.contains('3'));
        assert!(msg.contains('2'));
        assert!(msg.contains("失败"));
    }

    #[test]
    fn zero_ids_settles_vacuously() {
        let msg = settlement_summary(0, 0);
        assert!(msg.contains('0'));
        assert!(!msg.contains("失败"));
    }
}
