//! 员工订单历史页
//!
//! 操作列的可用性是 `(订单日期, 结账状态, 今天)` 的纯函数。
//! 「今天」取浏览器本地日历日期，不与服务器协商时区，
//! 这是有意的简化而非保证。

use chrono::{Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::web::confirm;
use lunchbox_shared::Order;
use lunchbox_shared::money::format_cents;

/// 操作列的三种形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    /// 当日未结账：允许删除
    Delete,
    /// 当日已结账：不可删除
    SettledToday,
    /// 非当日：不可删除
    Historical,
}

/// 操作列规则：仅「订单日期 == 今天 且 未结账」可删除
fn row_action(order_date: NaiveDate, is_paid: bool, today: NaiveDate) -> RowAction {
    if order_date != today {
        RowAction::Historical
    } else if is_paid {
        RowAction::SettledToday
    } else {
        RowAction::Delete
    }
}

impl RowAction {
    /// 禁用态的解释文案；`Delete` 渲染为按钮而非文案
    fn disabled_text(&self) -> Option<&'static str> {
        match self {
            RowAction::Delete => None,
            RowAction::SettledToday => Some("已结账，无法删除"),
            RowAction::Historical => Some("历史订单"),
        }
    }
}

#[component]
pub fn HistoryPage() -> impl IntoView {
    let api = use_api();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);
    let (deleting, set_deleting) = signal(false);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None); // 文案, 是否错误

    let load_orders = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api.my_orders().await {
                Ok(data) => set_orders.set(data),
                Err(err) => set_notice.set(Some((format!("加载订单失败: {err}"), true))),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| load_orders());

    let delete_order = move |order_id: i64| {
        if !confirm("您确定要删除这笔订单吗？请注意截止时间限制。") {
            return;
        }
        set_deleting.set(true);
        spawn_local(async move {
            match api.delete_order(order_id).await {
                Ok(()) => {
                    // 先在本地移除该行给出即时反馈
                    set_orders.update(|list| list.retain(|o| o.id != order_id));
                    set_notice.set(Some(("订单删除成功！".to_string(), false)));
                }
                Err(err) => {
                    set_notice.set(Some((
                        format!("删除失败 ({}): {}", err.status(), err),
                        true,
                    )));
                }
            }
            set_deleting.set(false);
            // 无论成败都整页重拉，保证与服务器一致
            load_orders();
        });
    };

    view! {
        <div class="max-w-5xl mx-auto p-4 space-y-4">
            <h2 class="text-2xl font-bold">"我的订单"</h2>

            <Show when=move || notice.get().is_some()>
                <div
                    role="alert"
                    class=move || {
                        if notice.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                            "alert alert-error"
                        } else {
                            "alert alert-success"
                        }
                    }
                >
                    <span>{move || notice.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            <th>"日期"</th>
                            <th>"便当"</th>
                            <th>"价格"</th>
                            <th>"状态"</th>
                            <th>"操作"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || loading.get()>
                            <tr>
                                <td colspan="5" class="text-center py-8">
                                    <span class="loading loading-spinner loading-md"></span>
                                    " 载入中..."
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !loading.get() && orders.with(|o| o.is_empty())>
                            <tr>
                                <td colspan="5" class="text-center py-8 text-base-content/50">
                                    "您目前没有订单记录。"
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || orders.get()
                            key=|order| order.id
                            children=move |order: Order| {
                                let order_id = order.id;
                                let action =
                                    row_action(order.order_date, order.is_paid, Local::now().date_naive());
                                let (badge_class, badge_text) = if order.is_paid {
                                    ("badge badge-success", "已结账")
                                } else {
                                    ("badge badge-warning", "未结账")
                                };
                                view! {
                                    <tr>
                                        <td>{order.order_date.to_string()}</td>
                                        <td>{order.meal_name.clone()}</td>
                                        <td>"NT$ " {format_cents(order.price)}</td>
                                        <td>
                                            <span class=badge_class>{badge_text}</span>
                                        </td>
                                        <td>
                                            {match action.disabled_text() {
                                                None => view! {
                                                    <button
                                                        class="btn btn-sm btn-error"
                                                        disabled=move || deleting.get()
                                                        on:click=move |_| delete_order(order_id)
                                                    >
                                                        "删除"
                                                    </button>
                                                }
                                                .into_any(),
                                                Some(text) => view! {
                                                    <span class="text-base-content/50">{text}</span>
                                                }
                                                .into_any(),
                                            }}
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn delete_enabled_only_for_todays_unpaid_order() {
        let today = date("2025-11-04");
        assert_eq!(row_action(today, false, today), RowAction::Delete);
        assert_eq!(row_action(today, true, today), RowAction::SettledToday);
        assert_eq!(
            row_action(date("2025-11-03"), false, today),
            RowAction::Historical
        );
        assert_eq!(
            row_action(date("2025-11-03"), true, today),
            RowAction::Historical
        );
    }

    #[test]
    fn disabled_variants_carry_distinct_texts() {
        assert_eq!(RowAction::Delete.disabled_text(), None);
        let settled = RowAction::SettledToday.disabled_text().unwrap();
        let historical = RowAction::Historical.disabled_text().unwrap();
        assert_ne!(settled, historical);
        assert!(settled.contains("无法删除"));
        assert!(historical.contains("历史"));
    }
}
