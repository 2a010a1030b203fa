//! 便当新增/编辑对话框
//!
//! 「编辑目标 id 的有无」是新增与编辑的唯一判别：
//! `editing` 为 `Some` 时回填表单并在提交时走更新接口。
//! 餐厅下拉选项来自面板持有的实时列表，编辑时预选当前餐厅。

mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use self::form_state::MealFormState;
use lunchbox_shared::{Canteen, Meal};

#[component]
pub fn MealDialog(
    /// 打开信号，由管理面板控制
    open: RwSignal<bool>,
    /// 编辑目标；`None` 表示新增
    editing: RwSignal<Option<Meal>>,
    /// 实时餐厅列表（下拉选项）
    canteens: ReadSignal<Vec<Canteen>>,
    /// 保存成功后的回调（面板刷新管理列表）
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let form = MealFormState::new();
    let (saving, set_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 打开时按编辑目标回填或重置表单
    Effect::new(move |_| {
        if open.get() {
            match editing.get() {
                Some(meal) => form.load(&meal),
                None => form.reset(),
            }
            set_error_msg.set(None);
        }
    });

    // open 信号驱动原生 <dialog>
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        // 本地校验失败：行内提示，不发网络请求
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };

        set_saving.set(true);
        set_error_msg.set(None);
        let meal_id = form.meal_id.get_untracked();

        spawn_local(async move {
            let result = match meal_id {
                Some(id) => api.update_meal(id, &payload).await,
                None => api.create_meal(&payload).await,
            };
            set_saving.set(false);
            match result {
                Ok(_) => {
                    open.set(false);
                    on_saved.run(());
                }
                // 保持对话框打开，行内显示服务端文案
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if form.meal_id.get().is_some() { "编辑便当" } else { "新增便当" }}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-2">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="meal-name" class="label">
                            <span class="label-text">"便当名称"</span>
                        </label>
                        <input
                            id="meal-name"
                            type="text"
                            required
                            placeholder="排骨便当"
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            prop:value=move || form.name.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="meal-price" class="label">
                            <span class="label-text">"价格（元）"</span>
                        </label>
                        <input
                            id="meal-price"
                            type="text"
                            required
                            placeholder="85.00"
                            on:input=move |ev| form.price_input.set(event_target_value(&ev))
                            prop:value=move || form.price_input.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"所属餐厅"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                form.canteen_id.set(event_target_value(&ev).parse::<i64>().ok());
                            }
                        >
                            <option value="" disabled=true selected=move || form.canteen_id.get().is_none()>
                                "请选择餐厅"
                            </option>
                            <For
                                each=move || canteens.get()
                                key=|canteen| canteen.id
                                children=move |canteen: Canteen| {
                                    let canteen_id = canteen.id;
                                    view! {
                                        <option
                                            value=canteen.id.to_string()
                                            selected=move || form.canteen_id.get() == Some(canteen_id)
                                        >
                                            {canteen.name.clone()}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label cursor-pointer">
                            <span class="label-text">"供应中"</span>
                            <input
                                type="checkbox"
                                class="toggle toggle-primary"
                                prop:checked=move || form.is_active.get()
                                on:change=move |ev| form.is_active.set(event_target_checked(&ev))
                            />
                        </label>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                            "取消"
                        </button>
                        <button type="submit" disabled=move || saving.get() class="btn btn-primary">
                            {move || if saving.get() {
                                view! { <span class="loading loading-spinner"></span> "保存中..." }.into_any()
                            } else {
                                "保存".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
