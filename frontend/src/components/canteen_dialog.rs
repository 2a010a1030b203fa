//! 餐厅新增/编辑对话框

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use lunchbox_shared::{Canteen, CanteenPayload};

#[component]
pub fn CanteenDialog(
    /// 打开信号，由管理面板控制
    open: RwSignal<bool>,
    /// 编辑目标；`None` 表示新增
    editing: RwSignal<Option<Canteen>>,
    /// 保存成功后的回调（面板刷新管理列表）
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 表单字段；id 的有无是「新增 / 编辑」的唯一判别
    let (canteen_id, set_canteen_id) = signal(Option::<i64>::None);
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (is_active, set_is_active) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 打开时按编辑目标回填或重置表单
    Effect::new(move |_| {
        if open.get() {
            match editing.get() {
                Some(canteen) => {
                    set_canteen_id.set(Some(canteen.id));
                    set_name.set(canteen.name);
                    set_description.set(canteen.description.unwrap_or_default());
                    set_is_active.set(canteen.is_active);
                }
                None => {
                    set_canteen_id.set(None);
                    set_name.set(String::new());
                    set_description.set(String::new());
                    set_is_active.set(true);
                }
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

        let trimmed = name.get().trim().to_string();
        if trimmed.is_empty() {
            set_error_msg.set(Some("请输入餐厅名称。".to_string()));
            return;
        }
        let desc = description.get();
        let payload = CanteenPayload {
            name: trimmed,
            description: if desc.trim().is_empty() {
                None
            } else {
                Some(desc)
            },
            is_active: is_active.get(),
        };

        set_saving.set(true);
        set_error_msg.set(None);
        let id = canteen_id.get();

        spawn_local(async move {
            let result = match id {
                Some(id) => api.update_canteen(id, &payload).await,
                None => api.create_canteen(&payload).await,
            };
            set_saving.set(false);
            match result {
                Ok(_) => {
                    open.set(false);
                    on_saved.run(());
                }
                // 保持对话框打开，行内显示服务端文案（如名称冲突 409）
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if canteen_id.get().is_some() { "编辑餐厅" } else { "新增餐厅" }}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-2">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="canteen-name" class="label">
                            <span class="label-text">"餐厅名称"</span>
                        </label>
                        <input
                            id="canteen-name"
                            type="text"
                            required
                            placeholder="好吃便当店"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="canteen-description" class="label">
                            <span class="label-text">"描述（可选）"</span>
                        </label>
                        <input
                            id="canteen-description"
                            type="text"
                            placeholder="台式便当，周一到周五供应"
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                            prop:value=description
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label cursor-pointer">
                            <span class="label-text">"开放订购"</span>
                            <input
                                type="checkbox"
                                class="toggle toggle-primary"
                                prop:checked=is_active
                                on:change=move |ev| set_is_active.set(event_target_checked(&ev))
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
