//! 問い合わせフォームコンポーネント
//!
//! 画像URI入力・機能チェックボックス・Goボタン。
//! どの入力欄でもEnterキーでGoと同じ送信を行う。

use leptos::prelude::*;
use web_sys::KeyboardEvent;
use vision_query_common::Feature;

const ENTER_KEY_CODE: u32 = 13;

fn is_enter(ev: &KeyboardEvent) -> bool {
    ev.key_code() == ENTER_KEY_CODE
}

#[component]
pub fn QueryForm<F>(
    image_uri: ReadSignal<String>,
    set_image_uri: WriteSignal<String>,
    checked: ReadSignal<Vec<bool>>,
    set_checked: WriteSignal<Vec<bool>>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let checkboxes = Feature::ALL
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let on_submit = on_submit.clone();
            view! {
                <label class="feature-option">
                    <input
                        type="checkbox"
                        class="requestbox"
                        id=feature.id()
                        prop:checked=move || checked.get().get(index).copied().unwrap_or(false)
                        on:change=move |ev| {
                            let value = event_target_checked(&ev);
                            set_checked.update(|c| {
                                if let Some(slot) = c.get_mut(index) {
                                    *slot = value;
                                }
                            });
                        }
                        on:keypress=move |ev: KeyboardEvent| {
                            if is_enter(&ev) {
                                on_submit(());
                            }
                        }
                    />
                    {feature.label()}
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="query-form">
            <div class="form-group">
                <label for="img_uri">"画像URI"</label>
                <input
                    type="text"
                    id="img_uri"
                    placeholder="https://..."
                    prop:value=move || image_uri.get()
                    on:input=move |ev| {
                        set_image_uri.set(event_target_value(&ev));
                    }
                    on:keypress={
                        let on_submit = on_submit.clone();
                        move |ev: KeyboardEvent| {
                            if is_enter(&ev) {
                                on_submit(());
                            }
                        }
                    }
                />
            </div>

            <div class="feature-grid">
                {checkboxes}
            </div>

            <button
                id="go"
                class="btn btn-primary"
                on:click=move |_| on_submit(())
            >
                "Go"
            </button>
        </div>
    }
}
