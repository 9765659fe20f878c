//! 結果表示コンポーネント

use leptos::prelude::*;
use vision_query_common::RenderState;

/// 画像プレビューと結果領域
///
/// どちらも毎回まるごと置き換える。
#[component]
pub fn ResultPanel(
    render_state: ReadSignal<RenderState>,
    preview: ReadSignal<String>,
) -> impl IntoView {
    view! {
        <div class="result-panel">
            <div id="img" class="image-preview" inner_html=move || preview.get() />
            <div
                id="result"
                class="results"
                class:working=move || render_state.get().is_working()
                inner_html=move || render_state.get().to_html()
            />
        </div>
    }
}
