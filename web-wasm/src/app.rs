//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::api::relay;
use crate::components::{
    header::Header,
    query_form::QueryForm,
    result_panel::ResultPanel,
};
use vision_query_common::{
    render_image_preview, Feature, FeatureSelection, InferenceRequest, QueryTracker,
    RenderState, DEFAULT_ENDPOINT,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let (image_uri, set_image_uri) = signal(String::new());
    let (checked, set_checked) = signal(vec![false; Feature::ALL.len()]);
    let (render_state, set_render_state) = signal(RenderState::Idle);
    let (preview, set_preview) = signal(String::new());
    let tracker = StoredValue::new(QueryTracker::new());

    // 送信ハンドラ（Goボタン・Enterキー共通）
    let on_submit = move |_: ()| {
        // 選択はDOM順（カタログ順）で毎回作り直す
        let features = FeatureSelection::from_checked(
            Feature::ALL
                .iter()
                .zip(checked.get_untracked())
                .map(|(feature, is_checked)| (feature.id(), is_checked)),
        );
        let request = InferenceRequest::new(image_uri.get_untracked(), features);

        let Some(ticket) = tracker.try_update_value(|t| t.begin()) else {
            return;
        };
        gloo::console::debug!(format!(
            "query #{}: uri={} features={:?}",
            ticket.generation(),
            request.image_uri(),
            request.features().as_slice()
        ));

        set_render_state.set(RenderState::Working);
        set_preview.set(render_image_preview(request.image_uri()));

        spawn_local(async move {
            let outcome = relay::post_query(DEFAULT_ENDPOINT, &request).await;
            if let Err(e) = &outcome {
                gloo::console::error!(format!("query #{} failed: {}", ticket.generation(), e));
            }

            match tracker.with_value(|t| t.complete(ticket, outcome)) {
                Some(state) => set_render_state.set(state),
                None => gloo::console::debug!(format!(
                    "query #{}: superseded, response dropped",
                    ticket.generation()
                )),
            }
        });
    };

    view! {
        <div class="container">
            <Header />

            <QueryForm
                image_uri=image_uri
                set_image_uri=set_image_uri
                checked=checked
                set_checked=set_checked
                on_submit=on_submit
            />

            <ResultPanel render_state=render_state preview=preview />
        </div>
    }
}
