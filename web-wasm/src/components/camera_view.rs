//! カメラ撮影コンポーネント

use crate::camera::WebCamera;
use herb_scan_common::{CameraSession, CaptureState, EncodedImage, Error};
use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MouseEvent;

#[component]
pub fn CameraView(on_image: Callback<EncodedImage>) -> impl IntoView {
    let video_ref = NodeRef::<Video>::new();
    let (capture_state, set_capture_state) = signal(CaptureState::Closed);
    let (hint, set_hint) = signal(None::<&'static str>);
    // アンマウント時に破棄され、Drop でデバイスも解放される
    let session = StoredValue::new_local(None::<CameraSession<WebCamera>>);

    let open = move |_: MouseEvent| {
        if matches!(capture_state.get_untracked(), CaptureState::Opening | CaptureState::Live) {
            return;
        }
        let Some(video) = video_ref.get_untracked() else {
            return;
        };

        session.set_value(None);
        set_hint.set(None);
        set_capture_state.set(CaptureState::Opening);

        spawn_local(async move {
            let mut opened = CameraSession::new(WebCamera::new(video));
            let result = opened.open().await;
            set_capture_state.set(opened.state());
            if result.is_ok() && opened.has_active_stream() {
                session.set_value(Some(opened));
            }
        });
    };

    let capture = move |_: MouseEvent| {
        let Some((result, state)) = session
            .try_update_value(|slot| slot.as_mut().map(|s| (s.capture(), s.state())))
            .flatten()
        else {
            return;
        };

        match result {
            Ok(image) => {
                session.set_value(None);
                set_capture_state.set(state);
                on_image.run(image);
            }
            Err(Error::CameraNotReady) => set_hint.set(Some("Camera is still starting, try again in a moment.")),
            Err(e) => {
                gloo::console::warn!("capture failed:", e.to_string());
                session.set_value(None);
                set_capture_state.set(state);
            }
        }
    };

    let cancel = move |_: MouseEvent| {
        session.update_value(|slot| {
            if let Some(s) = slot.as_mut() {
                s.cancel();
            }
            *slot = None;
        });
        set_hint.set(None);
        set_capture_state.set(CaptureState::Closed);
    };

    let is_live = move || capture_state.get() == CaptureState::Live;
    let error_message = move || match capture_state.get() {
        CaptureState::Error(kind) => Some(kind.message()),
        _ => None,
    };

    view! {
        <div class="camera-view">
            <video
                node_ref=video_ref
                class=move || if is_live() { "camera-preview" } else { "camera-preview hidden" }
                autoplay=true
                muted=true
                playsinline=true
            />

            {move || match capture_state.get() {
                CaptureState::Live => view! {
                    <div class="camera-actions">
                        <button class="btn btn-primary" on:click=capture>"Capture"</button>
                        <button class="btn btn-secondary" on:click=cancel>"Cancel"</button>
                    </div>
                }.into_any(),
                CaptureState::Opening => view! {
                    <p class="text-muted">"Opening camera..."</p>
                }.into_any(),
                _ => view! {
                    <button class="btn btn-secondary" on:click=open>"📸 Use camera"</button>
                }.into_any(),
            }}

            {move || error_message().map(|message| view! { <p class="camera-error">{message}</p> })}
            {move || hint.get().map(|message| view! { <p class="text-muted">{message}</p> })}
        </div>
    }
}
