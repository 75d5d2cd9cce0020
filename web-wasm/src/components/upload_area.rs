//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップかファイル選択で1枚だけ受け取る。
//! 形式・サイズの検査は読み込み前に行う。

use herb_scan_common::{EncodedImage, IntakePolicy};
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, Event, File, FileList, MouseEvent};

#[component]
pub fn UploadArea(
    policy: IntakePolicy,
    on_image: Callback<EncodedImage>,
    on_reject: Callback<String>,
) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let accept = policy.allowed_mime_types.join(",");
    let formats = policy.accepted_formats_label();
    let max_mb = policy.max_file_size_mb;
    let policy = StoredValue::new(policy);

    let handle_files = move |files: FileList| {
        // 先頭の1枚だけ使う
        if let Some(file) = files.get(0) {
            read_file(file, policy.get_value(), on_image, on_reject);
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_: MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |_: Event| {
        if let Some(input) = input_ref.get() {
            if let Some(files) = input.files() {
                handle_files(files);
            }
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                type="file"
                class="hidden"
                accept=accept
                node_ref=input_ref
                on:click=|ev| ev.stop_propagation()
                on:change=on_change
            />
            <div class="upload-icon">"📷"</div>
            <p>"Drop a photo here or click to choose one"</p>
            <p class="text-muted">{format!("Formats: {} (max {} MB)", formats, max_mb)}</p>
        </div>
    }
}

fn read_file(
    file: File,
    policy: IntakePolicy,
    on_image: Callback<EncodedImage>,
    on_reject: Callback<String>,
) {
    if let Err(e) = policy.check(&file.type_(), file.size() as u64) {
        on_reject.run(e.user_message());
        return;
    }

    spawn_local(async move {
        let file = gloo::file::File::from(file);
        match gloo::file::futures::read_as_data_url(&file).await {
            Ok(data_url) => on_image.run(EncodedImage::from_data_url(&data_url)),
            Err(e) => {
                gloo::console::error!("file read failed:", e.to_string());
                on_reject.run("We couldn't read that file. Please choose another photo.".to_string());
            }
        }
    });
}
