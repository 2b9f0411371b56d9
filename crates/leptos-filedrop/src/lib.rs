//! Leptos FileDrop Utilities
//!
//! HTML5 file drag-and-drop and file-picker helpers for Leptos.
//! A drop zone tracks hover state and hands the dropped files to a callback.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop zone state signals
#[derive(Clone, Copy)]
pub struct FileDropSignals {
    /// Files are being dragged over the zone
    pub over_read: ReadSignal<bool>,
    pub over_write: WriteSignal<bool>,
    /// Zone ignores drops and picker changes
    pub disabled_read: ReadSignal<bool>,
    pub disabled_write: WriteSignal<bool>,
}

pub fn create_filedrop_signals() -> FileDropSignals {
    let (over_read, over_write) = signal(false);
    let (disabled_read, disabled_write) = signal(false);
    FileDropSignals {
        over_read,
        over_write,
        disabled_read,
        disabled_write,
    }
}

/// Collect a `FileList` into owned handles
pub fn files_from_list(list: &web_sys::FileList) -> Vec<web_sys::File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Create dragover handler: prevents default so the browser allows a drop
pub fn make_on_dragover(drop: FileDropSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if !drop.over_read.get_untracked() {
            drop.over_write.set(true);
        }
    }
}

/// Create dragleave handler
pub fn make_on_dragleave(drop: FileDropSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        drop.over_write.set(false);
    }
}

/// Create drop handler that forwards dropped files
pub fn make_on_drop<F>(drop: FileDropSignals, on_files: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(Vec<web_sys::File>) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        drop.over_write.set(false);
        if drop.disabled_read.get_untracked() {
            return;
        }
        let files = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .map(|list| files_from_list(&list))
            .unwrap_or_default();
        if !files.is_empty() {
            on_files(files);
        }
    }
}

/// Create change handler for an `<input type="file">`
///
/// The input value is reset afterwards so picking the same file again fires `change`.
pub fn make_on_input_change<F>(drop: FileDropSignals, on_files: F) -> impl Fn(web_sys::Event) + Clone + 'static
where
    F: Fn(Vec<web_sys::File>) + Clone + 'static,
{
    move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            log::warn!("[FILEDROP] change event without input target");
            return;
        };
        if drop.disabled_read.get_untracked() {
            input.set_value("");
            return;
        }
        let files = input.files().map(|list| files_from_list(&list)).unwrap_or_default();
        input.set_value("");
        if !files.is_empty() {
            on_files(files);
        }
    }
}

/// Open the file picker behind a hidden input
pub fn open_picker(input: &NodeRef<leptos::html::Input>) {
    if let Some(el) = input.get_untracked() {
        el.click();
    }
}
