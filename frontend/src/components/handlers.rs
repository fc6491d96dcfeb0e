use super::super::{Model, Msg, ResultTab, StagedFile};
use super::upload_section::SampleImage;
use super::utils::is_image_mime;
use crate::{api, theme};
use gloo_file::callbacks::read_as_data_url;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use shared::{AnalysisResult, YarnThickness};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

const SHAKE_DURATION_MS: u32 = 500;

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let mime_type = file.raw_mime_type();
    if !is_image_mime(&mime_type) {
        log::warn!("Rejected non-image candidate: {} ({})", file.name(), mime_type);
        model.notice = Some(format!(
            "\"{}\" is not an image file. Please select a valid image.",
            file.name()
        ));
        return true;
    }

    model.notice = None;
    model.generation += 1;

    // State is staged immediately; the preview pane catches up when the
    // data-URI read resolves. Replacing the reader cancels a pending read.
    let link = ctx.link().clone();
    let reader = read_as_data_url(&file, move |outcome| match outcome {
        Ok(uri) => link.send_message(Msg::PreviewLoaded(uri)),
        Err(e) => log::warn!("Preview read failed: {:?}", e),
    });
    model.preview_reader = Some(reader);
    model.staged = Some(StagedFile {
        file,
        preview_uri: None,
    });

    true
}

pub fn handle_preview_loaded(model: &mut Model, uri: String) -> bool {
    model.preview_reader = None;
    if let Some(staged) = model.staged.as_mut() {
        staged.preview_uri = Some(uri);
        true
    } else {
        false
    }
}

pub fn handle_remove_file(model: &mut Model) -> bool {
    model.staged = None;
    model.preview_reader = None;
    model.generation += 1;
    model.result = None;
    model.submit_error = None;
    model.notice = None;
    model.active_tab = ResultTab::Processed;
    true
}

pub fn handle_load_sample(ctx: &Context<Model>, sample: &'static SampleImage) -> bool {
    // Staging only; analysis stays behind the submit control.
    let link = ctx.link().clone();
    spawn_local(async move {
        match fetch_sample(sample).await {
            Ok(file) => link.send_message(Msg::FileSelected(file)),
            Err(message) => {
                log::error!("Sample load failed: {message}");
                link.send_message(Msg::SetNotice(Some(message)));
            }
        }
    });
    false
}

async fn fetch_sample(sample: &SampleImage) -> Result<GlooFile, String> {
    let response = Request::get(sample.url)
        .send()
        .await
        .map_err(|e| format!("Error loading sample image: {e}"))?;

    if !response.ok() {
        return Err(format!(
            "Error loading sample image: status {}",
            response.status()
        ));
    }

    let bytes = response
        .binary()
        .await
        .map_err(|e| format!("Error loading sample image: {e}"))?;

    let name = format!("sample-{}.jpg", sample.id);
    Ok(GlooFile::new_with_options(
        &name,
        bytes.as_slice(),
        Some("image/jpeg"),
        None,
    ))
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.submitting {
        return false;
    }

    let Some(staged) = model.staged.as_ref() else {
        return start_shake(model, ctx);
    };

    model.submitting = true;
    model.notice = None;
    api::submit_analysis(ctx, model.generation, staged.file.clone(), model.thickness);
    true
}

fn start_shake(model: &mut Model, ctx: &Context<Model>) -> bool {
    if let Some(previous) = model.shake_timeout.take() {
        previous.cancel();
    }

    model.shaking = true;
    let link = ctx.link().clone();
    model.shake_timeout = Some(Timeout::new(SHAKE_DURATION_MS, move || {
        link.send_message(Msg::ShakeEnd);
    }));

    true
}

pub fn handle_shake_end(model: &mut Model) -> bool {
    model.shaking = false;
    model.shake_timeout = None;
    true
}

pub fn handle_analysis_finished(
    model: &mut Model,
    generation: u64,
    outcome: Result<AnalysisResult, String>,
) -> bool {
    // At most one request is in flight, so any completion re-arms the
    // submit control, even when the payload itself is discarded below.
    model.submitting = false;

    if generation != model.generation {
        log::info!("Discarding analysis response for a superseded upload");
        return true;
    }

    match outcome {
        Ok(result) => {
            model.submit_error = None;
            model.active_tab = ResultTab::Processed;
            model.result = Some(result);
            scroll_results_into_view();
        }
        Err(message) => {
            model.result = None;
            model.submit_error = Some(message);
        }
    }

    true
}

fn scroll_results_into_view() {
    if let Some(container) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("results-container"))
    {
        container.scroll_into_view();
    }
}

pub fn handle_set_thickness(model: &mut Model, option: YarnThickness) -> bool {
    model.thickness = option;
    true
}

pub fn handle_select_tab(model: &mut Model, tab: ResultTab) -> bool {
    if model.active_tab != tab {
        model.active_tab = tab;
        true
    } else {
        false
    }
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    model.theme = model.theme.toggled();
    theme::apply(model.theme);
    theme::store(model.theme);
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    let candidate = event
        .data_transfer()
        .and_then(|transfer| transfer.files())
        .and_then(|files| files.item(0));

    match candidate {
        Some(file) => ctx
            .link()
            .send_message(Msg::FileSelected(GlooFile::from(file))),
        None => model.notice = Some("Please drop an image file.".to_string()),
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(file) = event
        .clipboard_data()
        .and_then(|transfer| transfer.files())
        .and_then(|files| files.item(0))
    {
        event.prevent_default();
        ctx.link()
            .send_message(Msg::FileSelected(GlooFile::from(file)));
        return true;
    }
    false
}
