use super::super::{Model, Msg, StagedFile};
use super::utils::debounce;
use gloo_file::File as GlooFile;
use shared::YarnThickness;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub struct SampleImage {
    pub id: &'static str,
    pub url: &'static str,
    pub caption: &'static str,
}

pub const SAMPLES: &[SampleImage] = &[
    SampleImage {
        id: "granny-square",
        url: "/static/samples/granny-square.jpg",
        caption: "Granny square",
    },
    SampleImage {
        id: "amigurumi",
        url: "/static/samples/amigurumi.jpg",
        caption: "Amigurumi",
    },
];

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_upload_area(model, ctx) }
            { render_thickness_selector(model, ctx) }
            { render_sample_gallery(ctx) }
            { render_submit_button(model, ctx) }
        </div>
    }
}

fn render_upload_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let candidate = input.files().and_then(|files| files.item(0));

        // Allow re-selecting the same file later.
        input.set_value("");

        candidate.map(|file| Msg::FileSelected(GlooFile::from(file)))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("image-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="image-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="file-upload-area"
                class={classes!(
                    "upload-area",
                    model.is_dragging.then_some("dragover"),
                    model.shaking.then_some("shake"),
                )}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                {
                    if let Some(staged) = &model.staged {
                        render_file_preview(ctx, staged)
                    } else {
                        render_upload_prompt()
                    }
                }
            </div>
        </>
    }
}

fn render_upload_prompt() -> Html {
    html! {
        <div class="upload-content">
            <i class="fa-solid fa-cloud-arrow-up"></i>
            <p>{"Drag & drop your project photo here, paste, or click to browse"}</p>
            <p class="file-types">{"Supported formats: JPG, PNG, WEBP"}</p>
        </div>
    }
}

fn render_file_preview(ctx: &Context<Model>, staged: &StagedFile) -> Html {
    let link = ctx.link();

    html! {
        <div class="file-preview">
            {
                match &staged.preview_uri {
                    Some(uri) => html! {
                        <img
                            id="preview-image"
                            class="preview-image"
                            src={uri.clone()}
                            alt={format!("Preview of {}", staged.file.name())}
                        />
                    },
                    None => html! {
                        <div class="preview-pending">
                            <i class="fa-solid fa-spinner fa-spin"></i>
                        </div>
                    },
                }
            }
            <span id="file-name" class="file-name">{ staged.file.name() }</span>
            <button
                type="button"
                id="remove-file"
                class="remove-file-btn"
                title="Remove this image"
                onclick={link.callback(|e: MouseEvent| {
                    e.stop_propagation();
                    Msg::RemoveFile
                })}
            >
                <i class="fa-solid fa-times"></i>
            </button>
        </div>
    }
}

fn render_thickness_selector(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="thickness-selector">
            <h4>{"Yarn Thickness"}</h4>
            <div class="thickness-options">
                { for YarnThickness::ALL.into_iter().map(|option| html! {
                    <label class="thickness-option">
                        <input
                            type="radio"
                            name="thickness"
                            value={option.to_string()}
                            checked={model.thickness == option}
                            onchange={ctx.link().callback(move |_| Msg::SetThickness(option))}
                        />
                        <span class="radio-label-text">{ option.to_string() }</span>
                    </label>
                })}
            </div>
        </div>
    }
}

fn render_sample_gallery(ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="sample-gallery">
            <p class="sample-hint">{"No project photo at hand? Try a sample:"}</p>
            <div class="sample-images">
                { for SAMPLES.iter().map(|sample| html! {
                    <button
                        type="button"
                        class="sample-image"
                        title={format!("Load the {} sample", sample.caption)}
                        onclick={link.callback(move |_| Msg::LoadSample(sample))}
                    >
                        <img src={sample.url} alt={sample.caption} />
                        <span>{ sample.caption }</span>
                    </button>
                })}
            </div>
        </div>
    }
}

fn render_submit_button(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <button
            id="submit-button"
            class="analyze-btn"
            disabled={model.submitting}
            onclick={debounce(300, move || link.send_message(Msg::Submit))}
        >
            { render_submit_button_content(model) }
        </button>
    }
}

fn render_submit_button_content(model: &Model) -> Html {
    if model.submitting {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyse Project"}</> }
    }
}
