use gloo_events::EventListener;
use gloo_file::callbacks::FileReader;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::{AnalysisResult, YarnThickness};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

mod api;
mod components;
mod theme;

use components::upload_section::SampleImage;
use components::{handlers, header, results, upload_section, utils};
use theme::Theme;

// Models
#[derive(Clone)]
struct StagedFile {
    file: GlooFile,
    preview_uri: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ResultTab {
    Processed,
    Original,
}

impl ResultTab {
    const ALL: [ResultTab; 2] = [ResultTab::Processed, ResultTab::Original];

    fn label(self) -> &'static str {
        match self {
            ResultTab::Processed => "Detected Stitches",
            ResultTab::Original => "Original",
        }
    }

    fn icon_class(self) -> &'static str {
        match self {
            ResultTab::Processed => "fa-solid fa-magnifying-glass",
            ResultTab::Original => "fa-solid fa-image",
        }
    }
}

// Yew msg components
enum Msg {
    // File staging
    FileSelected(GlooFile),
    PreviewLoaded(String),
    RemoveFile,
    LoadSample(&'static SampleImage),

    // Submission lifecycle
    Submit,
    ShakeEnd,
    AnalysisFinished(u64, Result<AnalysisResult, String>),

    // Derived display
    SetThickness(YarnThickness),
    SelectTab(ResultTab),

    // UI states
    SetNotice(Option<String>),
    SetDragging(bool),
    ToggleTheme,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
struct Model {
    staged: Option<StagedFile>,
    thickness: YarnThickness,
    result: Option<AnalysisResult>,
    active_tab: ResultTab,
    submit_error: Option<String>,
    notice: Option<String>,
    submitting: bool,
    shaking: bool,
    is_dragging: bool,
    theme: Theme,
    // Staged-file epoch; responses from a superseded epoch are discarded.
    generation: u64,
    preview_reader: Option<FileReader>,
    shake_timeout: Option<Timeout>,
    paste_listener: Option<EventListener>,
}

// Yew component implementation
impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let theme = theme::load();
        theme::apply(theme);

        let mut model = Self {
            staged: None,
            thickness: YarnThickness::default(),
            result: None,
            active_tab: ResultTab::Processed,
            submit_error: None,
            notice: None,
            submitting: false,
            shaking: false,
            is_dragging: false,
            theme,
            generation: 0,
            preview_reader: None,
            shake_timeout: None,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });
        model.paste_listener = Some(listener);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File staging
            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::PreviewLoaded(uri) => handlers::handle_preview_loaded(self, uri),
            Msg::RemoveFile => handlers::handle_remove_file(self),
            Msg::LoadSample(sample) => handlers::handle_load_sample(ctx, sample),

            // Submission lifecycle
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::ShakeEnd => handlers::handle_shake_end(self),
            Msg::AnalysisFinished(generation, outcome) => {
                handlers::handle_analysis_finished(self, generation, outcome)
            }

            // Derived display
            Msg::SetThickness(option) => handlers::handle_set_thickness(self, option),
            Msg::SelectTab(tab) => handlers::handle_select_tab(self, tab),

            // UI states
            Msg::SetNotice(notice) => {
                self.notice = notice;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header(self, ctx) }

                <main class="main-content">
                    { upload_section::render_upload_section(self, ctx) }
                    { utils::render_notice(self) }
                    { results::render_results(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"Crochet Yarn Calculator | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Yarn calculator starting...");
    yew::Renderer::<Model>::new().render();
}
