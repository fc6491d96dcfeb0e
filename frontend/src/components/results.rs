use super::super::{Model, Msg, ResultTab};
use shared::{format_length, format_range, recalculate, AnalysisResult};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div id="results-container" class="results-container">
            {
                if let Some(message) = &model.submit_error {
                    render_error_panel(message)
                } else if let Some(result) = &model.result {
                    render_result_content(model, ctx, result)
                } else {
                    render_empty_state()
                }
            }
        </div>
    }
}

fn render_empty_state() -> Html {
    html! {
        <div class="empty-state">
            <h3>{"Ready for Analysis"}</h3>
            <p>{"Upload your crochet project image to get detailed yarn usage estimates and stitch detection."}</p>
            <div class="features-list">
                <div class="feature">
                    <i class="fa-solid fa-eye"></i>
                    <span>{"Automatic stitch detection"}</span>
                </div>
                <div class="feature">
                    <i class="fa-solid fa-calculator"></i>
                    <span>{"Precise yarn calculations"}</span>
                </div>
                <div class="feature">
                    <i class="fa-solid fa-chart-bar"></i>
                    <span>{"Detailed breakdowns"}</span>
                </div>
            </div>
        </div>
    }
}

fn render_error_panel(message: &str) -> Html {
    html! {
        <div class="empty-state error-state">
            <div class="empty-icon"><i class="fa-solid fa-triangle-exclamation"></i></div>
            <h3>{"An Error Occurred"}</h3>
            <p>{ message }</p>
        </div>
    }
}

fn render_result_content(model: &Model, ctx: &Context<Model>, result: &AnalysisResult) -> Html {
    // Derived at render time, so the numbers always track the selected
    // thickness without another request.
    let derived = result
        .base_yarn_estimate
        .and_then(|base| recalculate(base, model.thickness));

    let (estimate_text, range_text) = match derived {
        Some(estimate) => (estimate.display_text(), estimate.range_text()),
        // Without a usable base the server-scaled figures stay on screen.
        None => (
            format_length(result.yarn_estimate),
            format_range(result.yarn_range[0], result.yarn_range[1]),
        ),
    };

    html! {
        <div class="results-content">
            <div class="results-header">
                <i class="fa-solid fa-chart-line"></i>
                <h3>{"Analysis Results"}</h3>
            </div>
            <div class="stats-grid">
                <div class="stat-card primary">
                    <div class="stat-icon"><i class="fa-solid fa-ruler"></i></div>
                    <div class="stat-content">
                        <h4 id="yarn-estimate-value">{ estimate_text }</h4>
                        <p>{"Estimated Usage"}</p>
                    </div>
                </div>
                <div class="stat-card secondary">
                    <div class="stat-icon"><i class="fa-solid fa-chart-area"></i></div>
                    <div class="stat-content">
                        <h4 id="yarn-range-value">{ range_text }</h4>
                        <p>{"Range with Margin"}</p>
                    </div>
                </div>
            </div>
            { render_stitch_breakdown(result) }
            { render_image_comparison(model, ctx, result) }
        </div>
    }
}

fn render_stitch_breakdown(result: &AnalysisResult) -> Html {
    html! {
        <div class="stitch-breakdown">
            <h4><i class="fa-solid fa-list-ul"></i>{" Stitch Breakdown"}</h4>
            <div class="stitch-list">
                { for result.stitch_counts.iter().map(|(label, count)| html! {
                    <div class="stitch-item">
                        <span class="stitch-type">{ label }</span>
                        <span class="stitch-count">{ format!("{count}×") }</span>
                    </div>
                })}
            </div>
        </div>
    }
}

fn render_image_comparison(model: &Model, ctx: &Context<Model>, result: &AnalysisResult) -> Html {
    html! {
        <div class="image-comparison">
            <div class="comparison-tabs">
                { for ResultTab::ALL.into_iter().map(|tab| render_tab_button(model, ctx, tab)) }
            </div>
            <div class="image-container">
                { render_tab_panel(model, ResultTab::Processed, "image/png", &result.processed, "Detected stitches") }
                { render_tab_panel(model, ResultTab::Original, "image/jpeg", &result.original, "Original image") }
            </div>
        </div>
    }
}

fn render_tab_button(model: &Model, ctx: &Context<Model>, tab: ResultTab) -> Html {
    let is_active = model.active_tab == tab;

    html! {
        <button
            type="button"
            class={classes!("tab-btn", is_active.then_some("active"))}
            onclick={ctx.link().callback(move |_| Msg::SelectTab(tab))}
        >
            <i class={tab.icon_class()}></i>{ format!(" {}", tab.label()) }
        </button>
    }
}

fn render_tab_panel(
    model: &Model,
    tab: ResultTab,
    mime_type: &str,
    encoded: &str,
    alt: &str,
) -> Html {
    let is_active = model.active_tab == tab;

    html! {
        <div class={classes!("tab-content", is_active.then_some("active"))}>
            <img
                class="result-image"
                src={format!("data:{mime_type};base64,{encoded}")}
                alt={alt.to_string()}
            />
        </div>
    }
}
