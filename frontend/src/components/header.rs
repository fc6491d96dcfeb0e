use super::super::Model;
use super::theme_toggle::render_theme_toggle;
use yew::prelude::*;

/// Renders the application header with the desktop and mobile theme toggles.
pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <header class="app-header">
            <div class="header-titles">
                <h1><i class="fa-solid fa-ruler"></i>{" Crochet Yarn Calculator"}</h1>
                <p class="subtitle">{"Upload a photo of your project to estimate yarn usage"}</p>
            </div>
            { render_theme_toggle(model.theme, ctx.link(), "theme-toggle") }
            <div class="mobile-menu">
                { render_theme_toggle(model.theme, ctx.link(), "mobile-theme-toggle") }
            </div>
        </header>
    }
}
