use super::super::{Model, Msg};
use crate::theme::Theme;
use yew::html::Scope;
use yew::prelude::*;

pub fn render_theme_toggle(theme: Theme, link: &Scope<Model>, id: &'static str) -> Html {
    html! {
        <button
            id={id}
            class="theme-toggle"
            onclick={link.callback(|_| Msg::ToggleTheme)}
            title={ if theme == Theme::Light { "Switch to Dark Mode" } else { "Switch to Light Mode" } }
        >
            { if theme == Theme::Light {
                html! { <i class="fa-solid fa-sun toggle-icon"></i> }
            } else {
                html! { <i class="fa-solid fa-moon toggle-icon"></i> }
            }}
        </button>
    }
}
