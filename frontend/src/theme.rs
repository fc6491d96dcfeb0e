use gloo_storage::{LocalStorage, Storage};

const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_name(name: &str) -> Theme {
        match name {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

/// First visits default to dark.
pub fn load() -> Theme {
    LocalStorage::get::<String>(THEME_STORAGE_KEY)
        .map(|name| Theme::from_name(&name))
        .unwrap_or(Theme::Dark)
}

pub fn store(theme: Theme) {
    if let Err(e) = LocalStorage::set(THEME_STORAGE_KEY, theme.as_str()) {
        log::warn!("Failed to persist theme choice: {:?}", e);
    }
}

/// Mirrors the choice into the document-wide attribute the stylesheet keys on.
pub fn apply(theme: Theme) {
    if let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            log::warn!("Failed to apply theme attribute: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_alternates_between_themes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn names_round_trip_with_dark_fallback() {
        assert_eq!(Theme::from_name(Theme::Light.as_str()), Theme::Light);
        assert_eq!(Theme::from_name(Theme::Dark.as_str()), Theme::Dark);
        assert_eq!(Theme::from_name("solarized"), Theme::Dark);
    }
}
