use crate::{dom::Dom, page::PageModel, prefs::Preferences};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub struct ThemeManager<E> {
    current: Theme,
    toggles: Vec<E>,
    prefs: Preferences,
}

impl<E: Clone> ThemeManager<E> {
    pub fn new<D: Dom<Element = E>>(dom: &D, page: &PageModel<E>, prefs: Preferences) -> Self {
        let mut manager = Self {
            current: Theme::default(),
            toggles: page.theme_toggles.clone(),
            prefs,
        };
        manager.load_saved_theme(dom);
        manager
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggles(&self) -> &[E] {
        &self.toggles
    }

    pub fn load_saved_theme<D: Dom<Element = E>>(&mut self, dom: &D) {
        if let Some(saved) = self.prefs.stored_theme().as_deref().and_then(Theme::from_str) {
            self.set_theme(dom, saved);
        }
    }

    pub fn set_theme<D: Dom<Element = E>>(&mut self, dom: &D, theme: Theme) {
        self.current = theme;
        if let Some(root) = dom.root() {
            dom.set_attribute(&root, "data-theme", theme.as_str());
        }
        self.prefs.persist_theme(theme);
    }

    pub fn toggle_theme<D: Dom<Element = E>>(&mut self, dom: &D) {
        let next = self.current.toggled();
        self.set_theme(dom, next);
    }
}
