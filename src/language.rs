use crate::{
    dom::Dom,
    page::{LocalizedText, PageModel, ToggleControl},
    prefs::Preferences,
};

const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn toggle_id(self) -> &'static str {
        match self {
            Self::Es => "lang-es",
            Self::En => "lang-en",
        }
    }

    pub fn from_toggle_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.toggle_id() == id)
    }

    pub fn text_attribute(self) -> &'static str {
        match self {
            Self::Es => "data-es",
            Self::En => "data-en",
        }
    }
}

pub struct LanguageManager<E> {
    current: Language,
    buttons: Vec<E>,
    toggles: Vec<ToggleControl<E>>,
    texts: Vec<LocalizedText<E>>,
    prefs: Preferences,
}

impl<E: Clone + PartialEq> LanguageManager<E> {
    /// Renders `initial` without persisting it, so a saved choice survives
    /// until `load_saved_language` reads it.
    pub fn new<D: Dom<Element = E>>(dom: &D, page: &PageModel<E>, prefs: Preferences, initial: Language) -> Self {
        let manager = Self {
            current: initial,
            buttons: page.language_buttons.clone(),
            toggles: page.toggles.clone(),
            texts: page.localized.clone(),
            prefs,
        };
        manager.render(dom);
        manager
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn toggles(&self) -> &[ToggleControl<E>] {
        &self.toggles
    }

    pub fn set_language<D: Dom<Element = E>>(&mut self, dom: &D, language: Language) {
        self.current = language;
        self.render(dom);
        self.prefs.persist_language(language);
    }

    pub fn load_saved_language<D: Dom<Element = E>>(&mut self, dom: &D) {
        if let Some(saved) = self.prefs.stored_language().as_deref().and_then(Language::from_str) {
            self.set_language(dom, saved);
        }
    }

    fn render<D: Dom<Element = E>>(&self, dom: &D) {
        let language = self.current;

        for button in &self.buttons {
            dom.set_class(button, ACTIVE_CLASS, false);
        }
        for toggle in self.toggles.iter().filter(|toggle| toggle.language == language) {
            dom.set_class(&toggle.element, ACTIVE_CLASS, true);
        }

        for text in &self.texts {
            let value = text.text_for(language);
            if !value.is_empty() {
                dom.set_text(&text.element, value);
            }
        }

        if let Some(root) = dom.root() {
            dom.set_attribute(&root, "lang", language.as_str());
        }
    }
}
