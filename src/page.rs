use crate::{dom::Dom, language::Language};

const LANGUAGE_BUTTON_CLASS: &str = "lang-btn";
const PROJECT_CARD_CLASS: &str = "project-card";
const SOCIAL_CARD_CLASS: &str = "social-card";
const PREVIEW_OVERLAY_CLASS: &str = "preview-overlay";
const CONTACT_ITEM_CLASS: &str = "contact-item";
const THEME_TOGGLE_ID: &str = "theme-toggle";

#[derive(Clone, Debug, PartialEq)]
pub struct ToggleControl<E> {
    pub language: Language,
    pub element: E,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalizedText<E> {
    pub element: E,
    pub es: String,
    pub en: String,
}

impl<E> LocalizedText<E> {
    pub fn text_for(&self, language: Language) -> &str {
        match language {
            Language::Es => &self.es,
            Language::En => &self.en,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoverCard<E> {
    pub card: E,
    pub frame: E,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LazyFrame<E> {
    pub frame: E,
    pub deferred_src: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnchorLink<E> {
    pub element: E,
    /// Text after `#`; may be empty.
    pub fragment: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactLink<E> {
    pub element: E,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageModel<E> {
    pub language_buttons: Vec<E>,
    pub toggles: Vec<ToggleControl<E>>,
    pub theme_toggles: Vec<E>,
    pub localized: Vec<LocalizedText<E>>,
    pub frames: Vec<E>,
    pub hover_cards: Vec<HoverCard<E>>,
    pub lazy_frames: Vec<LazyFrame<E>>,
    pub anchors: Vec<AnchorLink<E>>,
    pub contact_links: Vec<ContactLink<E>>,
    pub reveal_cards: Vec<E>,
}

impl<E> Default for PageModel<E> {
    fn default() -> Self {
        Self {
            language_buttons: Vec::new(),
            toggles: Vec::new(),
            theme_toggles: Vec::new(),
            localized: Vec::new(),
            frames: Vec::new(),
            hover_cards: Vec::new(),
            lazy_frames: Vec::new(),
            anchors: Vec::new(),
            contact_links: Vec::new(),
            reveal_cards: Vec::new(),
        }
    }
}

struct CardParts<E> {
    card: E,
    frame: Option<E>,
    overlay: bool,
}

impl<E: Clone + PartialEq> PageModel<E> {
    pub fn scan<D: Dom<Element = E>>(dom: &D) -> Self {
        let mut model = Self::default();
        let mut cards: Vec<CardParts<E>> = Vec::new();

        for element in dom.elements() {
            let tag = dom.tag_name(&element);

            if dom.has_class(&element, LANGUAGE_BUTTON_CLASS) {
                model.language_buttons.push(element.clone());
            }

            let id = dom.attribute(&element, "id");
            if let Some(language) = id.as_deref().and_then(Language::from_toggle_id) {
                model.toggles.push(ToggleControl {
                    language,
                    element: element.clone(),
                });
            }
            if id.as_deref() == Some(THEME_TOGGLE_ID) {
                model.theme_toggles.push(element.clone());
            }

            if let (Some(es), Some(en)) = (
                dom.attribute(&element, Language::Es.text_attribute()),
                dom.attribute(&element, Language::En.text_attribute()),
            ) {
                model.localized.push(LocalizedText {
                    element: element.clone(),
                    es,
                    en,
                });
            }

            let is_project_card = dom.has_class(&element, PROJECT_CARD_CLASS);
            if is_project_card || dom.has_class(&element, SOCIAL_CARD_CLASS) {
                model.reveal_cards.push(element.clone());
            }
            if is_project_card {
                cards.push(CardParts {
                    card: element.clone(),
                    frame: None,
                    overlay: false,
                });
            }

            if dom.has_class(&element, PREVIEW_OVERLAY_CLASS) {
                if let Some(parts) = owning_card(dom, &element, &mut cards) {
                    parts.overlay = true;
                }
            }

            match tag.as_str() {
                "iframe" => {
                    model.frames.push(element.clone());

                    if dom.attribute(&element, "loading").as_deref() == Some("lazy") {
                        model.lazy_frames.push(LazyFrame {
                            frame: element.clone(),
                            deferred_src: dom.attribute(&element, "data-src"),
                        });
                    }

                    if let Some(parts) = owning_card(dom, &element, &mut cards) {
                        if parts.frame.is_none() {
                            parts.frame = Some(element.clone());
                        }
                    }
                }
                "a" => {
                    let href = dom.attribute(&element, "href");

                    if let Some(fragment) = href.as_deref().and_then(|value| value.strip_prefix('#')) {
                        model.anchors.push(AnchorLink {
                            element: element.clone(),
                            fragment: fragment.to_string(),
                        });
                    }

                    if ancestor_with_class(dom, &element, CONTACT_ITEM_CLASS).is_some() {
                        model.contact_links.push(ContactLink {
                            element: element.clone(),
                            href: href.unwrap_or_default(),
                        });
                    }
                }
                _ => {}
            }
        }

        model.hover_cards = cards
            .into_iter()
            .filter(|parts| parts.overlay)
            .filter_map(|parts| {
                parts.frame.map(|frame| HoverCard {
                    card: parts.card,
                    frame,
                })
            })
            .collect();

        model
    }
}

// Strict ancestors only, like a `.class descendant` selector.
fn ancestor_with_class<D: Dom>(dom: &D, element: &D::Element, class: &str) -> Option<D::Element> {
    let parent = dom.parent(element)?;
    dom.closest_with_class(&parent, class)
}

fn owning_card<'a, D: Dom>(
    dom: &D,
    element: &D::Element,
    cards: &'a mut [CardParts<D::Element>],
) -> Option<&'a mut CardParts<D::Element>> {
    let card = ancestor_with_class(dom, element, PROJECT_CARD_CLASS)?;
    cards.iter_mut().find(|parts| parts.card == card)
}
