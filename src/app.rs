use crate::{
    config::SiteConfig,
    contact::ContactManager,
    dom::Dom,
    error_handler::ErrorHandler,
    language::LanguageManager,
    logging::Logger,
    page::PageModel,
    performance::PerformanceManager,
    prefs::{PreferenceStore, Preferences},
    preview::PreviewManager,
    scroll::{ScrollReveal, SmoothScroller},
    theme::ThemeManager,
};
use serde_json::json;
use std::rc::Rc;

const LOADED_CLASS: &str = "loaded";

pub struct Site<E> {
    pub language: LanguageManager<E>,
    pub preview: PreviewManager<E>,
    pub contact: ContactManager<E>,
    pub performance: PerformanceManager<E>,
    pub theme: ThemeManager<E>,
    pub errors: ErrorHandler,
    pub scroller: SmoothScroller<E>,
    pub reveal: ScrollReveal<E>,
}

impl<E: Clone + PartialEq> Site<E> {
    pub fn start<D: Dom<Element = E>>(
        dom: &D,
        config: &SiteConfig,
        store: Rc<dyn PreferenceStore>,
        logger: Logger,
    ) -> Self {
        let page = PageModel::scan(dom);
        let prefs = Preferences::new(store, logger.clone());

        let mut language = LanguageManager::new(dom, &page, prefs.clone(), config.default_language);
        let preview = PreviewManager::new(dom, &page);
        let contact = ContactManager::new(&page, logger.clone());
        let performance = PerformanceManager::new(dom, &page, config.critical_images.clone());
        let theme = ThemeManager::new(dom, &page, prefs);
        let errors = ErrorHandler::new(logger.clone());

        language.load_saved_language(dom);

        let scroller = SmoothScroller::new(&page, logger.clone());
        let reveal = ScrollReveal::new(dom, &page);

        if let Some(body) = dom.body() {
            dom.set_class(&body, LOADED_CLASS, true);
        }

        logger.debug(
            "page_ready",
            json!({
                "language": language.current().as_str(),
                "theme": theme.current().as_str(),
                "localized": page.localized.len(),
                "frames": page.frames.len(),
                "lazy_frames": page.lazy_frames.len(),
                "anchors": page.anchors.len(),
                "reveal_cards": page.reveal_cards.len(),
            }),
        );

        Self {
            language,
            preview,
            contact,
            performance,
            theme,
            errors,
            scroller,
            reveal,
        }
    }
}
