use crate::{
    app::Site,
    config::SiteConfig,
    contact::ContactManager,
    dom::Dom,
    error_handler::{ErrorHandler, ErrorReport},
    language::LanguageManager,
    logging::Logger,
    performance::PerformanceManager,
    prefs::{MemoryStore, PreferenceStore, StoreError},
    preview::PreviewManager,
    scroll::{ScrollReveal, SmoothScroller, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD},
    theme::ThemeManager,
};
use js_sys::{Array, Reflect};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, Document, Element, ErrorEvent, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, PromiseRejectionEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ServiceWorkerRegistration, Storage,
    Window,
};

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn elements(&self) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all("*") else {
            return Vec::new();
        };

        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn closest_with_class(&self, element: &Element, class: &str) -> Option<Element> {
        element.closest(&format!(".{class}")).ok().flatten()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn set_class(&self, element: &Element, class: &str, enabled: bool) {
        let classes = element.class_list();
        let _ = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn insert_before(&self, reference: &Element, tag: &str, class: &str) -> Option<Element> {
        let parent = reference.parent_node()?;
        let created = self.document.create_element(tag).ok()?;
        created.set_class_name(class);
        parent.insert_before(&created, Some(reference)).ok()?;
        Some(created)
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn append_preload(&self, href: &str, kind: &str) {
        let Some(head) = self.document.head() else {
            return;
        };
        let Ok(link) = self.document.create_element("link") else {
            return;
        };

        let _ = link.set_attribute("rel", "preload");
        let _ = link.set_attribute("as", kind);
        let _ = link.set_attribute("href", href);
        let _ = head.append_child(&link);
    }
}

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|_| StoreError::Unavailable)?
            .ok_or(StoreError::Unavailable)?;

        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StoreError::WriteRejected {
                key: key.to_string(),
                reason: describe_js_value(&err),
            })
    }
}

fn describe_js_value(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }

    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

// Runs `handler` now when `already` holds, otherwise on the first `kind` event.
fn once_ready<F>(target: &EventTarget, kind: &str, already: bool, handler: F)
where
    F: FnOnce() + 'static,
{
    if already {
        handler();
        return;
    }

    let mut handler = Some(handler);
    listen(target, kind, move |_| {
        if let Some(handler) = handler.take() {
            handler();
        }
    });
}

fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn observe<'a, F>(
    options: Option<&IntersectionObserverInit>,
    targets: impl Iterator<Item = &'a Element>,
    mut handler: F,
) -> Option<IntersectionObserver>
where
    F: FnMut(&Element, bool, &IntersectionObserver) + 'static,
{
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                handler(&entry.target(), entry.is_intersecting(), &observer);
            }
        },
    );

    let observer = match options {
        Some(options) => IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options),
        None => IntersectionObserver::new(callback.as_ref().unchecked_ref()),
    }
    .ok()?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }

    Some(observer)
}

fn bind_language(dom: &WebDom, language: LanguageManager<Element>) {
    let toggles = language.toggles().to_vec();
    let language = Rc::new(RefCell::new(language));

    for toggle in toggles {
        let dom = dom.clone();
        let language = language.clone();
        listen(&toggle.element, "click", move |_| {
            language.borrow_mut().set_language(&dom, toggle.language);
        });
    }
}

fn bind_preview(dom: &WebDom, preview: PreviewManager<Element>) {
    let frames: Vec<Element> = preview.frames().cloned().collect();
    let cards = preview.cards().to_vec();
    let preview = Rc::new(RefCell::new(preview));

    for frame in frames {
        let on_load = {
            let dom = dom.clone();
            let preview = preview.clone();
            let frame = frame.clone();
            move |_| preview.borrow_mut().on_frame_load(&dom, &frame)
        };
        let on_error = {
            let dom = dom.clone();
            let preview = preview.clone();
            let frame = frame.clone();
            move |_| preview.borrow_mut().on_frame_error(&dom, &frame)
        };

        listen(&frame, "load", on_load);
        listen(&frame, "error", on_error);
    }

    for hover in cards {
        let on_enter = {
            let dom = dom.clone();
            let preview = preview.clone();
            let card = hover.card.clone();
            move |_| preview.borrow().on_card_enter(&dom, &card)
        };
        let on_leave = {
            let dom = dom.clone();
            let preview = preview.clone();
            let card = hover.card.clone();
            move |_| preview.borrow().on_card_leave(&dom, &card)
        };

        listen(&hover.card, "mouseenter", on_enter);
        listen(&hover.card, "mouseleave", on_leave);
    }
}

fn bind_contact(contact: ContactManager<Element>) {
    let links = contact.links().to_vec();
    let contact = Rc::new(contact);

    for link in links {
        let contact = contact.clone();
        let element = link.element.clone();
        listen(&link.element, "click", move |_| contact.on_click(&element));
    }
}

fn bind_performance(window: &Window, dom: &WebDom, performance: PerformanceManager<Element>, logger: &Logger) {
    if !supports_intersection_observer(window) {
        logger.debug("lazy_loading_unavailable", json!({}));
        return;
    }

    let frames: Vec<Element> = performance.pending_frames().cloned().collect();
    let performance = Rc::new(RefCell::new(performance));
    let dom = dom.clone();

    observe(None, frames.iter(), move |frame, is_intersecting, observer| {
        if performance.borrow_mut().on_intersection(&dom, frame, is_intersecting) {
            observer.unobserve(frame);
        }
    });
}

fn bind_smooth_scrolling(dom: &WebDom, scroller: SmoothScroller<Element>) {
    let anchors = scroller.anchors().to_vec();
    let scroller = Rc::new(scroller);

    for anchor in anchors {
        let dom = dom.clone();
        let scroller = scroller.clone();
        let fragment = anchor.fragment.clone();
        listen(&anchor.element, "click", move |event| {
            event.prevent_default();
            scroller.on_anchor_click(&dom, &fragment);
        });
    }
}

fn bind_scroll_animations(window: &Window, dom: &WebDom, reveal: ScrollReveal<Element>, logger: &Logger) {
    let cards = reveal.cards().to_vec();

    if !supports_intersection_observer(window) {
        logger.debug("scroll_animations_unavailable", json!({ "cards": cards.len() }));
        for card in &cards {
            reveal.on_intersection(dom, card, true);
        }
        return;
    }

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let dom = dom.clone();

    observe(Some(&options), cards.iter(), move |card, is_intersecting, _| {
        reveal.on_intersection(&dom, card, is_intersecting);
    });
}

fn bind_theme(dom: &WebDom, theme: ThemeManager<Element>) {
    let toggles = theme.toggles().to_vec();
    let theme = Rc::new(RefCell::new(theme));

    for toggle in toggles {
        let dom = dom.clone();
        let theme = theme.clone();
        listen(&toggle, "click", move |_| theme.borrow_mut().toggle_theme(&dom));
    }
}

fn bind_error_handler(window: &Window, errors: ErrorHandler) {
    let errors = Rc::new(errors);

    let on_error = {
        let errors = errors.clone();
        move |event: Event| {
            let Some(event) = event.dyn_ref::<ErrorEvent>() else {
                return;
            };
            let error = event.error();
            let detail = (!error.is_undefined() && !error.is_null()).then(|| describe_js_value(&error));

            errors.on_error(&ErrorReport {
                message: event.message(),
                source: event.filename(),
                line: event.lineno(),
                column: event.colno(),
                detail,
            });
        }
    };

    let on_rejection = move |event: Event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|rejection| describe_js_value(&rejection.reason()))
            .unwrap_or_default();

        if errors.on_rejection(&reason) {
            event.prevent_default();
        }
    };

    listen(window, "error", on_error);
    listen(window, "unhandledrejection", on_rejection);
}

fn register_service_worker(window: &Window, document: &Document, script_url: String, logger: Logger) {
    let navigator = window.navigator();
    if !Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        logger.debug("service_worker_unsupported", json!({}));
        return;
    }

    // The module can finish loading after `load` has already fired.
    let loaded = document.ready_state() == "complete";
    once_ready(window, "load", loaded, move || {
        let promise = navigator.service_worker().register(&script_url);

        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(registration) => {
                    let scope = registration
                        .dyn_into::<ServiceWorkerRegistration>()
                        .map(|registration| registration.scope())
                        .unwrap_or_default();
                    logger.info(
                        "service_worker_registered",
                        json!({ "script": script_url, "scope": scope }),
                    );
                }
                Err(err) => {
                    logger.warn(
                        "service_worker_registration_failed",
                        json!({ "script": script_url, "error": describe_js_value(&err) }),
                    );
                }
            }
        });
    });
}

fn open_store(logger: &Logger) -> Rc<dyn PreferenceStore> {
    match LocalStorageStore::open() {
        Ok(store) => Rc::new(store),
        Err(err) => {
            logger.warn("preference_store_fallback", json!({ "error": err.to_string() }));
            Rc::new(MemoryStore::new())
        }
    }
}

fn start(window: &Window, dom: &WebDom, config: &SiteConfig, logger: &Logger) {
    let store = open_store(logger);
    let Site {
        language,
        preview,
        contact,
        performance,
        theme,
        errors,
        scroller,
        reveal,
    } = Site::start(dom, config, store, logger.clone());

    bind_language(dom, language);
    bind_preview(dom, preview);
    bind_contact(contact);
    bind_performance(window, dom, performance, logger);
    bind_theme(dom, theme);
    bind_error_handler(window, errors);
    bind_smooth_scrolling(dom, scroller);
    bind_scroll_animations(window, dom, reveal, logger);
}

pub fn run() {
    console_error_panic_hook::set_once();

    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let dom = WebDom::new(document.clone());
    let (config, config_errors) = SiteConfig::from_root(&dom);
    let logger = Logger::console(config.log_level);
    for err in config_errors {
        logger.warn("config_value_ignored", json!({ "error": err.to_string() }));
    }

    if let Some(script_url) = config.service_worker_url.clone() {
        register_service_worker(&window, &document, script_url, logger.clone());
    }

    let parsed = document.ready_state() != "loading";
    let window_handle = window.clone();
    once_ready(&document, "DOMContentLoaded", parsed, move || {
        start(&window_handle, &dom, &config, &logger);
    });
}
