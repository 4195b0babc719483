use crate::{
    dom::Dom,
    page::{LazyFrame, PageModel},
};

pub struct PerformanceManager<E> {
    pending: Vec<LazyFrame<E>>,
    critical_images: Vec<String>,
}

impl<E: Clone + PartialEq> PerformanceManager<E> {
    pub fn new<D: Dom<Element = E>>(dom: &D, page: &PageModel<E>, critical_images: Vec<String>) -> Self {
        let manager = Self {
            pending: page.lazy_frames.clone(),
            critical_images,
        };
        manager.preload_critical_images(dom);
        manager
    }

    pub fn pending_frames(&self) -> impl Iterator<Item = &E> {
        self.pending.iter().map(|lazy| &lazy.frame)
    }

    /// Returns `true` when the caller should stop observing `frame`.
    /// A frame is handled on its first intersection only.
    pub fn on_intersection<D: Dom<Element = E>>(&mut self, dom: &D, frame: &E, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }

        let Some(index) = self.pending.iter().position(|lazy| &lazy.frame == frame) else {
            return false;
        };
        let lazy = self.pending.remove(index);

        let has_src = dom
            .attribute(&lazy.frame, "src")
            .is_some_and(|src| !src.is_empty());
        if !has_src {
            if let Some(deferred) = lazy.deferred_src.as_deref().filter(|src| !src.is_empty()) {
                dom.set_attribute(&lazy.frame, "src", deferred);
            }
        }

        true
    }

    fn preload_critical_images<D: Dom<Element = E>>(&self, dom: &D) {
        for href in &self.critical_images {
            dom.append_preload(href, "image");
        }
    }
}
