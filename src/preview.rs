use crate::{
    dom::Dom,
    page::{HoverCard, PageModel},
};

const LOADING_CLASS: &str = "iframe-loading";
const LOADING_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i>"#;
const ERROR_HTML: &str = r#"<i class="fas fa-exclamation-triangle"></i> Error loading preview"#;
const HOVER_TRANSFORM: &str = "scale(0.85)";
const REST_TRANSFORM: &str = "scale(0.8)";

struct FrameSlot<E> {
    frame: E,
    indicator: Option<E>,
}

pub struct PreviewManager<E> {
    slots: Vec<FrameSlot<E>>,
    cards: Vec<HoverCard<E>>,
}

impl<E: Clone + PartialEq> PreviewManager<E> {
    pub fn new<D: Dom<Element = E>>(dom: &D, page: &PageModel<E>) -> Self {
        let slots = page
            .frames
            .iter()
            .map(|frame| {
                let indicator = dom.insert_before(frame, "div", LOADING_CLASS);
                if let Some(indicator) = indicator.as_ref() {
                    dom.set_inner_html(indicator, LOADING_HTML);
                }
                dom.set_style(frame, "opacity", "0");

                FrameSlot {
                    frame: frame.clone(),
                    indicator,
                }
            })
            .collect();

        Self {
            slots,
            cards: page.hover_cards.clone(),
        }
    }

    pub fn frames(&self) -> impl Iterator<Item = &E> {
        self.slots.iter().map(|slot| &slot.frame)
    }

    pub fn cards(&self) -> &[HoverCard<E>] {
        &self.cards
    }

    pub fn on_frame_load<D: Dom<Element = E>>(&mut self, dom: &D, frame: &E) {
        let Some(slot) = self.slot_mut(frame) else {
            return;
        };

        if let Some(indicator) = slot.indicator.take() {
            dom.remove(&indicator);
        }
        dom.set_style(&slot.frame, "opacity", "1");
    }

    /// Only the indicator changes; the frame keeps whatever state it had.
    pub fn on_frame_error<D: Dom<Element = E>>(&mut self, dom: &D, frame: &E) {
        let indicator = self
            .slots
            .iter()
            .find(|slot| &slot.frame == frame)
            .and_then(|slot| slot.indicator.as_ref());

        if let Some(indicator) = indicator {
            dom.set_inner_html(indicator, ERROR_HTML);
        }
    }

    pub fn on_card_enter<D: Dom<Element = E>>(&self, dom: &D, card: &E) {
        self.scale_card_frame(dom, card, HOVER_TRANSFORM);
    }

    pub fn on_card_leave<D: Dom<Element = E>>(&self, dom: &D, card: &E) {
        self.scale_card_frame(dom, card, REST_TRANSFORM);
    }

    fn scale_card_frame<D: Dom<Element = E>>(&self, dom: &D, card: &E, transform: &str) {
        if let Some(hover) = self.cards.iter().find(|hover| &hover.card == card) {
            dom.set_style(&hover.frame, "transform", transform);
        }
    }

    fn slot_mut(&mut self, frame: &E) -> Option<&mut FrameSlot<E>> {
        self.slots.iter_mut().find(|slot| &slot.frame == frame)
    }
}
