use crate::{
    dom::Dom,
    logging::Logger,
    page::{AnchorLink, PageModel},
};
use serde_json::json;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

const HIDDEN_OPACITY: &str = "0";
const HIDDEN_TRANSFORM: &str = "translateY(30px)";
const SHOWN_OPACITY: &str = "1";
const SHOWN_TRANSFORM: &str = "translateY(0)";
const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOutcome {
    Scrolled,
    /// Default navigation was already cancelled, so the click does nothing.
    MissingTarget,
}

pub struct SmoothScroller<E> {
    anchors: Vec<AnchorLink<E>>,
    logger: Logger,
}

impl<E: Clone + PartialEq> SmoothScroller<E> {
    pub fn new(page: &PageModel<E>, logger: Logger) -> Self {
        Self {
            anchors: page.anchors.clone(),
            logger,
        }
    }

    pub fn anchors(&self) -> &[AnchorLink<E>] {
        &self.anchors
    }

    pub fn on_anchor_click<D: Dom<Element = E>>(&self, dom: &D, fragment: &str) -> ScrollOutcome {
        let target = Some(fragment)
            .filter(|id| !id.is_empty())
            .and_then(|id| dom.element_by_id(id));

        match target {
            Some(target) => {
                dom.scroll_into_view(&target);
                ScrollOutcome::Scrolled
            }
            None => {
                self.logger
                    .debug("scroll_target_missing", json!({ "fragment": fragment }));
                ScrollOutcome::MissingTarget
            }
        }
    }
}

pub struct ScrollReveal<E> {
    cards: Vec<E>,
}

impl<E: Clone + PartialEq> ScrollReveal<E> {
    pub fn new<D: Dom<Element = E>>(dom: &D, page: &PageModel<E>) -> Self {
        for card in &page.reveal_cards {
            dom.set_style(card, "opacity", HIDDEN_OPACITY);
            dom.set_style(card, "transform", HIDDEN_TRANSFORM);
            dom.set_style(card, "transition", REVEAL_TRANSITION);
        }

        Self {
            cards: page.reveal_cards.clone(),
        }
    }

    pub fn cards(&self) -> &[E] {
        &self.cards
    }

    pub fn on_intersection<D: Dom<Element = E>>(&self, dom: &D, card: &E, is_intersecting: bool) {
        if is_intersecting && self.cards.contains(card) {
            dom.set_style(card, "opacity", SHOWN_OPACITY);
            dom.set_style(card, "transform", SHOWN_TRANSFORM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        logging::LogLevel,
        testing::{capture_logger, FakeDom},
    };

    #[test]
    fn anchor_scrolls_to_existing_target() {
        let dom = FakeDom::new();
        let section = dom.add(dom.body_id(), "section", &[], &[("id", "projects")]);
        dom.add(dom.body_id(), "a", &[], &[("href", "#projects")]);
        let (logger, _) = capture_logger(LogLevel::Debug);
        let scroller = SmoothScroller::new(&PageModel::scan(&dom), logger);

        let outcome = scroller.on_anchor_click(&dom, &scroller.anchors()[0].fragment);

        assert_eq!(outcome, ScrollOutcome::Scrolled);
        assert_eq!(dom.scrolled(), vec![section]);
    }

    #[test]
    fn missing_target_is_absorbed_without_scrolling() {
        let dom = FakeDom::new();
        dom.add(dom.body_id(), "a", &[], &[("href", "#missing")]);
        let (logger, lines) = capture_logger(LogLevel::Debug);
        let scroller = SmoothScroller::new(&PageModel::scan(&dom), logger);

        let outcome = scroller.on_anchor_click(&dom, "missing");

        assert_eq!(outcome, ScrollOutcome::MissingTarget);
        assert!(dom.scrolled().is_empty());
        assert!(lines.borrow()[0].contains("scroll_target_missing"));
    }

    #[test]
    fn bare_hash_is_a_missing_target() {
        let dom = FakeDom::new();
        dom.add(dom.body_id(), "div", &[], &[("id", "")]);
        let (logger, _) = capture_logger(LogLevel::Info);
        let scroller = SmoothScroller::new(&PageModel::scan(&dom), logger);

        assert_eq!(scroller.on_anchor_click(&dom, ""), ScrollOutcome::MissingTarget);
        assert!(dom.scrolled().is_empty());
    }

    #[test]
    fn cards_start_hidden_and_reveal_on_intersection() {
        let dom = FakeDom::new();
        let project = dom.add(dom.body_id(), "div", &["project-card"], &[]);
        let social = dom.add(dom.body_id(), "div", &["social-card"], &[]);
        let reveal = ScrollReveal::new(&dom, &PageModel::scan(&dom));

        for card in [project, social] {
            assert_eq!(dom.style(card, "opacity").as_deref(), Some("0"));
            assert_eq!(dom.style(card, "transform").as_deref(), Some("translateY(30px)"));
            assert_eq!(
                dom.style(card, "transition").as_deref(),
                Some("opacity 0.6s ease, transform 0.6s ease")
            );
        }

        reveal.on_intersection(&dom, &project, false);
        assert_eq!(dom.style(project, "opacity").as_deref(), Some("0"));

        reveal.on_intersection(&dom, &project, true);
        assert_eq!(dom.style(project, "opacity").as_deref(), Some("1"));
        assert_eq!(dom.style(project, "transform").as_deref(), Some("translateY(0)"));
        assert_eq!(dom.style(social, "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn revealed_card_stays_revealed() {
        let dom = FakeDom::new();
        let card = dom.add(dom.body_id(), "div", &["project-card"], &[]);
        let reveal = ScrollReveal::new(&dom, &PageModel::scan(&dom));

        reveal.on_intersection(&dom, &card, true);
        let shown = dom.snapshot();
        reveal.on_intersection(&dom, &card, false);
        reveal.on_intersection(&dom, &card, true);

        assert_eq!(dom.snapshot(), shown);
    }
}
