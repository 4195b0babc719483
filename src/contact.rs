use crate::{
    logging::Logger,
    page::{ContactLink, PageModel},
};
use serde_json::json;

pub struct ContactManager<E> {
    links: Vec<ContactLink<E>>,
    logger: Logger,
}

impl<E: Clone + PartialEq> ContactManager<E> {
    pub fn new(page: &PageModel<E>, logger: Logger) -> Self {
        Self {
            links: page.contact_links.clone(),
            logger,
        }
    }

    pub fn links(&self) -> &[ContactLink<E>] {
        &self.links
    }

    pub fn on_click(&self, link: &E) {
        if let Some(link) = self.links.iter().find(|candidate| &candidate.element == link) {
            self.logger.info("contact_link_used", json!({ "href": link.href }));
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
    fn click_logs_destination() {
        let dom = FakeDom::new();
        let item = dom.add(dom.body_id(), "li", &["contact-item"], &[]);
        let mail = dom.add(item, "a", &[], &[("href", "mailto:hola@example.com")]);
        let (logger, lines) = capture_logger(LogLevel::Info);
        let manager = ContactManager::new(&PageModel::scan(&dom), logger);

        manager.on_click(&mail);

        let lines = lines.borrow();
        assert_eq!(lines.len(), 1);
        let entry: serde_json::Value = serde_json::from_str(&lines[0]).expect("valid JSON");
        assert_eq!(entry["event"], "contact_link_used");
        assert_eq!(entry["href"], "mailto:hola@example.com");
    }

    #[test]
    fn links_outside_contact_items_are_not_tracked() {
        let dom = FakeDom::new();
        let other = dom.add(dom.body_id(), "a", &[], &[("href", "https://elsewhere")]);
        let (logger, lines) = capture_logger(LogLevel::Debug);
        let manager = ContactManager::new(&PageModel::scan(&dom), logger);

        manager.on_click(&other);

        assert!(manager.links().is_empty());
        assert!(lines.borrow().is_empty());
    }
}
