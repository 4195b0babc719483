use crate::{
    dom::Dom,
    logging::{LogLevel, Logger},
};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

const ROOT: usize = 0;
const BODY: usize = 1;

pub(crate) fn capture_logger(level: LogLevel) -> (Logger, Rc<RefCell<Vec<String>>>) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let lines = lines.clone();
        Rc::new(move |_level: LogLevel, line: &str| lines.borrow_mut().push(line.to_string()))
    };
    (Logger::new(level, sink), lines)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FakeNode {
    tag: String,
    parent: Option<usize>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    inner_html: String,
    styles: BTreeMap<String, String>,
    removed: bool,
}

/// In-memory document. Elements are indices into the node arena; `order`
/// holds document order.
pub(crate) struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    order: RefCell<Vec<usize>>,
    scrolled: RefCell<Vec<usize>>,
    preloads: RefCell<Vec<(String, String)>>,
}

impl FakeDom {
    pub(crate) fn new() -> Self {
        let html = FakeNode {
            tag: "html".to_string(),
            ..FakeNode::default()
        };
        let body = FakeNode {
            tag: "body".to_string(),
            parent: Some(ROOT),
            ..FakeNode::default()
        };

        Self {
            nodes: RefCell::new(vec![html, body]),
            order: RefCell::new(vec![ROOT, BODY]),
            scrolled: RefCell::new(Vec::new()),
            preloads: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn root_id(&self) -> usize {
        ROOT
    }

    pub(crate) fn body_id(&self) -> usize {
        BODY
    }

    /// Appends `<tag>` as the last child of `parent`.
    pub(crate) fn add(&self, parent: usize, tag: &str, classes: &[&str], attributes: &[(&str, &str)]) -> usize {
        let node = FakeNode {
            tag: tag.to_string(),
            parent: Some(parent),
            classes: classes.iter().map(|class| class.to_string()).collect(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            ..FakeNode::default()
        };

        let id = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(node);
            nodes.len() - 1
        };

        let mut order = self.order.borrow_mut();
        let position = order
            .iter()
            .rposition(|existing| self.is_inclusive_descendant(*existing, parent))
            .map(|index| index + 1)
            .unwrap_or(order.len());
        order.insert(position, id);

        id
    }

    pub(crate) fn node(&self, id: usize) -> FakeNode {
        self.nodes.borrow()[id].clone()
    }

    pub(crate) fn snapshot(&self) -> Vec<FakeNode> {
        self.nodes.borrow().clone()
    }

    pub(crate) fn tag(&self, id: usize) -> String {
        self.nodes.borrow()[id].tag.clone()
    }

    pub(crate) fn text(&self, id: usize) -> Option<String> {
        self.nodes.borrow()[id].text.clone()
    }

    pub(crate) fn attr(&self, id: usize, name: &str) -> Option<String> {
        self.nodes.borrow()[id].attributes.get(name).cloned()
    }

    pub(crate) fn has_class_name(&self, id: usize, class: &str) -> bool {
        self.nodes.borrow()[id].classes.iter().any(|existing| existing == class)
    }

    pub(crate) fn style(&self, id: usize, property: &str) -> Option<String> {
        self.nodes.borrow()[id].styles.get(property).cloned()
    }

    pub(crate) fn inner_html(&self, id: usize) -> String {
        self.nodes.borrow()[id].inner_html.clone()
    }

    pub(crate) fn is_removed(&self, id: usize) -> bool {
        self.nodes.borrow()[id].removed
    }

    pub(crate) fn previous_sibling(&self, id: usize) -> Option<usize> {
        let nodes = self.nodes.borrow();
        let parent = nodes[id].parent;
        let order = self.order.borrow();
        let index = order.iter().position(|existing| *existing == id)?;

        order[..index]
            .iter()
            .rev()
            .copied()
            .find(|candidate| nodes[*candidate].parent == parent && !nodes[*candidate].removed)
    }

    pub(crate) fn scrolled(&self) -> Vec<usize> {
        self.scrolled.borrow().clone()
    }

    pub(crate) fn preloads(&self) -> Vec<(String, String)> {
        self.preloads.borrow().clone()
    }

    fn is_inclusive_descendant(&self, id: usize, ancestor: usize) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = nodes[node].parent;
        }
        false
    }

    fn with_node<F: FnOnce(&mut FakeNode)>(&self, id: usize, update: F) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(id) {
            update(node);
        }
    }
}

impl Dom for FakeDom {
    type Element = usize;

    fn elements(&self) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        self.order
            .borrow()
            .iter()
            .copied()
            .filter(|id| !nodes[*id].removed)
            .collect()
    }

    fn tag_name(&self, element: &usize) -> String {
        self.tag(*element)
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.attr(*element, name)
    }

    fn has_class(&self, element: &usize, class: &str) -> bool {
        self.has_class_name(*element, class)
    }

    fn parent(&self, element: &usize) -> Option<usize> {
        self.nodes.borrow().get(*element)?.parent
    }

    fn closest_with_class(&self, element: &usize, class: &str) -> Option<usize> {
        let mut current = Some(*element);
        while let Some(id) = current {
            if self.has_class_name(id, class) {
                return Some(id);
            }
            current = self.nodes.borrow()[id].parent;
        }
        None
    }

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.elements()
            .into_iter()
            .find(|element| self.attr(*element, "id").as_deref() == Some(id))
    }

    fn root(&self) -> Option<usize> {
        Some(ROOT)
    }

    fn body(&self) -> Option<usize> {
        Some(BODY)
    }

    fn set_text(&self, element: &usize, text: &str) {
        self.with_node(*element, |node| node.text = Some(text.to_string()));
    }

    fn set_attribute(&self, element: &usize, name: &str, value: &str) {
        self.with_node(*element, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn set_class(&self, element: &usize, class: &str, enabled: bool) {
        self.with_node(*element, |node| {
            node.classes.retain(|existing| existing != class);
            if enabled {
                node.classes.push(class.to_string());
            }
        });
    }

    fn set_style(&self, element: &usize, property: &str, value: &str) {
        self.with_node(*element, |node| {
            node.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn set_inner_html(&self, element: &usize, html: &str) {
        self.with_node(*element, |node| node.inner_html = html.to_string());
    }

    fn insert_before(&self, reference: &usize, tag: &str, class: &str) -> Option<usize> {
        let parent = self.nodes.borrow().get(*reference)?.parent;
        let id = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(FakeNode {
                tag: tag.to_string(),
                parent,
                classes: vec![class.to_string()],
                ..FakeNode::default()
            });
            nodes.len() - 1
        };

        let mut order = self.order.borrow_mut();
        let position = order.iter().position(|existing| existing == reference)?;
        order.insert(position, id);
        Some(id)
    }

    fn remove(&self, element: &usize) {
        self.with_node(*element, |node| node.removed = true);
    }

    fn scroll_into_view(&self, element: &usize) {
        self.scrolled.borrow_mut().push(*element);
    }

    fn append_preload(&self, href: &str, kind: &str) {
        self.preloads
            .borrow_mut()
            .push((href.to_string(), kind.to_string()));
    }
}
