pub trait Dom {
    type Element: Clone + PartialEq;

    fn elements(&self) -> Vec<Self::Element>;

    fn tag_name(&self, element: &Self::Element) -> String;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Nearest inclusive ancestor carrying `class`.
    fn closest_with_class(&self, element: &Self::Element, class: &str) -> Option<Self::Element>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn root(&self) -> Option<Self::Element>;

    fn body(&self) -> Option<Self::Element>;

    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn set_class(&self, element: &Self::Element, class: &str, enabled: bool);

    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    fn set_inner_html(&self, element: &Self::Element, html: &str);

    /// Creates `<tag class="class">` as the previous sibling of `reference`.
    fn insert_before(&self, reference: &Self::Element, tag: &str, class: &str) -> Option<Self::Element>;

    fn remove(&self, element: &Self::Element);

    fn scroll_into_view(&self, element: &Self::Element);

    fn append_preload(&self, href: &str, kind: &str);
}
