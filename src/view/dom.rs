//! Minimal DOM capability used by the page wiring.
//!
//! Everything that touches the document goes through [`Dom`] and
//! [`DomElement`], so card rendering and the loading screen run headless in
//! tests against the mock below.

use crate::error::SiteError;

pub trait DomElement: Clone {
    fn set_style(&self, property: &str, value: &str) -> Result<(), SiteError>;
    fn set_text(&self, text: &str);
    fn set_class(&self, class: &str);
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), SiteError>;
    fn append_child(&self, child: &Self) -> Result<(), SiteError>;
    fn clear_children(&self);
}

pub trait Dom {
    type Element: DomElement;

    /// Fails with [`SiteError::ElementNotFound`] naming `selector`
    fn get_element(&self, selector: &str) -> Result<Self::Element, SiteError>;

    fn create_element(&self, tag: &str) -> Result<Self::Element, SiteError>;
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    /// `web_sys::Document` behind the [`Dom`] trait
    #[derive(Clone)]
    pub struct WebDom {
        pub document: Document,
    }

    impl WebDom {
        pub fn new(document: Document) -> Self {
            Self { document }
        }
    }

    impl Dom for WebDom {
        type Element = Element;

        fn get_element(&self, selector: &str) -> Result<Element, SiteError> {
            self.document
                .query_selector(selector)
                .map_err(|e| SiteError::js(&e))?
                .ok_or_else(|| SiteError::not_found(selector))
        }

        fn create_element(&self, tag: &str) -> Result<Element, SiteError> {
            self.document.create_element(tag).map_err(|e| SiteError::js(&e))
        }
    }

    impl DomElement for Element {
        fn set_style(&self, property: &str, value: &str) -> Result<(), SiteError> {
            let html = self
                .dyn_ref::<HtmlElement>()
                .ok_or(SiteError::WrongElementType {
                    selector: self.tag_name(),
                    expected: "HTML element",
                })?;
            html.style()
                .set_property(property, value)
                .map_err(|e| SiteError::js(&e))
        }

        fn set_text(&self, text: &str) {
            self.set_text_content(Some(text));
        }

        fn set_class(&self, class: &str) {
            self.set_class_name(class);
        }

        fn set_attribute(&self, name: &str, value: &str) -> Result<(), SiteError> {
            Element::set_attribute(self, name, value).map_err(|e| SiteError::js(&e))
        }

        fn append_child(&self, child: &Self) -> Result<(), SiteError> {
            web_sys::Node::append_child(self, child)
                .map(|_| ())
                .map_err(|e| SiteError::js(&e))
        }

        fn clear_children(&self) {
            self.set_text_content(None);
        }
    }
}
