#![cfg(target_arch = "wasm32")]

use plasma_site::model::LEADERS;
use plasma_site::view::content::render_leaders;
use plasma_site::view::dom::web::WebDom;
use plasma_site::view::{Dom, DomElement, LoadingScreen};
use plasma_site::{SiteConfig, SiteError};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn dom() -> WebDom {
    let document = web_sys::window().unwrap().document().unwrap();
    WebDom::new(document)
}

fn mount(dom: &WebDom, class: &str) -> web_sys::Element {
    let el = dom.create_element("div").unwrap();
    el.set_class(class);
    let body = dom.document.body().unwrap();
    web_sys::Node::append_child(&body, &el).unwrap();
    el
}

#[wasm_bindgen_test]
fn missing_selector_is_reported() {
    let err = dom().get_element(".does-not-exist").unwrap_err();
    assert_eq!(err, SiteError::not_found(".does-not-exist"));
}

#[wasm_bindgen_test]
fn leader_cards_render_into_document() {
    let dom = dom();
    let grid = mount(&dom, "leadership-grid-test");
    render_leaders(&dom, &grid, &LEADERS).unwrap();

    let cards = grid.query_selector_all(".leader-card").unwrap();
    assert_eq!(cards.length(), 3);
    let names = grid.query_selector_all(".leader-name").unwrap();
    for (i, leader) in LEADERS.iter().enumerate() {
        let name = names.item(i as u32).unwrap().text_content().unwrap();
        assert_eq!(name, leader.name);
    }
}

#[wasm_bindgen_test]
fn loading_screen_progress_styles() {
    let dom = dom();
    mount(&dom, "loading-screen");
    mount(&dom, "loading-bar");
    mount(&dom, "loading-text");

    let screen = LoadingScreen::find(&dom, &SiteConfig::default().selectors).unwrap();
    screen.show_progress(70).unwrap();
    assert_eq!(screen.text.text_content().unwrap(), "LOADING ASSETS: 70%");
    screen.hide().unwrap();
}
