use crate::config::Selectors;
use crate::error::SiteError;
use crate::view::dom::{Dom, DomElement};

/// Overlay, bar and label of the loading screen
#[derive(Clone)]
pub struct LoadingScreen<E: DomElement> {
    pub screen: E,
    pub bar: E,
    pub text: E,
}

impl<E: DomElement> LoadingScreen<E> {
    pub fn find<D: Dom<Element = E>>(dom: &D, selectors: &Selectors) -> Result<Self, SiteError> {
        Ok(Self {
            screen: dom.get_element(&selectors.loading_screen)?,
            bar: dom.get_element(&selectors.loading_bar)?,
            text: dom.get_element(&selectors.loading_text)?,
        })
    }

    pub fn show_progress(&self, percent: u32) -> Result<(), SiteError> {
        let percent = percent.min(100);
        self.bar.set_style("width", &format!("{percent}%"))?;
        self.text.set_text(&format!("LOADING ASSETS: {percent}%"));
        Ok(())
    }

    /// Start the opacity transition; call [`Self::hide`] once it has run
    pub fn fade_out(&self, duration_ms: u32) -> Result<(), SiteError> {
        self.screen.set_style("transition", &format!("opacity {duration_ms}ms ease"))?;
        self.screen.set_style("opacity", "0")
    }

    pub fn hide(&self) -> Result<(), SiteError> {
        self.screen.set_style("display", "none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::LoadingGate;
    use crate::view::dom::mock::{MockDom, MockElement};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dom() -> MockDom {
        MockDom::with(&[".loading-screen", ".loading-bar", ".loading-text"])
    }

    #[test]
    fn test_progress_text_and_bar() {
        let dom = dom();
        let screen = LoadingScreen::find(&dom, &Selectors::default()).unwrap();
        screen.show_progress(42).unwrap();
        assert_eq!(screen.bar.style("width").as_deref(), Some("42%"));
        assert_eq!(screen.text.text(), "LOADING ASSETS: 42%");
    }

    #[test]
    fn test_missing_bar_fails_fast() {
        let dom = MockDom::with(&[".loading-screen", ".loading-text"]);
        let err = LoadingScreen::<MockElement>::find(&dom, &Selectors::default()).err();
        assert_eq!(err, Some(SiteError::not_found(".loading-bar")));
    }

    #[test]
    fn test_gate_drives_screen_to_hidden() {
        let dom = dom();
        let screen = LoadingScreen::find(&dom, &Selectors::default()).unwrap();
        let completions = Rc::new(RefCell::new(0));
        let mut gate = LoadingGate::new()
            .on_progress({
                let screen = screen.clone();
                move |pct| screen.show_progress(pct).unwrap()
            })
            .on_complete({
                let screen = screen.clone();
                let completions = completions.clone();
                move || {
                    screen.fade_out(1000).unwrap();
                    screen.hide().unwrap();
                    *completions.borrow_mut() += 1;
                }
            });

        for loaded in 1..=10 {
            gate.update_progress(loaded, 10);
        }

        assert_eq!(screen.text.text(), "LOADING ASSETS: 100%");
        assert_eq!(screen.bar.style("width").as_deref(), Some("100%"));
        assert_eq!(screen.screen.style("opacity").as_deref(), Some("0"));
        assert_eq!(screen.screen.style("display").as_deref(), Some("none"));
        assert_eq!(*completions.borrow(), 1);
    }
}
