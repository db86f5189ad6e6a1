use crate::error::SiteError;
use crate::model::{Feature, Leader};
use crate::view::dom::{Dom, DomElement};

fn child<D: Dom>(dom: &D, parent: &D::Element, tag: &str, class: &str, text: &str) -> Result<D::Element, SiteError> {
    let el = dom.create_element(tag)?;
    el.set_class(class);
    if !text.is_empty() {
        el.set_text(text);
    }
    parent.append_child(&el)?;
    Ok(el)
}

/// Replace the grid's children with one card per leader, in order
pub fn render_leaders<D: Dom>(dom: &D, grid: &D::Element, leaders: &[Leader]) -> Result<usize, SiteError> {
    grid.clear_children();
    for leader in leaders {
        let card = dom.create_element("div")?;
        card.set_class("leader-card");

        let img = child(dom, &card, "img", "leader-image", "")?;
        img.set_attribute("src", leader.image_url)?;
        img.set_attribute("alt", leader.name)?;
        img.set_attribute("loading", "lazy")?;

        child(dom, &card, "h3", "leader-name", leader.name)?;
        child(dom, &card, "p", "leader-title", leader.title)?;
        child(dom, &card, "p", "leader-bio", leader.bio)?;

        grid.append_child(&card)?;
    }
    tracing::debug!(count = leaders.len(), "rendered leader cards");
    Ok(leaders.len())
}

pub fn render_features<D: Dom>(dom: &D, grid: &D::Element, features: &[Feature]) -> Result<usize, SiteError> {
    grid.clear_children();
    for feature in features {
        let card = dom.create_element("div")?;
        card.set_class("feature-card");

        let icon = child(dom, &card, "div", "feature-icon", "")?;
        icon.set_attribute("data-icon", feature.icon)?;

        child(dom, &card, "h3", "feature-title", feature.title)?;
        child(dom, &card, "p", "feature-description", feature.description)?;

        grid.append_child(&card)?;
    }
    Ok(features.len())
}

/// Scroll-linked transform of the content container
pub fn set_content_offset<E: DomElement>(content: &E, offset: f32) -> Result<(), SiteError> {
    content.set_style("transform", &format!("translateY({offset}px)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FEATURES, LEADERS};
    use crate::view::dom::mock::MockDom;

    #[test]
    fn test_leader_cards_in_input_order() {
        let dom = MockDom::with(&[".leadership-grid"]);
        let grid = dom.get_element(".leadership-grid").unwrap();
        assert_eq!(render_leaders(&dom, &grid, &LEADERS).unwrap(), 3);

        let cards = grid.children();
        assert_eq!(cards.len(), 3);
        for (card, leader) in cards.iter().zip(LEADERS.iter()) {
            assert_eq!(card.class(), "leader-card");
            assert_eq!(card.find("leader-name").unwrap().text(), leader.name);
            assert_eq!(card.find("leader-title").unwrap().text(), leader.title);
            assert_eq!(card.find("leader-bio").unwrap().text(), leader.bio);
            let img = card.find("leader-image").unwrap();
            assert_eq!(img.attribute("src").as_deref(), Some(leader.image_url));
            assert_eq!(img.attribute("alt").as_deref(), Some(leader.name));
        }
    }

    #[test]
    fn test_rendering_twice_does_not_duplicate() {
        let dom = MockDom::with(&[".leadership-grid"]);
        let grid = dom.element(".leadership-grid");
        render_leaders(&dom, &grid, &LEADERS).unwrap();
        render_leaders(&dom, &grid, &LEADERS).unwrap();
        assert_eq!(grid.children().len(), 3);
    }

    #[test]
    fn test_feature_cards() {
        let dom = MockDom::with(&[".features-grid"]);
        let grid = dom.element(".features-grid");
        render_features(&dom, &grid, &FEATURES).unwrap();
        let cards = grid.children();
        assert_eq!(cards.len(), FEATURES.len());
        assert_eq!(cards[0].find("feature-title").unwrap().text(), FEATURES[0].title);
        assert_eq!(
            cards[2].find("feature-icon").unwrap().attribute("data-icon").as_deref(),
            Some(FEATURES[2].icon)
        );
    }

    #[test]
    fn test_content_offset_transform() {
        let dom = MockDom::with(&[".content"]);
        let content = dom.element(".content");
        set_content_offset(&content, -120.5).unwrap();
        assert_eq!(content.style("transform").as_deref(), Some("translateY(-120.5px)"));
    }
}
