//! Static page content rendered once the loading gate opens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leader {
    pub name: &'static str,
    pub title: &'static str,
    pub bio: &'static str,
    pub image_url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const LOGO_URL: &str = "assets/logo.png";

pub const LEADERS: [Leader; 3] = [
    Leader {
        name: "Margaret Okafor",
        title: "Chief Executive Officer",
        bio: "Twenty years building research programs into products, now steering the company's long-range strategy.",
        image_url: "assets/leaders/okafor.jpg",
    },
    Leader {
        name: "Daniel Reyes",
        title: "Chief Technology Officer",
        bio: "Leads platform engineering and the applied research group behind every launch.",
        image_url: "assets/leaders/reyes.jpg",
    },
    Leader {
        name: "Ingrid Halvorsen",
        title: "Head of Public Relations",
        bio: "Runs brand, press and community, and keeps the story consistent across every channel.",
        image_url: "assets/leaders/halvorsen.jpg",
    },
];

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Global Reach",
        description: "Operations on six continents with local teams in every region.",
        icon: "globe",
    },
    Feature {
        title: "Advanced Research",
        description: "Dedicated labs turning early science into field-ready products.",
        icon: "flask",
    },
    Feature {
        title: "Trusted Security",
        description: "Audited infrastructure and round-the-clock incident response.",
        icon: "shield",
    },
];

/// Every image the page needs before the gate opens, logo first
pub fn preload_urls() -> Vec<&'static str> {
    std::iter::once(LOGO_URL)
        .chain(LEADERS.iter().map(|l| l.image_url))
        .collect()
}
