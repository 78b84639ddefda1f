//! Component records and their typed payloads.
//!
//! A component is one addressable block of page content. Its `type` selects
//! which `<type>Data` payload is meaningful; all other payload fields stay
//! unset. Records written by older versions of the builder may lack their
//! payload entirely - renderers upgrade those lazily from the type's default
//! payload, never as a hard error.

use serde::{Deserialize, Serialize};

/// The closed palette of component types.
///
/// Foreign or legacy records keep their original tag in `Unknown` so a
/// document written by a newer builder still loads; unknown components
/// render as an inert placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Navbar,
    Hero,
    Footer,
    Products,
    AboutUs,
    Text,
    Unknown(String),
}

impl ComponentType {
    /// The wire/storage tag for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Navbar => "navbar",
            Self::Hero => "hero",
            Self::Footer => "footer",
            Self::Products => "products",
            Self::AboutUs => "about-us",
            Self::Text => "text",
            Self::Unknown(tag) => tag,
        }
    }

    /// Parse a storage tag. Never fails - unrecognized tags become
    /// [`ComponentType::Unknown`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "navbar" => Self::Navbar,
            "hero" => Self::Hero,
            "footer" => Self::Footer,
            "products" => Self::Products,
            "about-us" => Self::AboutUs,
            "text" => Self::Text,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}

/// One link in a navbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub id: String,
    pub text: String,
    pub href: String,
}

/// One call-to-action button in a navbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavButton {
    pub id: String,
    pub text: String,
    pub href: String,
}

/// Navbar payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarData {
    pub logo_text: String,
    pub links: Vec<NavLink>,
    pub buttons: Vec<NavButton>,
}

impl Default for NavbarData {
    fn default() -> Self {
        Self {
            logo_text: "My Site".to_owned(),
            links: vec![
                NavLink {
                    id: "l1".to_owned(),
                    text: "Home".to_owned(),
                    href: "/".to_owned(),
                },
                NavLink {
                    id: "l2".to_owned(),
                    text: "About".to_owned(),
                    href: "#".to_owned(),
                },
            ],
            buttons: vec![NavButton {
                id: "b1".to_owned(),
                text: "Get Started".to_owned(),
                href: "#".to_owned(),
            }],
        }
    }
}

/// One call-to-action button in a hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroButton {
    pub id: String,
    pub text: String,
    pub href: String,
}

/// One slider image in a hero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub image_url: String,
    pub alt: String,
}

/// Hero payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroData {
    pub heading: String,
    pub subheading: String,
    pub buttons: Vec<HeroButton>,
    pub slides: Vec<Slide>,
}

impl Default for HeroData {
    fn default() -> Self {
        Self {
            heading: "Welcome to your new site".to_owned(),
            subheading: "Describe what you offer in one memorable sentence.".to_owned(),
            buttons: vec![HeroButton {
                id: "b1".to_owned(),
                text: "Learn more".to_owned(),
                href: "#".to_owned(),
            }],
            slides: Vec::new(),
        }
    }
}

/// One link in a footer section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: String,
    pub text: String,
    pub href: String,
}

/// One titled column of footer links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterSection {
    pub id: String,
    pub title: String,
    pub links: Vec<FooterLink>,
}

/// Footer payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterData {
    pub tagline: String,
    pub sections: Vec<FooterSection>,
    pub copyright: String,
}

impl Default for FooterData {
    fn default() -> Self {
        Self {
            tagline: "Built with Tessera".to_owned(),
            sections: vec![FooterSection {
                id: "s1".to_owned(),
                title: "Pages".to_owned(),
                links: vec![FooterLink {
                    id: "l1".to_owned(),
                    text: "Home".to_owned(),
                    href: "/".to_owned(),
                }],
            }],
            copyright: "© My Site".to_owned(),
        }
    }
}

/// Products grid payload. The product records themselves live on the site
/// document, not on the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductsData {
    pub heading: String,
    pub subheading: String,
    pub columns: u8,
}

impl Default for ProductsData {
    fn default() -> Self {
        Self {
            heading: "Our Products".to_owned(),
            subheading: String::new(),
            columns: 3,
        }
    }
}

/// One headline statistic in an about-us block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// One team member in an about-us block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub photo_url: String,
}

/// About-us payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutUsData {
    pub heading: String,
    pub body: String,
    pub stats: Vec<Stat>,
    pub members: Vec<TeamMember>,
}

impl Default for AboutUsData {
    fn default() -> Self {
        Self {
            heading: "About us".to_owned(),
            body: "Tell visitors who you are and why you do what you do.".to_owned(),
            stats: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// One addressable, independently editable block of page content.
///
/// Exactly one `<type>Data` field is meaningful per component, selected by
/// `kind`; `content` is the generic fallback payload (and the whole payload
/// for `text` components).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navbar_data: Option<NavbarData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_data: Option<HeroData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_data: Option<FooterData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_data: Option<ProductsData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_us_data: Option<AboutUsData>,
}

impl Component {
    /// Create a component of `kind` with its default payload applied.
    #[must_use]
    pub fn with_defaults(id: impl Into<String>, kind: ComponentType, style: Option<String>) -> Self {
        let mut component = Self {
            id: id.into(),
            kind: kind.clone(),
            style,
            content: String::new(),
            navbar_data: None,
            hero_data: None,
            footer_data: None,
            products_data: None,
            about_us_data: None,
        };

        match kind {
            ComponentType::Navbar => component.navbar_data = Some(NavbarData::default()),
            ComponentType::Hero => component.hero_data = Some(HeroData::default()),
            ComponentType::Footer => component.footer_data = Some(FooterData::default()),
            ComponentType::Products => component.products_data = Some(ProductsData::default()),
            ComponentType::AboutUs => component.about_us_data = Some(AboutUsData::default()),
            ComponentType::Text => component.content = "Write something here.".to_owned(),
            ComponentType::Unknown(_) => {}
        }

        component
    }
}
