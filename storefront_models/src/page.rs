use std::fmt;

/// The views of the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Home,
    About,
    Products,
    Contact,
}

/// The result of resolving a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub page: Page,
    /// `true` if the requested path did not match any route and the request
    /// has to be redirected to the path of `page`.
    pub redirect: bool,
}

impl Page {
    pub const ALL: [Self; 4] = [Self::Home, Self::About, Self::Products, Self::Contact];

    /// The canonical path of the page.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Products => "/products",
            Self::Contact => "/contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Products => "Products",
            Self::Contact => "Contact",
        }
    }

    /// Resolves a request path to a page. Paths that don't match any route
    /// resolve to [`Page::Home`] with a redirect.
    ///
    /// Query strings and fragments are ignored, as are empty path segments.
    pub fn resolve(path: &str) -> Resolution {
        let path = path
            .split_once(['?', '#'])
            .map_or(path, |(path, _)| path);
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        let page = match (segments.next(), segments.next()) {
            (None, _) => Some(Self::Home),
            (Some("about"), None) => Some(Self::About),
            (Some("products"), None) => Some(Self::Products),
            (Some("contact"), None) => Some(Self::Contact),
            _ => None,
        };

        match page {
            Some(page) => Resolution {
                page,
                redirect: false,
            },
            None => Resolution {
                page: Self::default(),
                redirect: true,
            },
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
