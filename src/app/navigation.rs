//! Two-state page flow of the landing route, kept per client in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

pub const PAGE_COOKIE: &str = "page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Predict,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Predict => "predict",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "home" => Some(Page::Home),
            "predict" => Some(Page::Predict),
            _ => None,
        }
    }
}

/// One client's position in the page flow. Only the home and start
/// handlers build one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigation {
    page: Page,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing or unrecognised cookies start on Home.
    pub fn from_jar(jar: &CookieJar) -> Self {
        let page = jar
            .get(PAGE_COOKIE)
            .and_then(|cookie| Page::parse(cookie.value()))
            .unwrap_or_default();
        Self { page }
    }

    pub fn current(&self) -> Page {
        self.page
    }

    /// Home -> Predict. Calling it again is a no-op.
    pub fn start_prediction(&mut self) -> Page {
        if self.page == Page::Home {
            debug!("navigation: home -> predict");
            self.page = Page::Predict;
        }
        self.page
    }

    pub fn save(self, jar: CookieJar) -> CookieJar {
        let cookie = Cookie::build((PAGE_COOKIE, self.page.as_str()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        jar.add(cookie)
    }
}
