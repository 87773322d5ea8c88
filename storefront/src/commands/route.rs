use clap::Args;
use storefront_models::page::{Page, Resolution};

#[derive(Debug, Args)]
pub struct RouteCommand {
    /// The request path, e.g. `/about`
    path: String,
}

impl RouteCommand {
    pub fn invoke(self) {
        let resolution = Page::resolve(&self.path);
        tracing::debug!(path = %self.path, ?resolution, "resolved route");
        println!("{}", describe(&self.path, resolution));
    }
}

fn describe(path: &str, resolution: Resolution) -> String {
    let page = resolution.page;
    if resolution.redirect {
        format!("{path} -> redirect to {} ({page})", page.path())
    } else {
        format!("{path} -> {page} ({})", page.path())
    }
}
