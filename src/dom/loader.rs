use gloo_net::http::Request;
use web_sys::{Document, RequestCache};

use crate::config::SiteConfig;
use crate::partials::{FetchedFragment, FragmentSource, load_partials};

use super::query_all;

struct HttpSource;

impl FragmentSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<FetchedFragment, String> {
        let response = Request::get(url)
            .cache(RequestCache::NoStore)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let status = response.status();
        if !response.ok() {
            return Ok(FetchedFragment {
                status,
                body: Vec::new(),
            });
        }
        let body = response.binary().await.map_err(|err| err.to_string())?;
        Ok(FetchedFragment { status, body })
    }
}

/// Fills every `[data-include]` placeholder with its fragment.
pub(super) async fn inject_partials(document: &Document, config: &SiteConfig) {
    let placeholders = query_all(document, "[data-include]");
    let paths: Vec<Option<String>> = placeholders
        .iter()
        .map(|placeholder| placeholder.get_attribute("data-include"))
        .collect();
    load_partials(&HttpSource, &paths, &config.cache_buster, |idx, html| {
        if let Some(placeholder) = placeholders.get(idx) {
            placeholder.set_inner_html(html);
        }
    })
    .await;
}
