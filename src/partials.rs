//! Fetches the HTML fragments referenced by `data-include` placeholders.
//!
//! All fetches run concurrently and each fragment is handed to the injector as
//! soon as it arrives. A failed fragment is logged and its placeholder stays
//! empty; it never stops the others or the page boot.

use std::future::Future;

use futures::future::join_all;
use tracing::{error, info};

use crate::error::{Result, SiteError};

/// Raw answer for one fragment request.
#[derive(Debug, Clone, Default)]
pub struct FetchedFragment {
    pub status: u16,
    pub body: Vec<u8>,
}

pub trait FragmentSource {
    /// Issues an uncached GET. `Err` carries the transport failure reason.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedFragment, String>>;
}

#[derive(Debug)]
pub enum PartialOutcome {
    /// The placeholder named no path.
    Skipped,
    Loaded,
    Failed(SiteError),
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl LoadSummary {
    pub fn from_outcomes(outcomes: &[PartialOutcome]) -> Self {
        outcomes
            .iter()
            .fold(LoadSummary::default(), |mut summary, outcome| {
                match outcome {
                    PartialOutcome::Skipped => summary.skipped += 1,
                    PartialOutcome::Loaded => summary.loaded += 1,
                    PartialOutcome::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }
}

pub fn cache_busted(path: &str, marker: &str) -> String {
    if marker.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{marker}")
}

/// Decodes as UTF-8 whatever the server declared; invalid sequences become U+FFFD.
pub fn decode_fragment(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

pub fn check_status(path: &str, status: u16) -> Result<()> {
    if (200..=299).contains(&status) {
        Ok(())
    } else {
        Err(SiteError::FragmentStatus {
            path: path.to_string(),
            status,
        })
    }
}

async fn fetch_one<S: FragmentSource>(source: &S, path: &str, cache_buster: &str) -> Result<String> {
    let url = cache_busted(path, cache_buster);
    let fragment = source
        .fetch(&url)
        .await
        .map_err(|reason| SiteError::FragmentTransport {
            path: path.to_string(),
            reason,
        })?;
    check_status(path, fragment.status)?;
    Ok(decode_fragment(&fragment.body))
}

/// Loads every placeholder's fragment and waits for all of them.
///
/// `paths[i]` is the `data-include` value of placeholder `i`; `inject(i, html)`
/// is called once per successful fragment, in completion order.
pub async fn load_partials<S, F>(
    source: &S,
    paths: &[Option<String>],
    cache_buster: &str,
    inject: F,
) -> Vec<PartialOutcome>
where
    S: FragmentSource,
    F: Fn(usize, &str),
{
    let inject = &inject;
    let requests = paths.iter().enumerate().map(move |(idx, path)| async move {
        let Some(path) = path.as_deref().filter(|path| !path.is_empty()) else {
            return PartialOutcome::Skipped;
        };
        match fetch_one(source, path, cache_buster).await {
            Ok(html) => {
                inject(idx, &html);
                PartialOutcome::Loaded
            }
            Err(err) => {
                error!(path = %path, error = %err, "Failed to load partial");
                PartialOutcome::Failed(err)
            }
        }
    });
    let outcomes = join_all(requests).await;
    let summary = LoadSummary::from_outcomes(&outcomes);
    info!(
        loaded = summary.loaded,
        failed = summary.failed,
        skipped = summary.skipped,
        "Partials settled"
    );
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MemorySource {
        pages: HashMap<String, FetchedFragment>,
        requested: RefCell<Vec<String>>,
    }

    impl MemorySource {
        fn new(pages: &[(&str, u16, &[u8])]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, status, body)| {
                        (
                            url.to_string(),
                            FetchedFragment {
                                status: *status,
                                body: body.to_vec(),
                            },
                        )
                    })
                    .collect(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl FragmentSource for MemorySource {
        async fn fetch(&self, url: &str) -> Result<FetchedFragment, String> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| "connection refused".to_string())
        }
    }

    #[test]
    fn cache_marker_respects_existing_query() {
        assert_eq!(cache_busted("partials/header.html", "v=2"), "partials/header.html?v=2");
        assert_eq!(cache_busted("partials/faq.html?lang=pt", "v=2"), "partials/faq.html?lang=pt&v=2");
        assert_eq!(cache_busted("partials/footer.html", ""), "partials/footer.html");
    }

    #[test]
    fn non_success_status_is_an_error() {
        assert!(check_status("a.html", 200).is_ok());
        assert!(check_status("a.html", 204).is_ok());
        let err = check_status("a.html", 404).unwrap_err();
        assert_eq!(err.to_string(), "partial a.html answered HTTP 404");
        assert!(check_status("a.html", 301).is_err());
    }

    #[test]
    fn fragments_decode_as_utf8() {
        assert_eq!(decode_fragment("Localização".as_bytes()), "Localização");
        assert_eq!(decode_fragment(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }

    #[test]
    fn one_failure_does_not_block_siblings() {
        let source = MemorySource::new(&[
            ("partials/header.html?v=2", 200, "<nav>Início</nav>".as_bytes()),
            ("partials/planos.html?v=2", 500, b"boom"),
            ("partials/footer.html?v=2", 200, b"<footer></footer>"),
        ]);
        let paths = vec![
            Some("partials/header.html".to_string()),
            Some("partials/planos.html".to_string()),
            None,
            Some("partials/missing.html".to_string()),
            Some("partials/footer.html".to_string()),
        ];
        let injected = RefCell::new(Vec::new());
        let outcomes = block_on(load_partials(&source, &paths, "v=2", |idx, html| {
            injected.borrow_mut().push((idx, html.to_string()));
        }));

        assert_eq!(
            injected.into_inner(),
            vec![
                (0, "<nav>Início</nav>".to_string()),
                (4, "<footer></footer>".to_string()),
            ]
        );
        assert_eq!(
            LoadSummary::from_outcomes(&outcomes),
            LoadSummary {
                loaded: 2,
                failed: 2,
                skipped: 1,
            }
        );
        assert!(matches!(
            outcomes[1],
            PartialOutcome::Failed(SiteError::FragmentStatus { status: 500, .. })
        ));
        assert!(matches!(
            outcomes[3],
            PartialOutcome::Failed(SiteError::FragmentTransport { .. })
        ));
        assert_eq!(source.requested.borrow().len(), 4, "empty paths are never requested");
    }
}
