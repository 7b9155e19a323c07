// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning a query result into what the results list shows.
//!
//! [`RenderedList`] is the view-independent description: nothing, the
//! "no results" placeholder, or one link per hit in engine order. A
//! [`ResultsView`] displays it. [`HtmlResultsList`] is the browser-facing
//! view and renders PaperMod-style `<li class="post-entry">` items through
//! an askama template.

use askama::Template;
use serde::Serialize;
use tracing::warn;

use crate::error::RenderError;
use crate::types::QueryResult;

/// Text of the single item shown when a query matches nothing.
pub const NO_RESULTS_TEXT: &str = "No results found";

/// One entry of the results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLink {
    pub title: String,
    pub permalink: String,
}

/// Full contents of the results list. Every render replaces the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "links", rename_all = "snake_case")]
pub enum RenderedList {
    #[default]
    Empty,
    NoResults,
    Links(Vec<ResultLink>),
}

impl RenderedList {
    pub fn from_result(result: &QueryResult<'_>) -> Self {
        if result.is_empty() {
            return RenderedList::NoResults;
        }
        RenderedList::Links(
            result
                .iter()
                .map(|hit| ResultLink {
                    title: hit.record.title.clone(),
                    permalink: hit.record.permalink.clone(),
                })
                .collect(),
        )
    }

    /// No items at all (the placeholder counts as an item).
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedList::Empty)
    }

    /// Number of `<li>` items the list holds.
    pub fn len(&self) -> usize {
        match self {
            RenderedList::Empty => 0,
            RenderedList::NoResults => 1,
            RenderedList::Links(links) => links.len(),
        }
    }

    pub fn links(&self) -> &[ResultLink] {
        match self {
            RenderedList::Links(links) => links.as_slice(),
            _ => &[],
        }
    }
}

/// Where the controller puts results.
pub trait ResultsView {
    fn show(&mut self, list: RenderedList);
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate<'a> {
    placeholder: Option<&'a str>,
    links: &'a [ResultLink],
}

/// Render a list to the inner HTML of the results `<ul>`.
pub fn render_html(list: &RenderedList) -> Result<String, RenderError> {
    let template = match list {
        RenderedList::Empty => return Ok(String::new()),
        RenderedList::NoResults => ResultsTemplate {
            placeholder: Some(NO_RESULTS_TEXT),
            links: &[],
        },
        RenderedList::Links(links) => ResultsTemplate {
            placeholder: None,
            links: links.as_slice(),
        },
    };
    Ok(template.render()?)
}

/// The results list as HTML.
///
/// `generation` counts successful renders so callers can tell whether the
/// markup changed since they last looked.
#[derive(Debug, Clone, Default)]
pub struct HtmlResultsList {
    html: String,
    generation: u64,
}

impl HtmlResultsList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl ResultsView for HtmlResultsList {
    fn show(&mut self, list: RenderedList) {
        match render_html(&list) {
            Ok(html) => {
                self.html = html;
                self.generation += 1;
            }
            // Keep the previous list.
            Err(err) => warn!(error = %err, "failed to render search results"),
        }
    }
}
