//! WebAssembly bindings for the blog search box.
//!
//! The page's JS glue owns the DOM and the network: it fetches `index.json`,
//! hands the text to [`BlogSearch::load_index`], and on every `keyup` writes
//! whatever [`BlogSearch::on_input`] returns into the results list. An
//! `undefined` return means "leave the list alone".

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::config::EngineOptions;
use crate::controller::{SearchController, SearchStatus};
use crate::error::IndexError;
use crate::loader::parse_index;
use crate::render::HtmlResultsList;

/// Search hit for TypeScript consumption.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchHitOutput<'a> {
    title: &'a str,
    permalink: &'a str,
    score: f64,
}

#[wasm_bindgen]
pub struct BlogSearch {
    input_id: String,
    results_id: String,
    controller: SearchController<HtmlResultsList>,
}

#[wasm_bindgen]
impl BlogSearch {
    /// Create the controller for one search page.
    ///
    /// `options` is the theme's `fuseOpts` object (or `undefined` for the
    /// defaults). Both element ids are required.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue, input_id: String, results_id: String) -> Result<BlogSearch, JsValue> {
        if input_id.trim().is_empty() {
            return Err(JsValue::from_str("search input element id is required"));
        }
        if results_id.trim().is_empty() {
            return Err(JsValue::from_str("search results element id is required"));
        }

        let options: EngineOptions = if options.is_undefined() || options.is_null() {
            EngineOptions::default()
        } else {
            from_value(options).map_err(|e| e.to_string())?
        };
        let controller =
            SearchController::new(options, HtmlResultsList::new()).map_err(|e| e.to_string())?;

        Ok(BlogSearch {
            input_id,
            results_id,
            controller,
        })
    }

    #[wasm_bindgen(getter, js_name = inputId)]
    pub fn input_id(&self) -> String {
        self.input_id.clone()
    }

    #[wasm_bindgen(getter, js_name = resultsId)]
    pub fn results_id(&self) -> String {
        self.results_id.clone()
    }

    /// Hand over the fetched index body. Errors (and disables search) when
    /// the body is not a JSON array of records.
    #[wasm_bindgen(js_name = loadIndex)]
    pub fn load_index(&mut self, json: &str) -> Result<(), JsValue> {
        self.start_loading()?;
        self.controller
            .finish_loading(parse_index(json.as_bytes()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Report that the fetch failed; search stays disabled. Errors when the
    /// index already loaded or already failed.
    #[wasm_bindgen(js_name = failIndex)]
    pub fn fail_index(&mut self, message: &str) -> Result<(), JsValue> {
        self.controller
            .fail_loading(IndexError::fetch("index.json", message))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Feed the current value of the search box.
    ///
    /// Returns the new inner HTML of the results list, or `undefined` when
    /// the list should be left as it is.
    #[wasm_bindgen(js_name = onInput)]
    pub fn on_input(&mut self, value: &str) -> Option<String> {
        if self.controller.on_input(value) {
            Some(self.controller.view().html().to_string())
        } else {
            None
        }
    }

    /// Run a query and return `{ title, permalink, score }[]`, best first.
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        let Some(result) = self.controller.query(query) else {
            return Ok(JsValue::NULL);
        };
        let hits: Vec<SearchHitOutput<'_>> = result
            .iter()
            .map(|hit| SearchHitOutput {
                title: &hit.record.title,
                permalink: &hit.record.permalink,
                score: hit.score,
            })
            .collect();
        to_value(&hits).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `"uninitialized" | "loading" | "ready" | "failed"`
    pub fn state(&self) -> String {
        self.controller.status().to_string()
    }
}

impl BlogSearch {
    fn start_loading(&mut self) -> Result<(), JsValue> {
        if self.controller.status() == SearchStatus::Uninitialized {
            self.controller
                .begin_loading()
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }
        Ok(())
    }
}
