//! WASM bindings for Tent Text
//!
//! When compiled with the `wasm` feature, this exposes a `WasmAutolinker`
//! class that can be used from JavaScript. Entity offsets are UTF-16 code
//! units, which are JavaScript string indices.

use crate::text::{Autolink, AutolinkOptions, Entity, Validator};
use js_sys::{Array, JsString, Object, Reflect};
use wasm_bindgen::prelude::*;

/// WASM autolinker instance
///
/// Create with `new WasmAutolinker(optionsJson)` and render with
/// `autoLink(text)`.
#[wasm_bindgen]
pub struct WasmAutolinker {
    autolink: Autolink,
}

#[wasm_bindgen]
impl WasmAutolinker {
    /// Create an autolinker from options JSON
    ///
    /// # Arguments
    /// * `options_json` - JSON object with rendering options, or nothing
    ///   for the defaults
    ///
    /// # Throws
    /// If the options JSON is invalid
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<WasmAutolinker, JsValue> {
        let options = match options_json {
            Some(json) => AutolinkOptions::from_json(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => AutolinkOptions::default(),
        };
        let autolink =
            Autolink::with_options(options).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmAutolinker { autolink })
    }

    /// Link every kind of entity
    #[wasm_bindgen(js_name = autoLink)]
    pub fn auto_link(&self, text: &str) -> String {
        self.autolink.auto_link(text)
    }

    /// Link hashtags only
    #[wasm_bindgen(js_name = autoLinkHashtags)]
    pub fn auto_link_hashtags(&self, text: &str) -> String {
        self.autolink.auto_link_hashtags(text)
    }

    /// Link cashtags only
    #[wasm_bindgen(js_name = autoLinkCashtags)]
    pub fn auto_link_cashtags(&self, text: &str) -> String {
        self.autolink.auto_link_cashtags(text)
    }

    /// Link URLs only
    #[wasm_bindgen(js_name = autoLinkUrls)]
    pub fn auto_link_urls(&self, text: &str) -> String {
        self.autolink.auto_link_urls(text)
    }

    /// Link mentions and lists only
    #[wasm_bindgen(js_name = autoLinkMentionsAndLists)]
    pub fn auto_link_mentions_and_lists(&self, text: &str) -> String {
        self.autolink.auto_link_mentions_and_lists(text)
    }

    /// Extract entities as an array of plain objects
    ///
    /// # Throws
    /// If an entity object cannot be built
    #[wasm_bindgen(js_name = extractEntities)]
    pub fn extract_entities(&self, text: &str) -> Result<Array, JsValue> {
        let entities = self.autolink.extractor().extract_entities_with_indices(text);
        let arr = Array::new();
        for entity in &entities {
            arr.push(&entity_to_js(entity)?);
        }
        Ok(arr)
    }

    /// Extract entities as a JSON string
    ///
    /// # Throws
    /// If serialization fails
    #[wasm_bindgen(js_name = extractEntitiesJson)]
    pub fn extract_entities_json(&self, text: &str) -> Result<String, JsValue> {
        let entities = self.autolink.extractor().extract_entities_with_indices(text);
        serde_json::to_string(&entities)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// Convert an entity to a JavaScript object
fn entity_to_js(entity: &Entity) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    set(&obj, "kind", JsString::from(entity.kind.name()).into())?;
    set(&obj, "start", JsValue::from_f64(entity.start as f64))?;
    set(&obj, "end", JsValue::from_f64(entity.end as f64))?;
    set(&obj, "value", JsString::from(entity.value.as_str()).into())?;
    if let Some(slug) = &entity.list_slug {
        set(&obj, "listSlug", JsString::from(slug.as_str()).into())?;
    }
    Ok(obj.into())
}

fn set(obj: &Object, key: &str, value: JsValue) -> Result<(), JsValue> {
    Reflect::set(obj, &JsString::from(key).into(), &value).map(|_| ())
}

/// Check whether a text is a valid post
#[wasm_bindgen(js_name = isValidPost)]
pub fn is_valid_post(text: &str) -> bool {
    Validator::new().is_valid(text)
}

/// Initialize function for WASM
#[wasm_bindgen]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
