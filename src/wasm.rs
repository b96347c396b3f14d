//! WASM bindings for browser-based batch editing.
//!
//! Documents cross the boundary as a JSON array of `{ "name", "raw_markup" }`
//! objects (`content` is accepted as an alias for `raw_markup`).

use std::io::Cursor;

use wasm_bindgen::prelude::*;

use crate::batch::Batch;
use crate::document::Document;
use crate::export::ArchiveExporter;
use crate::recipe::Recipe;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Run a JSON recipe over a JSON document list and return the new list.
#[wasm_bindgen]
pub fn apply_recipe(documents_json: &str, recipe_json: &str) -> Result<String, JsValue> {
    let documents: Vec<Document> = serde_json::from_str(documents_json).map_err(to_js)?;
    let recipe = Recipe::from_json(recipe_json).map_err(to_js)?;

    let mut batch = Batch::from_documents(documents);
    recipe.run(&mut batch).map_err(to_js)?;

    serde_json::to_string(batch.documents()).map_err(to_js)
}

/// Package a JSON document list as ZIP bytes.
#[wasm_bindgen]
pub fn build_archive(documents_json: &str) -> Result<Vec<u8>, JsValue> {
    let documents: Vec<Document> = serde_json::from_str(documents_json).map_err(to_js)?;
    let cursor = ArchiveExporter::new()
        .export(&documents, Cursor::new(Vec::new()))
        .map_err(to_js)?;
    Ok(cursor.into_inner())
}
