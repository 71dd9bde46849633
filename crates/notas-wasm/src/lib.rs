//! WASM bindings for NFe/CTe XML extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js:
//! an upload page hands over the XML files and receives the table rows.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use notas_core::models::config::ExtractionConfig;
use notas_core::numeric::format_source;
use notas_core::patterns::access_key_from_id;
use notas_core::{Column, Document, Engine, OutputMode, OutputRecord, SourceDocument};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize with plain JS objects for maps, so records come out as
/// `{ "Chave de acesso": "...", ... }`.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<ExtractionConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ExtractionConfig::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_mode(mode: &str) -> Result<OutputMode, JsValue> {
    match mode {
        "item" => Ok(OutputMode::Item),
        "group" => Ok(OutputMode::Group),
        other => Err(JsValue::from_str(&format!("unknown mode: {other}"))),
    }
}

/// Extract one XML document.
///
/// `options` follows the `extraction` section of the configuration file
/// (`{ mode: "group", kind: "nfe", ... }`) and may be omitted.
#[wasm_bindgen]
pub fn extract_document(xml: &str, options: JsValue) -> Result<JsValue, JsValue> {
    // Browser builds have no thread pool.
    let engine = Engine::new(&parse_options(options)?).with_parallel(false);

    let extracted = engine
        .extract(xml.as_bytes())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    #[derive(Serialize)]
    struct ExtractOutput<'a> {
        document: &'a Document,
        records: Vec<OutputRecord>,
    }

    to_js(&ExtractOutput {
        document: &extracted.document,
        records: engine.assemble(&extracted),
    })
}

/// Render a source decimal (`"1234.5"`) in display notation (`"1234,50"`).
#[wasm_bindgen]
pub fn format_decimal(value: &str) -> String {
    format_source(value)
}

/// Access key of an `Id` attribute (`"NFe3520..."`).
#[wasm_bindgen]
pub fn access_key(id: &str) -> String {
    access_key_from_id(id)
}

/// Column labels in output order.
#[wasm_bindgen]
pub fn columns() -> js_sys::Array {
    Column::ALL
        .iter()
        .map(|column| JsValue::from_str(column.label()))
        .collect()
}

/// Batch converter for an upload page: collect files, then convert.
#[wasm_bindgen]
pub struct NotasConverter {
    config: ExtractionConfig,
    sources: Vec<SourceDocument>,
}

#[wasm_bindgen]
impl NotasConverter {
    /// Create a converter; `options` as for [`extract_document`].
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<NotasConverter, JsValue> {
        let mut config = parse_options(options)?;
        config.parallel = false;
        Ok(Self {
            config,
            sources: Vec::new(),
        })
    }

    /// Switch between `"item"` and `"group"` output.
    #[wasm_bindgen]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.config.mode = parse_mode(mode)?;
        Ok(())
    }

    /// Queue a file for conversion.
    #[wasm_bindgen]
    pub fn add_file(&mut self, name: &str, bytes: &[u8]) {
        self.sources.push(SourceDocument::new(name, bytes));
    }

    /// Number of queued files.
    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Drop every queued file.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Convert the queued files.
    ///
    /// Returns `{ records, failures, documents }`; a document that cannot be
    /// read shows up in `failures` and never aborts the conversion.
    #[wasm_bindgen]
    pub fn convert(&self) -> Result<JsValue, JsValue> {
        let result = Engine::new(&self.config).process_batch(&self.sources);
        to_js(&result)
    }
}
