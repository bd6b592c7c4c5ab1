//! WebAssembly bindings for the script checker.
//!
//! Lets the dashboard editor check scripts in the browser before saving.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { check_script, script_status } from './growsoft_lua_checker.js';
//!
//! await init();
//!
//! const result = check_script(source);
//! if (!result.valid) console.error(result.error);
//! result.warnings.forEach((w) => console.warn(w));
//!
//! const status = script_status(source); // "valid" | "error"
//! ```

use crate::response::ScriptStatus;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Check a script and return `{ valid, error?, warnings }` as a JavaScript object.
#[wasm_bindgen]
pub fn check_script(source: &str) -> Result<JsValue, JsValue> {
    let result = crate::check_lua_syntax(source);
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check a script and return the result as a JSON string.
#[wasm_bindgen]
pub fn check_script_to_json(source: &str) -> Result<String, JsValue> {
    let result = crate::check_lua_syntax(source);
    serde_json::to_string_pretty(&result)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e)))
}

/// The status a script with this content would be saved with.
#[wasm_bindgen]
pub fn script_status(source: &str) -> String {
    ScriptStatus::of_content(source).to_string()
}
