use crate::dsl::validate_internal_regexes;
use crate::log::init_logger;
use crate::pipeline::{self, Crossword, Rejection};
use crate::spec::CrosswordSpec;
use crate::ParseOptions;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl WasmError {
    fn serialization(code: &str, what: &str, e: impl std::fmt::Display) -> Self {
        WasmError {
            code: code.to_string(),
            message: format!("serialization failed: {e}"),
            description: format!("Failed to serialize {what}"),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {} ({})", e.code, e.message, e.description);
        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }
        js_sys::Error::new(&msg).into()
    }
}

/// Initialize logging and regex validation with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();

    // a bad pattern should fail here, not on the first puzzle
    validate_internal_regexes();

    init_logger(debug_enabled);

    log::info!("WASM module initialized");
}

/// Everything the page needs to show an accepted puzzle.
#[derive(serde::Serialize)]
struct WasmCrossword {
    spec: CrosswordSpec,
    spec_text_with_answers: String,
    spec_text_without_answers: String,
    dsl_with_answers: String,
    dsl_without_answers: String,
    grid_text: String,
}

impl TryFrom<Crossword> for WasmCrossword {
    type Error = serde_json::Error;

    fn try_from(crossword: Crossword) -> Result<Self, Self::Error> {
        Ok(WasmCrossword {
            spec_text_with_answers: crossword.spec_json(true)?,
            spec_text_without_answers: crossword.spec_json(false)?,
            grid_text: crossword.grid_text(),
            spec: crossword.spec,
            dsl_with_answers: crossword.dsl_with_answers,
            dsl_without_answers: crossword.dsl_without_answers,
        })
    }
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum WasmOutcome {
    Accepted(Box<WasmCrossword>),
    Rejected(Rejection),
}

/// JS entry: (text: string, lenient: boolean)
/// returns either the accepted puzzle's outputs or `{errors, text}`
#[wasm_bindgen]
pub fn parse_crossword(text: &str, lenient: bool) -> Result<JsValue, JsValue> {
    let options = if lenient { ParseOptions::lenient() } else { ParseOptions::default() };

    let outcome = match pipeline::parse(text, &options) {
        Ok(crossword) => WasmOutcome::Accepted(Box::new(
            WasmCrossword::try_from(crossword).map_err(|e| WasmError::serialization("WASM001", "spec", e))?,
        )),
        Err(rejection) => WasmOutcome::Rejected(rejection),
    };

    serde_wasm_bindgen::to_value(&outcome)
        .map_err(|e| WasmError::serialization("WASM002", "parse result", e).into())
}

/// JS entry: the spec JSON text, or `{"errors": [...], "text": ...}`
#[wasm_bindgen]
pub fn into_spec_json(text: &str) -> Result<String, JsValue> {
    pipeline::parse_into_spec_json(text, &ParseOptions::default())
        .map_err(|e| WasmError::serialization("WASM003", "spec JSON", e).into())
}
