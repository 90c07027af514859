// Reusable library API, shared by the CLI and WASM builds
pub mod answer;
pub mod dsl;
pub mod errors;
pub mod generate;
pub mod grid;
pub mod json_ingest;
pub mod log;
pub mod options;
pub mod pipeline;
pub mod puzzle;
pub mod spec;
pub mod validate;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use dsl::parse_dsl;
pub use errors::CrosswordError;
pub use generate::generate_dsl;
pub use json_ingest::json_to_dsl;
pub use options::{ParseMode, ParseOptions};
pub use pipeline::{parse, parse_into_spec_json, Crossword, Rejection, SourceFormat};
pub use puzzle::{Clue, Coord, Dimensions, Direction, Puzzle};
pub use spec::{generate_spec, CrosswordSpec};
pub use validate::validate;
