// Translation module - prompt assembly and response reshaping
// Author: kelexine (https://github.com/kelexine)

pub mod json_recovery;
pub mod prompt;
pub mod response;

pub use json_recovery::parse_model_json;
pub use prompt::{OutputFormat, PromptBundle, PromptPart};
pub use response::{extract_text, translate_response};
