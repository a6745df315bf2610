pub mod export;
pub mod prompts;
pub mod render;

pub use export::{output_json, write_output_csv};
pub use prompts::{
    prompt_grams, prompt_ingredients, prompt_meal, prompt_target, prompt_yes_no,
    resolve_ingredient,
};
pub use render::{display_catalog, display_failure, display_output};
