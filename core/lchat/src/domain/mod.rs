//! lchat 固有のドメイン型（型と不変条件）

pub mod command;
pub mod history;
pub mod prompt;
pub mod reasoning;

pub use command::LchatCommand;
pub use history::History;
pub use prompt::{render_prompt, PromptStyle};
pub use reasoning::split_reasoning;
