mod builder;
mod template;

pub use builder::{ConciergePrompt, ConciergePromptBuilder};
pub use template::TemplateVariables;
