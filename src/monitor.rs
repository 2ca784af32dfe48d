//! Brand monitoring across AI platforms.

pub mod prompts;
pub mod run;

pub use prompts::{default_prompts, system_prompt, MonitorPrompt};
pub use run::MonitoringRun;
