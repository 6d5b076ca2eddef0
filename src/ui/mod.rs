//! Chat UI components: transcript panel, input composer, slash commands.

pub mod commands;
pub mod composer;
pub mod transcript;

pub use commands::{help_text, SlashCommand};
pub use composer::{ChatComposer, ComposerResult};
pub use transcript::TranscriptView;
