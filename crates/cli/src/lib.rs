pub mod cli;
pub mod config;
pub mod discovery;
pub mod editor;
pub mod error;
pub mod escape;
pub mod matcher;
pub mod pending;
pub mod rules;
pub mod trie;
pub mod verbose;

pub use cli::Cli;
pub use config::Config;
pub use editor::{Editor, Target};
pub use error::{Error, ExitCode, Result};
pub use escape::{EscapeError, decode_literal};
pub use matcher::{
    BufferKind, Matcher, TranslateStats, translate, translate_bytes, translate_bytes_with,
};
pub use pending::{PendingBuffer, QueueBuffer, RingBuffer};
pub use rules::{MalformedPolicy, Rule, RuleLine};
pub use trie::{Registration, StateId, Trie};
