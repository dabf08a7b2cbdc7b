pub mod config;
pub mod parse;

use std::sync::Arc;

use rusty_collectors::{CollectorHub, CollectorOptions};
use twilight_http::Client;

pub use config::{Config, ConfigError};

/// Prefix that marks a message as a bot command.
pub const COMMAND_PREFIX: char = '!';

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub collectors: Arc<CollectorHub>,
    /// Collector limits for sessions started by commands.
    pub session: CollectorOptions,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, collectors: Arc<CollectorHub>, session: CollectorOptions) -> Self {
        Self {
            http,
            collectors,
            session,
        }
    }
}
