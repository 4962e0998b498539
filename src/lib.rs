//! Reddit post fetcher library
//!
//! This library fetches posts from a subreddit and renders them through
//! user-supplied templates, e.g. to build a Markdown digest of the week's top
//! posts for a notes app.
//!
//! # Modules
//!
//! - `cli` - The `post` and `config_location` operations
//! - `config` - `.env` loading, environment variables and credential resolution
//! - `error` - The crate error type
//! - `management` - Token lifetime handling
//! - `reddit` - Reddit capability traits, query dispatch and the HTTP client
//! - `retry` - Exponential backoff for rate-limited calls
//! - `template` - Header and post templates
//! - `types` - Sorting/time options and data structures
//! - `utils` - Small helpers (limit validation, response assembly, paths)
//!
//! # Example
//!
//! ```
//! use reddit_get::{cli::{PostOptions, RedditCli}, config};
//!
//! #[tokio::main]
//! async fn main() -> reddit_get::Res<()> {
//!     config::load_env().await?;
//!     let cli = RedditCli::connect("~/.redditgetrc").await?;
//!     for line in cli.post(PostOptions::new("rust")).await? {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod reddit;
pub mod retry;
pub mod template;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// # Example
///
/// ```
/// use reddit_get::Res;
///
/// fn parse_limit(raw: &str) -> Res<u32> {
///     reddit_get::utils::validate_limit(raw.parse().unwrap_or(0))
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Exit status used for every user-facing error.
pub const EXIT_FAILURE: i32 = 255;

/// Prints a success message with a green checkmark.
///
/// Status output goes to stderr so that stdout only carries the rendered
/// post lines.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// The process exits with [`EXIT_FAILURE`] (255) right after printing, so
/// this is only used at the command line boundary.
///
/// # Example
///
/// ```
/// error!("{}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit($crate::EXIT_FAILURE);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable conditions such as a rate-limit backoff.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
