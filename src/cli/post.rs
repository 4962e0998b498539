use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res,
    error::Error,
    reddit::{Reddit, RedditError, Subreddit, select_query_function},
    retry::{self, Failure},
    template::{self, DEFAULT_HEADER, DEFAULT_OUTPUT_FORMAT},
    types::{get_post_sorting_option, get_time_filter_option},
    utils,
};

use super::RedditCli;

/// Arguments of the `post` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostOptions {
    /// Subreddit to read, without the `r/` prefix.
    pub subreddit: String,
    /// One of controversial, gilded, hot, new, random_rising, rising, top.
    pub post_sorting: String,
    /// One of hour, day, week, month, year, all.
    pub time_filter: String,
    /// Number of posts, 1 to 25.
    pub limit: i64,
    /// Whether to put the rendered header first.
    pub header: bool,
    /// Header template using `{sorting}`, `{time}` and `{subreddit}`.
    pub custom_header: String,
    /// Line template; any post attribute can be used, e.g. `{title}`, `{author}`.
    pub output_format: String,
}

impl PostOptions {
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            post_sorting: "top".to_string(),
            time_filter: "all".to_string(),
            limit: 10,
            header: true,
            custom_header: DEFAULT_HEADER.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

impl<R: Reddit> RedditCli<R> {
    /// Fetches posts of a subreddit and renders them.
    ///
    /// Returns the header line (unless disabled or empty) followed by one
    /// line per post in the order Reddit listed them.
    ///
    /// # Errors
    ///
    /// - invalid limit, sorting option, time filter or template
    /// - [`Error::FeedNotFound`] when the subreddit does not exist or is
    ///   private; this is never retried
    /// - [`Error::RateLimitExceeded`] after every attempt was rate limited
    /// - [`Error::Api`] / [`Error::Communication`] for other upstream failures
    /// - [`Error::MissingField`] when the output format names an unknown field
    pub async fn post(&self, options: PostOptions) -> Res<Vec<String>> {
        let limit = utils::validate_limit(options.limit)?;
        let sorting = get_post_sorting_option(&options.post_sorting)?;
        let time_filter = get_time_filter_option(&options.time_filter)?;
        let name = utils::subreddit_name(&options.subreddit);

        let subreddit = match self.reddit.subreddit(name) {
            Ok(subreddit) => subreddit,
            Err(err) if err.is_subreddit_missing() => {
                return Err(Error::FeedNotFound(name.to_string()));
            }
            Err(err) => return Err(retry::classify(err)),
        };

        let query = select_query_function(&subreddit, time_filter, sorting);
        let query = &query;

        let spinner = spinner(format!("Fetching {sorting} posts from r/{name}..."));
        let posts = retry::retry_with_backoff(
            move || async move { query.fetch(limit).await.map_err(|e| feed_failure(e, name)) },
            self.retry_policy,
        )
        .await;
        spinner.finish_and_clear();
        let posts = posts?;

        let header = if options.header {
            Some(template::create_header(
                &options.custom_header,
                sorting,
                time_filter,
                subreddit.display_name(),
            )?)
        } else {
            None
        };

        let lines = template::create_post_output(&options.output_format, &posts)?;
        Ok(utils::get_response(header, lines))
    }
}

/// A missing or private subreddit is final; everything else goes through
/// the retry classification.
fn feed_failure(err: RedditError, subreddit: &str) -> Failure {
    if err.is_subreddit_missing() {
        Failure::Fatal(Error::FeedNotFound(subreddit.to_string()))
    } else {
        Failure::Upstream(err)
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
