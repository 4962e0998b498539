use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use reddit_get::{
    cli::{PostOptions, RedditCli},
    config, error,
    template::{DEFAULT_HEADER, DEFAULT_OUTPUT_FORMAT},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

/// Get content from reddit.
///
/// Credentials come from REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET and
/// REDDIT_USER_AGENT when set, otherwise from the [reddit-get] table of the
/// config file.
#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = env!("CARGO_PKG_NAME"),
  bin_name = env!("CARGO_PKG_NAME"),
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    /// Path of the reddit credentials config file
    #[clap(long, global = true, env = "REDDIT_GET_CONFIG", default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Get reddit post titles optionally formatted as markdown
    Post(PostArgs),

    /// Print the path of the config file in use
    ConfigLocation,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PostArgs {
    /// Which subreddit to get posts from
    subreddit: String,

    /// How to sort the posts: controversial, gilded, hot, new, random_rising, rising or top
    #[clap(long, default_value = "top")]
    post_sorting: String,

    /// Date range for controversial or top: hour, day, week, month, year or all
    #[clap(long, default_value = "all")]
    time_filter: String,

    /// Number of posts to get, 1 to 25
    #[clap(long, default_value_t = 10, allow_negative_numbers = true)]
    limit: i64,

    /// Leave out the header line
    #[clap(long = "noheader", alias = "no-header", action = ArgAction::SetFalse)]
    header: bool,

    /// Header template; may use {sorting}, {time} and {subreddit}
    #[clap(long, default_value = DEFAULT_HEADER)]
    custom_header: String,

    /// Template for each post; any post attribute in braces, e.g. "{title} - {author}"
    #[clap(long, default_value = DEFAULT_OUTPUT_FORMAT)]
    output_format: String,
}

impl From<PostArgs> for PostOptions {
    fn from(args: PostArgs) -> Self {
        PostOptions {
            subreddit: args.subreddit,
            post_sorting: args.post_sorting,
            time_filter: args.time_filter,
            limit: args.limit,
            header: args.header,
            custom_header: args.custom_header,
            output_format: args.output_format,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Post(args) => {
            let reddit = connect(&cli.config).await;
            match reddit.post(args.into()).await {
                Ok(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        Command::ConfigLocation => {
            let reddit = connect(&cli.config).await;
            match reddit.config_location() {
                Ok(path) => println!("{}", path.display()),
                Err(e) => error!("{}", e),
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn connect(config: &str) -> RedditCli {
    match RedditCli::connect(config).await {
        Ok(reddit) => reddit,
        Err(e) => error!("{}", e),
    }
}
