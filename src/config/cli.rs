use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};

use crate::domain::posts::PostId;
use crate::domain::types::{SortField, SortOrder};

/// Command-line arguments for the `postboard` binary.
#[derive(Debug, Parser)]
#[command(
    name = "postboard",
    version,
    about = "Post collection client for jsonplaceholder-style APIs"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTBOARD_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Fetch every post and print the filtered, sorted view.
    List(ListArgs),
    /// Fetch one page of posts with the reported total.
    Page(PageArgs),
    /// Fetch a single post.
    Get(PostIdArgs),
    /// List the comments attached to a post.
    Comments(PostIdArgs),
    /// Create a post; the server assigns its id.
    Create(CreateArgs),
    /// Replace selected fields of a post.
    Update(UpdateArgs),
    /// Delete a post.
    Delete(PostIdArgs),
    /// Full-text search, memoized in the response cache.
    Search(SearchArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct SettingsOverrides {
    /// Override the API base URL.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the transport timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS", global = true)]
    pub api_timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the response cache time-to-live.
    #[arg(long = "cache-ttl-ms", value_name = "MILLIS", global = true)]
    pub cache_ttl_ms: Option<u64>,

    /// Override the default page size.
    #[arg(long = "items-per-page", value_name = "COUNT", global = true)]
    pub items_per_page: Option<u32>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    /// Case-insensitive substring matched against title and body.
    #[arg(long)]
    pub filter: Option<String>,

    #[arg(long = "sort-by", value_enum)]
    pub sort_by: Option<SortFieldArg>,

    #[arg(long, value_enum)]
    pub order: Option<SortOrderArg>,

    /// Mark a post as favorite before printing (repeatable).
    #[arg(long = "favorite", value_name = "ID")]
    pub favorites: Vec<PostId>,

    /// Only print favorite posts.
    #[arg(long = "favorites-only", action = clap::ArgAction::SetTrue)]
    pub favorites_only: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size; defaults to the configured items per page.
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Args, Clone)]
pub struct PostIdArgs {
    #[arg(value_name = "ID")]
    pub id: PostId,
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub body: String,
    #[arg(long = "user-id")]
    pub user_id: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct UpdateArgs {
    #[arg(value_name = "ID")]
    pub id: PostId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub body: Option<String>,
    #[arg(long = "user-id")]
    pub user_id: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortFieldArg {
    Title,
    Id,
}

impl From<SortFieldArg> for SortField {
    fn from(value: SortFieldArg) -> Self {
        match value {
            SortFieldArg::Title => SortField::Title,
            SortFieldArg::Id => SortField::Id,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(value: SortOrderArg) -> Self {
        match value {
            SortOrderArg::Asc => SortOrder::Asc,
            SortOrderArg::Desc => SortOrder::Desc,
        }
    }
}
