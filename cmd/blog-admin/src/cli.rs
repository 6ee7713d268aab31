use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "blog-admin", version, about = "Administer blog articles over the GraphQL API")]
pub struct Cli {
    /// Directory holding `default.toml` and `local.toml`.
    #[arg(long, global = true, default_value = configs::DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Overrides `log.level` (RUST_LOG still wins).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the identity locally.
    Login {
        #[arg(long, short)]
        user: String,
        #[arg(long, env = "BLOG_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the local identity.
    Logout,
    /// Print the signed-in identity.
    Whoami,
    /// List one page of articles.
    List(ListArgs),
    /// Print one article.
    Show { id: String },
    /// Flip the published flag of an article.
    Publish { id: String },
    /// Flip the soft-delete flag of an article.
    Delete { id: String },
    /// Create an article.
    Add(AddArgs),
    /// Edit an existing article.
    Update(UpdateArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Pages are numbered from 1.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
    #[arg(long)]
    pub title: Option<String>,
    /// `;`-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
    /// `true`, `false` or `all`.
    #[arg(long)]
    pub published: Option<String>,
    /// `true`, `false` or `all`.
    #[arg(long)]
    pub deleted: Option<String>,
    /// Two dates, `YYYY-MM-DD`.
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub post_at: Option<Vec<String>>,
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    pub update_at: Option<Vec<String>>,
    /// Stop sorting by post time.
    #[arg(long)]
    pub no_sort_post_at: bool,
    /// Also sort by update time.
    #[arg(long)]
    pub sort_update_at: bool,
    /// Oldest first.
    #[arg(long)]
    pub ascend: bool,
}

#[derive(Debug, Args)]
pub struct ContentArgs {
    /// `;`-separated tags, merged into the existing ones.
    #[arg(long)]
    pub tags: Option<String>,
    /// Read markdown from a file instead of `--markdown`.
    #[arg(long, conflicts_with = "markdown")]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub markdown: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[command(flatten)]
    pub content: ContentArgs,
    #[arg(long)]
    pub publish: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[command(flatten)]
    pub content: ContentArgs,
    #[arg(long)]
    pub published: Option<bool>,
    #[arg(long)]
    pub deleted: Option<bool>,
}

impl Command {
    /// Route guarded before the command runs.
    pub fn route(&self) -> &'static str {
        match self {
            Command::Login { .. } => services::guard::LOGIN_ROUTE,
            Command::Logout | Command::Whoami => services::guard::HOME_ROUTE,
            _ => "/list/article",
        }
    }
}
