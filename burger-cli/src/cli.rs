use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "burger",
    author,
    version,
    about = "Command-line client for the Stellar Burgers ordering service"
)]
pub struct Args {
    /// Base URL of the API
    #[arg(long, global = true, env = "BURGER_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long, global = true, env = "BURGER_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the ingredient catalogue
    Ingredients,

    /// Show the public order feed
    Feed,

    /// Look up an order by its number
    Order { number: u64 },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "BURGER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BURGER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in profile
    User,

    /// Change profile fields
    UpdateUser {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// List orders of the signed-in user
    Orders,

    /// Place an order for the given ingredient ids
    CreateOrder {
        #[arg(required = true)]
        ingredients: Vec<String>,
    },

    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Set a new password using the emailed code
    ResetPassword {
        #[arg(long, env = "BURGER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        token: String,
    },

    /// Show which credentials are held
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    Json,
    /// Single-line JSON
    JsonCompact,
}
