use clap::Parser;

use crate::planner::DEFAULT_PLAN_DAYS;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON recipe catalog; the built-in recipes are used when the
    /// file is missing or malformed
    #[arg(short, long, default_value = "recipes.json")]
    pub recipe_file: String,

    /// Number of days to plan
    #[arg(short, long, default_value_t = DEFAULT_PLAN_DAYS)]
    pub days: u32,

    /// Fixed seed for meal selection (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
