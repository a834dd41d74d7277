use std::path::PathBuf;

use clap::Parser;

/// Print cached AWS SSO credentials as shell export statements.
///
/// Intended for `eval "$(sso-export)"`. Diagnostics go to stderr only.
#[derive(Parser, Debug)]
#[command(name = "sso-export", version, about, long_about = None)]
pub struct Args {
    /// Credential cache directory [default: ~/.aws/cli/cache]
    #[arg(long, env = "SSO_EXPORT_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
