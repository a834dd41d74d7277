//! Triggering the AWS CLI to repopulate its credential cache.

use std::fmt;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::{Error, Result};

/// Something that can be asked to refresh the credential cache.
pub trait Refresh {
    fn refresh(&self) -> Result<()>;
}

impl<R: Refresh + ?Sized> Refresh for &R {
    fn refresh(&self) -> Result<()> {
        (**self).refresh()
    }
}

/// An external command run purely for its side effect on the cache.
///
/// Only the exit status is inspected. The child's standard streams are
/// detached so nothing it prints can end up in our evaluable stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCommand {
    program: String,
    args: Vec<String>,
}

impl RefreshCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `aws s3 ls`: any authenticated call makes the CLI refresh its SSO role
    /// credentials and write them to the cache.
    pub fn aws_s3_ls() -> Self {
        Self::new("aws", ["s3", "ls"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for RefreshCommand {
    fn default() -> Self {
        Self::aws_s3_ls()
    }
}

impl fmt::Display for RefreshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl Refresh for RefreshCommand {
    fn refresh(&self) -> Result<()> {
        debug!(command = %self, "Running refresh command");

        let mut cmd = Command::new(&self.program);
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW
            cmd.creation_flags(0x0800_0000);
        }

        let status = cmd
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| Error::RefreshLaunch {
                command: self.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::RefreshStatus {
                command: self.to_string(),
                status,
            })
        }
    }
}
