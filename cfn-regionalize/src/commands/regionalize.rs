use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{
  regionalize::{regionalize_arns, regionalize_console_urls, Rewritten},
  walk::{self, WalkOptions},
};

/// The rewrite pass a subcommand applies to each template
#[derive(Clone, Copy, Debug)]
pub enum Target {
  Arns,
  ConsoleUrls,
}

impl Target {
  pub fn rewrite(&self, content: &str) -> Rewritten {
    match self {
      Self::Arns => regionalize_arns(content),
      Self::ConsoleUrls => regionalize_console_urls(content),
    }
  }

  fn label(&self) -> &'static str {
    match self {
      Self::Arns => "ARNs regionalized",
      Self::ConsoleUrls => "console URLs updated",
    }
  }
}

#[derive(Args, Debug)]
pub struct RegionalizeInput {
  /// Directory tree to scan for CloudFormation templates
  #[arg(default_value = ".")]
  pub path: PathBuf,

  /// Report what would change without writing any file back
  #[arg(long)]
  pub dry_run: bool,

  /// Check that rewritten templates still parse as YAML before writing
  #[arg(long)]
  pub verify: bool,

  /// Print the run summary as JSON
  #[arg(long)]
  pub json: bool,
}

impl RegionalizeInput {
  pub fn regionalize(&self, target: Target) -> Result<()> {
    let options = WalkOptions {
      dry_run: self.dry_run,
      verify: self.verify,
    };
    let summary = walk::process_directory(&self.path, |content| target.rewrite(content), options)?;

    if self.json {
      println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
      println!("Found {} CloudFormation template files", summary.templates_found);
      println!("Summary:");
      println!("- {} files modified", summary.files_modified);
      println!("- {} {}", summary.replacements, target.label());
    }

    Ok(())
  }
}
