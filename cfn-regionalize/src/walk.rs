use std::{fs, path::Path};

use anyhow::{ensure, Result};
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::regionalize::{is_cloudformation_template, Rewritten};

/// File extensions eligible for scanning
const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Options controlling how a directory pass behaves
#[derive(Clone, Copy, Debug, Default)]
pub struct WalkOptions {
  /// Report what would change without writing anything back
  pub dry_run: bool,

  /// Parse the rewritten document as YAML and refuse to persist it if parsing fails
  pub verify: bool,
}

/// Aggregated results of one rewrite pass over a directory tree
#[derive(Debug, Default, Serialize)]
pub struct Summary {
  /// Number of CloudFormation templates found under the root
  pub templates_found: usize,

  /// Number of files modified (or that would be modified, in dry-run mode)
  pub files_modified: usize,

  /// Total replacements across all modified files
  pub replacements: usize,
}

/// Apply a rewrite pass to every CloudFormation template under `root`
///
/// Files are processed independently; a file that cannot be read or written is
/// logged and skipped, never aborting the remainder of the batch. Only files
/// whose rewrite produced at least one replacement are written back.
pub fn process_directory<F>(root: &Path, rewrite: F, options: WalkOptions) -> Result<Summary>
where
  F: Fn(&str) -> Rewritten,
{
  ensure!(root.is_dir(), "{} is not a directory", root.display());

  let mut summary = Summary::default();

  for entry in WalkDir::new(root).into_iter().filter_map(|entry| match entry {
    Ok(entry) => Some(entry),
    Err(err) => {
      warn!("Skipping unreadable entry: {err}");
      None
    }
  }) {
    let path = entry.path();
    if !entry.file_type().is_file() || !has_yaml_extension(path) {
      continue;
    }

    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(err) => {
        warn!("Error reading {}: {err}", path.display());
        continue;
      }
    };

    if !is_cloudformation_template(&content) {
      continue;
    }
    summary.templates_found += 1;

    let rewritten = rewrite(&content);
    if rewritten.replacements == 0 {
      debug!("Skipping {} - already partition-aware", path.display());
      continue;
    }

    if options.verify {
      if let Err(err) = serde_yaml::from_str::<serde_yaml::Value>(&rewritten.content) {
        warn!("Skipping {} - rewritten output is not valid YAML: {err}", path.display());
        continue;
      }
    }

    if !options.dry_run {
      if let Err(err) = fs::write(path, &rewritten.content) {
        warn!("Error writing {}: {err}", path.display());
        continue;
      }
    }

    info!("Modified {} - {} replacements", path.display(), rewritten.replacements);
    summary.files_modified += 1;
    summary.replacements += rewritten.replacements;
  }

  Ok(summary)
}

fn has_yaml_extension(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map_or(false, |ext| YAML_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::regionalize::{regionalize_arns, regionalize_console_urls};

  #[test]
  fn it_summarizes_a_batch() {
    let dir = tempfile::tempdir().unwrap();

    fs::write(
      dir.path().join("one.yaml"),
      "Resources:\n  - \"arn:aws:iam::aws:policy/X\"\n",
    )
    .unwrap();
    fs::write(
      dir.path().join("two.yml"),
      "Resources:\n  - 'arn:aws:s3:::a/*'\n  - arn:aws:s3:::b\n",
    )
    .unwrap();
    fs::write(
      dir.path().join("three.yaml"),
      "Resources:\n  - !Sub \"arn:${AWS::Partition}:iam::aws:policy/X\"\n",
    )
    .unwrap();

    let summary = process_directory(dir.path(), regionalize_arns, WalkOptions::default()).unwrap();
    assert_eq!(summary.templates_found, 3);
    assert_eq!(summary.files_modified, 2);
    assert_eq!(summary.replacements, 3);

    let rewritten = fs::read_to_string(dir.path().join("one.yaml")).unwrap();
    assert_eq!(rewritten, "Resources:\n  - !Sub \"arn:${AWS::Partition}:iam::aws:policy/X\"\n");
  }

  #[test]
  fn it_recurses_into_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("recipes").join("net");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
      nested.join("template.yaml"),
      "Outputs:\n  Url:\n    Value: \"https://console.aws.amazon.com/ec2/home\"\n",
    )
    .unwrap();

    let summary = process_directory(dir.path(), regionalize_console_urls, WalkOptions::default()).unwrap();
    assert_eq!(summary.templates_found, 1);
    assert_eq!(summary.files_modified, 1);
    assert_eq!(summary.replacements, 1);

    let rewritten = fs::read_to_string(nested.join("template.yaml")).unwrap();
    assert_eq!(
      rewritten,
      "Outputs:\n  Url:\n    Value: !Sub \"https://console.${AWS::URLSuffix}/ec2/home\"\n"
    );
  }

  #[test]
  fn it_ignores_non_template_files() {
    let dir = tempfile::tempdir().unwrap();

    // Not a template - no structural markers
    fs::write(dir.path().join("values.yaml"), "name: demo\narn: arn:aws:s3:::b\n").unwrap();
    // Not a YAML extension
    fs::write(dir.path().join("notes.txt"), "Resources:\n  - arn:aws:s3:::b\n").unwrap();

    let summary = process_directory(dir.path(), regionalize_arns, WalkOptions::default()).unwrap();
    assert_eq!(summary.templates_found, 0);
    assert_eq!(summary.files_modified, 0);

    // Neither file was touched
    let values = fs::read_to_string(dir.path().join("values.yaml")).unwrap();
    assert!(values.contains("arn:aws:s3:::b"));
  }

  #[test]
  fn it_does_not_write_in_dry_run_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("template.yaml");
    let content = "Resources:\n  - arn:aws:s3:::bucket\n";
    fs::write(&path, content).unwrap();

    let options = WalkOptions {
      dry_run: true,
      ..Default::default()
    };
    let summary = process_directory(dir.path(), regionalize_arns, options).unwrap();
    assert_eq!(summary.files_modified, 1);
    assert_eq!(summary.replacements, 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
  }

  #[test]
  fn it_refuses_to_persist_invalid_yaml_when_verifying() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("template.yaml");
    // Unterminated quote survives the rewrite and fails YAML validation
    let content = "Resources:\n  Url: \"https://console.aws.amazon.com/ec2\n";
    fs::write(&path, content).unwrap();

    let options = WalkOptions {
      verify: true,
      ..Default::default()
    };
    let summary = process_directory(dir.path(), regionalize_console_urls, options).unwrap();
    assert_eq!(summary.templates_found, 1);
    assert_eq!(summary.files_modified, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
  }

  #[test]
  fn it_errors_on_a_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = process_directory(&missing, regionalize_arns, WalkOptions::default());
    assert!(result.is_err());
  }
}
