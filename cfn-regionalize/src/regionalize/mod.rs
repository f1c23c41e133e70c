pub mod arn;
pub mod console_url;

pub use arn::regionalize_arns;
pub use console_url::regionalize_console_urls;

/// A single rewrite rule: every occurrence of `find` on a line is replaced
/// with `replace`. Rules live in ordered tables; the first rule whose `find`
/// matches a line wins.
pub(crate) struct Rule {
  pub find: &'static str,
  pub replace: &'static str,
}

/// The result of passing a document through a rewrite pass
///
/// When `replacements` is 0, `content` is byte-identical to the input and
/// nothing should be written back.
#[derive(Debug)]
pub struct Rewritten {
  pub content: String,
  pub replacements: usize,
}

/// Returns true if the text carries any of the structural markers of a
/// CloudFormation template
///
/// False negatives cause a file to be skipped without error.
pub fn is_cloudformation_template(content: &str) -> bool {
  content.contains("AWSTemplateFormatVersion") || content.contains("Resources:") || content.contains("Outputs:")
}
