use super::{Rewritten, Rule};

/// Hardcoded ARN prefix that pins a template to the standard partition
const HARDCODED_PREFIX: &str = "arn:aws:";

/// Partition-parameterized ARN prefix resolved by `!Sub` at deploy time
const PARTITION_PREFIX: &str = "arn:${AWS::Partition}:";

/// Ordered rewrite rules. Quoted forms take precedence over the bare form,
/// and the double-quote rule is checked before the single-quote rule.
const RULES: &[Rule] = &[
  Rule {
    find: "\"arn:aws:",
    replace: "!Sub \"arn:${AWS::Partition}:",
  },
  Rule {
    find: "'arn:aws:",
    replace: "!Sub 'arn:${AWS::Partition}:",
  },
  Rule {
    find: "arn:aws:",
    replace: "!Sub arn:${AWS::Partition}:",
  },
];

/// Rewrite hardcoded `arn:aws:` prefixes into partition-aware `!Sub` expressions
///
/// Every occurrence on a matching line counts as one replacement. Lines that
/// already use `!Sub` with a partition-parameterized prefix are left untouched,
/// and a document that only contains such ARNs is returned unchanged.
pub fn regionalize_arns(content: &str) -> Rewritten {
  // Nothing left to migrate
  if content.contains(PARTITION_PREFIX) && !content.contains(HARDCODED_PREFIX) {
    return Rewritten {
      content: content.to_owned(),
      replacements: 0,
    };
  }

  let mut lines = Vec::new();
  let mut replacements = 0;

  // Splitting and rejoining on `\n` alone keeps CR bytes and the presence or
  // absence of a trailing newline intact; matching never crosses a line boundary
  for line in content.split('\n') {
    if line.contains("!Sub") && line.contains(PARTITION_PREFIX) {
      lines.push(line.to_owned());
      continue;
    }

    match RULES.iter().find(|rule| line.contains(rule.find)) {
      Some(rule) => {
        replacements += line.matches(rule.find).count();
        lines.push(line.replace(rule.find, rule.replace));
      }
      None => lines.push(line.to_owned()),
    }
  }

  Rewritten {
    content: lines.join("\n"),
    replacements,
  }
}
