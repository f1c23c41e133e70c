use super::{Rewritten, Rule};

/// Hardcoded console hostname pinned to the standard partition
const CONSOLE_HOST: &str = "console.aws.amazon.com";

/// Partition-aware console hostname resolved by `!Sub` at deploy time
const CONSOLE_SUFFIX: &str = "console.${AWS::URLSuffix}";

/// Token marking a line (or document) as already partition-aware
const URL_SUFFIX_TOKEN: &str = "AWS::URLSuffix";

/// Region-prefixed domain form used to build console hostnames in `!Sub` mappings
const REGION_HOST: &str = "${AWS::Region}.console.aws.amazon.com";
const REGION_SUFFIX: &str = "${AWS::Region}.console.${AWS::URLSuffix}";

/// Scheme-prefixed forms for URLs outside any `!Sub`. The macro invocation is
/// introduced ahead of the URL, preserving the opening quote character.
const WRAP_RULES: &[Rule] = &[
  Rule {
    find: "\"https://console.aws.amazon.com",
    replace: "!Sub \"https://console.${AWS::URLSuffix}",
  },
  Rule {
    find: "'https://console.aws.amazon.com",
    replace: "!Sub 'https://console.${AWS::URLSuffix}",
  },
  Rule {
    find: "https://console.aws.amazon.com",
    replace: "!Sub https://console.${AWS::URLSuffix}",
  },
];

/// Rewrite hardcoded console URLs to use `AWS::URLSuffix`
///
/// Cases are tried in order per line: the region-prefixed domain form, a
/// hostname inside an existing `!Sub` URL, a URL with no `!Sub` (which gains
/// one), and finally a bare hostname replaced in place. Unlike the ARN pass,
/// a matching line counts as a single replacement no matter how many times
/// the hostname occurs on it.
pub fn regionalize_console_urls(content: &str) -> Rewritten {
  // Nothing left to migrate
  if content.contains(URL_SUFFIX_TOKEN) && !content.contains(CONSOLE_HOST) {
    return Rewritten {
      content: content.to_owned(),
      replacements: 0,
    };
  }

  let mut lines = Vec::new();
  let mut replacements = 0;

  for line in content.split('\n') {
    if line.contains(URL_SUFFIX_TOKEN) || !line.contains(CONSOLE_HOST) {
      lines.push(line.to_owned());
      continue;
    }

    let rewritten = if line.contains(REGION_HOST) {
      line.replace(REGION_HOST, REGION_SUFFIX)
    } else if line.contains("!Sub") && line.contains("https://") {
      line.replace(CONSOLE_HOST, CONSOLE_SUFFIX)
    } else if let Some(rule) = WRAP_RULES.iter().find(|rule| line.contains(rule.find)) {
      line.replace(rule.find, rule.replace)
    } else {
      // Hostname with no scheme and no macro, or a scheme the hostname does
      // not directly follow
      line.replace(CONSOLE_HOST, CONSOLE_SUFFIX)
    };

    replacements += 1;
    lines.push(rewritten);
  }

  Rewritten {
    content: lines.join("\n"),
    replacements,
  }
}
