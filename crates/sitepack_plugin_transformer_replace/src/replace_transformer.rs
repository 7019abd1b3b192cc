use regex::Regex;
use sitepack_core::diagnostic::CodeFrame;
use sitepack_core::diagnostic::DiagnosticBuilder;
use sitepack_core::diagnostic::ErrorKind;
use sitepack_core::diagnostic_error;
use sitepack_core::plugin::TransformResult;
use sitepack_core::plugin::TransformerPlugin;
use sitepack_core::types::Asset;
use sitepack_core::types::ReplacementTable;

/// Substitutes fixed tokens in script modules with literal text
///
/// A token is only replaced where it stands on its own: the characters around it must not continue
/// an identifier, and it must not be followed by a property access. The input is scanned once, so
/// replacement text is never itself rescanned.
#[derive(Debug)]
pub struct ReplaceTransformer {
  pattern: Option<Regex>,
  table: ReplacementTable,
}

impl ReplaceTransformer {
  pub fn new(table: ReplacementTable) -> Result<Self, anyhow::Error> {
    let mut tokens = table
      .values
      .keys()
      .filter(|token| !token.is_empty())
      .collect::<Vec<_>>();

    // Longer tokens win when one is a prefix of another
    tokens.sort_by(|a, b| b.len().cmp(&a.len()));

    let pattern = if tokens.is_empty() {
      None
    } else {
      let alternation = tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

      Some(Regex::new(&alternation)?)
    };

    Ok(Self { pattern, table })
  }

  fn replace(&self, asset: &Asset, pattern: &Regex) -> Result<Option<String>, anyhow::Error> {
    let code = asset.code.as_str();
    let mut output = String::with_capacity(code.len());
    let mut last = 0;
    let mut replaced = 0;

    for found in pattern.find_iter(code) {
      let before = code[..found.start()].chars().next_back();
      let after = &code[found.end()..];
      let standalone = !before.is_some_and(is_identifier_char)
        && !after
          .chars()
          .next()
          .is_some_and(|c| is_identifier_char(c) || c == '.');

      if !standalone {
        continue;
      }

      if self.table.prevent_assignment && is_assignment(after) {
        return Err(diagnostic_error!(DiagnosticBuilder::default()
          .kind(ErrorKind::ConfigConflict)
          .message(format!(
            "Cannot replace {} in {} because it is assigned to",
            found.as_str(),
            asset.file_path.display()
          ))
          .origin("sitepack_plugin_transformer_replace")
          .code_frames(vec![CodeFrame::at_offset(
            asset.file_path.clone(),
            code,
            found.start()
          )])
          .hints(vec![String::from(
            "Remove the assignment or disable preventAssignment for this replacement"
          )])));
      }

      let Some(replacement) = self.table.values.get(found.as_str()) else {
        continue;
      };

      output.push_str(&code[last..found.start()]);
      output.push_str(replacement);
      last = found.end();
      replaced += 1;
    }

    if replaced == 0 {
      return Ok(None);
    }

    output.push_str(&code[last..]);

    tracing::trace!(
      path = %asset.file_path.display(),
      replaced,
      "Replaced environment references"
    );

    Ok(Some(output))
  }
}

impl TransformerPlugin for ReplaceTransformer {
  fn transform(&self, input: Asset) -> Result<TransformResult, anyhow::Error> {
    let Some(pattern) = self.pattern.as_ref() else {
      return Ok(TransformResult { asset: input });
    };

    if !input.file_type.is_script() {
      return Ok(TransformResult { asset: input });
    }

    let asset = match self.replace(&input, pattern)? {
      Some(code) => Asset { code, ..input },
      None => input,
    };

    Ok(TransformResult { asset })
  }
}

fn is_identifier_char(c: char) -> bool {
  c == '_' || c == '$' || c.is_alphanumeric() || !c.is_ascii()
}

/// True when `rest` starts with `=` that is not part of a comparison or arrow
fn is_assignment(rest: &str) -> bool {
  let mut chars = rest.trim_start().chars();
  chars.next() == Some('=') && !matches!(chars.next(), Some('=') | Some('>'))
}
