//! Compact descriptions of runtime methods.
//!
//! ```text
//! NSString stringByReplacingOccurrencesOfString:target(NSString *) withString:replacement(NSString *)
//! NSString stringWithFormat:format(NSString *) ...
//! NSObject hash
//! ```
//!
//! The first word names the owning runtime class and the second starts the
//! selector. Each parameter is `keyword:name(Type)`, where the first keyword is
//! the selector name itself; a trailing `...` marks the method variadic. Types
//! may contain spaces, so words are only split outside parentheses.

use std::fmt;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
  #[error("descriptor is empty")]
  Empty,
  #[error("descriptor has no selector after the owner class")]
  MissingSelector,
  #[error("unbalanced parenthesis at byte {position}")]
  UnbalancedParens { position: usize },
  #[error("malformed parameter `{spec}`, expected `name(Type)`")]
  MalformedParameter { spec: String },
  #[error("`...` must be the last parameter")]
  MisplacedVarargs,
  #[error("{parameters} parameter(s) but {delimiters} `:` delimiter(s)")]
  CountMismatch { parameters: usize, delimiters: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
  /// Selector part introducing this parameter.
  pub keyword: String,
  pub name: String,
  pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
  pub owner: String,
  pub name: String,
  pub parameters: Vec<ParameterDescriptor>,
  pub varargs: bool,
}

impl MethodDescriptor {
  pub fn parse(text: &str) -> Result<MethodDescriptor, DescriptorError> {
    let words = split_words(text)?;
    let mut words = words.into_iter();
    let owner = words.next().ok_or(DescriptorError::Empty)?;
    let selector = words.next().ok_or(DescriptorError::MissingSelector)?;
    let rest: Vec<&str> = words.collect();

    let mut varargs = false;
    let mut specs = Vec::new();
    for (i, word) in rest.iter().enumerate() {
      if *word == "..." {
        if i + 1 != rest.len() {
          return Err(DescriptorError::MisplacedVarargs);
        }
        varargs = true;
      } else {
        specs.push(*word);
      }
    }

    let delimiters = count_delimiters(selector) + specs.iter().map(|s| count_delimiters(s)).sum::<usize>();
    let (name, first) = match selector.split_once(':') {
      Some((name, first)) => (name, Some(first)),
      None => (selector, None),
    };
    if name.is_empty() || name.contains('(') {
      return Err(DescriptorError::MissingSelector);
    }
    let parameters = first.iter().count() + specs.len();
    if parameters != delimiters {
      return Err(DescriptorError::CountMismatch {
        parameters,
        delimiters,
      });
    }

    let mut params = Vec::with_capacity(parameters);
    if let Some(first) = first {
      params.push(parse_parameter(name, first)?);
    }
    for spec in specs {
      let (keyword, param) = spec
        .split_once(':')
        .ok_or_else(|| DescriptorError::MalformedParameter { spec: spec.to_string() })?;
      params.push(parse_parameter(keyword, param)?);
    }

    Ok(MethodDescriptor {
      owner: owner.to_string(),
      name: name.to_string(),
      parameters: params,
      varargs,
    })
  }

  pub fn parameters(&self) -> &[ParameterDescriptor] {
    &self.parameters
  }

  pub fn is_varargs(&self) -> bool {
    self.varargs
  }

  /// Full selector, e.g. `isEqual:` or `hash`.
  pub fn selector(&self) -> String {
    if self.parameters.is_empty() {
      return self.name.clone();
    }
    self.parameters.iter().map(|p| format!("{}:", p.keyword)).collect()
  }
}

impl Display for MethodDescriptor {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} ", self.owner)?;
    if self.parameters.is_empty() {
      write!(f, "{}", self.name)?;
    }
    for (i, p) in self.parameters.iter().enumerate() {
      if i > 0 {
        write!(f, " ")?;
      }
      write!(f, "{}:{}({})", p.keyword, p.name, p.ty)?;
    }
    if self.varargs {
      write!(f, " ...")?;
    }
    Ok(())
  }
}

fn split_words(text: &str) -> Result<Vec<&str>, DescriptorError> {
  let mut words = Vec::new();
  let mut depth = 0usize;
  let mut start = None;
  let mut open_at = 0;
  for (i, c) in text.char_indices() {
    match c {
      '(' => {
        if depth == 0 {
          open_at = i;
        }
        depth += 1;
        start.get_or_insert(i);
      }
      ')' => {
        depth = depth
          .checked_sub(1)
          .ok_or(DescriptorError::UnbalancedParens { position: i })?;
      }
      c if c.is_whitespace() && depth == 0 => {
        if let Some(s) = start.take() {
          words.push(&text[s..i]);
        }
      }
      _ => {
        start.get_or_insert(i);
      }
    }
  }
  if depth > 0 {
    return Err(DescriptorError::UnbalancedParens { position: open_at });
  }
  if let Some(s) = start {
    words.push(&text[s..]);
  }
  if words.is_empty() {
    return Err(DescriptorError::Empty);
  }
  Ok(words)
}

// Colons inside a parameter's type do not delimit anything.
fn count_delimiters(word: &str) -> usize {
  let mut depth = 0usize;
  let mut count = 0;
  for c in word.chars() {
    match c {
      '(' => depth += 1,
      ')' => depth = depth.saturating_sub(1),
      ':' if depth == 0 => count += 1,
      _ => {}
    }
  }
  count
}

fn parse_parameter(keyword: &str, spec: &str) -> Result<ParameterDescriptor, DescriptorError> {
  let malformed = || DescriptorError::MalformedParameter {
    spec: format!("{keyword}:{spec}"),
  };
  let (name, ty) = spec.split_once('(').ok_or_else(malformed)?;
  let ty = ty.strip_suffix(')').ok_or_else(malformed)?.trim();
  if name.is_empty() || ty.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
    return Err(malformed());
  }
  Ok(ParameterDescriptor {
    keyword: keyword.to_string(),
    name: name.to_string(),
    ty: ty.to_string(),
  })
}
