// tollgate-core/src/infrastructure/config/variables.rs
//
// `${VAR}` / `$VAR` substitution inside string values of a checkpoint document.

use regex::{Captures, Regex};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument, warn};

use crate::infrastructure::error::InfrastructureError;

const VARIABLE_PATTERN: &str =
    r"(\\)?\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))";

#[derive(Debug, Clone)]
pub struct ConfigVariables {
    values: BTreeMap<String, Value>,
    use_environment: bool,
    pattern: Regex,
}

impl ConfigVariables {
    pub fn new<V: Into<Value>>(values: BTreeMap<String, V>) -> Result<Self, InfrastructureError> {
        let pattern = Regex::new(VARIABLE_PATTERN).map_err(|e| {
            InfrastructureError::ConfigError(format!("Invalid variable pattern: {}", e))
        })?;
        Ok(Self {
            values: values.into_iter().map(|(k, v)| (k, v.into())).collect(),
            use_environment: false,
            pattern,
        })
    }

    pub fn empty() -> Result<Self, InfrastructureError> {
        Self::new(BTreeMap::<String, Value>::new())
    }

    /// Reads a YAML mapping of variables, keeping each value's type.
    /// A missing file yields no variables.
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self, InfrastructureError> {
        if !path.exists() {
            debug!("No config variables file");
            return Self::empty();
        }

        let content = fs::read_to_string(path)?;
        let values: Option<BTreeMap<String, Value>> = serde_yaml::from_str(&content)?;
        let values = values.unwrap_or_default();
        debug!(count = values.len(), "Config variables read");

        Self::new(values)
    }

    /// Lets process environment variables take precedence over file values.
    /// Environment values are always strings.
    pub fn with_environment(mut self) -> Self {
        self.use_environment = true;
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if self.use_environment
            && let Ok(value) = std::env::var(name)
        {
            return Some(Value::String(value));
        }
        self.values.get(name).cloned()
    }

    // Text form of a variable, for references embedded in a longer string
    fn lookup_text(&self, name: &str) -> Option<String> {
        match self.lookup(name)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => {
                warn!(variable = %name, value = ?other, "Variable cannot be spliced into text");
                None
            }
        }
    }

    /// Replaces every resolvable reference. Unknown references stay as written;
    /// `\${VAR}` drops the backslash and is not substituted.
    pub fn substitute_str(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, |caps: &Captures| {
                let whole = &caps[0];
                if caps.get(1).is_some() {
                    return whole[1..].to_string();
                }
                let name = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                self.lookup_text(name).unwrap_or_else(|| whole.to_string())
            })
            .into_owned()
    }

    /// Value of a string node. A node that is exactly one reference takes the
    /// variable's own value (`index: ${IDX}` stays an integer); otherwise the
    /// references are spliced in as text.
    pub fn resolve(&self, input: &str) -> Value {
        if let Some(caps) = self.pattern.captures(input)
            && caps.get(1).is_none()
            && caps[0].len() == input.len()
            && let Some(name) = caps.get(2).or_else(|| caps.get(3))
            && let Some(value) = self.lookup(name.as_str())
        {
            return value;
        }
        Value::String(self.substitute_str(input))
    }

    /// Walks a parsed document and substitutes inside string values only.
    /// Keys and non-string values are left alone.
    pub fn substitute(&self, value: &mut Value) {
        let resolved = match value {
            Value::String(s) if s.contains('$') => Some(self.resolve(s)),
            _ => None,
        };
        if let Some(resolved) = resolved {
            *value = resolved;
            return;
        }

        match value {
            Value::Sequence(items) => {
                for item in items {
                    self.substitute(item);
                }
            }
            Value::Mapping(map) => {
                for (_, item) in map.iter_mut() {
                    self.substitute(item);
                }
            }
            Value::Tagged(tagged) => self.substitute(&mut tagged.value),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }
}
