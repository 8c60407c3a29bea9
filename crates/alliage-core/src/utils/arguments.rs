use std::collections::HashMap;

/// Argument bag handed unchanged to every lifecycle handler.
///
/// The kernel never looks inside. It holds the values parsed so far, the
/// arguments left for modules to parse, and the command that produced them.
/// Children created with [`create_child`](Self::create_child) keep a link to
/// their parent and extend its command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<String, String>,
    remaining: Vec<String>,
    command: String,
    parent: Option<Box<Arguments>>,
}

impl Arguments {
    /// Create a root argument bag for `command`
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Self::default()
        }
    }

    /// Set a parsed value
    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the arguments not parsed yet
    pub fn with_remaining<I, S>(mut self, remaining: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remaining = remaining.into_iter().map(Into::into).collect();
        self
    }

    /// Get a parsed value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn remaining_args(&self) -> &[String] {
        &self.remaining
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn parent(&self) -> Option<&Arguments> {
        self.parent.as_deref()
    }

    /// Derive a child bag after parsing part of the remaining arguments.
    ///
    /// The child command is the parent command followed by `sub_command`,
    /// or just the parent command when `sub_command` is empty.
    pub fn create_child(&self, values: HashMap<String, String>, remaining: Vec<String>, sub_command: &str) -> Arguments {
        let command = match (self.command.is_empty(), sub_command.is_empty()) {
            (true, _) => sub_command.to_string(),
            (false, true) => self.command.clone(),
            (false, false) => format!("{} {}", self.command, sub_command),
        };
        Arguments {
            values,
            remaining,
            command,
            parent: Some(Box::new(self.clone())),
        }
    }
}
