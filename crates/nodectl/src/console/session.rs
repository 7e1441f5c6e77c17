//! Session identity lookup performed before each dispatched line.

use std::env;
use std::fmt;

/// Non-blank identity of the node or session commands run against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps `value`, returning `None` when it is blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Borrowed identity text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies the session identity on demand.
///
/// The dispatcher asks once per line so identity changes take effect on the
/// next command.
pub trait SessionSource: Send {
    /// Current identity, if present.
    fn current(&self) -> Option<SessionId>;

    /// Describes where the identity comes from, for failure messages.
    fn describe(&self) -> String;
}

impl<T> SessionSource for Box<T>
where
    T: SessionSource + ?Sized,
{
    fn current(&self) -> Option<SessionId> {
        (**self).current()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Reads the identity from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvSession {
    var: String,
}

impl EnvSession {
    /// Reads from `var`.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SessionSource for EnvSession {
    fn current(&self) -> Option<SessionId> {
        env::var(&self.var).ok().and_then(SessionId::new)
    }

    fn describe(&self) -> String {
        format!("{} env. var", self.var)
    }
}

/// Identity fixed at construction, typically from configuration.
#[derive(Debug, Clone, Default)]
pub struct FixedSession(Option<SessionId>);

impl FixedSession {
    /// Uses `id` for every line.
    #[must_use]
    pub const fn new(id: Option<SessionId>) -> Self {
        Self(id)
    }
}

impl SessionSource for FixedSession {
    fn current(&self) -> Option<SessionId> {
        self.0.clone()
    }

    fn describe(&self) -> String {
        "configured node_id".to_owned()
    }
}
