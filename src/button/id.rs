use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies a button for trigger lookup and event reporting.
///
/// Identifiers are application-defined. Buttons created without one get a
/// [`Generated`](ButtonId::Generated) identifier, which is only used to tag
/// events and is never registered for triggering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonId {
    Named(String),
    Numeric(u64),
    Generated(Uuid),
}

impl ButtonId {
    pub fn generate() -> Self {
        ButtonId::Generated(Uuid::new_v4())
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, ButtonId::Generated(_))
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonId::Named(name) => write!(f, "{name}"),
            ButtonId::Numeric(number) => write!(f, "#{number}"),
            ButtonId::Generated(uuid) => write!(f, "{uuid}"),
        }
    }
}

impl From<&str> for ButtonId {
    fn from(name: &str) -> Self {
        ButtonId::Named(name.to_string())
    }
}

impl From<String> for ButtonId {
    fn from(name: String) -> Self {
        ButtonId::Named(name)
    }
}

impl From<&String> for ButtonId {
    fn from(name: &String) -> Self {
        ButtonId::Named(name.clone())
    }
}

impl From<u64> for ButtonId {
    fn from(number: u64) -> Self {
        ButtonId::Numeric(number)
    }
}

impl From<Uuid> for ButtonId {
    fn from(uuid: Uuid) -> Self {
        ButtonId::Generated(uuid)
    }
}

impl From<&ButtonId> for ButtonId {
    fn from(id: &ButtonId) -> Self {
        id.clone()
    }
}
