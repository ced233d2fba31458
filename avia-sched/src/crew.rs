use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A crew member. Like an airplane, a member is an exclusive resource:
/// one flight per time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl CrewMember {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Display for CrewMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
