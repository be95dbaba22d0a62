//! Authenticated caller identity.

use crate::model::todo_item::ToDoValidationError;
use std::fmt::{Display, Formatter};

/// User name of the authenticated caller.
///
/// Built by the identity layer from trusted session data and passed into
/// every service operation; item data never supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrentUser(String);

impl CurrentUser {
    /// Rejects blank names; surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Result<Self, ToDoValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ToDoValidationError::BlankOwner);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for CurrentUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::CurrentUser;

    #[test]
    fn blank_user_is_rejected_and_names_are_trimmed() {
        assert!(CurrentUser::new("   ").is_err());
        assert_eq!(CurrentUser::new(" fred ").unwrap().name(), "fred");
    }
}
