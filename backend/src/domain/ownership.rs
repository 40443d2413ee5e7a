//! Ownership stamps and the mutation guard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Email, Error, Principal, UserId};

/// Who created a listing.
///
/// Both fields are recorded so a user who signs in again under the same email
/// keeps access to what they posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    user_id: UserId,
    email: Email,
}

impl Owner {
    /// Build an owner stamp.
    #[must_use]
    pub const fn new(user_id: UserId, email: Email) -> Self {
        Self { user_id, email }
    }

    /// Stamp the given principal as owner.
    #[must_use]
    pub fn from_principal(principal: &Principal) -> Self {
        Self::new(*principal.user_id(), principal.email().clone())
    }

    /// Owning user id.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Owning email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Whether `principal` is this owner, by id or by email.
    #[must_use]
    pub fn is_held_by(&self, principal: &Principal) -> bool {
        self.user_id == *principal.user_id()
            || self
                .email
                .as_ref()
                .eq_ignore_ascii_case(principal.email().as_ref())
    }
}

/// Allow the mutation when `principal` is an admin or owns the record.
///
/// # Errors
///
/// Returns a `forbidden` [`Error`] otherwise.
///
/// # Examples
/// ```
/// use marketplace::domain::{authorize_mutation, Email, Owner, Principal, Role, UserId};
///
/// let owner = Owner::new(UserId::random(), Email::new("a@example.com").expect("email"));
/// let admin = Principal::new(UserId::random(), Email::new("root@example.com").expect("email"), Role::Admin);
/// assert!(authorize_mutation(&admin, &owner).is_ok());
/// ```
pub fn authorize_mutation(principal: &Principal, owner: &Owner) -> Result<(), Error> {
    if principal.is_admin() || owner.is_held_by(principal) {
        Ok(())
    } else {
        Err(Error::forbidden("only the owner or an admin may change this listing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Role};
    use rstest::{fixture, rstest};

    const OWNER_ID: &str = "11111111-1111-4111-8111-111111111111";
    const OTHER_ID: &str = "22222222-2222-4222-8222-222222222222";

    fn principal(id: &str, email: &str, role: Role) -> Principal {
        Principal::new(
            UserId::new(id).expect("fixture id"),
            Email::new(email).expect("fixture email"),
            role,
        )
    }

    #[fixture]
    fn owner() -> Owner {
        Owner::new(
            UserId::new(OWNER_ID).expect("fixture id"),
            Email::new("owner@example.com").expect("fixture email"),
        )
    }

    #[rstest]
    #[case::same_user(principal(OWNER_ID, "changed@example.com", Role::Member))]
    #[case::same_email(principal(OTHER_ID, "OWNER@example.com", Role::Member))]
    #[case::admin(principal(OTHER_ID, "admin@example.com", Role::Admin))]
    fn permitted_callers(owner: Owner, #[case] caller: Principal) {
        assert!(authorize_mutation(&caller, &owner).is_ok());
    }

    #[rstest]
    fn strangers_are_forbidden(owner: Owner) {
        let caller = principal(OTHER_ID, "someone@example.com", Role::Member);
        let err = authorize_mutation(&caller, &owner).expect_err("stranger rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
