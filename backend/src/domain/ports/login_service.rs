//! Driving port for login.
//!
//! Inbound adapters call this port to turn credentials into a [`Principal`]
//! without knowing where accounts live. The fixture implementation serves
//! development and tests until an identity provider is wired in.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Email, Error, LoginCredentials, Principal, Role, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated caller.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

struct FixtureAccount {
    id: Uuid,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const FIXTURE_ACCOUNTS: [FixtureAccount; 2] = [
    FixtureAccount {
        id: Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000),
        email: "admin@marketplace.test",
        password: "admin-password",
        role: Role::Admin,
    },
    FixtureAccount {
        id: Uuid::from_u128(0x3fa85f64_5717_4562_b3fc_2c963f66afa6),
        email: "member@marketplace.test",
        password: "member-password",
        role: Role::Member,
    },
];

/// In-memory authenticator with one admin and one member account.
///
/// | email                     | password          | role     |
/// |---------------------------|-------------------|----------|
/// | `admin@marketplace.test`  | `admin-password`  | `admin`  |
/// | `member@marketplace.test` | `member-password` | `member` |
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|account| {
                account.email == credentials.email() && account.password == credentials.password()
            })
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
        let email = Email::new(account.email)
            .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
        Ok(Principal::new(
            UserId::from_uuid(account.id),
            email,
            account.role,
        ))
    }
}
