// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Turns the facts of a verified token into the request's user.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let username = ctx
        .username
        .ok_or_else(|| ApplicationError::unauthorized("missing username"))?;
    let role = ctx
        .role
        .ok_or_else(|| ApplicationError::unauthorized("missing role"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    let id = UserId::new(user_id)
        .map_err(|_| ApplicationError::unauthorized("invalid user id"))?;

    // Rights carried by the token are what the holder was granted at login.
    let capabilities = if ctx.capabilities.is_empty() {
        role.default_capabilities()
    } else {
        ctx.capabilities
    };

    Ok(AuthenticatedUser {
        id,
        username,
        role,
        capabilities,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    capabilities: HashSet<Capability>,
}

fn date_term(predicate: &Predicate) -> Option<SystemTime> {
    match predicate.terms.first() {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = Self::default();
        for fact in facts {
            ctx.apply_predicate(&fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: &Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user_id = Some(*id);
                self.username = Some(name.clone());
            }
            ("role", [Term::Str(role)]) => {
                self.role = role.parse().ok();
            }
            ("issued_at", _) => self.issued_at = date_term(predicate),
            ("expires_at", _) => self.expires_at = date_term(predicate),
            ("right", [Term::Str(resource), Term::Str(action)]) => {
                self.capabilities
                    .insert(Capability::new(resource.clone(), action.clone()));
            }
            _ => {}
        }
    }
}
