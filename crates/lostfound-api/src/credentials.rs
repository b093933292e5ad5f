use std::sync::Arc;

use anyhow::{Result, anyhow};
use argon2::{
    Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use tracing::debug;

use lostfound_db::{Database, UserInsert};
use lostfound_types::models::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    Duplicate,
}

/// `NoAccount` and `Mismatch` must look the same to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Match,
    NoAccount,
    Mismatch,
}

/// Account registration and password checks over the `users` table.
/// All methods block (hashing and SQLite); call them from `spawn_blocking`.
pub struct CredentialStore {
    db: Arc<Database>,
    argon2: Argon2<'static>,
    /// Verified against when the account is unknown, so both paths cost the same.
    dummy_hash: String,
}

impl CredentialStore {
    /// Argon2id with the crate's default cost.
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Self::with_argon2(db, Argon2::default())
    }

    /// Custom cost parameters, e.g. a cheap setting for tests.
    pub fn with_params(db: Arc<Database>, params: Params) -> Result<Self> {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self::with_argon2(db, argon2)
    }

    fn with_argon2(db: Arc<Database>, argon2: Argon2<'static>) -> Result<Self> {
        let dummy_hash = hash_password(&argon2, "lostfound-placeholder-password")?;
        Ok(Self {
            db,
            argon2,
            dummy_hash,
        })
    }

    pub fn register(&self, creds: &Credentials) -> Result<RegisterOutcome> {
        let password_hash = hash_password(&self.argon2, &creds.password)?;

        match self.db.create_user(&creds.reg_number, &password_hash)? {
            UserInsert::Created => Ok(RegisterOutcome::Created),
            UserInsert::Duplicate => Ok(RegisterOutcome::Duplicate),
        }
    }

    pub fn verify(&self, creds: &Credentials) -> Result<VerifyOutcome> {
        let Some(user) = self.db.get_user_by_reg_number(&creds.reg_number)? else {
            let _ = password_matches(&self.argon2, &creds.password, &self.dummy_hash);
            debug!("Login for unknown registration number {}", creds.reg_number);
            return Ok(VerifyOutcome::NoAccount);
        };

        if password_matches(&self.argon2, &creds.password, &user.password)? {
            Ok(VerifyOutcome::Match)
        } else {
            debug!("Wrong password for {}", creds.reg_number);
            Ok(VerifyOutcome::Mismatch)
        }
    }
}

fn hash_password(argon2: &Argon2<'_>, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

/// Constant-time comparison happens inside `verify_password`.
fn password_matches(argon2: &Argon2<'_>, password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| anyhow!("Corrupt password hash: {}", e))?;

    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("Password verification failed: {}", e)),
    }
}

#[cfg(test)]
pub(crate) fn test_params() -> Params {
    Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, Arc<Database>, CredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(Database::open(&dir.path().join("lostfound.db")).unwrap());
        let store = CredentialStore::with_params(db.clone(), test_params()).unwrap();
        (dir, db, store)
    }

    fn creds(reg: &str, password: &str) -> Credentials {
        Credentials {
            reg_number: reg.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_then_verify() {
        let (_dir, _db, store) = store();
        let c = creds("AB123", "correct horse");
        assert_eq!(store.register(&c).unwrap(), RegisterOutcome::Created);
        assert_eq!(store.verify(&c).unwrap(), VerifyOutcome::Match);
    }

    #[test]
    fn stored_password_is_salted_hash() {
        let (_dir, db, store) = store();
        store.register(&creds("AB123", "correct horse")).unwrap();
        store.register(&creds("CD456", "correct horse")).unwrap();

        let a = db.get_user_by_reg_number("AB123").unwrap().unwrap().password;
        let b = db.get_user_by_reg_number("CD456").unwrap().unwrap().password;
        assert!(a.starts_with("$argon2id$"));
        assert!(!a.contains("correct horse"));
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_registration() {
        let (_dir, _db, store) = store();
        assert_eq!(
            store.register(&creds("AB123", "password-one")).unwrap(),
            RegisterOutcome::Created
        );
        assert_eq!(
            store.register(&creds("AB123", "password-two")).unwrap(),
            RegisterOutcome::Duplicate
        );
        // First password still wins
        assert_eq!(
            store.verify(&creds("AB123", "password-one")).unwrap(),
            VerifyOutcome::Match
        );
    }

    #[test]
    fn wrong_password_and_unknown_account() {
        let (_dir, _db, store) = store();
        store.register(&creds("AB123", "correct horse")).unwrap();
        assert_eq!(
            store.verify(&creds("AB123", "battery staple")).unwrap(),
            VerifyOutcome::Mismatch
        );
        assert_eq!(
            store.verify(&creds("ZZ999", "correct horse")).unwrap(),
            VerifyOutcome::NoAccount
        );
    }

    #[test]
    fn verify_uses_stored_cost_parameters() {
        let (_dir, db, store) = store();
        store.register(&creds("AB123", "correct horse")).unwrap();

        // A store with different parameters still verifies the existing hash
        let other = CredentialStore::with_params(
            db,
            Params::new(Params::MIN_M_COST * 2, 2, 1, None).unwrap(),
        )
        .unwrap();
        assert_eq!(
            other.verify(&creds("AB123", "correct horse")).unwrap(),
            VerifyOutcome::Match
        );
    }
}
