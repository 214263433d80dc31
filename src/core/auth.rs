//! Login accounts and password verification
//!
//! Passwords are stored as `sha256$<salt-hex>$<digest-hex>`, where the digest
//! is SHA-256 over the salt bytes followed by the password bytes.

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::core::access::AccessPolicy;
use crate::core::store::StoreError;
use crate::entities::user::UserAccount;

const HASH_SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

/// Account seeded by `init`
pub const DEFAULT_ADMIN: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// The plant's organogram: (username, password, role)
pub const ORGANOGRAM_ACCOUNTS: &[(&str, &str, &str)] = &[
    ("presidente", "admin123", "presidente"),
    ("conselho", "admin123", "conselho"),
    ("dir_operacional", "123456", "diretor_operacional"),
    ("ger_montagem", "123456", "gerente_montagem"),
    ("func_producao", "123456", "func_producao"),
    ("ger_insumos", "123456", "gerente_insumos"),
    ("func_estoque", "123456", "func_estoque"),
    ("dir_financeira", "123456", "diretor_financeiro"),
    ("ger_financeira", "123456", "gerente_financeiro"),
    ("func_financeiro", "123456", "func_financeiro"),
    ("dir_rh", "123456", "diretor_rh"),
    ("ger_rh", "123456", "gerente_rh"),
    ("func_rh", "123456", "func_rh"),
];

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in. Pass --user and --password (or set CARANGOS_USER / CARANGOS_PASSWORD)")]
    MissingCredentials,

    #[error("User '{0}' already exists")]
    DuplicateUser(String),

    #[error("User '{0}' not found")]
    UnknownUser(String),

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The authenticated actor behind a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: String,
}

impl Principal {
    pub fn can_access(&self, module: crate::core::access::Module) -> bool {
        AccessPolicy::shared().is_authorized(&self.role, module)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

/// Hash a password with a fresh random salt
pub fn hash_password<R: Rng>(password: &str, rng: &mut R) -> String {
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt[..]);
    format!("{}${}${}", HASH_SCHEME, to_hex(&salt), digest(&salt, password))
}

/// Check a password against a stored hash; malformed hashes never verify
pub fn verify_password(stored: &str, password: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != HASH_SCHEME {
        return false;
    }
    let Some(salt) = from_hex(salt_hex) else {
        return false;
    };
    digest(&salt, password) == expected
}

/// Authenticate against the stored accounts
pub fn login(accounts: &[UserAccount], username: &str, password: &str) -> Result<Principal, AuthError> {
    let account = accounts
        .iter()
        .find(|a| a.username == username)
        .filter(|a| verify_password(&a.password_hash, password))
        .ok_or(AuthError::InvalidCredentials)?;

    tracing::debug!(username, role = %account.role, "login succeeded");
    Ok(Principal {
        username: account.username.clone(),
        role: account.role.clone(),
    })
}

/// Add an account to the collection
///
/// Any role tag is accepted; tags outside every allow-list simply reach nothing.
pub fn create_account<R: Rng>(
    accounts: &mut Vec<UserAccount>,
    username: &str,
    password: &str,
    role: &str,
    rng: &mut R,
) -> Result<UserAccount, AuthError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AuthError::EmptyUsername);
    }
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    if accounts.iter().any(|a| a.username == username) {
        return Err(AuthError::DuplicateUser(username.to_string()));
    }

    let account = UserAccount {
        username: username.to_string(),
        password_hash: hash_password(password, rng),
        role: role.trim().to_string(),
        created: Utc::now(),
    };
    accounts.push(account.clone());
    Ok(account)
}

/// Remove an account by username
pub fn remove_account(accounts: &mut Vec<UserAccount>, username: &str) -> Result<UserAccount, AuthError> {
    let idx = accounts
        .iter()
        .position(|a| a.username == username)
        .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;
    Ok(accounts.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::access::Module;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret", &mut rng());
        assert!(hash.starts_with("sha256$"));
        assert!(verify_password(&hash, "s3cret"));
        assert!(!verify_password(&hash, "S3cret"));
        assert!(!verify_password(&hash, ""));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let mut rng = rng();
        let a = hash_password("123456", &mut rng);
        let b = hash_password("123456", &mut rng);
        assert_ne!(a, b);
        assert!(verify_password(&a, "123456"));
        assert!(verify_password(&b, "123456"));
    }

    #[test]
    fn test_malformed_hashes_never_verify() {
        assert!(!verify_password("", "x"));
        assert!(!verify_password("plaintext", "plaintext"));
        assert!(!verify_password("md5$00$abc", "x"));
        assert!(!verify_password("sha256$zz$abc", "x"));
    }

    #[test]
    fn test_login_flow() {
        let mut accounts = Vec::new();
        create_account(&mut accounts, "ger_rh", "123456", "gerente_rh", &mut rng()).unwrap();

        let principal = login(&accounts, "ger_rh", "123456").unwrap();
        assert_eq!(principal.role, "gerente_rh");
        assert!(principal.can_access(Module::UserManagement));
        assert!(!principal.can_access(Module::Finance));

        assert!(matches!(
            login(&accounts, "ger_rh", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&accounts, "nobody", "123456"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_duplicate_and_empty_accounts_rejected() {
        let mut accounts = Vec::new();
        create_account(&mut accounts, "admin", "admin123", "admin", &mut rng()).unwrap();
        assert!(matches!(
            create_account(&mut accounts, "admin", "x", "admin", &mut rng()),
            Err(AuthError::DuplicateUser(_))
        ));
        assert!(matches!(
            create_account(&mut accounts, "  ", "x", "admin", &mut rng()),
            Err(AuthError::EmptyUsername)
        ));
        assert!(matches!(
            create_account(&mut accounts, "bob", "", "admin", &mut rng()),
            Err(AuthError::EmptyPassword)
        ));
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_unregistered_role_is_stored_but_reaches_nothing() {
        let mut accounts = Vec::new();
        create_account(&mut accounts, "guest", "pw", "user", &mut rng()).unwrap();
        let principal = login(&accounts, "guest", "pw").unwrap();
        for module in Module::ALL {
            assert!(!principal.can_access(module));
        }
    }

    #[test]
    fn test_remove_account() {
        let mut accounts = Vec::new();
        create_account(&mut accounts, "func_rh", "123456", "func_rh", &mut rng()).unwrap();
        let removed = remove_account(&mut accounts, "func_rh").unwrap();
        assert_eq!(removed.username, "func_rh");
        assert!(accounts.is_empty());
        assert!(matches!(
            remove_account(&mut accounts, "func_rh"),
            Err(AuthError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_organogram_roles_are_known() {
        let known = AccessPolicy::shared().known_roles();
        for (_, _, role) in ORGANOGRAM_ACCOUNTS {
            assert!(known.contains(role), "{} missing from policy", role);
        }
    }
}
