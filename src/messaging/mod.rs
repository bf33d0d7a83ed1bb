pub mod context;
pub mod directory;
pub mod recipient;
pub mod resolver;

pub use context::{ContextKind, MessageContext};
pub use directory::{Directory, DirectoryError, PgDirectory};
pub use recipient::{OwnerRef, Recipient};
pub use resolver::{resolve, ResolveError, SendSubmission};

use uuid::Uuid;

use crate::middleware::AuthUser;

/// The authenticated identity on whose behalf a message is sent.
/// `role == "admin"` selects the elevated resolution strategy.
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
}

impl Sender {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl From<AuthUser> for Sender {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }
    }
}
