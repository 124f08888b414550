pub mod deps;
pub mod oauth;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::{BrevoMailer, BrevoSms, ServerDeps};
pub use oauth::{FacebookTokenVerifier, GoogleTokenVerifier};
pub use stores::{InMemoryOtpStore, PgOtpStore, PgPreferenceStore, PgUserStore};
pub use traits::{
    BaseMailer, BaseOtpStore, BasePreferenceStore, BaseSmsSender, BaseTokenVerifier,
    BaseUserStore, ProviderIdentity, StoreError,
};
