//! Repository implementations for all Glojourn entities.

pub mod automation;
pub mod case;
pub mod document;
pub mod session;
pub mod user;

pub use automation::AutomationRepository;
pub use case::{CaseListFilter, CaseRepository, CaseScope};
pub use document::DocumentRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
