//! CompletionGateway trait definition.
//!
//! The downstream completion service is opaque: it receives the user's new
//! input plus the assembled prior context and either returns a generated
//! model-reply turn or a typed failure. Implementations live in
//! synapse-infra (e.g., `HttpCompletionGateway`).

use synapse_types::completion::{CompletionError, ContextEntry};
use synapse_types::turn::Turn;

/// Trait for completion service backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait CompletionGateway: Send + Sync {
    /// Generate a reply to `user_text` given the assembled prior context.
    ///
    /// A success is a `ModelReply` turn ready to append to the timeline.
    /// Any transport error, non-success status, or malformed payload is a
    /// `CompletionError` whose `Display` output is the user-facing
    /// description.
    fn generate(
        &self,
        user_text: &str,
        context: &[ContextEntry],
    ) -> impl std::future::Future<Output = Result<Turn, CompletionError>> + Send;
}
