use thiserror::Error;

/// A requested backend provider is not registered.
///
/// Returned by factories that require a provider to be present, as opposed
/// to provider-bound commands, which tolerate an absent handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no provider of type '{provider}' is registered")]
pub struct ProviderUnavailable {
    /// Short type name of the missing provider.
    pub provider: &'static str,
}
