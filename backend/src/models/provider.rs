//! Provider model
//!
//! A provider is a resource competing for slots. Each provider carries
//! an integer capacity attribute ("licenses", expected >= 1) that feeds
//! the scarcity term of the availability score.
//!
//! Providers are supplied externally at startup and are immutable in
//! this core: there is no add/remove.

use serde::{Deserialize, Serialize};

/// Provider identifier, assigned by the external collaborator.
///
/// The resolver tie-break sorts tied providers by this id ascending, so
/// ids must be comparable and stable for the lifetime of a session.
pub type ProviderId = u32;

/// A resource provider competing for slots
///
/// # Example
/// ```
/// use slot_allocator_core_rs::Provider;
///
/// let provider = Provider::new(3, "Dr. Alvarez".to_string(), 2);
/// assert_eq!(provider.id(), 3);
/// assert_eq!(provider.licenses(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Unique identifier
    id: ProviderId,

    /// Name shown by the presentation layer; not consumed by core logic
    display_name: String,

    /// Capacity attribute. Zero is tolerated (the score function treats
    /// it as infinitely scarce) but >= 1 is the expected contract.
    licenses: u32,
}

impl Provider {
    /// Create a new provider
    pub fn new(id: ProviderId, display_name: String, licenses: u32) -> Self {
        Self {
            id,
            display_name,
            licenses,
        }
    }

    /// Provider identifier
    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// Display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// License count
    pub fn licenses(&self) -> u32 {
        self.licenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_accessors() {
        let p = Provider::new(7, "Dr. Okafor".to_string(), 1);
        assert_eq!(p.id(), 7);
        assert_eq!(p.display_name(), "Dr. Okafor");
        assert_eq!(p.licenses(), 1);
    }
}
