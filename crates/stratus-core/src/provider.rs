use std::sync::Arc;

/// Resolve a shared handle to one backend provider.
///
/// A backend registry implements this once per provider type it can hand
/// out, which makes the dependency map explicit and checked at compile
/// time: asking for a provider the registry does not know about is a type
/// error, not a runtime lookup miss. `None` means the provider type is
/// known but not configured for this deployment.
pub trait ResolveProvider<P: ?Sized> {
    fn resolve(&self) -> Option<Arc<P>>;
}

/// Short type name of a provider, for handler names and error messages.
///
/// `std::any::type_name` yields a fully qualified path; only the final
/// segment is useful in logs.
#[must_use]
pub fn provider_name<P: ?Sized>() -> &'static str {
    let full = std::any::type_name::<P>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock;

    struct Registry {
        clock: Option<Arc<Clock>>,
    }

    impl ResolveProvider<Clock> for Registry {
        fn resolve(&self) -> Option<Arc<Clock>> {
            self.clock.clone()
        }
    }

    #[test]
    fn resolve_returns_registered_provider() {
        let registry = Registry {
            clock: Some(Arc::new(Clock)),
        };

        assert!(registry.resolve().is_some());
    }

    #[test]
    fn resolve_returns_none_when_unconfigured() {
        let registry = Registry { clock: None };

        let resolved: Option<Arc<Clock>> = registry.resolve();
        assert!(resolved.is_none());
    }

    #[test]
    fn provider_name_strips_module_path() {
        assert_eq!(provider_name::<Clock>(), "Clock");
    }

    #[test]
    fn provider_name_handles_trait_objects() {
        trait Store {}

        assert_eq!(provider_name::<dyn Store>(), "Store");
    }
}
