use std::{collections::HashMap, sync::Arc};

use crate::server::{
    composition::{
        provider::{Instance, Provider, ProviderKind, Resolver},
        token::Token,
    },
    error::composition::CompositionError,
};

/// A provider paired with the token it is bound to.
///
/// Type-checked at construction, so the erased instance always matches the token.
#[derive(Clone)]
pub struct Binding {
    pub(crate) token: &'static str,
    pub(crate) kind: ProviderKind,
}

impl Binding {
    pub fn new<T: ?Sized + Send + Sync + 'static>(token: &Token<T>, provider: Provider<T>) -> Self {
        Self {
            token: token.name(),
            kind: provider.kind,
        }
    }

    pub fn token(&self) -> &'static str {
        self.token
    }
}

/// Ordered set of bindings. Rebinding a token replaces its provider in place.
#[derive(Clone, Default)]
pub struct Bindings {
    order: Vec<&'static str>,
    providers: HashMap<&'static str, ProviderKind>,
}

impl Bindings {
    pub fn bind<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        token: &Token<T>,
        provider: Provider<T>,
    ) -> &mut Self {
        self.insert(Binding::new(token, provider));
        self
    }

    pub fn insert(&mut self, binding: Binding) {
        if !self.providers.contains_key(binding.token) {
            self.order.push(binding.token);
        }
        self.providers.insert(binding.token, binding.kind);
    }

    /// Swaps the provider of an already bound token.
    ///
    /// # Returns
    /// - `true` - The token was bound and now uses the new provider
    /// - `false` - The token is not bound; nothing changed
    pub fn replace(&mut self, binding: Binding) -> bool {
        match self.providers.get_mut(binding.token) {
            Some(kind) => {
                *kind = binding.kind;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.providers.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Instantiates every binding in bind order and freezes the results.
    pub(crate) fn compile(&self) -> Result<Container, CompositionError> {
        let resolver = Resolver::new(&self.providers);
        for &token in &self.order {
            resolver.instantiate(token)?;
        }

        Ok(Container {
            instances: resolver.into_instances(),
        })
    }
}

/// Instances produced by a compiled composition.
#[derive(Default)]
pub struct Container {
    instances: HashMap<&'static str, Instance>,
}

impl Container {
    /// Looks up an instance, returning `None` when the token is not provided.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self, token: &Token<T>) -> Option<Arc<T>> {
        self.instances
            .get(token.name())
            .and_then(|instance| instance.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Looks up a required instance.
    ///
    /// # Returns
    /// - `Ok(Arc<T>)` - The instance bound to `token`
    /// - `Err(CompositionError::MissingDependency)` - Nothing is bound to `token`
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &Token<T>,
    ) -> Result<Arc<T>, CompositionError> {
        self.get(token)
            .ok_or(CompositionError::MissingDependency(token.name()))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.instances.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
