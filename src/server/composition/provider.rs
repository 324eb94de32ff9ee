//! Provider variants and the resolver that instantiates them.

use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    marker::PhantomData,
    sync::Arc,
};

use crate::server::{composition::token::Token, error::composition::CompositionError};

/// Type-erased instance; always wraps an `Arc<T>` for the token's `T`.
pub(crate) type Instance = Arc<dyn Any + Send + Sync>;

type ConstructFn = Arc<dyn Fn(&Resolver<'_>) -> Result<Instance, CompositionError> + Send + Sync>;
type FactoryFn =
    Arc<dyn Fn(&Dependencies<'_, '_>) -> Result<Instance, CompositionError> + Send + Sync>;

fn construct_fn<F>(construct: F) -> ConstructFn
where
    F: Fn(&Resolver<'_>) -> Result<Instance, CompositionError> + Send + Sync + 'static,
{
    Arc::new(construct)
}

fn factory_fn<F>(factory: F) -> FactoryFn
where
    F: Fn(&Dependencies<'_, '_>) -> Result<Instance, CompositionError> + Send + Sync + 'static,
{
    Arc::new(factory)
}

fn erase<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Instance {
    Arc::new(value)
}

fn downcast<T: ?Sized + Send + Sync + 'static>(
    instance: &Instance,
    name: &'static str,
) -> Result<Arc<T>, CompositionError> {
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or(CompositionError::TypeMismatch(name))
}

/// A type that can build an instance of `T` from the dependencies it resolves.
///
/// Used for constructor providers: binding a type rather than a ready value or a closure.
pub trait Injectable<T: ?Sized> {
    fn inject(resolver: &Resolver<'_>) -> Result<Arc<T>, CompositionError>;
}

/// How a binding produces its instance. Exactly one variant per binding.
#[derive(Clone)]
pub(crate) enum ProviderKind {
    /// A ready-made instance.
    Value(Instance),
    /// A type implementing [`Injectable`].
    Constructor(ConstructFn),
    /// A closure restricted to an explicit dependency list.
    Factory {
        factory: FactoryFn,
        deps: Vec<&'static str>,
    },
}

impl ProviderKind {
    fn instantiate(
        &self,
        name: &'static str,
        resolver: &Resolver<'_>,
    ) -> Result<Instance, CompositionError> {
        match self {
            Self::Value(instance) => Ok(instance.clone()),
            Self::Constructor(construct) => construct(resolver),
            Self::Factory { factory, deps } => {
                for &dep in deps {
                    resolver.instantiate(dep)?;
                }

                factory(&Dependencies {
                    provider: name,
                    declared: deps,
                    resolver,
                })
            }
        }
    }
}

/// Typed provider for a `Token<T>`.
pub struct Provider<T: ?Sized + 'static> {
    pub(crate) kind: ProviderKind,
    _type: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> Provider<T> {
    fn from_kind(kind: ProviderKind) -> Self {
        Self {
            kind,
            _type: PhantomData,
        }
    }

    /// Provides an existing instance.
    pub fn value(value: Arc<T>) -> Self {
        Self::from_kind(ProviderKind::Value(erase(value)))
    }

    /// Provides an instance built by `C::inject` at compile time.
    pub fn constructor<C>() -> Self
    where
        C: Injectable<T> + 'static,
    {
        Self::from_kind(ProviderKind::Constructor(construct_fn(|resolver| {
            C::inject(resolver).map(erase)
        })))
    }

    /// Provides an instance built by `factory`, which may only resolve the listed tokens.
    pub fn factory<F>(factory: F, deps: &[&'static str]) -> Self
    where
        F: Fn(&Dependencies<'_, '_>) -> Result<Arc<T>, CompositionError> + Send + Sync + 'static,
    {
        Self::from_kind(ProviderKind::Factory {
            factory: factory_fn(move |deps| factory(deps).map(erase)),
            deps: deps.to_vec(),
        })
    }
}

impl<T: ?Sized + 'static> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            _type: PhantomData,
        }
    }
}

/// Resolves bindings on demand while a composition is compiled.
///
/// Instances are memoized, so each binding is instantiated at most once per compile.
pub struct Resolver<'a> {
    providers: &'a HashMap<&'static str, ProviderKind>,
    instances: RefCell<HashMap<&'static str, Instance>>,
    path: RefCell<Vec<&'static str>>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(providers: &'a HashMap<&'static str, ProviderKind>) -> Self {
        Self {
            providers,
            instances: RefCell::new(HashMap::new()),
            path: RefCell::new(Vec::new()),
        }
    }

    /// Resolves a required dependency.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &Token<T>,
    ) -> Result<Arc<T>, CompositionError> {
        let instance = self.instantiate(token.name())?;
        downcast(&instance, token.name())
    }

    /// Resolves an optional dependency; unbound tokens yield `None`.
    pub fn get<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &Token<T>,
    ) -> Result<Option<Arc<T>>, CompositionError> {
        if !self.providers.contains_key(token.name()) {
            return Ok(None);
        }

        self.resolve(token).map(Some)
    }

    pub(crate) fn instantiate(&self, name: &'static str) -> Result<Instance, CompositionError> {
        if let Some(instance) = self.instances.borrow().get(name) {
            return Ok(instance.clone());
        }

        if self.path.borrow().contains(&name) {
            let mut cycle = self.path.borrow().clone();
            cycle.push(name);
            return Err(CompositionError::CircularDependency(cycle));
        }

        let provider = self
            .providers
            .get(name)
            .ok_or(CompositionError::MissingDependency(name))?;

        self.path.borrow_mut().push(name);
        let result = provider.instantiate(name, self);
        self.path.borrow_mut().pop();

        let instance = result?;
        self.instances.borrow_mut().insert(name, instance.clone());

        Ok(instance)
    }

    pub(crate) fn into_instances(self) -> HashMap<&'static str, Instance> {
        self.instances.into_inner()
    }
}

/// View of the resolver handed to factory providers.
pub struct Dependencies<'r, 'a> {
    provider: &'static str,
    declared: &'r [&'static str],
    resolver: &'r Resolver<'a>,
}

impl Dependencies<'_, '_> {
    /// Resolves one of the declared dependencies.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(
        &self,
        token: &Token<T>,
    ) -> Result<Arc<T>, CompositionError> {
        if !self.declared.contains(&token.name()) {
            return Err(CompositionError::UndeclaredDependency {
                provider: self.provider,
                dependency: token.name(),
            });
        }

        self.resolver.resolve(token)
    }
}
