// src/infrastructure/ioc/container.rs
//! Typed binding registry.
//!
//! Bindings are registered on a [`ContainerBuilder`] at startup and frozen into an
//! immutable [`Container`] that is shared by every request. Each binding maps one
//! [`Port`] to a provider and a [`Scope`]:
//!
//! * [`Scope::Singleton`] providers run once, on first resolution, and the instance is
//!   shared process-wide.
//! * [`Scope::Transient`] providers run on every resolution.
//! * [`Scope::Request`] providers run once per [`RequestScope`]; outside a scope they
//!   behave as transient.
//!
//! Factory bindings ([`ContainerBuilder::bind_factory`]) hand out a [`Factory`] that
//! resolves its own dependencies each time it is called rather than when it is bound.
use once_cell::sync::OnceCell;
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::{Arc, Mutex, PoisonError},
};
use thiserror::Error;

type Instance = Arc<dyn Any + Send + Sync>;
type Provider = Arc<dyn Fn(&Resolver<'_>) -> Result<Instance, ContainerError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("no binding registered for port `{0}`")]
    Unbound(&'static str),

    #[error("port `{0}` is already bound")]
    AlreadyBound(&'static str),

    #[error("port `{port}` is bound as `{bound}` but was requested as `{requested}`")]
    TypeMismatch {
        port: &'static str,
        bound: &'static str,
        requested: &'static str,
    },

    #[error("port `{0}` needs a request context to be resolved")]
    MissingRequestContext(&'static str),

    #[error("circular dependency: {0}")]
    CircularDependency(String),

    #[error("provider for port `{port}` failed: {message}")]
    Provider { port: &'static str, message: String },
}

impl ContainerError {
    pub fn provider(port: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            port,
            message: message.into(),
        }
    }
}

/// Identifier of an abstract capability, typed by what resolving it yields.
///
/// The name is the identity: two ports with the same name address the same binding.
pub struct Port<T: ?Sized + 'static> {
    name: &'static str,
    _marker: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized + 'static> Port<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> PortKey {
        PortKey {
            name: self.name,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }
}

impl<T: ?Sized + 'static> Clone for Port<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized + 'static> Copy for Port<T> {}

impl<T: ?Sized + 'static> fmt::Debug for Port<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Port")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .finish()
    }
}

/// Type-erased form of a [`Port`], used for completeness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortKey {
    pub name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
}

impl PortKey {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Transient,
    Request,
    Singleton,
}

struct Binding {
    scope: Scope,
    type_id: TypeId,
    type_name: &'static str,
    provider: Provider,
    singleton: OnceCell<Instance>,
}

/// A callable that builds a `T` from per-call arguments `A`.
pub struct Factory<A, T: ?Sized> {
    build: Arc<dyn Fn(A) -> Result<Arc<T>, ContainerError> + Send + Sync>,
}

impl<A, T: ?Sized> Factory<A, T> {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(A) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
        }
    }

    pub fn call(&self, args: A) -> Result<Arc<T>, ContainerError> {
        (self.build)(args)
    }
}

impl<A, T: ?Sized> Clone for Factory<A, T> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
        }
    }
}

#[derive(Default)]
pub struct ContainerBuilder {
    bindings: HashMap<&'static str, Binding>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for `port`. Each port may be bound once.
    pub fn bind<T, F>(
        &mut self,
        port: Port<T>,
        scope: Scope,
        provider: F,
    ) -> Result<&mut Self, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.insert(port, scope, provider, OnceCell::new())
    }

    /// Bind `port` to one lazily built, process-wide instance.
    ///
    /// Two singletons that depend on each other form a cycle that is reported as
    /// [`ContainerError::CircularDependency`] when resolved from one thread. If both are
    /// first resolved concurrently from different threads, each thread waits on the
    /// other's initialisation and neither returns. Singleton graphs must be acyclic.
    pub fn bind_singleton<T, F>(
        &mut self,
        port: Port<T>,
        provider: F,
    ) -> Result<&mut Self, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.bind(port, Scope::Singleton, provider)
    }

    pub fn bind_transient<T, F>(
        &mut self,
        port: Port<T>,
        provider: F,
    ) -> Result<&mut Self, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.bind(port, Scope::Transient, provider)
    }

    pub fn bind_request_scoped<T, F>(
        &mut self,
        port: Port<T>,
        provider: F,
    ) -> Result<&mut Self, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        self.bind(port, Scope::Request, provider)
    }

    /// Bind an already constructed value as a singleton.
    pub fn bind_instance<T>(
        &mut self,
        port: Port<T>,
        value: Arc<T>,
    ) -> Result<&mut Self, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let cell = OnceCell::with_value(Arc::new(Arc::clone(&value)) as Instance);
        self.insert(port, Scope::Singleton, move |_| Ok(Arc::clone(&value)), cell)
    }

    /// Bind a factory. `make` receives the container and the call arguments each time
    /// the factory is invoked, so whatever it resolves is looked up at call time.
    pub fn bind_factory<A, T, F>(
        &mut self,
        port: Port<Factory<A, T>>,
        make: F,
    ) -> Result<&mut Self, ContainerError>
    where
        A: 'static,
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container, A) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        let make = Arc::new(make);
        self.bind(port, Scope::Transient, move |resolver| {
            let container = resolver.container().clone();
            let make = Arc::clone(&make);
            Ok(Arc::new(Factory::new(move |args| make(&container, args))))
        })
    }

    fn insert<T, F>(
        &mut self,
        port: Port<T>,
        scope: Scope,
        provider: F,
        singleton: OnceCell<Instance>,
    ) -> Result<&mut Self, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Resolver<'_>) -> Result<Arc<T>, ContainerError> + Send + Sync + 'static,
    {
        let name = port.name();
        if self.bindings.contains_key(name) {
            return Err(ContainerError::AlreadyBound(name));
        }

        let provider: Provider = Arc::new(move |resolver| {
            provider(resolver).map(|value| Arc::new(value) as Instance)
        });
        self.bindings.insert(
            name,
            Binding {
                scope,
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                provider,
                singleton,
            },
        );
        tracing::debug!(port = name, ?scope, "binding registered");
        Ok(self)
    }

    pub fn build(self) -> Container {
        Container {
            inner: Arc::new(ContainerInner {
                bindings: self.bindings,
            }),
        }
    }
}

struct ContainerInner {
    bindings: HashMap<&'static str, Binding>,
}

/// Frozen registry. Cloning is cheap and every clone sees the same bindings and
/// singleton instances.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Resolve `port` outside any request scope.
    pub fn get<T>(&self, port: Port<T>) -> Result<Arc<T>, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Resolver::new(self, None).get(port)
    }

    /// Open a scope for one request. `context` is what request-scoped providers read
    /// through [`Resolver::context`].
    pub fn request_scope<C>(&self, context: C) -> RequestScope
    where
        C: Send + Sync + 'static,
    {
        RequestScope {
            container: self.clone(),
            context: Some(Arc::new(context)),
            instances: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_bound<T: ?Sized + 'static>(&self, port: Port<T>) -> bool {
        self.inner
            .bindings
            .get(port.name())
            .is_some_and(|binding| binding.type_id == TypeId::of::<T>())
    }

    pub fn scope_of<T: ?Sized + 'static>(&self, port: Port<T>) -> Option<Scope> {
        self.inner.bindings.get(port.name()).map(|b| b.scope)
    }

    /// Names of all bound ports, sorted.
    pub fn ports(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.bindings.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Check that every port in `required` is bound with the expected type.
    pub fn verify(&self, required: &[PortKey]) -> Result<(), ContainerError> {
        let mut first_error = None;
        for key in required {
            let result = self.check_key(key);
            if let Err(err) = result {
                tracing::error!(
                    port = key.name,
                    expected = key.type_name(),
                    error = %err,
                    "container misconfigured"
                );
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn check_key(&self, key: &PortKey) -> Result<&Binding, ContainerError> {
        let binding = self
            .inner
            .bindings
            .get(key.name)
            .ok_or(ContainerError::Unbound(key.name))?;
        if binding.type_id != key.type_id {
            return Err(ContainerError::TypeMismatch {
                port: key.name,
                bound: binding.type_name,
                requested: key.type_name,
            });
        }
        Ok(binding)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("ports", &self.ports())
            .finish()
    }
}

/// Per-request resolution scope. Request-scoped bindings resolve to one instance per
/// scope; dropping the scope drops them.
pub struct RequestScope {
    container: Container,
    context: Option<Arc<dyn Any + Send + Sync>>,
    instances: Mutex<HashMap<&'static str, Instance>>,
}

impl RequestScope {
    pub fn get<T>(&self, port: Port<T>) -> Result<Arc<T>, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Resolver::new(&self.container, Some(self)).get(port)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    fn cached(&self, name: &'static str) -> Option<Instance> {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn store(&self, name: &'static str, instance: Instance) -> Instance {
        // Keep whichever instance landed first so all callers in this scope agree.
        Arc::clone(
            self.instances
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(name)
                .or_insert(instance),
        )
    }
}

/// Handle passed to providers while they build an instance.
pub struct Resolver<'a> {
    container: &'a Container,
    scope: Option<&'a RequestScope>,
    path: Vec<&'static str>,
}

impl<'a> Resolver<'a> {
    fn new(container: &'a Container, scope: Option<&'a RequestScope>) -> Self {
        Self {
            container,
            scope,
            path: Vec::new(),
        }
    }

    pub fn container(&self) -> &'a Container {
        self.container
    }

    /// Context of the enclosing request scope.
    pub fn context<C: Send + Sync + 'static>(&self) -> Result<&'a C, ContainerError> {
        let port = self.path.last().copied().unwrap_or("<root>");
        self.scope
            .and_then(|scope| scope.context.as_deref())
            .and_then(|context| context.downcast_ref::<C>())
            .ok_or(ContainerError::MissingRequestContext(port))
    }

    pub fn get<T>(&self, port: Port<T>) -> Result<Arc<T>, ContainerError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = port.key();
        let instance = self.resolve(&key)?;
        instance
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| ContainerError::TypeMismatch {
                port: key.name,
                bound: "<provider output>",
                requested: key.type_name,
            })
    }

    fn resolve(&self, key: &PortKey) -> Result<Instance, ContainerError> {
        let binding = self.container.check_key(key)?;

        if self.path.contains(&key.name) {
            let mut chain = self.path.clone();
            chain.push(key.name);
            return Err(ContainerError::CircularDependency(chain.join(" -> ")));
        }
        let mut path = self.path.clone();
        path.push(key.name);

        match binding.scope {
            Scope::Transient => (binding.provider)(&self.child(path, self.scope)),
            Scope::Singleton => binding
                .singleton
                .get_or_try_init(|| {
                    // Singletons never capture request state.
                    let instance = (binding.provider)(&self.child(path, None))?;
                    tracing::debug!(port = key.name, "singleton constructed");
                    Ok(instance)
                })
                .cloned(),
            Scope::Request => match self.scope {
                Some(scope) => {
                    if let Some(instance) = scope.cached(key.name) {
                        return Ok(instance);
                    }
                    let instance = (binding.provider)(&self.child(path, Some(scope)))?;
                    Ok(scope.store(key.name, instance))
                }
                None => (binding.provider)(&self.child(path, None)),
            },
        }
    }

    fn child(&self, path: Vec<&'static str>, scope: Option<&'a RequestScope>) -> Resolver<'a> {
        Resolver {
            container: self.container,
            scope,
            path,
        }
    }
}
