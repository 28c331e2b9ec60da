//! Dependency injection container.
//!
//! Bindings map a key (a Rust type, or a string name) to a way of producing
//! a value: a factory closure, an [`Autowire`] constructor or a pre-built
//! instance. Resolved values are handed out as `Arc<T>`.

mod autowire;
pub use autowire::Autowire;

mod parameters;
pub use parameters::Parameters;

mod resolver;
pub use resolver::Resolver;

use oxygen_core::{Error, Result};

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

type Instance = Arc<dyn Any + Send + Sync>;

type Factory = Arc<dyn Fn(&mut Resolver<'_>) -> Result<Instance> + Send + Sync>;

#[derive(Default)]
pub struct Container {
    bindings: Mutex<HashMap<Key, Binding>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Key {
    Type(TypeId, &'static str),
    Named(String),
}

struct Binding {
    factory: Option<Factory>,
    shared: bool,
    instance: Option<Instance>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory producing a fresh `T` on every resolution.
    pub fn bind<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.register(Key::of::<T>(), erase(factory), false);
    }

    /// Register a factory whose first result is kept and returned by every
    /// later resolution.
    pub fn singleton<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.register(Key::of::<T>(), erase(factory), true);
    }

    /// Register an already-built value as a singleton.
    pub fn instance<T>(&self, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.lock().insert(
            Key::of::<T>(),
            Binding {
                factory: None,
                shared: true,
                instance: Some(Arc::new(value)),
            },
        );
    }

    /// Register `T`'s [`Autowire`] constructor as a transient binding.
    pub fn autowire<T: Autowire>(&self) {
        self.register(Key::of::<T>(), erase(T::autowire), false);
    }

    pub fn bind_named<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.register(Key::Named(name.into()), erase(factory), false);
    }

    pub fn singleton_named<T, F>(&self, name: impl Into<String>, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.register(Key::Named(name.into()), erase(factory), true);
    }

    /// Returns `true` if `T` has a binding.
    pub fn bound<T: 'static>(&self) -> bool {
        self.lock().contains_key(&Key::of::<T>())
    }

    /// Resolve `T` from its binding.
    pub fn make<T: Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        self.make_with(Parameters::new())
    }

    /// Resolve `T`, making `parameters` available to its factory.
    pub fn make_with<T: Send + Sync + 'static>(&self, parameters: Parameters) -> Result<Arc<T>> {
        Resolver::new(self, &parameters).make::<T>()
    }

    /// Resolve the value bound under `name`, which must be a `T`.
    pub fn make_named<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>> {
        let parameters = Parameters::new();
        let mut resolver = Resolver::new(self, &parameters);
        let instance = resolver.resolve(Key::Named(name.to_string()))?;
        downcast(instance, name)
    }

    /// Construct `T` through its [`Autowire`] implementation without
    /// registering it. Dependencies still come from the container.
    pub fn build<T: Autowire>(&self, parameters: Parameters) -> Result<T> {
        Resolver::new(self, &parameters).build::<T>()
    }

    fn register(&self, key: Key, factory: Factory, shared: bool) {
        self.lock().insert(
            key,
            Binding {
                factory: Some(factory),
                shared,
                instance: None,
            },
        );
    }

    /// Returns the memoized instance, or the factory to call. The lock is
    /// released before the factory runs so it can resolve its own
    /// dependencies.
    fn lookup(&self, key: &Key) -> Result<Lookup> {
        let bindings = self.lock();

        let Some(binding) = bindings.get(key) else {
            return Err(Error::resolution(key.to_string(), "no binding registered"));
        };

        if let Some(instance) = &binding.instance {
            return Ok(Lookup::Instance(instance.clone()));
        }

        match &binding.factory {
            Some(factory) => Ok(Lookup::Factory(factory.clone(), binding.shared)),
            None => Err(Error::resolution(key.to_string(), "binding has no resolver")),
        }
    }

    /// Keep `instance` as the singleton for `key`, unless another resolution
    /// got there first, in which case that one wins.
    fn memoize(&self, key: &Key, instance: Instance) -> Instance {
        let mut bindings = self.lock();
        match bindings.get_mut(key) {
            Some(binding) => binding.instance.get_or_insert(instance).clone(),
            None => instance,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Key, Binding>> {
        // A panicking factory never leaves the map half-updated.
        self.bindings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.lock();
        let mut keys: Vec<String> = bindings.keys().map(Key::to_string).collect();
        keys.sort();
        f.debug_struct("Container").field("bindings", &keys).finish()
    }
}

enum Lookup {
    Instance(Instance),
    Factory(Factory, bool),
}

impl Key {
    pub(crate) fn of<T: 'static>() -> Self {
        Key::Type(TypeId::of::<T>(), type_name::<T>())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Type(_, name) => f.write_str(name),
            Key::Named(name) => f.write_str(name),
        }
    }
}

fn erase<T, F>(factory: F) -> Factory
where
    T: Send + Sync + 'static,
    F: Fn(&mut Resolver<'_>) -> Result<T> + Send + Sync + 'static,
{
    Arc::new(move |resolver| Ok(Arc::new(factory(resolver)?) as Instance))
}

fn downcast<T: Send + Sync + 'static>(instance: Instance, key: &str) -> Result<Arc<T>> {
    instance.downcast::<T>().map_err(|_| {
        Error::resolution(
            key,
            format!("bound value is not a `{}`", type_name::<T>()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display() {
        assert_eq!(Key::of::<String>().to_string(), "alloc::string::String");
        assert_eq!(Key::Named("mailer".into()).to_string(), "mailer");
    }

    #[test]
    fn rebinding_replaces() {
        let container = Container::new();
        container.bind(|_| Ok(1_u32));
        container.bind(|_| Ok(2_u32));
        assert_eq!(*container.make::<u32>().unwrap(), 2);
    }
}
