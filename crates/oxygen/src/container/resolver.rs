use super::{downcast, Autowire, Container, Instance, Key, Lookup, Parameters};

use oxygen_core::{Error, Result};

use std::{any::type_name, sync::Arc};

/// Handed to factories and [`Autowire`] constructors during one resolution.
///
/// Tracks the chain of keys being resolved so that a type depending on
/// itself fails with a resolution error instead of recursing forever.
pub struct Resolver<'a> {
    container: &'a Container,
    parameters: &'a Parameters,
    stack: Vec<Key>,
}

impl<'a> Resolver<'a> {
    pub(super) fn new(container: &'a Container, parameters: &'a Parameters) -> Self {
        Self {
            container,
            parameters,
            stack: vec![],
        }
    }

    pub fn container(&self) -> &Container {
        self.container
    }

    /// Resolve a dependency from the container.
    pub fn make<T: Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let key = Key::of::<T>();
        let name = key.to_string();
        let instance = self.resolve(key)?;
        downcast(instance, &name)
    }

    /// Construct `T` through [`Autowire`] without a binding.
    pub fn build<T: Autowire>(&mut self) -> Result<T> {
        let key = Key::of::<T>();
        self.enter(key)?;
        let result = T::autowire(self);
        self.stack.pop();
        result
    }

    /// The scalar parameter `name`, which has no default: it must be
    /// supplied to `make_with` / `build`.
    pub fn parameter<V: Clone + 'static>(&self, name: &str) -> Result<V> {
        match self.parameters.get::<V>(name) {
            Some(value) => Ok(value.clone()),
            None if self.parameters.contains(name) => Err(Error::resolution(
                name,
                format!("parameter is not a `{}`", type_name::<V>()),
            )),
            None => Err(Error::unresolvable_dependency(name, self.current())),
        }
    }

    /// The scalar parameter `name`, falling back to `default`.
    pub fn parameter_or<V: Clone + 'static>(&self, name: &str, default: V) -> V {
        self.parameters.get::<V>(name).cloned().unwrap_or(default)
    }

    pub(super) fn resolve(&mut self, key: Key) -> Result<Instance> {
        let (factory, shared) = match self.container.lookup(&key)? {
            Lookup::Instance(instance) => return Ok(instance),
            Lookup::Factory(factory, shared) => (factory, shared),
        };

        self.enter(key.clone())?;
        let result = factory(self);
        self.stack.pop();

        let instance = result?;

        Ok(if shared {
            self.container.memoize(&key, instance)
        } else {
            instance
        })
    }

    fn enter(&mut self, key: Key) -> Result<()> {
        if self.stack.contains(&key) {
            let chain: Vec<String> = self
                .stack
                .iter()
                .chain(Some(&key))
                .map(Key::to_string)
                .collect();
            return Err(Error::resolution(
                key.to_string(),
                format!("circular dependency: {}", chain.join(" -> ")),
            ));
        }

        self.stack.push(key);
        Ok(())
    }

    /// Name of the type currently being constructed.
    fn current(&self) -> String {
        self.stack
            .last()
            .map(Key::to_string)
            .unwrap_or_else(|| "<root>".to_string())
    }
}
