use std::{any::Any, collections::HashMap, fmt};

/// Named values supplied to a single resolution, consumed by
/// [`Resolver::parameter`](super::Resolver::parameter).
#[derive(Default)]
pub struct Parameters {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<V: Send + Sync + 'static>(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<V: Send + Sync + 'static>(&mut self, name: impl Into<String>, value: V) {
        self.values.insert(name.into(), Box::new(value));
    }

    /// Returns the value supplied under `name` if it is a `V`.
    pub fn get<V: 'static>(&self, name: &str) -> Option<&V> {
        self.values.get(name)?.downcast_ref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}
