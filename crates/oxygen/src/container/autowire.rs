use super::Resolver;

use oxygen_core::Result;

/// A type the container can construct on its own.
///
/// The implementation plays the role of the constructor signature: it asks
/// the resolver for each dependency and each scalar parameter, in order.
///
/// ```
/// use oxygen::{Autowire, Container, Parameters, Resolver, Result};
/// use std::sync::Arc;
///
/// struct Config {
///     from: String,
/// }
///
/// struct Mailer {
///     config: Arc<Config>,
///     retries: u32,
/// }
///
/// impl Autowire for Mailer {
///     fn autowire(resolver: &mut Resolver<'_>) -> Result<Self> {
///         Ok(Mailer {
///             config: resolver.make()?,
///             retries: resolver.parameter_or("retries", 3),
///         })
///     }
/// }
///
/// let container = Container::new();
/// container.instance(Config { from: "app@example.com".into() });
///
/// let mailer: Mailer = container.build(Parameters::new()).unwrap();
/// assert_eq!(mailer.retries, 3);
/// assert_eq!(mailer.config.from, "app@example.com");
/// ```
pub trait Autowire: Sized + Send + Sync + 'static {
    fn autowire(resolver: &mut Resolver<'_>) -> Result<Self>;
}
