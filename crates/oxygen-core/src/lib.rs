pub mod driver;
pub use driver::{Connection, Dialect, Driver};

mod error;
pub use error::{Error, IntoError, Phase};

pub mod row;
pub use row::Row;

pub mod value;
pub use value::Value;

/// A Result type alias that uses Oxygen's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
