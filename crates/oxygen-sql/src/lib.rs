pub mod schema;
pub use schema::{Blueprint, Schema};

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub mod stmt;
pub use stmt::Statement;
