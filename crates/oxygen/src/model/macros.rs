/// Build an [`Attributes`](crate::Attributes) map.
///
/// ```
/// let attributes = oxygen::attributes! {
///     "title" => "Hello",
///     "published" => true,
/// };
/// assert_eq!(attributes.len(), 2);
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::Attributes::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut attributes = $crate::Attributes::new();
        $(
            attributes.insert(
                ::std::string::String::from($key),
                $crate::Value::from($value),
            );
        )+
        attributes
    }};
}

/// Declare a model: the wrapper struct around its [`Record`](crate::Record)
/// and the [`Model`](crate::Model) impl.
///
/// Recognized settings: `table`, `primary_key`, `fillable`, `guarded`,
/// `hidden`, `casts` and `timestamps`. Omitted settings keep their defaults.
///
/// ```
/// use oxygen::{model, Cast, Model};
///
/// model! {
///     pub struct Post {
///         fillable = ["title", "body"],
///         casts = [("published", Cast::Boolean)],
///         timestamps = true,
///     }
/// }
///
/// assert_eq!(Post::table(), "posts");
/// assert_eq!(Post::foreign_key(), "post_id");
/// ```
#[macro_export]
macro_rules! model {
    (@item table = $value:expr) => {
        fn table() -> $crate::codegen_support::Cow<'static, str> {
            $crate::codegen_support::Cow::Borrowed($value)
        }
    };
    (@item primary_key = $value:expr) => {
        const PRIMARY_KEY: &'static str = $value;
    };
    (@item fillable = $value:expr) => {
        const FILLABLE: &'static [&'static str] = &$value;
    };
    (@item guarded = $value:expr) => {
        const GUARDED: &'static [&'static str] = &$value;
    };
    (@item hidden = $value:expr) => {
        const HIDDEN: &'static [&'static str] = &$value;
    };
    (@item casts = $value:expr) => {
        const CASTS: &'static [(&'static str, $crate::codegen_support::Cast)] = &$value;
    };
    (@item timestamps = $value:expr) => {
        const TIMESTAMPS: bool = $value;
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $key:ident = $value:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis struct $name {
            record: $crate::codegen_support::Record,
        }

        impl $crate::codegen_support::Model for $name {
            $( $crate::model!(@item $key = $value); )*

            fn from_record(record: $crate::codegen_support::Record) -> Self {
                Self { record }
            }

            fn record(&self) -> &$crate::codegen_support::Record {
                &self.record
            }

            fn record_mut(&mut self) -> &mut $crate::codegen_support::Record {
                &mut self.record
            }
        }
    };
}
