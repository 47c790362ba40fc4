//! `define_port_error!` declares the error enum shared by storage ports.
//!
//! Every storage adapter fails in one of two ways: it cannot reach its store,
//! or the store rejected an operation. The macro gives each port its own enum
//! with those two variants, a message prefixed by the port's subject, and
//! `connection` / `query` constructors taking `impl Into<String>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident for $subject:literal
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// The store could not be reached.
            #[error("{} connection failed: {message}", $subject)]
            Connection {
                /// Adapter-supplied detail.
                message: String,
            },
            /// The store rejected or failed an operation.
            #[error("{} query failed: {message}", $subject)]
            Query {
                /// Adapter-supplied detail.
                message: String,
            },
        }

        impl $name {
            /// Build a [`Self::Connection`] error.
            #[must_use]
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            /// Build a [`Self::Query`] error.
            #[must_use]
            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }

            /// Whether the store was unreachable rather than failing a query.
            #[must_use]
            pub fn is_connection(&self) -> bool {
                matches!(self, Self::Connection { .. })
            }
        }
    };
}

pub(crate) use define_port_error;
