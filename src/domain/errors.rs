use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::order::LineItem;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Repository operation that produced a [`RepositoryError::Persistence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Add => "add",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// How a unit of work was being finalized when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalize {
    Commit,
    Rollback,
}

impl fmt::Display for Finalize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finalize::Commit => f.write_str("commit"),
            Finalize::Rollback => f.write_str("roll back"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("could not open connection to {url}")]
    Connection {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to {operation} order {order_id}{}", item_suffix(.item))]
    Persistence {
        operation: Operation,
        order_id: i32,
        item: Option<LineItem>,
        #[source]
        source: BoxError,
    },

    #[error("failed to {action} unit of work")]
    Finalization {
        action: Finalize,
        #[source]
        source: BoxError,
    },
}

impl RepositoryError {
    pub(crate) fn connection(url: &str, source: impl Into<BoxError>) -> Self {
        RepositoryError::Connection {
            url: url.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn persistence(
        operation: Operation,
        order_id: i32,
        source: impl Into<BoxError>,
    ) -> Self {
        RepositoryError::Persistence {
            operation,
            order_id,
            item: None,
            source: source.into(),
        }
    }

    pub(crate) fn item(order_id: i32, item: &LineItem, source: impl Into<BoxError>) -> Self {
        RepositoryError::Persistence {
            operation: Operation::Add,
            order_id,
            item: Some(item.clone()),
            source: source.into(),
        }
    }

    pub(crate) fn finalization(action: Finalize, source: impl Into<BoxError>) -> Self {
        RepositoryError::Finalization {
            action,
            source: source.into(),
        }
    }
}

fn item_suffix(item: &Option<LineItem>) -> String {
    match item {
        Some(item) => format!(" (item {item})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause() -> BoxError {
        "disk I/O error".into()
    }

    #[test]
    fn connection_display_names_url() {
        let err = RepositoryError::connection("/missing/orders.db", cause());
        assert_eq!(err.to_string(), "could not open connection to /missing/orders.db");
    }

    #[test]
    fn persistence_display_without_item() {
        let err = RepositoryError::persistence(Operation::Delete, 4, cause());
        assert_eq!(err.to_string(), "failed to delete order 4");
    }

    #[test]
    fn persistence_display_names_failing_item() {
        let item = LineItem::new("laptop", 5300, 2);
        let err = RepositoryError::item(1, &item, cause());
        assert_eq!(err.to_string(), "failed to add order 1 (item laptop x2 @ 5300)");
        assert!(matches!(
            err,
            RepositoryError::Persistence { operation: Operation::Add, item: Some(_), .. }
        ));
    }

    #[test]
    fn finalization_display() {
        let err = RepositoryError::finalization(Finalize::Rollback, cause());
        assert_eq!(err.to_string(), "failed to roll back unit of work");
    }

    #[test]
    fn source_is_preserved() {
        let err = RepositoryError::finalization(Finalize::Commit, cause());
        let source = err.source().expect("source should be kept");
        assert_eq!(source.to_string(), "disk I/O error");
    }

    #[test]
    fn nested_errors_form_a_chain() {
        let inner = RepositoryError::persistence(Operation::Read, 9, cause());
        let outer = RepositoryError::persistence(Operation::Update, 9, inner);

        let first = outer.source().expect("inner error");
        assert_eq!(first.to_string(), "failed to read order 9");
        let second = first.source().expect("root cause");
        assert_eq!(second.to_string(), "disk I/O error");
    }
}
