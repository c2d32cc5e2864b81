//! Transaction scope owning one SQLite connection.
//!
//! A [`UnitOfWork`] begins a transaction when it is opened and ends it exactly
//! once: committed if [`UnitOfWork::mark_complete`] was called, rolled back
//! otherwise. [`UnitOfWork::finish`] does this explicitly and reports failures;
//! dropping an unfinished scope does the same and logs them instead. The
//! connection is released when the scope is dropped, after finalization.

use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::sqlite::SqliteConnection;

use crate::db;
use crate::domain::errors::{Finalize, RepositoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeState {
    Open,
    Completed,
    Closed,
}

pub struct UnitOfWork {
    conn: SqliteConnection,
    state: ScopeState,
}

impl UnitOfWork {
    pub fn open(database_url: &str) -> Result<Self, RepositoryError> {
        let mut conn = db::establish(database_url)
            .map_err(|e| RepositoryError::connection(database_url, e))?;
        AnsiTransactionManager::begin_transaction(&mut conn)
            .map_err(|e| RepositoryError::connection(database_url, e))?;
        log::debug!("Opened unit of work on {}", database_url);
        Ok(Self {
            conn,
            state: ScopeState::Open,
        })
    }

    /// Marks the work as successful so that finalization commits.
    pub fn mark_complete(&mut self) {
        if self.state == ScopeState::Open {
            self.state = ScopeState::Completed;
        }
    }

    #[cfg(test)]
    fn state(&self) -> ScopeState {
        self.state
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Commits or rolls back, then closes the connection.
    pub fn finish(mut self) -> Result<(), RepositoryError> {
        self.finalize()
    }

    fn finalize(&mut self) -> Result<(), RepositoryError> {
        let action = match self.state {
            ScopeState::Closed => return Ok(()),
            ScopeState::Completed => Finalize::Commit,
            ScopeState::Open => Finalize::Rollback,
        };
        self.state = ScopeState::Closed;

        let result = match action {
            Finalize::Commit => AnsiTransactionManager::commit_transaction(&mut self.conn),
            Finalize::Rollback => AnsiTransactionManager::rollback_transaction(&mut self.conn),
        };
        match result {
            Ok(()) if action == Finalize::Commit => log::info!("Committed unit of work"),
            Ok(()) => log::warn!("Unit of work was not completed, rolled back"),
            Err(e) => return Err(RepositoryError::finalization(action, e)),
        }
        Ok(())
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if let Err(e) = self.finalize() {
            log::error!("{}: {}", e, error_chain(&e));
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut causes = Vec::new();
    let mut next = err.source();
    while let Some(cause) = next {
        causes.push(cause.to_string());
        next = cause.source();
    }
    causes.join(": ")
}
