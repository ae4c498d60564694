//! Unit of work: the explicit transaction boundary around repository calls.
//!
//! # Responsibility
//! - Open one transaction on a session and expose that session to
//!   repositories so all their writes share it.
//! - Make commit and rollback explicit calls.
//! - Release the transaction on every exit path.
//!
//! # Invariants
//! - One active unit of work per connection; nesting is refused.
//! - Leaving the scope without `commit()` discards staged work. Nothing is
//!   committed implicitly.
//! - A failed `COMMIT` leaves the state `Open`; the caller decides whether to
//!   roll back or close.
//! - `close()` is idempotent and also runs on drop.
//! - The state becomes `Closed` only once the session is back in autocommit
//!   mode.

use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UowResult<T> = Result<T, UowError>;

/// Lifecycle state of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UowState {
    /// Transaction active; no terminal action taken yet.
    Open,
    /// Staged changes durably applied.
    Committed,
    /// Staged changes discarded.
    RolledBack,
    /// Scope released; the connection is back in autocommit mode.
    Closed,
}

impl UowState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
            Self::Closed => "closed",
        }
    }
}

impl Display for UowState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum UowError {
    /// The connection is already inside a transaction.
    AlreadyActive,
    /// The store refused to start the transaction.
    Begin(rusqlite::Error),
    /// The store rejected `COMMIT`; the transaction is still active.
    Commit(rusqlite::Error),
    /// The store rejected `ROLLBACK`.
    Rollback(rusqlite::Error),
    /// `commit()` called when the unit of work is not open.
    NotActive { state: UowState },
    /// Operation attempted after `close()`.
    Closed,
}

impl Display for UowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyActive => write!(f, "connection already has an active transaction"),
            Self::Begin(err) => write!(f, "failed to begin unit of work: {err}"),
            Self::Commit(err) => write!(f, "failed to commit unit of work: {err}"),
            Self::Rollback(err) => write!(f, "failed to roll back unit of work: {err}"),
            Self::NotActive { state } => {
                write!(f, "unit of work is not open (state: {state})")
            }
            Self::Closed => write!(f, "unit of work is closed"),
        }
    }
}

impl Error for UowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Begin(err) | Self::Commit(err) | Self::Rollback(err) => Some(err),
            Self::AlreadyActive | Self::NotActive { .. } | Self::Closed => None,
        }
    }
}

/// Scoped transaction bound to one session.
///
/// ```rust,ignore
/// let conn = factory.open_session()?;
/// let mut uow = UnitOfWork::begin(&conn)?;
/// let service = WarehouseService::new(
///     SqliteProductRepository::new(uow.connection()),
///     SqliteOrderRepository::new(uow.connection()),
/// );
/// let product = service.create_product("widget", 5, 9.99)?;
/// uow.commit()?;
/// ```
pub struct UnitOfWork<'conn> {
    conn: &'conn Connection,
    state: UowState,
}

impl<'conn> UnitOfWork<'conn> {
    /// Starts a deferred transaction on `conn`.
    ///
    /// # Errors
    /// - `UowError::AlreadyActive` when `conn` is already in a transaction.
    /// - `UowError::Begin` when SQLite refuses `BEGIN`.
    pub fn begin(conn: &'conn Connection) -> UowResult<Self> {
        if !conn.is_autocommit() {
            warn!("event=uow_begin module=uow status=error error_code=already_active");
            return Err(UowError::AlreadyActive);
        }

        conn.execute_batch("BEGIN DEFERRED;").map_err(|err| {
            error!("event=uow_begin module=uow status=error error={err}");
            UowError::Begin(err)
        })?;

        debug!("event=uow_begin module=uow status=ok");
        Ok(Self {
            conn,
            state: UowState::Open,
        })
    }

    /// Session the transaction runs on.
    ///
    /// Repositories built from it take part in this unit of work. The
    /// returned reference is tied to the session, not to `self`; once the
    /// scope ends, repository writes through it are refused with
    /// `RepoError::NoActiveTransaction`.
    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    pub fn state(&self) -> UowState {
        self.state
    }

    /// Applies all staged changes atomically.
    ///
    /// On `UowError::Commit` the state stays `Open`: roll back or close
    /// explicitly.
    pub fn commit(&mut self) -> UowResult<()> {
        if self.state != UowState::Open {
            return Err(UowError::NotActive { state: self.state });
        }

        match self.conn.execute_batch("COMMIT;") {
            Ok(()) => {
                self.state = UowState::Committed;
                info!("event=uow_commit module=uow status=ok");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=uow_commit module=uow status=error transaction_active={} error={}",
                    !self.conn.is_autocommit(),
                    err
                );
                Err(UowError::Commit(err))
            }
        }
    }

    /// Discards all changes staged since `begin`.
    ///
    /// Calling it when nothing is pending (already rolled back or
    /// committed) is a no-op.
    pub fn rollback(&mut self) -> UowResult<()> {
        match self.state {
            UowState::Open => {}
            UowState::Committed | UowState::RolledBack => {
                debug!(
                    "event=uow_rollback module=uow status=skipped state={}",
                    self.state
                );
                return Ok(());
            }
            UowState::Closed => return Err(UowError::Closed),
        }

        self.rollback_transaction()?;
        self.state = UowState::RolledBack;
        info!("event=uow_rollback module=uow status=ok");
        Ok(())
    }

    /// Releases the unit of work.
    ///
    /// Pending work is rolled back, never committed. Closing twice is a
    /// no-op. If the rollback fails the state stays `Open` so `close` or
    /// `rollback` can be retried.
    pub fn close(&mut self) -> UowResult<()> {
        let previous = self.state;
        if previous == UowState::Closed {
            return Ok(());
        }

        if previous == UowState::Open {
            warn!("event=uow_close module=uow status=start outcome=discard_uncommitted");
            self.rollback_transaction()?;
        }
        self.state = UowState::Closed;

        debug!("event=uow_close module=uow status=ok previous_state={previous}");
        Ok(())
    }

    fn rollback_transaction(&self) -> UowResult<()> {
        // A failed statement may already have ended the transaction.
        if self.conn.is_autocommit() {
            return Ok(());
        }
        self.conn.execute_batch("ROLLBACK;").map_err(|err| {
            error!("event=uow_rollback module=uow status=error error={err}");
            UowError::Rollback(err)
        })
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            error!("event=uow_close module=uow status=error source=drop error={err}");
        }
    }
}
