//! Reversible filesystem mutations with backup and restore.
//!
//! Every operation snapshots pre-existing state to a private temp location
//! before mutating, so a later `rollback` can put things back exactly as
//! they were. An operation whose target did not exist before `execute`
//! rolls back by deleting whatever it created.
//!
//! Operations hold their backup until disposed (explicitly or on drop);
//! disposal is independent of rollback, so a committed operation still
//! releases its backup copy.

mod backup;
mod error;
mod fsutil;
mod ops;

pub use error::{OperationError, Result};
pub use ops::{
    AppendTextOperation, CopyOperation, CreateDirectoryOperation, CreateFileOperation,
    FileOperation, MoveOperation, SnapshotOperation, WriteBytesOperation,
};
