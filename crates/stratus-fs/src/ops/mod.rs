mod append;
mod copy;
mod create_dir;
mod create_file;
mod move_op;
mod snapshot;
mod write;

pub use append::AppendTextOperation;
pub use copy::CopyOperation;
pub use create_dir::CreateDirectoryOperation;
pub use create_file::CreateFileOperation;
pub use move_op::MoveOperation;
pub use snapshot::SnapshotOperation;
pub use write::WriteBytesOperation;

use crate::error::Result;

/// A single reversible filesystem mutation.
///
/// `execute` snapshots pre-existing state before mutating; `rollback`
/// reverts to that snapshot (or deletes what was created when nothing
/// existed beforehand). `dispose` releases the backup copy and is
/// idempotent; every operation also disposes when dropped, so a committed
/// operation does not leak its backup.
pub trait FileOperation {
    fn execute(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    fn dispose(&mut self);
}
