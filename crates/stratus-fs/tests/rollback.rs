//! Integration tests driving several operations as one unit of work.

use std::fs;
use std::io::Cursor;

use stratus_fs::{
    AppendTextOperation, CopyOperation, CreateDirectoryOperation, CreateFileOperation,
    FileOperation, MoveOperation, WriteBytesOperation,
};
use tempfile::TempDir;

#[test]
fn staged_operations_roll_back_in_reverse_order() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();

    let catalog = root.join("catalogs/photos");
    let manifest = root.join("catalogs/photos/manifest.json");
    let audit = root.join("audit.log");
    fs::create_dir_all(root.join("catalogs")).expect("create parent");
    fs::write(&audit, "start\n").expect("seed audit log");

    let mut ops: Vec<Box<dyn FileOperation>> = vec![
        Box::new(CreateDirectoryOperation::new(&catalog)),
        Box::new(CreateFileOperation::new(&manifest, Cursor::new("{}"))),
        Box::new(AppendTextOperation::new(&audit, "created photos\n")),
    ];

    for op in &mut ops {
        op.execute().expect("execute");
    }

    assert!(catalog.is_dir());
    assert_eq!(fs::read_to_string(&manifest).expect("read"), "{}");
    assert_eq!(
        fs::read_to_string(&audit).expect("read"),
        "start\ncreated photos\n"
    );

    for op in ops.iter_mut().rev() {
        op.rollback().expect("rollback");
    }

    assert!(!catalog.exists());
    assert_eq!(fs::read_to_string(&audit).expect("read"), "start\n");
}

#[test]
fn failed_copy_leaves_destination_restorable() {
    let temp = TempDir::new().expect("temp dir");
    let src = temp.path().join("incoming.txt");
    let dst = temp.path().join("stored.txt");
    fs::write(&src, "incoming").expect("write");
    fs::write(&dst, "stored").expect("write");

    let mut op = CopyOperation::new(&src, &dst, false);
    assert!(op.execute().is_err());

    op.rollback().expect("rollback");
    assert_eq!(fs::read_to_string(&dst).expect("read"), "stored");
}

#[test]
fn move_and_rewrite_sequence_round_trips() {
    let temp = TempDir::new().expect("temp dir");
    let src_dir = temp.path().join("src/dir");
    let dst_dir = temp.path().join("dst/dir");
    let index = temp.path().join("index.bin");
    fs::create_dir_all(&src_dir).expect("create");
    fs::write(src_dir.join("a.txt"), "a").expect("write");
    fs::write(&index, [0_u8]).expect("write");

    let mut mv = MoveOperation::new(&src_dir, &dst_dir);
    let mut rewrite = WriteBytesOperation::new(&index, vec![1, 2]);

    mv.execute().expect("move");
    rewrite.execute().expect("write");

    rewrite.rollback().expect("rollback write");
    mv.rollback().expect("rollback move");

    assert_eq!(fs::read_to_string(src_dir.join("a.txt")).expect("read"), "a");
    assert!(!dst_dir.exists());
    assert_eq!(fs::read(&index).expect("read"), vec![0]);
}
