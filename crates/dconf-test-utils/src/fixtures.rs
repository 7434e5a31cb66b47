//! Reference scenario shared by unit, integration and CLI tests.
//!
//! The live dump covers every reconciliation branch: a brand new managed
//! section, a managed section with changed, removed and added options, a
//! subtree managed only through an ancestor with an excluded child, a
//! sibling whose name merely shares a prefix, and an unmanaged section.

use std::fs;
use std::path::{Path, PathBuf};

/// Store root used by the reference scenario
pub const ROOT: &str = "/the/root";

/// What `dconf dump /the/root` returns in the reference scenario
pub const LIVE_DUMP: &str = "\
[ignored]
a=1
[overwrite]
a=1
b=2
[clear]
keep=5
[clear/foo/bar]
blah=50
[clear/foo/bar/exclude]
no=1
[clear/food]
hi=1
";

/// Desired-state document of the reference scenario
pub const DESIRED_CONFIG: &str = "\
[add]
AddedKey=1

[overwrite]
a=10
new=5

# manage everything under clear/foo, except one subtree
[clear/foo]

[-clear/foo/bar/exclude]
";

/// Uncolored diff lines, ignored notices hidden
pub const EXPECTED_DIFF: &[&str] = &[
    "> add/AddedKey=1",
    "< clear/foo/bar/blah=50",
    "< overwrite/a=1",
    "> overwrite/a=10",
    "< overwrite/b=2",
    "> overwrite/new=5",
];

/// Uncolored diff lines, ignored notices shown
pub const EXPECTED_DIFF_WITH_IGNORED: &[&str] = &[
    "> add/AddedKey=1",
    "? clear/keep=5",
    "< clear/foo/bar/blah=50",
    "? clear/foo/bar/exclude/no=1",
    "? clear/food/hi=1",
    "? ignored/a=1",
    "< overwrite/a=1",
    "> overwrite/a=10",
    "< overwrite/b=2",
    "> overwrite/new=5",
];

/// Store writes issued when applying the reference scenario
pub const EXPECTED_WRITES: &[(&str, &str)] = &[
    ("/the/root/add/AddedKey", "1"),
    ("/the/root/overwrite/a", "10"),
    ("/the/root/overwrite/new", "5"),
];

/// Store resets issued when applying the reference scenario
pub const EXPECTED_RESETS: &[&str] = &["/the/root/clear/foo/bar/blah", "/the/root/overwrite/b"];

/// Write `contents` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}
