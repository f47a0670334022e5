//! Unusual-permission detection and POSIX mode rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A noteworthy permission pattern.
///
/// Variants are listed in reporting priority order; at most one flag is
/// ever reported for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionFlag {
    /// All permission bits are zero.
    NoPermissions,
    /// The set-user-ID bit is set.
    Setuid,
    /// The set-group-ID bit is set.
    Setgid,
    /// The world-write bit is set.
    WorldWritable,
}

impl PermissionFlag {
    /// Human-readable description used in report lines.
    pub fn description(self) -> &'static str {
        match self {
            Self::NoPermissions => "no permissions",
            Self::Setuid => "setuid",
            Self::Setgid => "setgid",
            Self::WorldWritable => "world writable",
        }
    }
}

impl fmt::Display for PermissionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Check a mode for unusual permission bits.
///
/// Priority: no-permissions > setuid > setgid > world-writable. Returns
/// the first match only, even when several conditions hold.
pub fn unusual_permissions(mode: u32) -> Option<PermissionFlag> {
    if mode & 0o777 == 0 {
        Some(PermissionFlag::NoPermissions)
    } else if mode & 0o4000 != 0 {
        Some(PermissionFlag::Setuid)
    } else if mode & 0o2000 != 0 {
        Some(PermissionFlag::Setgid)
    } else if mode & 0o002 != 0 {
        Some(PermissionFlag::WorldWritable)
    } else {
        None
    }
}

/// Render a mode as the 10-character `ls -l` style string, e.g.
/// `-rw-r--r--` or `drwxr-sr-x`.
pub fn file_mode_string(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(match mode & 0o170000 {
        0o140000 => 's',
        0o120000 => 'l',
        0o100000 => '-',
        0o060000 => 'b',
        0o040000 => 'd',
        0o020000 => 'c',
        0o010000 => 'p',
        _ => '?',
    });

    out.push(if mode & 0o400 != 0 { 'r' } else { '-' });
    out.push(if mode & 0o200 != 0 { 'w' } else { '-' });
    out.push(execute_char(mode & 0o100 != 0, mode & 0o4000 != 0, 's', 'S'));

    out.push(if mode & 0o040 != 0 { 'r' } else { '-' });
    out.push(if mode & 0o020 != 0 { 'w' } else { '-' });
    out.push(execute_char(mode & 0o010 != 0, mode & 0o2000 != 0, 's', 'S'));

    out.push(if mode & 0o004 != 0 { 'r' } else { '-' });
    out.push(if mode & 0o002 != 0 { 'w' } else { '-' });
    out.push(execute_char(mode & 0o001 != 0, mode & 0o1000 != 0, 't', 'T'));

    out
}

fn execute_char(execute: bool, special: bool, with_execute: char, without: char) -> char {
    match (execute, special) {
        (true, true) => with_execute,
        (false, true) => without,
        (true, false) => 'x',
        (false, false) => '-',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        // All-zero wins over everything.
        assert_eq!(
            unusual_permissions(0o000),
            Some(PermissionFlag::NoPermissions)
        );
        // Setuid wins over setgid and world-write.
        assert_eq!(
            unusual_permissions(0o6777),
            Some(PermissionFlag::Setuid)
        );
        // Setgid wins over world-write.
        assert_eq!(
            unusual_permissions(0o2777),
            Some(PermissionFlag::Setgid)
        );
        assert_eq!(
            unusual_permissions(0o666),
            Some(PermissionFlag::WorldWritable)
        );
        assert_eq!(unusual_permissions(0o644), None);
        assert_eq!(unusual_permissions(0o755), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(PermissionFlag::NoPermissions.to_string(), "no permissions");
        assert_eq!(PermissionFlag::Setuid.to_string(), "setuid");
        assert_eq!(PermissionFlag::Setgid.to_string(), "setgid");
        assert_eq!(PermissionFlag::WorldWritable.to_string(), "world writable");
    }

    #[test]
    fn test_file_mode_string() {
        assert_eq!(file_mode_string(0o100644), "-rw-r--r--");
        assert_eq!(file_mode_string(0o040755), "drwxr-xr-x");
        assert_eq!(file_mode_string(0o120777), "lrwxrwxrwx");
        assert_eq!(file_mode_string(0o104755), "-rwsr-xr-x");
        assert_eq!(file_mode_string(0o102755), "-rwxr-sr-x");
        assert_eq!(file_mode_string(0o104644), "-rwSr--r--");
        assert_eq!(file_mode_string(0o101755), "-rwxr-xr-t");
        assert_eq!(file_mode_string(0o100000), "----------");
    }
}
