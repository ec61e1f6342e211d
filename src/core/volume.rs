//! Volume metrics for the filesystem holding a path.
//!
//! Space figures come from `fs2` on every platform. Filesystem type and kind
//! are read from the mount table (`/proc/mounts`) by picking the longest
//! mount point containing the path; where no mount table exists they are
//! reported as `"unknown"` / `VolumeKind::Unknown`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::{io, validation};

const MOUNT_TABLE: &str = "/proc/mounts";
const UNKNOWN_FORMAT: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeKind {
    Fixed,
    Removable,
    Network,
    Optical,
    Ram,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub mount_point: PathBuf,
    /// Free bytes, including blocks reserved for the superuser.
    pub free_bytes: u64,
    /// Free bytes usable by the calling user.
    pub available_bytes: u64,
    pub total_bytes: u64,
    pub format: String,
    pub kind: VolumeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: PathBuf,
    pub fs_type: String,
}

/// Undo the octal escapes (`\040` for space) used in the mount table.
fn unescape_mount_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = std::str::from_utf8(&bytes[i + 1..i + 4]).ok();
            if let Some(value) = digits.and_then(|d| u8::from_str_radix(d, 8).ok()) {
                out.push(value);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            let fs_type = fields.next()?;
            Some(MountEntry {
                device: unescape_mount_field(device),
                mount_point: PathBuf::from(unescape_mount_field(mount_point)),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// Longest mount point that contains `path`. Later entries win ties, matching
/// stacked mounts.
pub fn find_mount<'a>(mounts: &'a [MountEntry], path: &Path) -> Option<&'a MountEntry> {
    mounts
        .iter()
        .filter(|entry| path.starts_with(&entry.mount_point))
        .fold(None, |best: Option<&MountEntry>, entry| match best {
            Some(current)
                if current.mount_point.as_os_str().len() > entry.mount_point.as_os_str().len() =>
            {
                Some(current)
            }
            _ => Some(entry),
        })
}

pub fn classify(entry: &MountEntry) -> VolumeKind {
    match entry.fs_type.as_str() {
        "nfs" | "nfs4" | "cifs" | "smbfs" | "smb3" | "sshfs" | "fuse.sshfs" | "9p" | "afs" => {
            VolumeKind::Network
        }
        "tmpfs" | "ramfs" | "devtmpfs" => VolumeKind::Ram,
        "iso9660" | "udf" => VolumeKind::Optical,
        "vfat" | "exfat" | "msdos"
            if ["/media", "/run/media", "/mnt"]
                .iter()
                .any(|root| entry.mount_point.starts_with(root)) =>
        {
            VolumeKind::Removable
        }
        _ if entry.device.starts_with('/') => VolumeKind::Fixed,
        _ => VolumeKind::Unknown,
    }
}

struct SpaceStats {
    free: u64,
    available: u64,
    total: u64,
}

fn space_stats(path: &Path) -> Result<SpaceStats> {
    let stat = |result: std::io::Result<u64>| {
        result.map_err(|e| io::map_io_error(e, path, "read volume metrics"))
    };
    Ok(SpaceStats {
        free: stat(fs2::free_space(path))?,
        available: stat(fs2::available_space(path))?,
        total: stat(fs2::total_space(path))?,
    })
}

/// Metrics for the volume holding `path` (any existing path on it).
pub fn volume_info(path: &Path) -> Result<VolumeInfo> {
    validation::require_existing(path)?;
    let stats = space_stats(path)?;

    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());
    let mounts = std::fs::read_to_string(MOUNT_TABLE)
        .map(|content| parse_mounts(&content))
        .unwrap_or_default();

    let (mount_point, format, kind) = match find_mount(&mounts, &absolute) {
        Some(entry) => (
            entry.mount_point.clone(),
            entry.fs_type.clone(),
            classify(entry),
        ),
        None => (
            absolute
                .ancestors()
                .last()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            UNKNOWN_FORMAT.to_string(),
            VolumeKind::Unknown,
        ),
    };

    Ok(VolumeInfo {
        mount_point,
        free_bytes: stats.free,
        available_bytes: stats.available,
        total_bytes: stats.total,
        format,
        kind,
    })
}

pub fn free_space(path: &Path) -> Result<u64> {
    Ok(volume_info(path)?.free_bytes)
}

pub fn total_size(path: &Path) -> Result<u64> {
    Ok(volume_info(path)?.total_bytes)
}

pub fn format(path: &Path) -> Result<String> {
    Ok(volume_info(path)?.format)
}

pub fn volume_kind(path: &Path) -> Result<VolumeKind> {
    Ok(volume_info(path)?.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUNTS: &str = "\
/dev/sda1 / ext4 rw,relatime 0 0
tmpfs /tmp tmpfs rw,nosuid 0 0
server:/export /mnt/share nfs4 rw 0 0
/dev/sdb1 /media/usb\\040stick vfat rw 0 0
/dev/sr0 /media/cdrom iso9660 ro 0 0
proc /proc proc rw 0 0
";

    #[test]
    fn parses_and_unescapes_mount_points() {
        let mounts = parse_mounts(MOUNTS);
        assert_eq!(mounts.len(), 6);
        assert_eq!(mounts[3].mount_point, PathBuf::from("/media/usb stick"));
        assert_eq!(mounts[2].fs_type, "nfs4");
    }

    #[test]
    fn longest_mount_point_wins() {
        let mounts = parse_mounts(MOUNTS);
        let entry = find_mount(&mounts, Path::new("/tmp/work/file.txt")).unwrap();
        assert_eq!(entry.mount_point, PathBuf::from("/tmp"));

        let entry = find_mount(&mounts, Path::new("/home/user")).unwrap();
        assert_eq!(entry.mount_point, PathBuf::from("/"));

        // Component-wise prefix, not string prefix.
        let entry = find_mount(&mounts, Path::new("/tmpdata")).unwrap();
        assert_eq!(entry.mount_point, PathBuf::from("/"));
    }

    #[test]
    fn classifies_volume_kinds() {
        let mounts = parse_mounts(MOUNTS);
        let kinds: Vec<VolumeKind> = mounts.iter().map(classify).collect();
        assert_eq!(
            kinds,
            vec![
                VolumeKind::Fixed,
                VolumeKind::Ram,
                VolumeKind::Network,
                VolumeKind::Removable,
                VolumeKind::Optical,
                VolumeKind::Unknown,
            ]
        );
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = volume_info(Path::new("/definitely/not/here")).unwrap_err();
        assert_eq!(err.code.as_str(), "file.not_found");
    }

    #[test]
    fn temp_dir_has_consistent_space_figures() {
        let dir = tempfile::TempDir::new().unwrap();
        let info = volume_info(dir.path()).unwrap();
        assert!(info.total_bytes > 0);
        assert!(info.free_bytes <= info.total_bytes);
        assert!(info.available_bytes <= info.free_bytes);
        assert!(!info.format.is_empty());
        assert!(free_space(dir.path()).unwrap() <= total_size(dir.path()).unwrap());
    }
}
