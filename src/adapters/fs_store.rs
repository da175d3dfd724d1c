//! Filesystem frame store.
//!
//! Implements [`FrameStore`] on top of `std::fs` rooted at one directory.
//! On ESP-IDF the root is a wear-levelled FAT partition mounted into the
//! VFS by [`mount_flash`]; on host it is any directory.
//!
//! Writes go to a hidden temporary file first and are renamed into place,
//! so a power cut mid-write leaves either the old file or no file, never a
//! truncated capture.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::app::ports::FrameStore;
use crate::error::StorageError;

pub struct FsFrameStore {
    root: PathBuf,
}

impl FsFrameStore {
    /// Use `root` as the storage directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            warn!("store: cannot create {}: {}", root.display(), e);
            StorageError::MountFailed
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty()
            || name.contains(['/', '\\'])
            || name.contains("..")
            || name.starts_with('.')
        {
            return Err(StorageError::InvalidName);
        }
        Ok(self.root.join(name))
    }
}

fn map_io(e: &std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::StorageFull => StorageError::Full,
        _ => StorageError::IoError,
    }
}

impl FrameStore for FsFrameStore {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        let tmp = self.root.join(format!(".{name}.tmp"));

        let result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(data)?;
            file.sync_all()?;
            drop(file);
            // FAT cannot rename over an existing file.
            if path.exists() {
                fs::remove_file(&path)?;
            }
            fs::rename(&tmp, &path)
        })();

        match result {
            Ok(()) => {
                debug!("store: wrote {} ({} B)", name, data.len());
                Ok(())
            }
            Err(e) => {
                warn!("store: write {} failed: {}", name, e);
                let _ = fs::remove_file(&tmp);
                Err(map_io(&e))
            }
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|p| p.is_file())
    }
}

/// Mount the FAT partition `label` at `base` (e.g. `/data`).
///
/// Formats the partition if it has never been mounted.
#[cfg(target_os = "espidf")]
pub fn mount_flash(base: &core::ffi::CStr, label: &core::ffi::CStr) -> Result<(), StorageError> {
    use esp_idf_svc::sys::{
        ESP_OK, esp_vfs_fat_mount_config_t, esp_vfs_fat_spiflash_mount_rw_wl, wl_handle_t,
    };

    let config = esp_vfs_fat_mount_config_t {
        format_if_mount_failed: true,
        max_files: 4,
        allocation_unit_size: 4096,
        ..Default::default()
    };
    let mut handle: wl_handle_t = -1;
    // SAFETY: all pointers reference live values for the duration of the call;
    // the VFS copies the base path.
    let rc = unsafe {
        esp_vfs_fat_spiflash_mount_rw_wl(base.as_ptr(), label.as_ptr(), &config, &mut handle)
    };
    if rc != ESP_OK as i32 {
        log::error!("store: mount {:?} at {:?} failed (rc={})", label, base, rc);
        return Err(StorageError::MountFailed);
    }
    log::info!("store: mounted {:?} at {:?}", label, base);
    Ok(())
}
