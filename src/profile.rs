//! Local player profile: display name and best score, persisted to a small
//! binary file next to the executable. A missing or corrupt file always
//! degrades to the default profile, never blocks play.

use std::fs;
use std::path::PathBuf;

const MAGIC: &[u8; 4] = b"AEP1";
pub const NAME_LEN: usize = 9;
// File: 4 magic + 9 name (zero padded) + 4 best score = 17 bytes
const FILE_SIZE: usize = 4 + NAME_LEN + 4;

#[derive(Clone)]
pub struct Profile {
    name: String,
    best: u32,
    path: PathBuf,
}

impl Profile {
    pub fn load() -> Self {
        Self::load_from(Self::profile_path())
    }

    /// Load from an explicit path. Tests use this to stay away from the
    /// real location.
    pub fn load_from(path: PathBuf) -> Self {
        let mut profile = Profile {
            name: String::new(),
            best: 0,
            path,
        };
        profile.read_file();
        profile
    }

    fn profile_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("alien-escape.profile");
            }
        }
        PathBuf::from("alien-escape.profile")
    }

    fn read_file(&mut self) {
        let Ok(data) = fs::read(&self.path) else { return };
        if data.len() < FILE_SIZE {
            return;
        }
        if &data[0..4] != MAGIC {
            return;
        }

        let name_bytes = &data[4..4 + NAME_LEN];
        self.name = String::from_utf8_lossy(name_bytes)
            .trim_end_matches('\0')
            .trim_end()
            .to_string();

        let offset = 4 + NAME_LEN;
        let bytes: [u8; 4] = [
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ];
        self.best = u32::from_le_bytes(bytes);
    }

    fn write_file(&self) {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        let name_bytes = self.name.as_bytes();
        let len = name_bytes.len().min(NAME_LEN);
        buf.extend_from_slice(&name_bytes[..len]);
        for _ in len..NAME_LEN {
            buf.push(0);
        }
        buf.extend_from_slice(&self.best.to_le_bytes());
        let _ = fs::write(&self.path, &buf);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Set and persist the display name, truncated to `NAME_LEN` chars.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(NAME_LEN).collect();
        self.write_file();
    }

    /// Record a finished session's floored score. Writes only on strict
    /// improvement; returns whether the stored best changed.
    pub fn record_best(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            self.write_file();
            true
        } else {
            false
        }
    }
}
