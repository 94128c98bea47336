//! User environment storage (`HKCU\Environment\Path`)

use crate::error::Result;

/// Registry key holding per-user environment variables
pub const USER_ENV_KEY: &str = "Environment";

/// Value name of the user search path
pub const PATH_VALUE: &str = "Path";

/// Read/write access to the user `Path` value.
///
/// The update is a plain read-modify-write; a concurrent writer between the
/// two calls is overwritten.
pub trait EnvStore {
    /// Current value; a missing value reads as an empty string
    fn read_path(&self) -> Result<String>;

    /// Replace the value
    fn write_path(&self, value: &str) -> Result<()>;
}

impl<T: EnvStore + ?Sized> EnvStore for &T {
    fn read_path(&self) -> Result<String> {
        (**self).read_path()
    }

    fn write_path(&self, value: &str) -> Result<()> {
        (**self).write_path(value)
    }
}

#[cfg(windows)]
pub use self::windows::RegistryEnvStore;

#[cfg(not(windows))]
pub use self::unsupported::RegistryEnvStore;

#[cfg(windows)]
mod windows {
    use super::{EnvStore, PATH_VALUE, USER_ENV_KEY};
    use crate::error::{AdbEnvError, Result};
    use std::io;
    use tracing::{debug, info};
    use winreg::enums::{HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_EXPAND_SZ};
    use winreg::{RegKey, RegValue};

    /// `HKCU\Environment`, opened for query and set
    pub struct RegistryEnvStore {
        key: RegKey,
    }

    impl RegistryEnvStore {
        pub fn open() -> Result<Self> {
            let key = RegKey::predef(HKEY_CURRENT_USER)
                .open_subkey_with_flags(USER_ENV_KEY, KEY_QUERY_VALUE | KEY_SET_VALUE)
                .map_err(AdbEnvError::RegistryOpen)?;
            debug!("Opened HKCU\\{}", USER_ENV_KEY);
            Ok(Self { key })
        }
    }

    impl EnvStore for RegistryEnvStore {
        fn read_path(&self) -> Result<String> {
            match self.key.get_raw_value(PATH_VALUE) {
                Ok(raw) => Ok(decode_utf16(&raw.bytes)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
                Err(e) => Err(AdbEnvError::RegistryRead(e)),
            }
        }

        fn write_path(&self, value: &str) -> Result<()> {
            // REG_EXPAND_SZ so the %USERPROFILE% reference is expanded by the shell
            let raw = RegValue {
                bytes: encode_utf16(value),
                vtype: REG_EXPAND_SZ,
            };
            self.key
                .set_raw_value(PATH_VALUE, &raw)
                .map_err(AdbEnvError::RegistryWrite)?;
            info!("Updated HKCU\\{}\\{}", USER_ENV_KEY, PATH_VALUE);
            Ok(())
        }
    }

    fn decode_utf16(bytes: &[u8]) -> String {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
        String::from_utf16_lossy(&units[..end])
    }

    fn encode_utf16(value: &str) -> Vec<u8> {
        value
            .encode_utf16()
            .chain(Some(0))
            .flat_map(u16::to_le_bytes)
            .collect()
    }
}

#[cfg(not(windows))]
mod unsupported {
    use super::EnvStore;
    use crate::error::{AdbEnvError, Result};

    /// Stand-in that refuses to open outside Windows
    pub struct RegistryEnvStore {
        _private: (),
    }

    impl RegistryEnvStore {
        pub fn open() -> Result<Self> {
            Err(AdbEnvError::Unsupported("The registry"))
        }
    }

    impl EnvStore for RegistryEnvStore {
        fn read_path(&self) -> Result<String> {
            Err(AdbEnvError::Unsupported("The registry"))
        }

        fn write_path(&self, _value: &str) -> Result<()> {
            Err(AdbEnvError::Unsupported("The registry"))
        }
    }
}
