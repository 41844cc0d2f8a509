use windows_sys::Win32::Foundation::{ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS};
use windows_sys::Win32::System::Registry::{
    RegCloseKey, RegEnumValueW, RegOpenKeyExW, HKEY, HKEY_LOCAL_MACHINE, KEY_READ, REG_DWORD,
    REG_SZ,
};

use crate::common::wide::{str_to_wide, trim_at_nul, units_from_le_bytes};
use crate::config::{ConfigEntry, ConfigStore, ConfigValue};
use crate::error::LinkError;

/// Longest value name the registry allows, in UTF-16 units plus NUL.
const MAX_VALUE_NAME: usize = 16_384;

/// Values of one key under `HKEY_LOCAL_MACHINE`.
#[derive(Debug, Clone)]
pub struct RegistryConfigStore {
    subkey: String,
}

impl RegistryConfigStore {
    pub fn new(subkey: impl Into<String>) -> Self {
        Self {
            subkey: subkey.into(),
        }
    }
}

struct OpenKey(HKEY);

impl Drop for OpenKey {
    fn drop(&mut self) {
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

fn decode_value(kind: u32, data: &[u8]) -> ConfigValue {
    match kind {
        REG_DWORD => match data {
            &[a, b, c, d] => ConfigValue::Dword(u32::from_le_bytes([a, b, c, d])),
            _ => ConfigValue::Other,
        },
        REG_SZ => match units_from_le_bytes(data) {
            Some(units) => String::from_utf16(trim_at_nul(&units))
                .map(ConfigValue::String)
                .unwrap_or(ConfigValue::Other),
            None => ConfigValue::Other,
        },
        _ => ConfigValue::Other,
    }
}

impl ConfigStore for RegistryConfigStore {
    fn entries(&self) -> Result<Vec<ConfigEntry>, LinkError> {
        let wide = str_to_wide(&self.subkey);
        let mut raw: HKEY = 0;
        let status = unsafe { RegOpenKeyExW(HKEY_LOCAL_MACHINE, wide.as_ptr(), 0, KEY_READ, &mut raw) };
        if status != ERROR_SUCCESS {
            return Err(LinkError::Lookup {
                path: self.subkey.clone(),
                code: status,
            });
        }
        let key = OpenKey(raw);

        let mut entries = Vec::new();
        let mut name = vec![0u16; MAX_VALUE_NAME];
        let mut data = vec![0u8; 1024];
        let mut index = 0u32;
        loop {
            let mut name_len = name.len() as u32;
            let mut data_len = data.len() as u32;
            let mut kind = 0u32;
            let status = unsafe {
                RegEnumValueW(
                    key.0,
                    index,
                    name.as_mut_ptr(),
                    &mut name_len,
                    std::ptr::null(),
                    &mut kind,
                    data.as_mut_ptr(),
                    &mut data_len,
                )
            };
            match status {
                ERROR_SUCCESS => {
                    entries.push(ConfigEntry {
                        name: String::from_utf16_lossy(&name[..name_len as usize]),
                        value: decode_value(kind, &data[..data_len as usize]),
                    });
                    index += 1;
                }
                ERROR_MORE_DATA if data_len as usize > data.len() => {
                    data.resize(data_len as usize, 0)
                }
                ERROR_NO_MORE_ITEMS => break,
                other => {
                    log::debug!("stopped enumerating `{}` at value {index}: error {other}", self.subkey);
                    break;
                }
            }
        }
        Ok(entries)
    }
}
