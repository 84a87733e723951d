//! Raw `localStorage` access.
//!
//! Values are strings; encoding and decoding belong to the state module that
//! owns the key. Storage being unavailable (private mode, quota) is logged
//! and otherwise treated like an empty slot.

/// Read the string stored under `key`.
pub fn read(key: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let storage = local_storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("localStorage read of {key} failed: {err:?}");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Store `value` under `key`.
pub fn write(key: &str, value: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("localStorage write of {key} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

/// Delete `key`.
pub fn remove(key: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Err(err) = storage.remove_item(key) {
            log::warn!("localStorage remove of {key} failed: {err:?}");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}
