//! Resolution of API secrets from the config file or the system keyring.

use keyring::Entry;

const ARTSY_SERVICE_NAME: &str = "artist-enrichment.artsy";
const GUARDIAN_SERVICE_NAME: &str = "artist-enrichment.guardian";
const ARTSY_SECRET_ACCOUNT: &str = "client_secret";
const GUARDIAN_KEY_ACCOUNT: &str = "api_key";

fn keyring_entry(service: &str, account: &str) -> Result<Entry, String> {
    Entry::new(service, account)
        .map_err(|err| format!("failed to create keyring entry '{service}/{account}': {err}"))
}

fn keyring_error_hint(error: &str) -> Option<String> {
    if error.contains("org.freedesktop.DBus.Error.ServiceUnknown") {
        return Some(
            "no Secret Service provider is available. Start GNOME Keyring or KeePassXC Secret Service, or set the secret in the config file."
                .to_string(),
        );
    }
    None
}

fn load_keyring_secret(service: &str, account: &str) -> Result<Option<String>, String> {
    let entry = keyring_entry(service, account)?;
    match entry.get_password() {
        Ok(secret) => Ok(Some(secret)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => {
            let base = format!("failed to load '{service}/{account}' from system keyring: {err}");
            Err(match keyring_error_hint(&base) {
                Some(hint) => format!("{base}. Hint: {hint}"),
                None => base,
            })
        }
    }
}

/// Config value if set, otherwise `fallback`; errors name `config_key` when neither has it.
pub fn resolve_secret<F>(configured: &str, config_key: &str, fallback: F) -> Result<String, String>
where
    F: FnOnce() -> Result<Option<String>, String>,
{
    let trimmed = configured.trim();
    if !trimmed.is_empty() {
        return Ok(trimmed.to_string());
    }
    match fallback()? {
        Some(secret) if !secret.trim().is_empty() => Ok(secret.trim().to_string()),
        _ => Err(format!(
            "{config_key} is not set in the config file or the system keyring"
        )),
    }
}

/// Artsy client secret from config, falling back to the keyring.
pub fn artsy_client_secret(configured: &str) -> Result<String, String> {
    resolve_secret(configured, "artsy.client_secret", || {
        load_keyring_secret(ARTSY_SERVICE_NAME, ARTSY_SECRET_ACCOUNT)
    })
}

/// Guardian API key from config, falling back to the keyring.
pub fn guardian_api_key(configured: &str) -> Result<String, String> {
    resolve_secret(configured, "guardian.api_key", || {
        load_keyring_secret(GUARDIAN_SERVICE_NAME, GUARDIAN_KEY_ACCOUNT)
    })
}
