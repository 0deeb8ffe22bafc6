use super::prelude::*;

pub fn get_app_setting<R: AppSettingRepo>(repo: &R, key: &str) -> Result<AppSetting> {
    Ok(repo.get_setting(key)?)
}

/// Stores a setting value, preserving `created_at` for existing keys.
pub fn put_app_setting<R: AppSettingRepo>(
    repo: &R,
    key: &str,
    value: serde_json::Value,
) -> Result<AppSetting> {
    let now = Timestamp::now();
    let created_at = match repo.get_setting(key) {
        Ok(existing) => existing.created_at,
        Err(crate::repositories::Error::NotFound) => now,
        Err(err) => return Err(err.into()),
    };
    let setting = AppSetting {
        key: key.to_owned(),
        value,
        created_at,
        updated_at: now,
    };
    repo.put_setting(setting.clone())?;
    Ok(setting)
}
