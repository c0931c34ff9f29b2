use crate::models::Settings;

/// Repository interface for the persisted settings blob.
pub trait SettingsRepository: super::Repository {
    /// Retrieve the stored settings, returning Option::None if none were ever stored.
    fn get_settings(&self) -> impl Future<Output = Result<Option<Settings>, Self::Error>> + Send;

    /// Replace the stored settings as a whole.
    fn update_settings(
        &self,
        settings: Settings,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
