//! Admin password management.

use m5_core::AdminPassword;
use m5_showcase::services::Showcase;

use super::CliError;

/// Replace the admin password, keeping the site settings.
///
/// # Errors
///
/// Returns an error if the password is empty or could not be written.
pub fn set(showcase: &mut Showcase, password: String) -> Result<(), CliError> {
    let password = AdminPassword::new(password)?;
    let settings = showcase.settings().clone();
    showcase.save_settings(settings, Some(password))?;
    tracing::info!("Admin password updated");
    Ok(())
}
