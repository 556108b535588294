//! Submission review.

use std::io::Write;

use m5_core::SubmissionId;
use m5_showcase::services::Showcase;
use m5_showcase::view::render_submissions;

use super::CliError;

/// Print pending submissions, one tab-separated line each.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(showcase: &Showcase, out: &mut impl Write) -> Result<(), CliError> {
    let rows = render_submissions(showcase.submissions().list());
    if rows.is_empty() {
        writeln!(out, "No pending submissions.")?;
    }
    for row in rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.id, row.name, row.creator, row.email, row.price, row.submitted
        )?;
    }
    Ok(())
}

/// Publish the submission with `id`.
///
/// # Errors
///
/// Returns [`CliError::NotFound`] for an unknown id, or an error if the
/// records could not be written.
pub fn approve(showcase: &mut Showcase, id: &str) -> Result<(), CliError> {
    let product = showcase
        .approve_submission(&SubmissionId::new(id))?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(submission = id, product = %product.id, "Product approved and published");
    Ok(())
}

/// Delete the submission with `id`; requires `confirmed`.
///
/// # Errors
///
/// Returns [`CliError::ConfirmationRequired`] without confirmation,
/// [`CliError::NotFound`] for an unknown id, or an error if the queue could
/// not be written.
pub fn reject(showcase: &mut Showcase, id: &str, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired {
            action: "reject a submission",
        });
    }
    let submission = showcase
        .reject_submission(&SubmissionId::new(id))?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, name = %submission.name, "Submission rejected");
    Ok(())
}

fn not_found(id: &str) -> CliError {
    CliError::NotFound {
        kind: "submission",
        id: id.to_string(),
    }
}
