use crate::CoreError;

/// Boundary check applied before a listing is fetched.
///
/// The address must be non-blank and mention `allowed_domain`. This is a
/// substring test, matching how listing links are pasted by users (mobile,
/// `articulo.` and `www.` hosts all qualify).
///
/// # Errors
///
/// Returns [`CoreError::MissingUrl`] for a missing or blank address and
/// [`CoreError::ForeignDomain`] when the domain does not appear in it.
pub fn validate_listing_url<'a>(
    url: Option<&'a str>,
    allowed_domain: &str,
) -> Result<&'a str, CoreError> {
    let url = url.map(str::trim).filter(|u| !u.is_empty()).ok_or(CoreError::MissingUrl)?;

    if !url.contains(allowed_domain) {
        return Err(CoreError::ForeignDomain {
            url: url.to_string(),
            allowed_domain: allowed_domain.to_string(),
        });
    }

    Ok(url)
}
