//! Field checks shared by the services. Each returns the human-readable
//! message that ends up in the 400 response.

pub const MAX_USERNAME_LEN: usize = 30;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_BODY_LEN: usize = 1000;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Rejects blank values and values longer than `max_len` characters.
/// Returns the value trimmed.
pub fn required_text(field: &str, value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required."));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} cannot be longer than {max_len} characters."));
    }
    Ok(trimmed.to_string())
}

/// Out-of-range ratings are rejected, never clamped.
pub fn rating(value: i32) -> Result<i32, String> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(format!("Rating must be {MIN_RATING}..{MAX_RATING}."))
    }
}

pub fn email(value: &str) -> Result<&str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err("Invalid email.".to_string());
    }
    Ok(trimmed)
}

/// Accepts an absolute `http`/`https` URL with a host. Blank means no URL.
pub fn optional_url(value: Option<&str>) -> Result<Option<String>, String> {
    let raw = match value.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let parsed = url::Url::parse(raw).map_err(|e| format!("Invalid image URL: {e}."))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("Image URL must use http or https.".to_string());
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("Image URL must include a host.".to_string());
    }

    Ok(Some(parsed.as_str().to_string()))
}
