use super::ApiError;

pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {resource} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("product", 1).unwrap(), 1);
        assert!(validate_id("product", 12345).is_ok());
        assert!(validate_id("product", 0).is_err());
        assert!(validate_id("review", -1).is_err());
    }
}
