use crate::shared::AppError;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_COMPANY_LEN: usize = 100;

/// Validated and normalized player input, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
}

/// Validates raw player input and applies normalization.
///
/// Fields are trimmed, checked for presence and maximum length, and the
/// first and last name are capitalized ("mArco" -> "Marco"). The company
/// name is trimmed but kept as supplied.
pub fn validate_new_player(first: &str, last: &str, company: &str) -> Result<NewPlayer, AppError> {
    let first = first.trim();
    let last = last.trim();
    let company = company.trim();

    if first.is_empty() {
        return Err(AppError::Validation("First name is required".to_string()));
    }
    if last.is_empty() {
        return Err(AppError::Validation("Last name is required".to_string()));
    }
    if company.is_empty() {
        return Err(AppError::Validation("Company is required".to_string()));
    }
    if first.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "First name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }
    if last.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Last name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }
    if company.chars().count() > MAX_COMPANY_LEN {
        return Err(AppError::Validation(format!(
            "Company cannot exceed {} characters",
            MAX_COMPANY_LEN
        )));
    }

    Ok(NewPlayer {
        first_name: capitalize(first),
        last_name: capitalize(last),
        company: company.to_string(),
    })
}

/// Uppercases the first letter and lowercases the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
