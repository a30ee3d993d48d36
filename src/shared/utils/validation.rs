use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    /// Catalog ids arrive as path segments; anything non-numeric or non-positive is a 400
    pub fn parse_show_id(raw: &str) -> Result<i32, AppError> {
        let id: i32 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Invalid show id: {}", raw)))?;
        Self::validate_show_id(id)?;
        Ok(id)
    }

    pub fn validate_show_id(id: i32) -> Result<(), AppError> {
        if id <= 0 {
            return Err(AppError::InvalidInput(
                "Show id must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_season_number(season: i32) -> Result<(), AppError> {
        // Season 0 holds specials in the catalog
        if season < 0 {
            return Err(AppError::ValidationError(
                "Season number cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_episode_number(episode: i32) -> Result<(), AppError> {
        if episode <= 0 {
            return Err(AppError::ValidationError(
                "Episode number must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_runtime(runtime: Option<i32>) -> Result<(), AppError> {
        if let Some(minutes) = runtime {
            if minutes < 0 {
                return Err(AppError::ValidationError(
                    "Runtime cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn validate_rating(rating: i16) -> Result<(), AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::ValidationError(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_comment(comment: Option<&str>) -> Result<(), AppError> {
        if let Some(text) = comment {
            if text.chars().count() > 2000 {
                return Err(AppError::ValidationError(
                    "Comment too long (max 2000 characters)".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn validate_item_id(item_id: &str) -> Result<(), AppError> {
        if item_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Item id cannot be empty".to_string(),
            ));
        }
        if item_id.len() > 255 {
            return Err(AppError::ValidationError(
                "Item id too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }
}
