// forms.rs
use crate::error::AppError;
use crate::models::{CreatePollForm, CreatePollInput};

pub const QUESTION_REQUIRED: &str = "Question is required";
pub const OPTIONS_REQUIRED: &str = "At least 2 options are required";

/// Trim the question and each submitted option, drop options that are
/// blank after trimming, and reject the form if no question or fewer
/// than two options survive. Pure; performs no store access.
pub fn parse_create_poll(form: &CreatePollForm) -> Result<CreatePollInput, AppError> {
    let question = form.question.trim().to_string();

    let options: Vec<String> = [&form.option1, &form.option2, &form.option3]
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if question.is_empty() {
        return Err(AppError::Validation(QUESTION_REQUIRED));
    }
    if options.len() < 2 {
        return Err(AppError::Validation(OPTIONS_REQUIRED));
    }

    Ok(CreatePollInput { question, options })
}
