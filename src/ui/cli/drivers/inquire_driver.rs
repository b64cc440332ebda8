use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{CustomType, Select, Text, validator::Validation};

pub struct InquireDriver;

impl PromptDriver for InquireDriver {
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_f64(&self, title: &str, help: &str, default: f64, min: f64, max: f64) -> Result<f64> {
        let value = CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_validator(move |x: &f64| {
                if x.is_finite() && *x >= min && *x <= max {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        format!("Must be between {min} and {max}").into(),
                    ))
                }
            })
            .prompt()?;
        Ok(value)
    }

    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize> {
        let picked = Select::new(title, options.to_vec())
            .with_help_message(help)
            .raw_prompt()?;
        Ok(picked.index)
    }
}
