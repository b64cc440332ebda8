use anyhow::Result;

pub trait PromptDriver {
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    /// A number within `[min, max]`.
    fn ask_f64(&self, title: &str, help: &str, default: f64, min: f64, max: f64) -> Result<f64>;
    /// Index into `options` of the chosen entry.
    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize>;
}
