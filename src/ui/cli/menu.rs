use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{EnumIter, EnumMessage, IntoStaticStr};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumMessage, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum MenuAction {
    #[strum(
        message = "Adjust input",
        detailed_message = "Change one weather or location control."
    )]
    AdjustInput,

    #[strum(
        message = "Predict Outcome",
        detailed_message = "Scale the current inputs and run the classifier."
    )]
    Predict,

    #[strum(
        message = "Export map",
        detailed_message = "Write the current marker as GeoJSON."
    )]
    ExportMap,

    #[strum(message = "Quit")]
    Quit,
}

/// Menu entry text for every variant, in declaration order.
pub fn menu_items<K>() -> Vec<(K, String)>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            // strum falls back to `message` when no detailed message is set
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() || desc == label {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            (k, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_follow_declaration_order() {
        let items = menu_items::<MenuAction>();
        let kinds: Vec<MenuAction> = items.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                MenuAction::AdjustInput,
                MenuAction::Predict,
                MenuAction::ExportMap,
                MenuAction::Quit
            ]
        );
    }

    #[test]
    fn description_is_dimmed_and_optional() {
        let items = menu_items::<MenuAction>();
        assert!(items[1].1.starts_with("Predict Outcome  \x1b[2m\x1b[3m"));
        assert_eq!(items[3].1, "Quit");
        assert!(!items[3].1.contains(DIM_ITALIC));
    }
}
