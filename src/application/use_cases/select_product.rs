use crate::application::dto::{ResolvedCatalog, Selection, SelectionMode};
use crate::ports::outbound::{ProgressReporter, UserPrompt};
use crate::shared::error::FetchError;
use crate::shared::Result;

/// SelectProductUseCase - picks the product to install
///
/// Interactive mode asks the operator for a menu number; automatic mode
/// applies a [`SelectionPolicy`](crate::installer_media::policies::SelectionPolicy).
/// With `validate`, a manual choice that is not compatible with this
/// machine is rejected.
pub struct SelectProductUseCase<UP, PR> {
    prompt: UP,
    progress_reporter: PR,
}

impl<UP, PR> SelectProductUseCase<UP, PR>
where
    UP: UserPrompt,
    PR: ProgressReporter,
{
    pub fn new(prompt: UP, progress_reporter: PR) -> Self {
        Self {
            prompt,
            progress_reporter,
        }
    }

    pub fn execute(
        &self,
        resolved: &ResolvedCatalog,
        mode: &SelectionMode,
        validate: bool,
        include_betas: bool,
    ) -> Result<Selection> {
        match mode {
            SelectionMode::Auto(policy) => {
                let chosen = policy.select(
                    &resolved.products,
                    &resolved.verdicts,
                    &resolved.machine,
                    include_betas,
                );
                match chosen {
                    Some(product) => {
                        self.progress_reporter.report(&format!(
                            "Automatically selected {} ({}) by {}",
                            product.product_key,
                            product.display_title(),
                            policy.describe()
                        ));
                        Ok(Selection::Chosen(product.product_key.clone()))
                    }
                    None => {
                        self.progress_reporter.report_error(&format!(
                            "No compatible product matches {}",
                            policy.describe()
                        ));
                        Ok(Selection::NoMatch)
                    }
                }
            }
            SelectionMode::Interactive => self.ask(resolved, validate),
        }
    }

    fn ask(&self, resolved: &ResolvedCatalog, validate: bool) -> Result<Selection> {
        let count = resolved.products.len();
        let answer = self
            .prompt
            .ask(&format!("\nChoose a product to download (1-{}): ", count))?;

        let Some(key) = parse_menu_choice(&answer, count).and_then(|n| resolved.key_at(n)) else {
            self.progress_reporter.report("Exiting.");
            return Ok(Selection::Cancelled);
        };

        if validate {
            if let Some(verdict) = resolved.verdict(key).filter(|v| !v.is_compatible()) {
                return Err(FetchError::Selection {
                    message: format!(
                        "Invalid product selected: {} is not supported on this machine ({})",
                        key, verdict
                    ),
                }
                .into());
            }
        }
        Ok(Selection::Chosen(key.to_string()))
    }
}

/// Parses a 1-based menu answer; `None` for anything outside `1..=count`.
pub fn parse_menu_choice(answer: &str, count: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer_media::domain::{
        CatalogTree, CompatibilityVerdict, MachineIdentity, NormalizedProduct,
    };
    use crate::installer_media::policies::SelectionPolicy;
    use indexmap::IndexMap;
    use std::cell::RefCell;

    struct FixedPrompt(&'static str);

    impl UserPrompt for FixedPrompt {
        fn ask(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct CapturingReporter {
        messages: RefCell<Vec<String>>,
    }

    impl ProgressReporter for CapturingReporter {
        fn report(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_string());
        }
        fn report_completion(&self, _message: &str) {}
    }

    fn product(key: &str, version: &str, build: &str) -> NormalizedProduct {
        let mut product = NormalizedProduct::new(key);
        product.title = Some("macOS Ventura".to_string());
        product.version = Some(version.to_string());
        product.build = Some(build.to_string());
        product
    }

    fn resolved() -> ResolvedCatalog {
        let mut products = IndexMap::new();
        products.insert("001-11111".to_string(), product("001-11111", "13.1", "22C65"));
        products.insert("002-22222".to_string(), product("002-22222", "12.6", "21G115"));
        let mut verdicts = IndexMap::new();
        verdicts.insert("001-11111".to_string(), CompatibilityVerdict::Compatible);
        verdicts.insert(
            "002-22222".to_string(),
            CompatibilityVerdict::IncompatibleOlderOSRequired,
        );
        ResolvedCatalog {
            catalog_url: "https://example.com/index.sucatalog".to_string(),
            seed_program: None,
            catalog: CatalogTree::default(),
            machine: MachineIdentity::new("Mac14,2", "", "13.0", "22A380", false),
            products,
            verdicts,
        }
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("2\n", 3), Some(2));
        assert_eq!(parse_menu_choice(" 1 ", 3), Some(1));
        assert_eq!(parse_menu_choice("0", 3), None);
        assert_eq!(parse_menu_choice("4", 3), None);
        assert_eq!(parse_menu_choice("q", 3), None);
        assert_eq!(parse_menu_choice("", 3), None);
    }

    #[test]
    fn test_interactive_choice() {
        let use_case = SelectProductUseCase::new(FixedPrompt("1"), CapturingReporter::default());
        let selection = use_case
            .execute(&resolved(), &SelectionMode::Interactive, false, false)
            .unwrap();
        assert_eq!(selection, Selection::Chosen("001-11111".to_string()));
    }

    #[test]
    fn test_invalid_answer_cancels() {
        let reporter = CapturingReporter::default();
        let use_case = SelectProductUseCase::new(FixedPrompt("abc"), reporter);
        let selection = use_case
            .execute(&resolved(), &SelectionMode::Interactive, false, false)
            .unwrap();
        assert_eq!(selection, Selection::Cancelled);
        assert_eq!(*use_case.progress_reporter.messages.borrow(), vec!["Exiting."]);
    }

    #[test]
    fn test_validate_rejects_incompatible_choice() {
        let use_case = SelectProductUseCase::new(FixedPrompt("2"), CapturingReporter::default());
        let err = use_case
            .execute(&resolved(), &SelectionMode::Interactive, true, false)
            .unwrap_err();
        assert!(err.to_string().contains("002-22222"));

        let selection = use_case
            .execute(&resolved(), &SelectionMode::Interactive, false, false)
            .unwrap();
        assert_eq!(selection, Selection::Chosen("002-22222".to_string()));
    }

    #[test]
    fn test_auto_selection() {
        let use_case = SelectProductUseCase::new(FixedPrompt(""), CapturingReporter::default());
        let selection = use_case
            .execute(
                &resolved(),
                &SelectionMode::Auto(SelectionPolicy::LowestBuild),
                false,
                false,
            )
            .unwrap();
        assert_eq!(selection, Selection::Chosen("001-11111".to_string()));

        let selection = use_case
            .execute(
                &resolved(),
                &SelectionMode::Auto(SelectionPolicy::ExactVersion("12.6".to_string())),
                false,
                false,
            )
            .unwrap();
        assert_eq!(selection, Selection::NoMatch);
    }
}
