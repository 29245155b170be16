use alchemy_core::config::load_effect_catalog;
use alchemy_core::{
    find_possible_combinations, BrewSettings, Dlc, EffectCatalog, Ingredient, PotionBuilder,
    ValuationConstants,
};
use ingredients_core::{IngredientRegistry, SortOrder};
use std::io;
use tracing::Dispatch;

use crate::config::WorkbenchConfig;
use crate::message::{CalculateRequest, CalculationResult, IngredientSummary, Request, Response};
use crate::WorkbenchError;

/// Serves worker requests against one ingredient registry
///
/// Logging goes to the dispatch supplied at construction, scoped to each
/// request, so the host decides where engine diagnostics end up.
#[derive(Debug)]
pub struct Workbench {
    registry: IngredientRegistry,
    constants: ValuationConstants,
    default_order: SortOrder,
    dispatch: Dispatch,
}

impl Workbench {
    /// Create a workbench logging to the caller's current default dispatcher
    pub fn new(registry: IngredientRegistry, constants: ValuationConstants) -> Self {
        Workbench {
            registry,
            constants,
            default_order: SortOrder::Ascending,
            dispatch: tracing::dispatcher::get_default(|current| current.clone()),
        }
    }

    /// Build a workbench from configuration, falling back to bundled data
    ///
    /// A configured ingredient directory must exist.
    pub fn from_config(config: &WorkbenchConfig) -> Result<Self, WorkbenchError> {
        let catalog = match &config.effects_file {
            Some(path) => load_effect_catalog(path)?,
            None => EffectCatalog::bundled()?,
        };
        let registry = match &config.ingredients_dir {
            Some(dir) if !dir.is_dir() => {
                return Err(WorkbenchError::Ingredients(ingredients_core::ConfigError::Io {
                    error: io::Error::new(io::ErrorKind::NotFound, "ingredient directory not found"),
                    path: Some(dir.clone()),
                }));
            }
            Some(dir) => IngredientRegistry::load(dir, &catalog)?,
            None => IngredientRegistry::bundled(&catalog)?,
        };

        Ok(Self::new(registry, config.valuation.clone()).with_default_order(config.default_order))
    }

    /// Route logging to a specific dispatcher
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_default_order(mut self, order: SortOrder) -> Self {
        self.default_order = order;
        self
    }

    pub fn registry(&self) -> &IngredientRegistry {
        &self.registry
    }

    /// Handle one request; failures become `Response::Error`
    pub fn handle(&self, request: Request) -> Response {
        tracing::dispatcher::with_default(&self.dispatch, || match self.try_handle(request) {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, "request failed");
                Response::Error {
                    error: error.to_string(),
                }
            }
        })
    }

    /// Decode a JSON request, handle it and encode the response
    pub fn handle_json(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(error) => Response::Error {
                error: WorkbenchError::Decode(error).to_string(),
            },
        };
        encode(&response)
    }

    fn try_handle(&self, request: Request) -> Result<Response, WorkbenchError> {
        match request {
            Request::Search { query, dlcs, order } => Ok(Response::SearchResults {
                ingredients: self.search(&query, dlcs.as_deref(), order),
            }),
            Request::Populate { dlcs, order } => Ok(Response::Populated {
                ingredients: self.populate(dlcs.as_deref(), order),
            }),
            Request::Calculate(request) => Ok(Response::Calculated {
                result: self.calculate(&request)?,
            }),
        }
    }

    /// Prefix search, optionally restricted to some DLCs
    pub fn search(&self, query: &str, dlcs: Option<&[Dlc]>, order: Option<SortOrder>) -> Vec<IngredientSummary> {
        let found = self
            .registry
            .search_prefix(query, order.unwrap_or(self.default_order));
        tracing::debug!(query, found = found.len(), "search");
        summarize(found, dlcs)
    }

    /// Every ingredient, optionally restricted to some DLCs
    pub fn populate(&self, dlcs: Option<&[Dlc]>, order: Option<SortOrder>) -> Vec<IngredientSummary> {
        let order = order.unwrap_or(self.default_order);
        let found = match dlcs {
            Some(dlcs) => self.registry.in_dlcs(dlcs, order),
            None => self.registry.all(order),
        };
        summarize(found, None)
    }

    /// Mix and value the requested ingredients
    pub fn calculate(&self, request: &CalculateRequest) -> Result<CalculationResult, WorkbenchError> {
        if request.ingredients.len() < 2 {
            return Err(WorkbenchError::TooFewIngredients(request.ingredients.len()));
        }

        let settings = BrewSettings {
            skill: request.skill,
            alchemist_perk_level: request.perk_level()?,
            physician: request.physician,
            benefactor: request.benefactor,
            poisoner: request.poisoner,
            fortify_alchemy: request.fortify_alchemy,
        };
        let ingredients = self.registry.resolve(&request.ingredients)?;
        let combinations = find_possible_combinations(&ingredients)?;
        let builder = PotionBuilder::with_constants(settings, self.constants.clone());

        tracing::debug!(
            ingredients = ?request.ingredients,
            combinations = combinations.len(),
            "calculate"
        );

        if ingredients.len() == 2 {
            let effects = combinations.values().next().map(Vec::as_slice).unwrap_or(&[]);
            return Ok(CalculationResult::Single(builder.brew(effects)));
        }

        Ok(CalculationResult::Combinations(
            combinations
                .iter()
                .map(|(key, effects)| (key.clone(), builder.brew(effects)))
                .collect(),
        ))
    }
}

fn summarize(found: Vec<&Ingredient>, dlcs: Option<&[Dlc]>) -> Vec<IngredientSummary> {
    found
        .into_iter()
        .filter(|ingredient| dlcs.map_or(true, |dlcs| dlcs.contains(&ingredient.dlc())))
        .map(IngredientSummary::from)
        .collect()
}

/// Encode a response as a single JSON line
pub fn encode(response: &Response) -> String {
    serde_json::to_string(response)
        .unwrap_or_else(|_| r#"{"type":"error","error":"failed to encode response"}"#.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbench() -> Workbench {
        Workbench::from_config(&WorkbenchConfig::default()).unwrap()
    }

    #[test]
    fn test_two_ingredients_single_potion() {
        let result = workbench()
            .calculate(&CalculateRequest::new(["Blue Mountain Flower", "Wheat"]))
            .unwrap();
        match result {
            CalculationResult::Single(potion) => {
                assert!(potion.did_succeed);
                assert_eq!(potion.name, "Potion of Restore Health");
                assert!(potion.effects.as_deref().is_some_and(|e| e.contains("Health")));
            }
            other => panic!("Expected single potion, got {:?}", other),
        }
    }

    #[test]
    fn test_two_unrelated_ingredients_fail() {
        let result = workbench()
            .calculate(&CalculateRequest::new(["Wheat", "Snowberries"]))
            .unwrap();
        match result {
            CalculationResult::Single(potion) => assert!(!potion.did_succeed),
            other => panic!("Expected single potion, got {:?}", other),
        }
    }

    #[test]
    fn test_three_ingredients_combinations() {
        let result = workbench()
            .calculate(&CalculateRequest::new(["Wheat", "Blue Mountain Flower", "Giant's Toe"]))
            .unwrap();
        match result {
            CalculationResult::Combinations(potions) => {
                let keys: Vec<&str> = potions.keys().map(|k| k.as_str()).collect();
                assert_eq!(
                    keys,
                    vec![
                        "Blue Mountain Flower,Giant's Toe",
                        "Blue Mountain Flower,Giant's Toe,Wheat",
                        "Blue Mountain Flower,Wheat",
                        "Giant's Toe,Wheat",
                    ]
                );
                assert!(potions.values().all(|p| p.did_succeed));
            }
            other => panic!("Expected combinations, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_ingredients() {
        let bench = workbench();
        let response = bench.handle(Request::Calculate(CalculateRequest::new(["Wheat"])));
        assert_eq!(
            response,
            Response::Error {
                error: "At least 2 ingredients are required, got 1".to_string()
            }
        );
    }

    #[test]
    fn test_too_many_ingredients() {
        let bench = workbench();
        let response = bench.handle(Request::Calculate(CalculateRequest::new([
            "Wheat", "Garlic", "Salt Pile", "Nirnroot",
        ])));
        assert!(matches!(response, Response::Error { .. }));
    }

    #[test]
    fn test_unknown_ingredient() {
        let response = workbench().handle(Request::Calculate(CalculateRequest::new(["Wheat", "Dragon Scale"])));
        assert_eq!(
            response,
            Response::Error {
                error: "Unknown ingredient: Dragon Scale".to_string()
            }
        );
    }

    #[test]
    fn test_search_with_dlc_filter() {
        let bench = workbench();
        let all = bench.search("a", None, None);
        assert!(all.iter().any(|i| i.dlc == Dlc::Dragonborn));
        assert!(all.iter().any(|i| i.dlc == Dlc::Dawnguard));

        let dawnguard = bench.search("a", Some(&[Dlc::Dawnguard]), None);
        let names: Vec<&str> = dawnguard.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ancestor Moth Wing"]);
    }

    #[test]
    fn test_populate_order() {
        let bench = workbench().with_default_order(SortOrder::Descending);
        let listed: Vec<IngredientSummary> = bench.populate(None, None);
        assert_eq!(listed.len(), bench.registry().len());
        assert!(listed.windows(2).all(|w| w[0].name > w[1].name));

        let ascending = bench.populate(Some(&[Dlc::Hearthfire]), Some(SortOrder::Ascending));
        assert_eq!(ascending.len(), 1);
        assert_eq!(ascending[0].name, "Hawk's Egg");
        assert_eq!(ascending[0].effects.len(), 4);
    }

    #[test]
    fn test_missing_ingredient_dir_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = WorkbenchConfig {
            ingredients_dir: Some(dir.path().join("ingredeints")),
            ..Default::default()
        };
        match Workbench::from_config(&config) {
            Err(WorkbenchError::Ingredients(ingredients_core::ConfigError::Io { error, path })) => {
                assert_eq!(error.kind(), io::ErrorKind::NotFound);
                assert_eq!(path, Some(dir.path().join("ingredeints")));
            }
            other => panic!("Expected missing directory error, got {:?}", other.map(|_| ())),
        }

        // An existing but empty directory is still accepted
        let config = WorkbenchConfig {
            ingredients_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(Workbench::from_config(&config).unwrap().registry().is_empty());
    }

    #[test]
    fn test_handle_json_decode_error() {
        let reply = workbench().handle_json("{not json");
        let response: Response = serde_json::from_str(&reply).unwrap();
        assert!(matches!(response, Response::Error { ref error } if error.starts_with("Malformed request")));
    }
}
