use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food::{
        category::categorize,
        entities::FoodDetails,
        ports::{FoodCatalog, FoodService},
    },
    prediction::ports::{PredictionLog, RiskClassifier},
};

impl<FC, RC, PL> FoodService for Service<FC, RC, PL>
where
    FC: FoodCatalog,
    RC: RiskClassifier,
    PL: PredictionLog,
{
    fn get_food(&self, name: &str) -> Result<FoodDetails, CoreError> {
        let food = self.food_catalog.find(name)?;
        let category = categorize(&food.name);

        Ok(FoodDetails { food, category })
    }

    fn search_foods(&self, term: Option<String>) -> Vec<String> {
        self.food_catalog.search(term)
    }
}
