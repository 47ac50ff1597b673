use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Vegetables,
    Lentils,
    Grains,
    Bread,
    Dairy,
    Fruits,
    Snacks,
    Desserts,
    Beverages,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Lentils => "lentils",
            FoodCategory::Grains => "grains",
            FoodCategory::Bread => "bread",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Fruits => "fruits",
            FoodCategory::Snacks => "snacks",
            FoodCategory::Desserts => "desserts",
            FoodCategory::Beverages => "beverages",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DESSERT_KEYWORDS: &[&str] = &[
    "cake", "ice cream", "jamun", "sweet", "chocolate", "caramel", "kheer", "halwa", "laddu",
    "barfi", "rasgulla", "kulfi", "pastry", "cookie", "biscuit", "mithai", "gulab", "jalebi",
    "rasmalai", "payasam", "pudding", "dessert", "candy", "toffee",
];

const VEGETABLE_KEYWORDS: &[&str] = &[
    "vegetables", "cabbage", "cauliflower", "spinach", "broccoli", "beans", "carrot", "beetroot",
    "tomato", "cucumber", "onion", "capsicum", "bell pepper", "leafy", "greens", "bhindi", "okra",
    "brinjal", "eggplant", "gourd", "pumpkin", "radish", "palak", "methi", "curry", "sabzi",
    "subji", "fry", "stir",
];

const LENTIL_KEYWORDS: &[&str] = &[
    "dal", "moong", "masoor", "arhar", "toor", "chana", "urad", "lentil", "pulse", "gram",
    "bengal",
];

const GRAIN_KEYWORDS: &[&str] = &[
    "rice", "biryani", "pulao", "khichdi", "poha", "upma", "oats", "quinoa", "barley", "wheat",
    "grain",
];

const BREAD_KEYWORDS: &[&str] = &[
    "roti", "chapati", "naan", "paratha", "bread", "puri", "kulcha", "bhatura", "dosa", "uttapam",
    "idli",
];

const DAIRY_KEYWORDS: &[&str] = &[
    "milk", "yogurt", "curd", "lassi", "buttermilk", "cheese", "paneer", "ghee", "butter",
    "cream", "dairy",
];

const FRUIT_KEYWORDS: &[&str] = &[
    "apple", "banana", "orange", "mango", "grape", "papaya", "pineapple", "watermelon", "melon",
    "berry", "fruit", "juice", "smoothie",
];

const SNACK_KEYWORDS: &[&str] = &[
    "samosa", "pakora", "bhaji", "vada", "kachori", "chaat", "namkeen", "mixture", "chips",
    "crackers", "fried", "deep fried", "snack",
];

const BEVERAGE_KEYWORDS: &[&str] = &[
    "tea", "coffee", "drink", "beverage", "shake", "cola", "soda", "water", "soup", "broth",
];

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| name.contains(keyword))
}

/// Classify a dish by keyword matching on its lowercased name.
///
/// Categories are tried in a fixed priority order and the first match wins.
/// Vegetables never claim a dish that also mentions rice. Unmatched dishes
/// fall back to vegetables, the least restrictive category.
///
/// There is no meat category: "Chicken curry" or "Fish fry" land in vegetables
/// through "curry" and "fry", so without a model they get the vegetable profile.
pub fn categorize(food_name: &str) -> FoodCategory {
    let name = food_name.to_lowercase();

    if matches_any(&name, DESSERT_KEYWORDS) {
        FoodCategory::Desserts
    } else if matches_any(&name, VEGETABLE_KEYWORDS) && !name.contains("rice") {
        FoodCategory::Vegetables
    } else if matches_any(&name, LENTIL_KEYWORDS) {
        FoodCategory::Lentils
    } else if matches_any(&name, GRAIN_KEYWORDS) {
        FoodCategory::Grains
    } else if matches_any(&name, BREAD_KEYWORDS) {
        FoodCategory::Bread
    } else if matches_any(&name, DAIRY_KEYWORDS) {
        FoodCategory::Dairy
    } else if matches_any(&name, FRUIT_KEYWORDS) {
        FoodCategory::Fruits
    } else if matches_any(&name, SNACK_KEYWORDS) {
        FoodCategory::Snacks
    } else if matches_any(&name, BEVERAGE_KEYWORDS) {
        FoodCategory::Beverages
    } else {
        FoodCategory::Vegetables
    }
}
