#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mesa_catalog::{
    ArticleDraft, ArticleType, Catalog, CatalogBuilder, Clock, Difficulty, RecipeDraft,
    TaxonomyDraft,
};

/// Clock that moves one minute forward every time it is read
pub struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::minutes(tick)
    }
}

pub fn builder() -> CatalogBuilder {
    Catalog::builder().clock(Arc::new(StepClock::new()))
}

pub async fn empty_catalog() -> Catalog {
    builder().build().await.unwrap()
}

pub fn recipe_draft(
    title: &str,
    region: &str,
    category: &str,
    difficulty: Difficulty,
    prep_time: u32,
    cook_time: u32,
    servings: u32,
) -> RecipeDraft {
    let mut draft = RecipeDraft::new(title, region, category);
    draft.difficulty = difficulty;
    draft.prep_time = prep_time;
    draft.cook_time = cook_time;
    draft.servings = servings;
    draft.images.featured = format!("recipes/{}.jpg", region);
    draft
}

pub fn article_draft(title: &str, article_type: ArticleType, region: &str) -> ArticleDraft {
    let mut draft = ArticleDraft::new(title, article_type);
    draft.region = region.to_string();
    draft.images.featured = "articles/cover.jpg".to_string();
    draft
}

/// Regions, categories and tags used across the seed content
pub async fn seed_taxonomy(catalog: &Catalog) {
    for (name, description) in [
        ("Mexico", "Rich indigenous and Spanish colonial influences."),
        ("Italy", "Regional diversity and fresh, simple ingredients."),
        ("India", "Complex spice blends and diverse vegetarian traditions."),
        ("Thailand", "Balance of sweet, sour, salty, and spicy flavors."),
        ("France", "Sophisticated culinary techniques."),
    ] {
        catalog
            .create_region(TaxonomyDraft::new(name).with_description(description))
            .await
            .unwrap();
    }
    for name in ["Main Dishes", "Appetizers", "Desserts", "Soups", "Street Food"] {
        catalog
            .create_category(TaxonomyDraft::new(name))
            .await
            .unwrap();
    }
    for name in ["Spicy", "Traditional", "Comfort Food", "Healthy"] {
        catalog.create_tag(TaxonomyDraft::new(name)).await.unwrap();
    }
}

/// The five seed recipes, created oldest to newest in this order
pub async fn seed_recipes(catalog: &Catalog) {
    let mut mole = recipe_draft(
        "Traditional Mole Poblano",
        "mexico",
        "main-dishes",
        Difficulty::Hard,
        60,
        120,
        8,
    );
    mole.description = "A complex, rich sauce with over 20 ingredients including chocolate."
        .to_string();
    mole.ingredients = "Mulato chiles, ancho chiles, Mexican chocolate, sesame seeds".to_string();
    mole.tags = vec!["traditional".to_string(), "spicy".to_string()];

    let mut risotto = recipe_draft(
        "Authentic Risotto alla Milanese",
        "italy",
        "main-dishes",
        Difficulty::Medium,
        10,
        25,
        4,
    );
    risotto.description = "Creamy, golden risotto infused with saffron.".to_string();
    risotto.ingredients = "Carnaroli rice, saffron threads, beef marrow, Parmigiano".to_string();
    risotto.tags = vec!["traditional".to_string(), "comfort-food".to_string()];

    let mut butter_chicken = recipe_draft(
        "Authentic Butter Chicken (Murgh Makhani)",
        "india",
        "main-dishes",
        Difficulty::Medium,
        30,
        45,
        6,
    );
    butter_chicken.description = "Tender chicken in a rich, creamy tomato-based sauce.".to_string();
    butter_chicken.ingredients = "Chicken thighs, yogurt, garam masala, butter, cream".to_string();
    butter_chicken.tags = vec!["comfort-food".to_string()];

    let mut tom_kha = recipe_draft(
        "Tom Kha Gai (Thai Coconut Chicken Soup)",
        "thailand",
        "soups",
        Difficulty::Easy,
        15,
        20,
        4,
    );
    tom_kha.description = "Aromatic coconut soup with galangal and lemongrass.".to_string();
    tom_kha.ingredients = "Coconut milk, galangal, lemongrass, kaffir lime leaves".to_string();
    tom_kha.tags = vec!["healthy".to_string(), "spicy".to_string()];

    let mut coq_au_vin = recipe_draft(
        "Classic French Coq au Vin",
        "france",
        "main-dishes",
        Difficulty::Medium,
        30,
        90,
        6,
    );
    coq_au_vin.description = "Chicken braised in red wine with mushrooms and pearl onions."
        .to_string();
    coq_au_vin.ingredients = "Chicken, Burgundy wine, lardons, mushrooms, pearl onions".to_string();
    coq_au_vin.tags = vec!["traditional".to_string()];

    for draft in [mole, risotto, butter_chicken, tom_kha, coq_au_vin] {
        catalog.create_recipe(draft).await.unwrap();
    }
}

/// A catalog holding the seed taxonomy and the five seed recipes
pub async fn seeded_catalog() -> Catalog {
    let catalog = empty_catalog().await;
    seed_taxonomy(&catalog).await;
    seed_recipes(&catalog).await;
    catalog
}
