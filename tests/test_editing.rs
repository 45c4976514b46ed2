mod common;

use mesa_catalog::config::{SlugCollision, SlugConfig};
use mesa_catalog::{
    ArticleDraft, ArticleType, CatalogConfig, CatalogError, CatalogStore, Difficulty, RecipeDraft,
    TaxonomyDraft,
};

use common::{article_draft, recipe_draft, seeded_catalog};

const LONG_TITLE: &str =
    "Slow-Braised Oaxacan Black Mole with Toasted Chilhuacle Chiles and Turkey Thighs";

async fn stored(catalog: &mesa_catalog::Catalog, slug: &str) -> mesa_catalog::Recipe {
    catalog.store().recipe(slug).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_meta_fields_back_filled_once() {
    let catalog = seeded_catalog().await;
    let mut draft = recipe_draft(LONG_TITLE, "mexico", "main-dishes", Difficulty::Hard, 45, 180, 10);
    draft.description = "d".repeat(200);
    let created = catalog.create_recipe(draft).await.unwrap();

    assert_eq!(created.meta_title.chars().count(), 60);
    assert!(LONG_TITLE.starts_with(&created.meta_title));
    assert_eq!(created.meta_description, "d".repeat(160));

    let mut edit = RecipeDraft::from(&created);
    edit.title = "Oaxacan Black Mole".to_string();
    edit.description = "Shorter now".to_string();
    let updated = catalog.update_recipe(&created.slug, edit).await.unwrap();

    assert_eq!(updated.meta_title, created.meta_title);
    assert_eq!(updated.meta_description, created.meta_description);

    let mut cleared = RecipeDraft::from(&updated);
    cleared.meta_title.clear();
    let rederived = catalog.update_recipe(&updated.slug, cleared).await.unwrap();
    assert_eq!(rederived.meta_title, "Oaxacan Black Mole");
}

#[tokio::test]
async fn test_explicit_meta_fields_kept() {
    let catalog = seeded_catalog().await;
    let mut draft = recipe_draft("Pozole Rojo", "mexico", "soups", Difficulty::Medium, 30, 150, 8);
    draft.meta_title = "Pozole Rojo | Mesa".to_string();
    let created = catalog.create_recipe(draft).await.unwrap();
    assert_eq!(created.meta_title, "Pozole Rojo | Mesa");
    assert_eq!(created.meta_description, "");
}

#[tokio::test]
async fn test_timestamps_on_update() {
    let catalog = seeded_catalog().await;
    let before = stored(&catalog, "authentic-risotto-alla-milanese").await;
    assert_eq!(before.created_at, before.updated_at);

    let mut edit = RecipeDraft::from(&before);
    edit.servings = 6;
    let after = catalog
        .update_recipe("authentic-risotto-alla-milanese", edit)
        .await
        .unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert!(after.updated_at >= after.created_at);
    assert_eq!(after.servings, 6);
}

#[tokio::test]
async fn test_total_time_with_zero_parts() {
    let catalog = seeded_catalog().await;
    let no_cook = catalog
        .create_recipe(recipe_draft("Guacamole", "mexico", "appetizers", Difficulty::Easy, 10, 0, 4))
        .await
        .unwrap();
    assert_eq!(no_cook.total_time(), 10);

    let instant = catalog
        .create_recipe(recipe_draft("Mango Slices", "india", "desserts", Difficulty::Easy, 0, 0, 2))
        .await
        .unwrap();
    assert_eq!(instant.total_time(), 0);

    let mole = stored(&catalog, "traditional-mole-poblano").await;
    assert_eq!(mole.total_time(), 180);
}

#[tokio::test]
async fn test_slug_survives_title_change() {
    let catalog = seeded_catalog().await;
    let coq = stored(&catalog, "classic-french-coq-au-vin").await;

    let mut edit = RecipeDraft::from(&coq);
    edit.title = "Coq au Vin de Bourgogne".to_string();
    let renamed = catalog
        .update_recipe("classic-french-coq-au-vin", edit)
        .await
        .unwrap();
    assert_eq!(renamed.slug, "classic-french-coq-au-vin");

    let mut cleared = RecipeDraft::from(&renamed);
    cleared.slug.clear();
    let rederived = catalog
        .update_recipe("classic-french-coq-au-vin", cleared)
        .await
        .unwrap();
    assert_eq!(rederived.slug, "coq-au-vin-de-bourgogne");
    assert!(catalog
        .store()
        .recipe("classic-french-coq-au-vin")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_slug_cannot_be_swapped_in_place() {
    let catalog = seeded_catalog().await;
    let coq = stored(&catalog, "classic-french-coq-au-vin").await;
    let mut edit = RecipeDraft::from(&coq);
    edit.slug = "coq".to_string();

    let err = catalog
        .update_recipe("classic-french-coq-au-vin", edit)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[tokio::test]
async fn test_duplicate_title_rejected_by_default() {
    let catalog = seeded_catalog().await;
    let err = catalog
        .create_recipe(recipe_draft(
            "Classic French Coq au Vin",
            "france",
            "main-dishes",
            Difficulty::Hard,
            30,
            90,
            6,
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateSlug { kind: "recipe", ref slug } if slug == "classic-french-coq-au-vin"
    ));
}

#[tokio::test]
async fn test_duplicate_title_suffixed_when_configured() {
    let config = CatalogConfig {
        slugs: SlugConfig {
            collision: SlugCollision::Suffix,
        },
        ..Default::default()
    };
    let catalog = common::builder().config(config).build().await.unwrap();
    common::seed_taxonomy(&catalog).await;
    common::seed_recipes(&catalog).await;

    let draft = recipe_draft(
        "Classic French Coq au Vin",
        "france",
        "main-dishes",
        Difficulty::Hard,
        30,
        90,
        6,
    );
    let second = catalog.create_recipe(draft.clone()).await.unwrap();
    let third = catalog.create_recipe(draft).await.unwrap();
    assert_eq!(second.slug, "classic-french-coq-au-vin-2");
    assert_eq!(third.slug, "classic-french-coq-au-vin-3");
}

#[tokio::test]
async fn test_explicit_slug_used_verbatim() {
    let catalog = seeded_catalog().await;
    let mut draft = recipe_draft("Pad Thai", "thailand", "street-food", Difficulty::Medium, 20, 10, 2);
    draft.slug = "pad-thai-bangkok".to_string();
    let created = catalog.create_recipe(draft).await.unwrap();
    assert_eq!(created.slug, "pad-thai-bangkok");
}

#[tokio::test]
async fn test_padded_explicit_slug_is_trimmed_and_editable() {
    let catalog = seeded_catalog().await;
    let mut draft = recipe_draft("Pad Thai", "thailand", "street-food", Difficulty::Medium, 20, 10, 2);
    draft.slug = " pad-thai ".to_string();
    let created = catalog.create_recipe(draft).await.unwrap();
    assert_eq!(created.slug, "pad-thai");

    let mut edit = RecipeDraft::from(&created);
    edit.servings = 4;
    let updated = catalog.update_recipe("pad-thai", edit).await.unwrap();
    assert_eq!(updated.slug, "pad-thai");
    assert_eq!(updated.servings, 4);
}

#[tokio::test]
async fn test_region_rename_keeps_slug() {
    let catalog = seeded_catalog().await;
    let italy = catalog.store().region("italy").await.unwrap().unwrap();

    let mut edit = TaxonomyDraft::from(&italy);
    edit.name = "Italia".to_string();
    let renamed = catalog.update_region("italy", edit).await.unwrap();
    assert_eq!(renamed.id, italy.id);
    assert_eq!(renamed.slug, "italy");

    let risotto = stored(&catalog, "authentic-risotto-alla-milanese").await;
    assert_eq!(risotto.region.name, "Italia");
}

#[tokio::test]
async fn test_taxonomy_slug_cannot_be_swapped_in_place() {
    let catalog = seeded_catalog().await;
    let italy = catalog.store().region("italy").await.unwrap().unwrap();

    let edit = TaxonomyDraft::from(&italy).with_slug("italia");
    let err = catalog.update_region("italy", edit).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
    assert!(catalog.store().region("italia").await.unwrap().is_none());
}

#[tokio::test]
async fn test_cleared_taxonomy_slug_is_rederived() {
    let catalog = seeded_catalog().await;
    let soups = catalog.store().category("soups").await.unwrap().unwrap();

    let edit = TaxonomyDraft::new("Soups and Stews")
        .with_description(soups.description.clone());
    let updated = catalog.update_category("soups", edit).await.unwrap();
    assert_eq!(updated.slug, "soups-and-stews");
    assert!(catalog.store().category("soups").await.unwrap().is_none());

    let tom_kha = stored(&catalog, "tom-kha-gai-thai-coconut-chicken-soup").await;
    assert_eq!(tom_kha.category.slug, "soups-and-stews");
}

#[tokio::test]
async fn test_tag_description_kept_on_update() {
    let catalog = seeded_catalog().await;
    let created = catalog
        .create_tag(TaxonomyDraft::new("Vegetarian").with_description("No meat or fish"))
        .await
        .unwrap();
    assert_eq!(created.description, "No meat or fish");

    let mut edit = TaxonomyDraft::from(&created);
    edit.description = "Meat-free dishes".to_string();
    let updated = catalog.update_tag("vegetarian", edit).await.unwrap();
    assert_eq!(updated.slug, "vegetarian");
    assert_eq!(updated.description, "Meat-free dishes");

    assert!(matches!(
        catalog
            .update_tag("vegan", TaxonomyDraft::new("Vegan"))
            .await,
        Err(CatalogError::NotFound { kind: "tag", .. })
    ));
}

#[tokio::test]
async fn test_underivable_title_rejected() {
    let catalog = seeded_catalog().await;
    let err = catalog
        .create_recipe(recipe_draft("!!! ???", "italy", "desserts", Difficulty::Easy, 1, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
}

#[tokio::test]
async fn test_missing_taxonomy_is_not_found() {
    let catalog = seeded_catalog().await;

    let err = catalog
        .create_recipe(recipe_draft("Pho", "vietnam", "soups", Difficulty::Medium, 30, 180, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "region", .. }));

    let err = catalog
        .create_recipe(recipe_draft("Pho", "thailand", "noodles", Difficulty::Medium, 30, 180, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "category", .. }));

    let mut draft = recipe_draft("Pho", "thailand", "soups", Difficulty::Medium, 30, 180, 4);
    draft.tags = vec!["umami".to_string()];
    let err = catalog.create_recipe(draft).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "tag", .. }));

    let article = article_draft("Hanoi Mornings", ArticleType::Story, "vietnam");
    let err = catalog.create_article(article).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "region", .. }));

    assert_eq!(catalog.store().recipes().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_invalid_drafts_rejected_before_storage() {
    let catalog = seeded_catalog().await;

    let zero_servings = recipe_draft("Tiramisu", "italy", "desserts", Difficulty::Easy, 30, 0, 0);
    assert!(matches!(
        catalog.create_recipe(zero_servings).await,
        Err(CatalogError::Validation(_))
    ));

    let mut no_image = recipe_draft("Tiramisu", "italy", "desserts", Difficulty::Easy, 30, 0, 6);
    no_image.images.featured.clear();
    assert!(matches!(
        catalog.create_recipe(no_image).await,
        Err(CatalogError::Validation(_))
    ));

    let mut long_meta = recipe_draft("Tiramisu", "italy", "desserts", Difficulty::Easy, 30, 0, 6);
    long_meta.meta_title = "x".repeat(61);
    assert!(matches!(
        catalog.create_recipe(long_meta).await,
        Err(CatalogError::Validation(_))
    ));

    let blank_article = ArticleDraft::new("  ", ArticleType::Blog);
    assert!(matches!(
        catalog.create_article(blank_article).await,
        Err(CatalogError::Validation(_))
    ));
}

#[tokio::test]
async fn test_duplicate_tags_collapse() {
    let catalog = seeded_catalog().await;
    let mut draft = recipe_draft("Som Tam", "thailand", "appetizers", Difficulty::Easy, 15, 0, 2);
    draft.tags = vec!["spicy".to_string(), "healthy".to_string(), "spicy".to_string()];
    let created = catalog.create_recipe(draft).await.unwrap();

    let tag_slugs: Vec<&str> = created.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(tag_slugs, vec!["spicy", "healthy"]);
}

#[tokio::test]
async fn test_article_back_fill_uses_excerpt() {
    let catalog = seeded_catalog().await;
    let mut draft = article_draft(
        "How Migration Shapes Culinary Evolution: The Story of Global Fusion",
        ArticleType::Blog,
        "",
    );
    draft.excerpt = "Exploring how human migration has created new culinary traditions.".to_string();
    let article = catalog.create_article(draft).await.unwrap();

    assert_eq!(
        article.slug,
        "how-migration-shapes-culinary-evolution-the-story-of-global-fusion"
    );
    assert_eq!(article.meta_title.chars().count(), 60);
    assert_eq!(article.meta_description, article.excerpt);
    assert!(article.region.is_none());
    assert!(!article.featured);

    let mut edit = ArticleDraft::from(&article);
    edit.featured = true;
    let updated = catalog.update_article(&article.slug, edit).await.unwrap();
    assert!(updated.featured);
    assert_eq!(updated.created_at, article.created_at);
    assert!(updated.updated_at > article.updated_at);
}
