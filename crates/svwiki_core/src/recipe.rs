use anyhow::{Context, Result, bail};

use crate::ident;
use crate::store::GameData;

/// Recipes excluded from ingredient break-down listings: metal-to-metal
/// transmutations that never belong on an item page.
const IGNORED_RECIPES: [&str; 2] = ["Transmute (Fe)", "Transmute (Au)"];

/// One required ingredient. Negative sentinel codes stand for "any item of
/// class X" and resolve to a static label instead of a concrete item; every
/// place a materials list is rendered must handle both arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Material {
    Item {
        /// Qualified item id as written in the recipe encoding.
        id: String,
        name: String,
        count: u32,
    },
    Category {
        label: &'static str,
        count: u32,
    },
}

impl Material {
    pub fn name(&self) -> &str {
        match self {
            Self::Item { name, .. } => name,
            Self::Category { label, .. } => label,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            Self::Item { count, .. } | Self::Category { count, .. } => *count,
        }
    }
}

/// The single product of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Qualified id: `(BC)` for big-craftable output, `(O)` otherwise.
    pub id: String,
    pub name: String,
    pub count: u32,
    pub big_craftable: bool,
    pub sell_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    /// Source order preserved; rendering order matters for stable output.
    pub materials: Vec<Material>,
    pub product: Product,
}

/// All parsed cooking and crafting recipes, plus the names of recipes that
/// referenced items absent from the data store. Those are skipped, counted,
/// and reported; one bad record must not abort the batch.
#[derive(Debug, Default)]
pub struct RecipeBook {
    pub cooking: Vec<Recipe>,
    pub crafting: Vec<Recipe>,
    pub skipped: Vec<String>,
}

impl RecipeBook {
    pub fn parse_all(data: &GameData) -> Result<Self> {
        let mut book = RecipeBook::default();
        for (name, encoded) in data.cooking_recipes().iter() {
            match parse_recipe(data, name, encoded, false)
                .with_context(|| format!("cooking recipe {name}"))?
            {
                Some(recipe) => book.cooking.push(recipe),
                None => book.skipped.push(name.to_string()),
            }
        }
        for (name, encoded) in data.crafting_recipes().iter() {
            match parse_recipe(data, name, encoded, true)
                .with_context(|| format!("crafting recipe {name}"))?
            {
                Some(recipe) => book.crafting.push(recipe),
                None => book.skipped.push(name.to_string()),
            }
        }
        Ok(book)
    }

    /// Crafting recipes whose ingredient lists are worth publishing.
    pub fn publishable_crafting(&self) -> impl Iterator<Item = &Recipe> {
        self.crafting
            .iter()
            .filter(|recipe| !is_ignored(&recipe.name))
    }
}

pub fn is_ignored(name: &str) -> bool {
    IGNORED_RECIPES.contains(&name)
}

/// Parse one compact recipe encoding:
/// `materials/<unused>/product[/isBigCraftable]`, materials being
/// whitespace-separated `code quantity` pairs.
///
/// Returns `Ok(None)` when the recipe references an item the store does not
/// know (skip, count, continue). Structural problems (too few fields, an
/// unknown negative sentinel) are errors: the recipe table is static input
/// and silently wrong output is worse than a failed run.
pub fn parse_recipe(
    data: &GameData,
    name: &str,
    encoded: &str,
    is_crafting: bool,
) -> Result<Option<Recipe>> {
    let fields: Vec<&str> = encoded.split('/').collect();
    if fields.len() < 3 {
        bail!("unparseable recipe encoding (expected at least 3 fields): {encoded}");
    }

    let mut materials = Vec::new();
    for (code, count) in pair_material_tokens(fields[0]) {
        match resolve_material(data, code, count)? {
            Some(material) => materials.push(material),
            None => return Ok(None),
        }
    }

    let big_craftable = is_crafting
        && fields
            .get(3)
            .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));
    let Some(product) = resolve_product(data, fields[2], big_craftable)? else {
        return Ok(None);
    };

    Ok(Some(Recipe {
        name: name.to_string(),
        materials,
        product,
    }))
}

/// Pair up the material tokens: a code followed by a purely numeric token is
/// `(code, quantity)`; a code with no numeric follower defaults to 1. Codes
/// may carry a parenthesized kind-prefix, which stays attached to the code.
fn pair_material_tokens(field: &str) -> Vec<(&str, u32)> {
    let tokens: Vec<&str> = field.split_whitespace().collect();
    let mut out = Vec::new();
    let mut position = 0;
    while position < tokens.len() {
        let code = tokens[position];
        let count = tokens.get(position + 1).and_then(|token| parse_count(token));
        match count {
            Some(count) => {
                out.push((code, count));
                position += 2;
            }
            None => {
                out.push((code, 1));
                position += 1;
            }
        }
    }
    out
}

fn parse_count(token: &str) -> Option<u32> {
    if token.is_empty() || !token.chars().all(|character| character.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn resolve_material(data: &GameData, code: &str, count: u32) -> Result<Option<Material>> {
    if ident::is_category_sentinel(code) {
        let label = ident::category_label(code)?;
        return Ok(Some(Material::Category { label, count }));
    }

    if let Some((prefix, bare)) = ident::split_prefix(code) {
        if prefix == ident::BIG_CRAFTABLE_PREFIX {
            return Ok(data.try_get_big_craftable(bare).map(|item| Material::Item {
                id: code.to_string(),
                name: item.name.clone(),
                count,
            }));
        }
        if prefix != ident::OBJECT_PREFIX {
            // A kind this store does not index (hats, weapons, ...).
            return Ok(None);
        }
    }

    Ok(data.try_get_object(code).map(|item| Material::Item {
        id: ident::qualify(ident::trim(code)),
        name: item.name.clone(),
        count,
    }))
}

fn resolve_product(
    data: &GameData,
    field: &str,
    big_craftable: bool,
) -> Result<Option<Product>> {
    let mut tokens = field.split_whitespace();
    let Some(code) = tokens.next() else {
        bail!("recipe product field is empty");
    };
    let count = tokens.next().and_then(parse_count).unwrap_or(1);

    if big_craftable {
        let Some(item) = data.try_get_big_craftable(code) else {
            return Ok(None);
        };
        return Ok(Some(Product {
            id: format!("{}{code}", ident::BIG_CRAFTABLE_PREFIX),
            name: item.name.clone(),
            count,
            big_craftable: true,
            sell_price: item.price,
        }));
    }

    let Some(item) = data.try_get_object(code) else {
        return Ok(None);
    };
    Ok(Some(Product {
        id: ident::qualify(code),
        name: item.name.clone(),
        count,
        big_craftable: false,
        sell_price: item.price,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_data;

    #[test]
    fn crafting_recipe_parses_materials_and_product() {
        // Two materials, product 472 with implicit quantity 1, plain object.
        let data = sample_data();
        let recipe = parse_recipe(&data, "Test Seeds", "16 5 18 3/Home/472/false", true)
            .expect("parse")
            .expect("resolved");

        assert_eq!(recipe.materials.len(), 2);
        assert_eq!(
            recipe.materials[0],
            Material::Item {
                id: "(O)16".to_string(),
                name: "Wild Horseradish".to_string(),
                count: 5,
            }
        );
        assert_eq!(recipe.materials[1].count(), 3);
        assert_eq!(recipe.product.id, "(O)472");
        assert_eq!(recipe.product.count, 1);
        assert!(!recipe.product.big_craftable);
    }

    #[test]
    fn coal_recipe_matches_reference_shape() {
        let data = sample_data();
        let recipe = parse_recipe(&data, "Transmute Coal", "388 5 771 3/2/382/false", true)
            .expect("parse")
            .expect("resolved");
        assert_eq!(recipe.materials.len(), 2);
        assert_eq!(
            (recipe.materials[0].name(), recipe.materials[0].count()),
            ("Wood", 5)
        );
        assert_eq!(
            (recipe.materials[1].name(), recipe.materials[1].count()),
            ("Fiber", 3)
        );
        assert_eq!(recipe.product.id, "(O)382");
        assert_eq!(recipe.product.count, 1);
        assert!(!recipe.product.big_craftable);
    }

    #[test]
    fn trailing_material_without_count_defaults_to_one() {
        let data = sample_data();
        let recipe = parse_recipe(&data, "Test", "16 2 18/Home/472", false)
            .expect("parse")
            .expect("resolved");
        assert_eq!(recipe.materials[0].count(), 2);
        assert_eq!(recipe.materials[1].count(), 1);
    }

    #[test]
    fn negative_codes_resolve_to_category_labels() {
        let data = sample_data();
        let recipe = parse_recipe(&data, "Test Bait", "-4 2 16 1/Home/472", false)
            .expect("parse")
            .expect("resolved");
        assert_eq!(
            recipe.materials[0],
            Material::Category {
                label: "Any Fish",
                count: 2,
            }
        );
    }

    #[test]
    fn unknown_sentinel_aborts_the_parse() {
        let data = sample_data();
        let error =
            parse_recipe(&data, "Broken", "-12345 2/Home/472", false).expect_err("must fail");
        assert!(error.to_string().contains("-12345"));
    }

    #[test]
    fn big_craftable_flag_switches_product_lookup() {
        let data = sample_data();
        let recipe = parse_recipe(&data, "Test Keg", "16 30/Home/12/true", true)
            .expect("parse")
            .expect("resolved");
        assert!(recipe.product.big_craftable);
        assert_eq!(recipe.product.id, "(BC)12");
        assert_eq!(recipe.product.name, "Keg");

        // Same encoding without the flag resolves against the objects table
        // and misses, which is a skip rather than an error.
        let skipped =
            parse_recipe(&data, "Test Keg", "16 30/Home/12/false", true).expect("parse");
        assert!(skipped.is_none());
    }

    #[test]
    fn prefixed_material_tokens_keep_prefix_with_code() {
        let data = sample_data();
        // (BC)12 resolves through the big-craftables table.
        let recipe = parse_recipe(&data, "Test", "(BC)12 1 16 2/Home/472", true)
            .expect("parse")
            .expect("resolved");
        assert_eq!(recipe.materials[0].name(), "Keg");

        // A kind the store does not index skips the whole recipe.
        let skipped = parse_recipe(&data, "Test", "(H)566 1/Home/472", true).expect("parse");
        assert!(skipped.is_none());
    }

    #[test]
    fn too_few_fields_is_a_hard_error() {
        let data = sample_data();
        let error = parse_recipe(&data, "Broken", "16 1", false).expect_err("must fail");
        assert!(error.to_string().contains("at least 3 fields"));
    }

    #[test]
    fn parse_all_skips_unresolvable_recipes_and_counts_them() {
        let data = sample_data();
        let book = RecipeBook::parse_all(&data).expect("parse all");
        // The fixture's crafting table has one good recipe and one that
        // references an unknown item id.
        assert_eq!(book.crafting.len(), 1);
        assert_eq!(book.skipped, vec!["Ghost Recipe".to_string()]);
    }

    #[test]
    fn transmutations_are_excluded_from_publishable_listings() {
        assert!(is_ignored("Transmute (Fe)"));
        assert!(is_ignored("Transmute (Au)"));
        assert!(!is_ignored("Keg"));
    }
}
