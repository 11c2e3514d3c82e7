use anyhow::{Result, bail};
use serde::Serialize;

use crate::fish::FishHabits;
use crate::ident;
use crate::recipe::{Material, RecipeBook};
use crate::shop::{Price, ShopSet};
use crate::store::{GameData, Namespace};
use crate::xref::{self, HarvestSource, SeedGrowth};

pub const CATEGORY_FISH: i64 = -4;
pub const CATEGORY_SEEDS: i64 = -74;
pub const CATEGORY_VEGETABLE: i64 = -75;
pub const CATEGORY_FRUIT: i64 = -79;
pub const CATEGORY_FLOWER: i64 = -80;
pub const CATEGORY_FORAGE: i64 = -81;
pub const CATEGORY_SELL_AT_FISH_SHOP: i64 = -23;

/// Seeds whose product goes through an artisan machine before sale.
const ARTISAN_SEEDS: [&str; 2] = ["431", "433"];

/// Night-market boats run on calendar days 15-17 of winter.
const NIGHT_MARKET_FIRST_DAY: u32 = 15;

/// A batch of generated records plus the per-record problems that were
/// recovered locally (missing linkage is expected, never a batch failure).
#[derive(Debug, Serialize)]
pub struct Generated<T> {
    pub records: Vec<T>,
    pub diagnostics: Vec<String>,
}

impl<T> Default for Generated<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

/// One ingredient line, already flattened from the material sum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLine {
    pub name: String,
    pub count: u32,
}

fn ingredient_lines(materials: &[Material]) -> Vec<IngredientLine> {
    materials
        .iter()
        .map(|material| match material {
            Material::Item { name, count, .. } => IngredientLine {
                name: name.clone(),
                count: *count,
            },
            Material::Category { label, count } => IngredientLine {
                name: (*label).to_string(),
                count: *count,
            },
        })
        .collect()
}

/// Trade terms for shops that barter instead of charging gold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarterTerms {
    pub item_name: String,
    pub amount: i64,
}

/// Where and for how much a seed can be bought.
#[derive(Debug, Default, Serialize)]
pub struct ShopPrices {
    pub general_store: Option<Price>,
    pub joja_mart: Option<Price>,
    pub oasis: Option<Price>,
    pub traveling_cart: Option<Price>,
    pub island_trade: Option<BarterTerms>,
    pub raccoon: Option<BarterTerms>,
    pub night_market_days: Vec<u32>,
}

/// Growth data recovered for a seed via the reverse cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropSummary {
    pub harvest_id: String,
    pub harvest_name: String,
    pub growth_days: u32,
    pub seasons: String,
    /// Farming xp per harvest; fruit trees award none.
    pub xp: Option<i64>,
    pub tree_fruit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub ingredients: Vec<IngredientLine>,
    pub produces: u32,
}

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub sell_price: i64,
    pub artisan: bool,
    pub crop: Option<CropSummary>,
    pub prices: ShopPrices,
    pub recipe: Option<RecipeSummary>,
}

/// One record per seed item (category -74), in object-table order.
pub fn seed_reports(data: &GameData, shops: &ShopSet, book: &RecipeBook) -> Generated<SeedReport> {
    let mut out = Generated::default();
    for (id, object) in data.objects().iter() {
        if object.category != CATEGORY_SEEDS {
            continue;
        }

        let crop = crop_summary(data, id);
        if crop.is_none() {
            out.diagnostics
                .push(format!("no crop or fruit tree found for seed {id} ({})", object.name));
        }

        out.records.push(SeedReport {
            id: id.to_string(),
            name: object.name.clone(),
            display_name: data.display_name(id),
            sell_price: object.price,
            artisan: ARTISAN_SEEDS.contains(&id),
            crop,
            prices: shop_prices(data, shops, id),
            recipe: crafting_source(book, id),
        });
    }
    out
}

fn crop_summary(data: &GameData, seed_id: &str) -> Option<CropSummary> {
    match xref::growth_of_seed(data, seed_id)? {
        SeedGrowth::Crop(crop) => {
            let harvest = data.try_get_object(&crop.harvest_item_id);
            Some(CropSummary {
                harvest_id: crop.harvest_item_id.clone(),
                harvest_name: harvest
                    .map(|item| item.name.clone())
                    .unwrap_or_else(|| crop.harvest_item_id.clone()),
                growth_days: crop.growth_days(),
                seasons: xref::render_seasons(&crop.seasons),
                xp: harvest.map(|item| xref::get_xp(item.price)),
                tree_fruit: false,
            })
        }
        SeedGrowth::FruitTree(tree) => {
            let harvest_id = tree.harvest()?;
            let bare = ident::trim(harvest_id).to_string();
            Some(CropSummary {
                harvest_name: data
                    .get_name(&bare)
                    .map(str::to_string)
                    .unwrap_or_else(|| bare.clone()),
                harvest_id: bare,
                growth_days: xref::FRUIT_TREE_GROWTH_DAYS,
                seasons: xref::render_seasons(&tree.seasons),
                xp: None,
                tree_fruit: true,
            })
        }
    }
}

fn shop_prices(data: &GameData, shops: &ShopSet, seed_id: &str) -> ShopPrices {
    let mut prices = ShopPrices {
        general_store: shops
            .general_store
            .try_get_goods(seed_id)
            .map(|goods| goods.price),
        joja_mart: shops
            .joja_mart
            .try_get_goods(seed_id)
            .map(|goods| goods.price),
        ..ShopPrices::default()
    };

    // The expansion namespace only declares the two town shops.
    if data.namespace == Namespace::Sve {
        return prices;
    }

    prices.oasis = shops.oasis.try_get_goods(seed_id).map(|goods| goods.price);
    prices.traveling_cart = shops
        .traveling_cart
        .try_get_goods(seed_id)
        .map(|goods| goods.price);
    prices.island_trade = shops
        .island_trade
        .try_get_goods(seed_id)
        .and_then(|goods| barter_terms(data, goods.trade_item_id.as_deref(), goods.trade_item_amount));
    prices.raccoon = shops
        .raccoon
        .try_get_goods(seed_id)
        .and_then(|goods| barter_terms(data, goods.trade_item_id.as_deref(), goods.trade_item_amount));

    for (offset, boat) in shops.night_market.iter().enumerate() {
        if boat.try_get_goods(seed_id).is_some() {
            prices
                .night_market_days
                .push(NIGHT_MARKET_FIRST_DAY + offset as u32);
        }
    }

    prices
}

fn barter_terms(
    data: &GameData,
    trade_item_id: Option<&str>,
    amount: Option<i64>,
) -> Option<BarterTerms> {
    let trade_item_id = trade_item_id?;
    let bare = ident::trim(trade_item_id);
    Some(BarterTerms {
        item_name: data
            .get_name(bare)
            .map(str::to_string)
            .unwrap_or_else(|| bare.to_string()),
        amount: amount.unwrap_or(0),
    })
}

fn crafting_source(book: &RecipeBook, seed_id: &str) -> Option<RecipeSummary> {
    book.crafting
        .iter()
        .find(|recipe| {
            !recipe.product.big_craftable && ident::trim(&recipe.product.id) == seed_id
        })
        .map(|recipe| RecipeSummary {
            ingredients: ingredient_lines(&recipe.materials),
            produces: recipe.product.count,
        })
}

#[derive(Debug, Serialize)]
pub struct FishReport {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub sell_price: i64,
    pub edibility: i64,
    pub color: String,
    pub habits: Option<FishHabits>,
}

/// One record per fish item (category -4), in object-table order. An item
/// missing from the fish table is reported, not fatal.
pub fn fish_reports(data: &GameData) -> Generated<FishReport> {
    let mut out = Generated::default();
    for (id, object) in data.objects().iter() {
        if object.category != CATEGORY_FISH {
            continue;
        }
        let habits = data.fish_entry(id).map(FishHabits::parse);
        if habits.is_none() {
            out.diagnostics
                .push(format!("fish table has no entry for {id} ({})", object.name));
        }
        out.records.push(FishReport {
            id: id.to_string(),
            name: object.name.clone(),
            display_name: data.display_name(id),
            sell_price: object.price,
            edibility: object.edibility,
            color: object.color(),
            habits,
        });
    }
    out
}

#[derive(Debug, Serialize)]
pub struct CraftReport {
    pub name: String,
    pub product_name: String,
    pub display_name: Option<String>,
    pub sell_price: i64,
    pub big_craftable: bool,
    /// Yield, only when a single craft produces more than one.
    pub produces: Option<u32>,
    pub ingredients: Vec<IngredientLine>,
}

/// One record per publishable crafting recipe, in recipe-table order.
pub fn craft_reports(data: &GameData, book: &RecipeBook) -> Vec<CraftReport> {
    book.publishable_crafting()
        .map(|recipe| {
            let display_name = if recipe.product.big_craftable {
                data.display_name_big_craftable(&recipe.product.id)
            } else {
                data.display_name(&recipe.product.id)
            };
            CraftReport {
                name: recipe.name.clone(),
                product_name: recipe.product.name.clone(),
                display_name,
                sell_price: recipe.product.sell_price,
                big_craftable: recipe.product.big_craftable,
                produces: (recipe.product.count > 1).then_some(recipe.product.count),
                ingredients: ingredient_lines(&recipe.materials),
            }
        })
        .collect()
}

/// Grown-produce page categories and the object categories they cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProduceCategory {
    Vegetable,
    Fruit,
    Flower,
    Forage,
}

impl ProduceCategory {
    pub fn parse(value: &str) -> Result<Self> {
        let category = match value.to_ascii_lowercase().as_str() {
            "vegetable" => Self::Vegetable,
            "fruit" => Self::Fruit,
            "flower" => Self::Flower,
            "forage" => Self::Forage,
            _ => bail!("unsupported produce category: {value} (expected vegetable|fruit|flower|forage)"),
        };
        Ok(category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::Flower => "flower",
            Self::Forage => "forage",
        }
    }

    fn matches(self, category: i64) -> bool {
        match self {
            Self::Vegetable => category == CATEGORY_VEGETABLE,
            Self::Fruit => category == CATEGORY_FRUIT,
            Self::Flower => category == CATEGORY_FLOWER,
            Self::Forage => category == CATEGORY_FORAGE || category == CATEGORY_SELL_AT_FISH_SHOP,
        }
    }
}

/// How a grown item reaches the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProduceSource {
    Cultivated {
        seed_id: String,
        seed_name: String,
        growth_days: u32,
        seasons: String,
    },
    Tree {
        sapling_id: String,
        sapling_name: String,
        seasons: String,
    },
    Foraged,
}

#[derive(Debug, Serialize)]
pub struct ProduceReport {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub sell_price: i64,
    pub edibility: i64,
    pub color: String,
    pub xp: i64,
    pub source: ProduceSource,
    /// Forage-only sub-tag: mushroom vs. edible vegetable.
    pub forage_tag: Option<&'static str>,
}

/// One record per item in the produce category, in object-table order.
/// Cultivation is checked for everything but forage; tree fruit only counts
/// for the fruit category. Items with no source fall back to foraged, with a
/// diagnostic for the non-forage categories.
pub fn produce_reports(data: &GameData, category: ProduceCategory) -> Generated<ProduceReport> {
    let mut out = Generated::default();
    for (id, object) in data.objects().iter() {
        if !category.matches(object.category) {
            continue;
        }

        let source = if category == ProduceCategory::Forage {
            None
        } else {
            match xref::harvest_source(data, id) {
                Some(HarvestSource::Crop { seed_id, crop }) => Some(ProduceSource::Cultivated {
                    seed_id: seed_id.to_string(),
                    seed_name: data
                        .get_name(seed_id)
                        .map(str::to_string)
                        .unwrap_or_else(|| seed_id.to_string()),
                    growth_days: crop.growth_days(),
                    seasons: xref::render_seasons(&crop.seasons),
                }),
                Some(HarvestSource::FruitTree { sapling_id, tree })
                    if category == ProduceCategory::Fruit =>
                {
                    Some(ProduceSource::Tree {
                        sapling_id: sapling_id.to_string(),
                        sapling_name: data
                            .get_name(sapling_id)
                            .map(str::to_string)
                            .unwrap_or_else(|| sapling_id.to_string()),
                        seasons: xref::render_seasons(&tree.seasons),
                    })
                }
                _ => None,
            }
        };

        let source = match source {
            Some(source) => source,
            None => {
                if category != ProduceCategory::Forage {
                    out.diagnostics
                        .push(format!("no seed found for {id} ({})", object.name));
                }
                ProduceSource::Foraged
            }
        };

        let forage_tag = if category == ProduceCategory::Forage {
            if object.has_context_tag("edible_mushroom") {
                Some("Mushroom")
            } else if object.edibility > 0 {
                Some("Vegetable")
            } else {
                None
            }
        } else {
            None
        };

        out.records.push(ProduceReport {
            id: id.to_string(),
            name: object.name.clone(),
            display_name: data.display_name(id),
            sell_price: object.price,
            edibility: object.edibility,
            color: object.color(),
            xp: xref::get_xp(object.price),
            source,
            forage_tag,
        });
    }
    out
}
