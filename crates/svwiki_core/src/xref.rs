use crate::ident;
use crate::model::{CropRecord, FruitTreeRecord};
use crate::store::GameData;

/// Fruit trees mature after a fixed four weeks; only row crops derive their
/// growth time from phase data.
pub const FRUIT_TREE_GROWTH_DAYS: u32 = 28;

/// Mixed-seed packets whose harvest field matches several items; never report
/// them as the seed of anything.
const MIXED_SEED_DENYLIST: [&str; 4] = ["495", "496", "497", "498"];

const CANONICAL_SEASONS: [&str; 4] = ["spring", "summer", "fall", "winter"];

/// Forward cross-reference result: where an item comes from when grown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestSource<'a> {
    Crop {
        seed_id: &'a str,
        crop: &'a CropRecord,
    },
    FruitTree {
        sapling_id: &'a str,
        tree: &'a FruitTreeRecord,
    },
}

/// Scan for the crop or fruit tree that yields `item_id`. Crops are checked
/// before fruit trees and the first match in table order wins; that priority
/// is load-bearing for existing wiki content, so it is preserved literally.
pub fn harvest_source<'a>(data: &'a GameData, item_id: &str) -> Option<HarvestSource<'a>> {
    for (seed_id, crop) in data.crops().iter() {
        if crop.harvest_item_id == item_id && !MIXED_SEED_DENYLIST.contains(&seed_id) {
            return Some(HarvestSource::Crop { seed_id, crop });
        }
    }

    // Fruit ids appear bare or (O)-qualified in the trees table.
    let qualified = ident::qualify(item_id);
    for (sapling_id, tree) in data.fruit_trees().iter() {
        if let Some(harvest) = tree.harvest()
            && (harvest == item_id || harvest == qualified)
        {
            return Some(HarvestSource::FruitTree { sapling_id, tree });
        }
    }

    None
}

/// Reverse cross-reference: what a seed or sapling grows into. `None` is the
/// expected answer for seed-like items that are not growable (mixed seed
/// packets and the like), not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedGrowth<'a> {
    Crop(&'a CropRecord),
    FruitTree(&'a FruitTreeRecord),
}

pub fn growth_of_seed<'a>(data: &'a GameData, seed_id: &str) -> Option<SeedGrowth<'a>> {
    if let Some(crop) = data.try_get_crop(seed_id) {
        return Some(SeedGrowth::Crop(crop));
    }
    data.try_get_fruit_tree(seed_id).map(SeedGrowth::FruitTree)
}

/// The in-game farming-experience formula. The reference implementation
/// rounds half to even before truncating; reproduce that exactly.
pub fn get_xp(sell_price: i64) -> i64 {
    let exp = 16.0 * (0.018 * sell_price as f64 + 1.0).ln();
    exp.round_ties_even() as i64
}

/// Wiki rendering of a season list: the "All" sentinel when every canonical
/// season is present, otherwise `{{Season|...}}` items bullet-joined in
/// source order.
pub fn render_seasons(seasons: &[String]) -> String {
    if is_all_seasons(seasons.iter().map(String::as_str)) {
        return "All".to_string();
    }
    seasons
        .iter()
        .map(|season| format!("{{{{Season|{season}}}}}"))
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn is_all_seasons<'a>(seasons: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = [false; 4];
    for season in seasons {
        if let Some(position) = CANONICAL_SEASONS
            .iter()
            .position(|canonical| season.eq_ignore_ascii_case(canonical))
        {
            seen[position] = true;
        }
    }
    seen.iter().all(|found| *found)
}
