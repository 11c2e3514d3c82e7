//! Shared test fixtures: a small but representative data directory covering
//! every table the loader knows about.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::store::{GameData, Namespace};

pub(crate) fn write_fixture(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture file");
}

/// A loaded vanilla-namespace snapshot. Ids and prices follow the real game
/// data where a test cares (Parsnip Seeds 472 sell for 10, Parsnip 24 for 50
/// here to keep the doubled prices distinct).
pub(crate) fn sample_data() -> GameData {
    let temp = tempdir().expect("tempdir");
    let dir = temp.path();

    write_fixture(
        dir,
        "Objects.json",
        r#"{
            "16": {"Name": "Wild Horseradish", "Price": 50, "Edibility": 5, "Category": -81},
            "18": {"Name": "Daffodil", "Price": 30, "Edibility": 0, "Category": -81},
            "24": {
                "Name": "Parsnip",
                "DisplayName": "[LocalizedText Strings\\Objects:Parsnip_Name]",
                "Price": 50,
                "Edibility": 10,
                "Category": -75
            },
            "128": {
                "Name": "Pufferfish",
                "Price": 200,
                "Edibility": -40,
                "Category": -4,
                "ContextTags": ["fish_ocean", "color_yellow"]
            },
            "227": {"Name": "Sashimi", "Price": 75, "Edibility": 30, "Category": -7},
            "382": {"Name": "Coal", "Price": 15, "Category": -15},
            "388": {"Name": "Wood", "Price": 2, "Category": -16},
            "404": {
                "Name": "Common Mushroom",
                "Price": 40,
                "Edibility": 15,
                "Category": -81,
                "ContextTags": ["edible_mushroom"]
            },
            "431": {"Name": "Sunflower Seeds", "Price": 20, "Category": -74},
            "472": {"Name": "Parsnip Seeds", "DisplayName": "Parsnip Seeds", "Price": 10, "Category": -74},
            "628": {"Name": "Cherry Sapling", "Price": 850, "Category": -74},
            "638": {"Name": "Cherry", "Price": 80, "Edibility": 25, "Category": -79},
            "770": {"Name": "Mixed Seeds", "Price": 0, "Category": -74},
            "771": {"Name": "Fiber", "Price": 1, "Category": -16},
            "788": {"Name": "Warp Totem Shard", "Price": 5, "Category": -999},
            "789": {"Name": "Lucky Purple Shorts", "Price": 10, "Category": -20, "ExcludeFromRandomSale": true}
        }"#,
    );

    write_fixture(dir, "Objects.zh-CN.json", r#"{"Parsnip_Name": "防风草"}"#);

    write_fixture(
        dir,
        "BigCraftables.json",
        r#"{
            "12": {
                "Name": "Keg",
                "DisplayName": "[LocalizedText Strings\\BigCraftables:Keg_Name]",
                "Price": 100
            }
        }"#,
    );

    write_fixture(dir, "BigCraftables.zh-CN.json", r#"{"Keg_Name": "小桶"}"#);

    write_fixture(
        dir,
        "Crops.json",
        r#"{
            "472": {"HarvestItemId": "24", "DaysInPhase": [1, 1, 1, 1], "Seasons": ["Spring"]},
            "431": {"HarvestItemId": "421", "DaysInPhase": [1, 2, 5], "Seasons": ["Summer", "Fall"]},
            "495": {"HarvestItemId": "16", "DaysInPhase": [1], "Seasons": ["Spring"]}
        }"#,
    );

    write_fixture(
        dir,
        "FruitTrees.json",
        r#"{
            "628": {"Fruit": [{"ItemId": "(O)638"}], "Seasons": ["Spring"]}
        }"#,
    );

    write_fixture(
        dir,
        "Shops.json",
        r#"{
            "SeedShop": {"Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": -1}]},
            "Joja": {"Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": 25}]},
            "Sandy": {"Items": []},
            "Traveler": {"Items": []},
            "IslandTrade": {
                "Items": [{
                    "Id": "(O)628",
                    "ItemId": "(O)628",
                    "TradeItemId": "(O)388",
                    "TradeItemAmount": 5
                }]
            },
            "Raccoon": {"Items": []},
            "Festival_NightMarket_MagicBoat_Day2": {
                "Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": 100}]
            }
        }"#,
    );

    write_fixture(dir, "ItemID.json", r#"{"(O)24": "Parsnip"}"#);

    write_fixture(
        dir,
        "Fish.json",
        r#"{"128": "Pufferfish/80/floater/1/36/1200 1600/summer/sunny/690 .4 685 .1/4/.3/.5/0/false"}"#,
    );

    write_fixture(
        dir,
        "CookingRecipes.json",
        r#"{"Sashimi": "-4 1/1 10/227"}"#,
    );

    write_fixture(
        dir,
        "CraftingRecipes.json",
        r#"{
            "Keg": "388 30/Home/12/true",
            "Ghost Recipe": "99999 1/Home/472/false"
        }"#,
    );

    GameData::load(dir, Namespace::Vanilla).expect("load sample data")
}

/// An expansion-namespace snapshot: templated display names, one shared
/// localization table, and shop declarations beyond the two town shops that
/// the namespace must not consult.
pub(crate) fn sve_sample_data() -> GameData {
    let temp = tempdir().expect("tempdir");
    let dir = temp.path();

    write_fixture(
        dir,
        "Objects.json",
        r#"{
            "24": {"Name": "Parsnip", "Price": 50, "Edibility": 10, "Category": -75},
            "388": {"Name": "Wood", "Price": 2, "Category": -16},
            "472": {
                "Name": "Parsnip Seeds",
                "DisplayName": "{{i18n:ParsnipSeeds.name}}",
                "Price": 10,
                "Category": -74
            }
        }"#,
    );

    write_fixture(
        dir,
        "BigCraftables.json",
        r#"{"12": {"Name": "Keg", "DisplayName": "{{i18n:Keg.name}}", "Price": 100}}"#,
    );

    write_fixture(
        dir,
        "zh.json",
        r#"{"ParsnipSeeds.name": "防风草种子", "Keg.name": "小桶"}"#,
    );

    write_fixture(
        dir,
        "Crops.json",
        r#"{"472": {"HarvestItemId": "24", "DaysInPhase": [1, 1, 1, 1], "Seasons": ["Spring"]}}"#,
    );

    write_fixture(
        dir,
        "Shops.json",
        r#"{
            "SeedShop": {"Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": -1}]},
            "Joja": {"Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": 25}]},
            "Sandy": {"Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": 30}]},
            "Traveler": {"Items": []},
            "IslandTrade": {
                "Items": [{
                    "Id": "(O)472",
                    "ItemId": "(O)472",
                    "TradeItemId": "(O)388",
                    "TradeItemAmount": 5
                }]
            },
            "Festival_NightMarket_MagicBoat_Day2": {
                "Items": [{"Id": "(O)472", "ItemId": "(O)472", "Price": 100}]
            }
        }"#,
    );

    GameData::load(dir, Namespace::Sve).expect("load sve sample data")
}
