use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::ident;
use crate::model::{BigCraftableRecord, CropRecord, FruitTreeRecord, ObjectRecord};
use crate::shop::ShopRecord;

/// An insertion-ordered table keyed by string identifier. Several resolution
/// rules are "first match in source order wins", so iteration must follow the
/// JSON document order, not a sorted or hashed order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    pub fn insert(&mut self, key: String, value: T) {
        if let Some(&position) = self.index.get(&key) {
            self.entries[position].1 = value;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in source document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Table<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
            type Value = Table<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a JSON object keyed by item identifier")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut table = Table::default();
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    table.insert(key, value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Which content namespace the data directory holds. The two namespaces ship
/// different file sets and encode localization keys differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Vanilla,
    Sve,
}

impl Namespace {
    pub fn parse(value: &str) -> Result<Self> {
        if value.eq_ignore_ascii_case("vanilla") {
            return Ok(Self::Vanilla);
        }
        if value.eq_ignore_ascii_case("sve") {
            return Ok(Self::Sve);
        }
        bail!("unsupported namespace: {value} (expected vanilla|sve)")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::Sve => "sve",
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::Vanilla
    }
}

/// The loaded game-data snapshot. Constructed once per run and passed by
/// reference to every resolver; read-only after load.
#[derive(Debug, Default)]
pub struct GameData {
    pub namespace: Namespace,
    objects: Table<ObjectRecord>,
    object_names: HashMap<String, String>,
    big_craftables: Table<BigCraftableRecord>,
    big_craftable_names: HashMap<String, String>,
    crops: Table<CropRecord>,
    fruit_trees: Table<FruitTreeRecord>,
    shops: Table<ShopRecord>,
    item_ids: HashMap<String, String>,
    fish: HashMap<String, String>,
    cooking_recipes: Table<String>,
    crafting_recipes: Table<String>,
}

impl GameData {
    /// Load every table the namespace ships from `data_dir`. The objects
    /// table is structural: without it nothing downstream can be trusted, so
    /// a missing or empty one aborts the load. Every other table degrades to
    /// empty, and lookups against it report "not found".
    pub fn load(data_dir: &Path, namespace: Namespace) -> Result<Self> {
        let mut data = GameData {
            namespace,
            objects: read_required_table(&data_dir.join("Objects.json"))?,
            big_craftables: read_optional(&data_dir.join("BigCraftables.json"))?,
            crops: read_optional(&data_dir.join("Crops.json"))?,
            fruit_trees: read_optional(&data_dir.join("FruitTrees.json"))?,
            shops: read_optional(&data_dir.join("Shops.json"))?,
            cooking_recipes: read_optional(&data_dir.join("CookingRecipes.json"))?,
            crafting_recipes: read_optional(&data_dir.join("CraftingRecipes.json"))?,
            ..GameData::default()
        };

        match namespace {
            Namespace::Vanilla => {
                data.object_names = read_optional(&data_dir.join("Objects.zh-CN.json"))?;
                data.big_craftable_names =
                    read_optional(&data_dir.join("BigCraftables.zh-CN.json"))?;
                data.item_ids = read_optional(&data_dir.join("ItemID.json"))?;
                data.fish = read_optional(&data_dir.join("Fish.json"))?;
            }
            Namespace::Sve => {
                // The expansion ships one shared localization table.
                data.object_names = read_optional(&data_dir.join("zh.json"))?;
                data.big_craftable_names = data.object_names.clone();
            }
        }

        Ok(data)
    }

    pub fn objects(&self) -> &Table<ObjectRecord> {
        &self.objects
    }

    pub fn crops(&self) -> &Table<CropRecord> {
        &self.crops
    }

    pub fn fruit_trees(&self) -> &Table<FruitTreeRecord> {
        &self.fruit_trees
    }

    pub fn shops(&self) -> &Table<ShopRecord> {
        &self.shops
    }

    pub fn cooking_recipes(&self) -> &Table<String> {
        &self.cooking_recipes
    }

    pub fn crafting_recipes(&self) -> &Table<String> {
        &self.crafting_recipes
    }

    pub fn fish_entry(&self, code: &str) -> Option<&str> {
        self.fish.get(ident::trim(code)).map(String::as_str)
    }

    /// Look up an object by bare or `(O)`-qualified code. Absence is the
    /// dominant failure mode across callers and is never an error.
    pub fn try_get_object(&self, code: &str) -> Option<&ObjectRecord> {
        self.objects.get(ident::trim(code))
    }

    /// Look up a big-craftable by bare or `(BC)`-qualified code.
    pub fn try_get_big_craftable(&self, code: &str) -> Option<&BigCraftableRecord> {
        let bare = code
            .strip_prefix(ident::BIG_CRAFTABLE_PREFIX)
            .unwrap_or(code);
        self.big_craftables.get(bare)
    }

    pub fn try_get_crop(&self, seed_code: &str) -> Option<&CropRecord> {
        self.crops.get(ident::trim(seed_code))
    }

    pub fn try_get_fruit_tree(&self, sapling_code: &str) -> Option<&FruitTreeRecord> {
        self.fruit_trees.get(ident::trim(sapling_code))
    }

    /// Internal (English) name of an object.
    pub fn get_name(&self, code: &str) -> Option<&str> {
        self.try_get_object(code).map(|record| record.name.as_str())
    }

    /// Internal name via the prebuilt qualified-id index, when the namespace
    /// ships one. Keys in that index are already qualified.
    pub fn quick_get_name(&self, qualified_code: &str) -> Option<&str> {
        self.item_ids.get(qualified_code).map(String::as_str)
    }

    /// Localized display name of an object. The raw `DisplayName` string is a
    /// reference into the localization table; an unrecognized encoding or a
    /// missing key yields `None` so callers decide how to degrade.
    pub fn display_name(&self, code: &str) -> Option<String> {
        let record = self.try_get_object(code)?;
        let key = self.localization_key(&record.display_name)?;
        self.object_names.get(&key).cloned()
    }

    /// Localized display name of a big-craftable.
    pub fn display_name_big_craftable(&self, code: &str) -> Option<String> {
        let record = self.try_get_big_craftable(code)?;
        let key = self.localization_key(&record.display_name)?;
        self.big_craftable_names.get(&key).cloned()
    }

    fn localization_key(&self, raw: &str) -> Option<String> {
        match self.namespace {
            Namespace::Vanilla => vanilla_localization_key(raw),
            Namespace::Sve => sve_localization_key(raw),
        }
    }
}

/// Vanilla encoding: `[LocalizedText Strings\Objects:Moss_Name]` -> `Moss_Name`.
fn vanilla_localization_key(raw: &str) -> Option<String> {
    if !raw.starts_with("[LocalizedText") {
        return None;
    }
    let after_colon = raw.rsplit_once(':')?.1;
    let stem = after_colon.strip_suffix("_Name]")?;
    if stem.is_empty() || stem.contains(']') {
        return None;
    }
    Some(format!("{stem}_Name"))
}

/// Expansion encoding: `{{i18n:SomeKey}}` -> `SomeKey`.
fn sve_localization_key(raw: &str) -> Option<String> {
    let rest = raw.strip_prefix("{{i18n:")?;
    let key = rest.split_once("}}")?.0;
    if key.is_empty() {
        return None;
    }
    Some(key.to_string())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn read_required_table<T: DeserializeOwned>(path: &Path) -> Result<Table<T>> {
    let table: Table<T> = read_json(path)?;
    if table.is_empty() {
        bail!("required table {} is empty", path.display());
    }
    Ok(table)
}

fn read_optional<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path)
}
