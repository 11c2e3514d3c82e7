use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::ident;
use crate::store::GameData;

/// The traveling cart draws its stock from this object-id range.
const RANDOM_STOCK_RANGE: std::ops::Range<u32> = 2..790;

/// Category sentinel for items that can never be sold.
const CATEGORY_UNSELLABLE: i64 = -999;

/// Raw `Price` sentinel meaning "derive from the item's own sell price".
const PRICE_USE_SELL_PRICE: i64 = -1;

/// One shop as declared in the shops table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShopRecord {
    pub items: Vec<ShopItemRecord>,
    pub price_modifiers: Option<Vec<PriceModifierRecord>>,
}

/// One declared goods entry. Either `item_id` names a fixed item or
/// `random_item_id` lists candidates that each become their own entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShopItemRecord {
    pub id: Option<String>,
    pub item_id: Option<String>,
    pub random_item_id: Option<Vec<String>>,
    pub price: Option<i64>,
    pub trade_item_id: Option<String>,
    pub trade_item_amount: Option<i64>,
    pub min_stack: Option<i64>,
    pub available_stock: Option<i64>,
    pub is_recipe: bool,
    pub ignore_shop_price_modifiers: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceModifierRecord {
    pub modification: String,
    pub amount: Option<f64>,
    pub random_amount: Option<Vec<f64>>,
}

impl PriceModifierRecord {
    /// Apply this shop-wide modifier to a derived gold price. `Set` with a
    /// fixed operand overrides the price outright and ignores the exemption
    /// flag; only `Multiply` honors it. Operand combinations outside the
    /// known shapes resolve to an explicit invalid marker, never a guess.
    pub fn apply(&self, price: i64, exempt: bool) -> Price {
        match self.modification.as_str() {
            "Multiply" => {
                let Some(amount) = self.amount.filter(|value| *value != 0.0) else {
                    return Price::Invalid;
                };
                if exempt {
                    Price::Gold(price)
                } else {
                    Price::Gold((amount * price as f64) as i64)
                }
            }
            "Set" => {
                if let Some(amount) = self.amount.filter(|value| *value != 0.0) {
                    return Price::Gold(amount as i64);
                }
                if let Some(range) = &self.random_amount
                    && !range.is_empty()
                {
                    let min = range.iter().cloned().fold(f64::INFINITY, f64::min);
                    let max = range.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                    return Price::Range(min as i64, max as i64);
                }
                Price::Invalid
            }
            _ => Price::Invalid,
        }
    }
}

/// Effective display price of a goods entry. The range form comes from
/// randomized `Set` modifiers and is a different display type than a plain
/// gold amount, so consumers must match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Price {
    Gold(i64),
    Range(i64, i64),
    /// Entry had no numeric base price (unknown item linkage); rendered as a
    /// placeholder, never dropped silently.
    Unknown,
    /// A modifier/operand combination outside the supported shapes.
    Invalid,
}

impl Price {
    pub fn render(&self) -> String {
        match self {
            Self::Gold(amount) => amount.to_string(),
            Self::Range(min, max) => format!("{min} ~ {max}"),
            Self::Unknown => "?".to_string(),
            Self::Invalid => "invalid price".to_string(),
        }
    }
}

/// One sellable goods entry with its price fully resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Goods {
    pub id: String,
    pub item_id: String,
    pub price: Price,
    pub trade_item_id: Option<String>,
    pub trade_item_amount: Option<i64>,
    pub min_stack: Option<i64>,
    pub available_stock: Option<i64>,
    pub is_recipe: bool,
    pub ignore_price_modifiers: bool,
    /// True when this entry was synthesized (randomized or computed stock)
    /// rather than declared literally in the source table.
    pub random_sell: bool,
}

/// A shop's goods list, rebuilt fresh per run.
#[derive(Debug, Clone, Default)]
pub struct ShopInventory {
    pub goods: Vec<Goods>,
}

impl ShopInventory {
    /// Build the goods list from a declared shop. Each randomized entry is
    /// expanded into one synthesized record per candidate id sharing the
    /// entry's price/stock/flags. An entry declaring neither a fixed item nor
    /// candidates is malformed static input and aborts the run.
    pub fn build(data: &GameData, shop: &ShopRecord) -> Result<Self> {
        let mut drafts = Vec::new();
        for entry in &shop.items {
            match (&entry.item_id, &entry.random_item_id) {
                (Some(item_id), _) => drafts.push(draft_from_entry(entry, item_id.clone(), false)),
                (None, Some(candidates)) => {
                    for item_id in candidates {
                        drafts.push(draft_from_entry(entry, item_id.clone(), true));
                    }
                }
                (None, None) => bail!(
                    "shop entry {} declares neither ItemId nor RandomItemId",
                    entry.id.as_deref().unwrap_or("<unnamed>")
                ),
            }
        }
        Ok(Self::resolve(data, shop, drafts))
    }

    /// Build the traveling-cart variant: no declared list, stock computed by
    /// scanning the whole object table over a fixed id range. Unsellable and
    /// random-sale-excluded items are skipped; survivors are priced at twice
    /// their own sell price (via the sell-price sentinel) before modifiers.
    pub fn build_random_stock(data: &GameData, shop: &ShopRecord) -> Self {
        let mut drafts = Vec::new();
        for id in RANDOM_STOCK_RANGE {
            let code = id.to_string();
            let Some(item) = data.try_get_object(&code) else {
                continue;
            };
            if item.category == CATEGORY_UNSELLABLE || item.exclude_from_random_sale {
                continue;
            }
            drafts.push(GoodsDraft {
                id: format!("RandomSale (O){id}"),
                item_id: ident::qualify(&code),
                price: Some(PRICE_USE_SELL_PRICE),
                trade_item_id: None,
                trade_item_amount: None,
                min_stack: None,
                available_stock: None,
                is_recipe: false,
                ignore_price_modifiers: false,
                random_sell: true,
            });
        }
        Self::resolve(data, shop, drafts)
    }

    /// Linear scan for the first goods entry matching `code` after
    /// normalization. Duplicates are not collapsed; source order wins.
    pub fn try_get_goods(&self, code: &str) -> Option<&Goods> {
        let target = ident::trim(code);
        self.goods
            .iter()
            .find(|goods| ident::trim(&goods.item_id) == target)
    }

    fn resolve(data: &GameData, shop: &ShopRecord, drafts: Vec<GoodsDraft>) -> Self {
        let modifier = shop
            .price_modifiers
            .as_ref()
            .and_then(|modifiers| modifiers.first());
        let goods = drafts
            .into_iter()
            .map(|draft| draft.into_goods(data, modifier))
            .collect();
        Self { goods }
    }
}

/// A goods entry before price resolution; `price` is still the raw declared
/// value (or its absence).
struct GoodsDraft {
    id: String,
    item_id: String,
    price: Option<i64>,
    trade_item_id: Option<String>,
    trade_item_amount: Option<i64>,
    min_stack: Option<i64>,
    available_stock: Option<i64>,
    is_recipe: bool,
    ignore_price_modifiers: bool,
    random_sell: bool,
}

fn draft_from_entry(entry: &ShopItemRecord, item_id: String, random_sell: bool) -> GoodsDraft {
    GoodsDraft {
        id: entry.id.clone().unwrap_or_default(),
        item_id,
        price: entry.price,
        trade_item_id: entry.trade_item_id.clone(),
        trade_item_amount: entry.trade_item_amount,
        min_stack: entry.min_stack,
        available_stock: entry.available_stock,
        is_recipe: entry.is_recipe,
        ignore_price_modifiers: entry.ignore_shop_price_modifiers,
        random_sell,
    }
}

impl GoodsDraft {
    /// Base-price derivation, then the shop modifier, applied exactly once.
    /// Order matters: `Set` modifiers must override a derived price while
    /// `Multiply` modifiers scale it.
    fn into_goods(self, data: &GameData, modifier: Option<&PriceModifierRecord>) -> Goods {
        let price = match self.price {
            // No numeric base price: unknown item linkage, skip modifiers.
            None => Price::Unknown,
            Some(raw) => {
                let mut base = raw;
                if self.is_recipe {
                    base *= 10;
                } else if base < 0
                    && let Some(item) = data.try_get_object(&self.item_id)
                {
                    base = item.price * 2;
                }
                match modifier {
                    Some(modifier) => modifier.apply(base, self.ignore_price_modifiers),
                    None => Price::Gold(base),
                }
            }
        };

        Goods {
            id: self.id,
            item_id: self.item_id,
            price,
            trade_item_id: self.trade_item_id,
            trade_item_amount: self.trade_item_amount,
            min_stack: self.min_stack,
            available_stock: self.available_stock,
            is_recipe: self.is_recipe,
            ignore_price_modifiers: self.ignore_price_modifiers,
            random_sell: self.random_sell,
        }
    }
}

/// The fixed set of shops consulted when assembling seed reports. Shops the
/// namespace does not declare get an empty inventory.
#[derive(Debug, Default)]
pub struct ShopSet {
    pub general_store: ShopInventory,
    pub joja_mart: ShopInventory,
    pub oasis: ShopInventory,
    pub traveling_cart: ShopInventory,
    pub island_trade: ShopInventory,
    pub raccoon: ShopInventory,
    pub night_market: [ShopInventory; 3],
}

impl ShopSet {
    pub fn load(data: &GameData) -> Result<Self> {
        Ok(Self {
            general_store: build_named(data, "SeedShop")?,
            joja_mart: build_named(data, "Joja")?,
            oasis: build_named(data, "Sandy")?,
            traveling_cart: data
                .shops()
                .get("Traveler")
                .map(|shop| ShopInventory::build_random_stock(data, shop))
                .unwrap_or_default(),
            island_trade: build_named(data, "IslandTrade")?,
            raccoon: build_named(data, "Raccoon")?,
            night_market: [
                build_named(data, "Festival_NightMarket_MagicBoat_Day1")?,
                build_named(data, "Festival_NightMarket_MagicBoat_Day2")?,
                build_named(data, "Festival_NightMarket_MagicBoat_Day3")?,
            ],
        })
    }
}

fn build_named(data: &GameData, name: &str) -> Result<ShopInventory> {
    match data.shops().get(name) {
        Some(shop) => ShopInventory::build(data, shop),
        None => Ok(ShopInventory::default()),
    }
}

/// Every declared shop with its goods resolved, in table order. The shop
/// named `Traveler` is the computed-stock variant.
pub fn build_all(data: &GameData) -> Result<Vec<(String, ShopInventory)>> {
    let mut out = Vec::new();
    for (name, shop) in data.shops().iter() {
        let inventory = if name == "Traveler" {
            ShopInventory::build_random_stock(data, shop)
        } else {
            ShopInventory::build(data, shop)?
        };
        out.push((name.to_string(), inventory));
    }
    Ok(out)
}
