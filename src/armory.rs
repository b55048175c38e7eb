//! Equipment inventory: catalog, filtering, sorting and stock totals.

use std::collections::BTreeMap;

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Rifle,
    Pistol,
    Sniper,
    Shotgun,
    Smg,
    Lmg,
    Special,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Rifle,
            Category::Pistol,
            Category::Sniper,
            Category::Shotgun,
            Category::Smg,
            Category::Lmg,
            Category::Special,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Rifle => "rifle",
            Category::Pistol => "pistol",
            Category::Sniper => "sniper",
            Category::Shotgun => "shotgun",
            Category::Smg => "smg",
            Category::Lmg => "lmg",
            Category::Special => "special",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Category::Rifle => Color::Rgb(96, 165, 250),
            Category::Pistol => Color::Rgb(192, 132, 252),
            Category::Sniper => Color::Rgb(248, 113, 113),
            Category::Shotgun => Color::Rgb(251, 146, 60),
            Category::Smg => Color::Rgb(74, 222, 128),
            Category::Lmg => Color::Rgb(250, 204, 21),
            Category::Special => Color::Rgb(244, 114, 182),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockStatus {
    Available,
    LowStock,
    OutOfStock,
    Maintenance,
}

impl StockStatus {
    pub fn all() -> &'static [StockStatus] {
        &[
            StockStatus::Available,
            StockStatus::LowStock,
            StockStatus::OutOfStock,
            StockStatus::Maintenance,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Available => "Available",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::Maintenance => "Maintenance",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            StockStatus::Available => Color::Rgb(74, 222, 128),
            StockStatus::LowStock => Color::Rgb(250, 204, 21),
            StockStatus::OutOfStock => Color::Rgb(248, 113, 113),
            StockStatus::Maintenance => Color::Rgb(251, 146, 60),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub id: &'static str,
    pub name: &'static str,
    /// Unit price in whole dollars.
    pub price: u32,
    pub range: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub total_stock: u32,
    pub category: Category,
    pub caliber: &'static str,
    pub weight: &'static str,
    pub length: &'static str,
    pub fire_rate: &'static str,
    pub magazine: &'static str,
    pub status: StockStatus,
}

pub fn catalog() -> Vec<Weapon> {
    use Category::*;
    use StockStatus::*;
    vec![
        Weapon {
            id: "wpn-001",
            name: "M4A1 Carbine",
            price: 1450,
            range: "500 m",
            usage: "Assault, patrol",
            description: "Compact select-fire carbine for close and medium range engagements",
            total_stock: 24,
            category: Rifle,
            caliber: "5.56x45mm",
            weight: "2.9 kg",
            length: "838 mm",
            fire_rate: "700-950 RPM",
            magazine: "30 rounds",
            status: Available,
        },
        Weapon {
            id: "wpn-002",
            name: "HK416",
            price: 2900,
            range: "600 m",
            usage: "Special operations",
            description: "Piston-driven rifle with high reliability in harsh environments",
            total_stock: 8,
            category: Rifle,
            caliber: "5.56x45mm",
            weight: "3.5 kg",
            length: "900 mm",
            fire_rate: "850 RPM",
            magazine: "30 rounds",
            status: LowStock,
        },
        Weapon {
            id: "wpn-003",
            name: "Glock 17",
            price: 550,
            range: "50 m",
            usage: "Sidearm",
            description: "Polymer-frame service pistol with a large magazine",
            total_stock: 40,
            category: Pistol,
            caliber: "9x19mm",
            weight: "0.7 kg",
            length: "202 mm",
            fire_rate: "Semi-auto",
            magazine: "17 rounds",
            status: Available,
        },
        Weapon {
            id: "wpn-004",
            name: "SIG P226",
            price: 1050,
            range: "50 m",
            usage: "Sidearm, covert carry",
            description: "Full-size double-action pistol favoured by naval units",
            total_stock: 3,
            category: Pistol,
            caliber: "9x19mm",
            weight: "0.96 kg",
            length: "196 mm",
            fire_rate: "Semi-auto",
            magazine: "15 rounds",
            status: LowStock,
        },
        Weapon {
            id: "wpn-005",
            name: "M24 SWS",
            price: 3800,
            range: "800 m",
            usage: "Precision overwatch",
            description: "Bolt-action sniper weapon system with a free-floating barrel",
            total_stock: 6,
            category: Sniper,
            caliber: "7.62x51mm",
            weight: "5.4 kg",
            length: "1092 mm",
            fire_rate: "Bolt action",
            magazine: "5 rounds",
            status: Maintenance,
        },
        Weapon {
            id: "wpn-006",
            name: "Barrett M82A1",
            price: 8900,
            range: "1800 m",
            usage: "Anti-materiel",
            description: "Semi-automatic heavy rifle for long range anti-materiel work",
            total_stock: 2,
            category: Sniper,
            caliber: ".50 BMG",
            weight: "14 kg",
            length: "1448 mm",
            fire_rate: "Semi-auto",
            magazine: "10 rounds",
            status: Available,
        },
        Weapon {
            id: "wpn-007",
            name: "Remington 870",
            price: 480,
            range: "40 m",
            usage: "Breaching, close quarters",
            description: "Pump-action shotgun used for door breaching",
            total_stock: 15,
            category: Shotgun,
            caliber: "12 gauge",
            weight: "3.6 kg",
            length: "1060 mm",
            fire_rate: "Pump action",
            magazine: "6 rounds",
            status: Available,
        },
        Weapon {
            id: "wpn-008",
            name: "MP5A3",
            price: 2300,
            range: "100 m",
            usage: "Close protection",
            description: "Roller-delayed submachine gun with a collapsible stock",
            total_stock: 12,
            category: Smg,
            caliber: "9x19mm",
            weight: "3.1 kg",
            length: "700 mm",
            fire_rate: "800 RPM",
            magazine: "30 rounds",
            status: Available,
        },
        Weapon {
            id: "wpn-009",
            name: "FN P90",
            price: 2600,
            range: "200 m",
            usage: "Vehicle crews",
            description: "Bullpup personal defense weapon with a top-mounted magazine",
            total_stock: 0,
            category: Smg,
            caliber: "5.7x28mm",
            weight: "2.6 kg",
            length: "500 mm",
            fire_rate: "900 RPM",
            magazine: "50 rounds",
            status: OutOfStock,
        },
        Weapon {
            id: "wpn-010",
            name: "M249 SAW",
            price: 4800,
            range: "800 m",
            usage: "Squad support",
            description: "Belt-fed light machine gun for sustained suppressive fire",
            total_stock: 5,
            category: Lmg,
            caliber: "5.56x45mm",
            weight: "7.5 kg",
            length: "1041 mm",
            fire_rate: "750 RPM",
            magazine: "200 round belt",
            status: Available,
        },
        Weapon {
            id: "wpn-011",
            name: "M32 MGL",
            price: 6100,
            range: "375 m",
            usage: "Area denial",
            description: "Six-shot revolving grenade launcher",
            total_stock: 4,
            category: Special,
            caliber: "40x46mm",
            weight: "5.3 kg",
            length: "812 mm",
            fire_rate: "Semi-auto",
            magazine: "6 round cylinder",
            status: Maintenance,
        },
    ]
}

/// Preset price bands offered by the filter, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PriceBand {
    #[default]
    All,
    Under1k,
    From1kTo2500,
    From2500To5k,
    Over5k,
}

impl PriceBand {
    pub fn all() -> &'static [PriceBand] {
        &[
            PriceBand::All,
            PriceBand::Under1k,
            PriceBand::From1kTo2500,
            PriceBand::From2500To5k,
            PriceBand::Over5k,
        ]
    }

    pub fn bounds(&self) -> (u32, u32) {
        match self {
            PriceBand::All => (0, 10_000),
            PriceBand::Under1k => (0, 1_000),
            PriceBand::From1kTo2500 => (1_000, 2_500),
            PriceBand::From2500To5k => (2_500, 5_000),
            PriceBand::Over5k => (5_000, 10_000),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::All => "All Prices",
            PriceBand::Under1k => "Under $1,000",
            PriceBand::From1kTo2500 => "$1,000 - $2,500",
            PriceBand::From2500To5k => "$2,500 - $5,000",
            PriceBand::Over5k => "$5,000+",
        }
    }

    pub fn next(&self) -> PriceBand {
        next_in(PriceBand::all(), *self)
    }
}

fn next_in<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Step through `None` ("all") and then every value in order.
pub fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(v) => {
            let idx = all.iter().position(|x| *x == v)?;
            all.get(idx + 1).copied()
        }
    }
}

/// `None` in a field means "all".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeaponFilter {
    pub category: Option<Category>,
    pub price: PriceBand,
    pub status: Option<StockStatus>,
    pub search: String,
}

impl WeaponFilter {
    pub fn matches(&self, weapon: &Weapon) -> bool {
        if self.category.is_some_and(|c| c != weapon.category) {
            return false;
        }
        let (lo, hi) = self.price.bounds();
        if weapon.price < lo || weapon.price > hi {
            return false;
        }
        if self.status.is_some_and(|s| s != weapon.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || weapon.name.to_lowercase().contains(&needle)
            || weapon.description.to_lowercase().contains(&needle)
    }

    pub fn is_default(&self) -> bool {
        *self == WeaponFilter::default()
    }
}

pub fn filter_weapons<'a>(weapons: &'a [Weapon], filter: &WeaponFilter) -> Vec<&'a Weapon> {
    weapons.iter().filter(|w| filter.matches(w)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Stock,
    Category,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Name, SortKey::Price, SortKey::Stock, SortKey::Category]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Stock => "stock",
            SortKey::Category => "category",
        }
    }

    pub fn next(&self) -> SortKey {
        next_in(SortKey::all(), *self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Asc => "\u{2191}",
            SortOrder::Desc => "\u{2193}",
        }
    }
}

/// Stable sort; names compare case-insensitively.
pub fn sort_weapons(weapons: &mut [&Weapon], key: SortKey, order: SortOrder) {
    weapons.sort_by(|a, b| {
        let ord = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Stock => a.total_stock.cmp(&b.total_stock),
            SortKey::Category => a.category.label().cmp(b.category.label()),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeaponStats {
    pub total_weapons: usize,
    pub available_stock: u32,
    /// Sum of price times stock, in dollars.
    pub total_value: u64,
    pub categories: BTreeMap<Category, usize>,
}

pub fn calculate_stats(weapons: &[Weapon]) -> WeaponStats {
    let mut stats = WeaponStats {
        total_weapons: weapons.len(),
        ..WeaponStats::default()
    };
    for w in weapons {
        stats.available_stock += w.total_stock;
        stats.total_value += u64::from(w.price) * u64::from(w.total_stock);
        *stats.categories.entry(w.category).or_insert(0) += 1;
    }
    stats
}

/// Whole US dollars with thousands separators: `$12,345`.
pub fn format_price(dollars: u64) -> String {
    let digits = dollars.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
