//! Static catalog of bookable pujas and festival names.
//!
//! The catalog is fixed at startup and never mutated. Filtering is a plain
//! case-insensitive substring match on the puja name and its materials, in
//! catalog order.

use serde::{Deserialize, Serialize};

/// Festivals offered for advance booking, in display order.
pub const FESTIVALS: [&str; 9] = [
    "Makar Sankranti",
    "Mahashivratri",
    "Holi",
    "Navratri",
    "Ganesh Chaturthi",
    "Dussehra",
    "Diwali",
    "Chhath Puja",
    "Guru Purnima",
];

/// Unique identifier of a catalog entry (e.g. `griha-pravesh`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferingId(String);

impl OfferingId {
    /// Creates an id from its slug
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the slug
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OfferingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bookable ritual service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    /// Unique identifier
    pub id: OfferingId,
    /// Display name
    pub name: String,
    /// Price in whole rupees
    pub price: u64,
    /// Free-text duration ("2 hours", "Custom")
    pub duration: String,
    /// Materials the family should arrange, in display order
    pub materials: Vec<String>,
    /// Short description
    pub description: String,
}

impl ServiceOffering {
    fn new(
        id: &str,
        name: &str,
        price: u64,
        duration: &str,
        materials: &[&str],
        description: &str,
    ) -> Self {
        Self {
            id: OfferingId::new(id),
            name: name.to_string(),
            price,
            duration: duration.to_string(),
            materials: materials.iter().map(ToString::to_string).collect(),
            description: description.to_string(),
        }
    }

    /// Whether the name or any material contains `needle`
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .materials
                .iter()
                .any(|material| material.to_lowercase().contains(needle))
    }

    /// Price as shown on cards and in the form (`₹ 2,100`)
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("₹ {}", format_amount(self.price))
    }
}

/// Ordered, immutable list of offerings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    offerings: Vec<ServiceOffering>,
}

impl Catalog {
    /// Creates a catalog from offerings in display order
    #[must_use]
    pub const fn new(offerings: Vec<ServiceOffering>) -> Self {
        Self { offerings }
    }

    /// The catalog the provider publishes by default
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            ServiceOffering::new(
                "satyanarayan-katha",
                "Satyanarayan Katha",
                2100,
                "2–3 hours",
                &[
                    "Kalash",
                    "Coconut",
                    "Moli",
                    "Panchamrit",
                    "Dry fruits",
                    "Panch phal",
                    "Ghee diya",
                    "Laung elaichi",
                    "Hawan samagri",
                ],
                "Auspicious katha for prosperity and family well-being, performed on full moon or special occasions.",
            ),
            ServiceOffering::new(
                "griha-pravesh",
                "Griha Pravesh Puja",
                3100,
                "3–4 hours",
                &[
                    "Navagraha yantra",
                    "Kalash",
                    "Gangajal",
                    "Mango leaves",
                    "Turmeric",
                    "Rice",
                    "Flowers",
                    "Camphor",
                    "Hawan samagri",
                ],
                "Housewarming ceremony to purify the new home and invite positive energies.",
            ),
            ServiceOffering::new(
                "rudrabhishek",
                "Rudrabhishek",
                2500,
                "2 hours",
                &[
                    "Bilva patra",
                    "Milk curd honey ghee sugar",
                    "Ganga jal",
                    "Bhasma",
                    "White flowers",
                    "Rudra mantra book",
                ],
                "Lord Shiva abhishek for health, protection, and removal of obstacles.",
            ),
            ServiceOffering::new(
                "navratri-puja",
                "Navratri Puja (Daily/Complete)",
                5100,
                "Custom",
                &[
                    "Durga idol or photo",
                    "Kumkum",
                    "Akshat",
                    "Nariyal",
                    "Panchmeva",
                    "Deepak",
                    "Hawan samagri",
                ],
                "Nine-day worship of Goddess Durga with daily archana and hawan.",
            ),
            ServiceOffering::new(
                "marriage-puja",
                "Vivah Puja (Pre/Post)",
                11000,
                "Half/Full day",
                &[
                    "Mandap setup",
                    "Samidha",
                    "Havan kund",
                    "Haldi kumkum",
                    "Akshat",
                    "Kalasas",
                    "Fruits sweets",
                ],
                "Traditional marriage rituals as per sampradaya, muhurat, and gotra.",
            ),
        ])
    }

    /// All offerings in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ServiceOffering> {
        self.offerings.iter()
    }

    /// Number of offerings
    #[must_use]
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Looks up an offering by id
    #[must_use]
    pub fn get(&self, id: &OfferingId) -> Option<&ServiceOffering> {
        self.offerings.iter().find(|offering| &offering.id == id)
    }

    /// Looks up an offering by its slug
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&ServiceOffering> {
        self.offerings.iter().find(|offering| offering.id.as_str() == slug)
    }

    /// Offerings whose name or materials contain `query`, ignoring case
    ///
    /// An empty query matches everything. Order is catalog order.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&ServiceOffering> {
        let needle = query.to_lowercase();
        self.offerings
            .iter()
            .filter(|offering| offering.matches(&needle))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Formats a rupee amount with thousands separators (`11000` → `11,000`)
#[must_use]
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
