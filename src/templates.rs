//! Quick Templates
//!
//! Preset item kinds with typical colors, brands and campus locations.
//! Picking a template fills the title and category; picking a chip fills a field.

use crate::report::ReportForm;

pub const BLOCKS: &[&str] = &["C Block", "S Block", "R Block", "F Block", "M Block", "SK Block", "Arts Block"];
pub const CANTEENS: &[&str] = &["Satish Canteen", "Main Canteen"];
pub const OTHER_PLACES: &[&str] = &["Library", "Parking"];

const PHONE_COLORS: &[&str] = &["Black", "White", "Silver", "Gold", "Blue", "Rose Gold"];

#[derive(Debug, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// One of the wizard categories
    pub category: &'static str,
    pub colors: &'static [&'static str],
    pub brands: &'static [&'static str],
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "phone",
        name: "Phone",
        icon: "📱",
        category: "Electronics",
        colors: PHONE_COLORS,
        brands: &["Apple", "Samsung", "Google", "OnePlus", "Xiaomi", "Realme", "Vivo", "Oppo"],
    },
    Template {
        id: "earbuds",
        name: "Earbuds",
        icon: "🎧",
        category: "Electronics",
        colors: PHONE_COLORS,
        brands: &["Apple", "Samsung", "Google", "Sony", "JBL", "BoAt", "Noise", "OnePlus"],
    },
    Template {
        id: "wallet",
        name: "Wallet",
        icon: "👛",
        category: "Bags & Accessories",
        colors: &["Black", "Brown", "Tan", "Red", "Navy", "Burgundy"],
        brands: &["Coach", "Michael Kors", "Louis Vuitton", "Hermes", "Ralph Lauren", "Tommy Hilfiger"],
    },
    Template {
        id: "keys",
        name: "Keys",
        icon: "🔑",
        category: "Keys",
        colors: &["Silver", "Gold", "Black", "Blue", "Bronze"],
        brands: &["Yale", "Schlage", "Kwikset", "Master Lock"],
    },
    Template {
        id: "idcard",
        name: "ID Card",
        icon: "🪪",
        category: "Documents",
        colors: &["Red", "Blue", "Green", "Yellow"],
        brands: &["University", "College", "Institute"],
    },
    Template {
        id: "books",
        name: "Books",
        icon: "📚",
        category: "Books & Stationery",
        colors: &["Various", "Blue", "Red", "Green", "Black", "Yellow"],
        brands: &["Oxford", "Cambridge", "Penguin", "HarperCollins"],
    },
    Template {
        id: "backpack",
        name: "Backpack",
        icon: "🎒",
        category: "Bags & Accessories",
        colors: &["Black", "Navy", "Brown", "Green", "Gray", "Red", "Blue"],
        brands: &["North Face", "Herschel", "JanSport", "Osprey", "Nike", "Adidas", "Puma"],
    },
    Template {
        id: "clothing",
        name: "Clothing",
        icon: "👕",
        category: "Clothing",
        colors: &["Black", "White", "Navy", "Gray", "Brown", "Green", "Red", "Blue"],
        brands: &["Nike", "Adidas", "Puma", "Zara", "H&M", "Uniqlo", "Levis"],
    },
    Template {
        id: "jacket",
        name: "Jacket",
        icon: "🧥",
        category: "Clothing",
        colors: &["Black", "Navy", "Brown", "Green", "Gray", "Red", "Blue", "White"],
        brands: &["North Face", "Columbia", "Adidas", "Nike", "Zara", "Jack & Jones"],
    },
    Template {
        id: "laptop",
        name: "Laptop",
        icon: "💻",
        category: "Electronics",
        colors: &["Silver", "Space Gray", "Black", "White", "Rose Gold"],
        brands: &["Apple", "Dell", "HP", "Lenovo", "Microsoft", "ASUS", "Acer", "MSI"],
    },
    Template {
        id: "tablet",
        name: "Tablet",
        icon: "📲",
        category: "Electronics",
        colors: &["Silver", "Space Gray", "Black", "Gold"],
        brands: &["Apple", "Samsung", "Lenovo", "Microsoft", "ASUS"],
    },
    Template {
        id: "headphones",
        name: "Headphones",
        icon: "🎧",
        category: "Electronics",
        colors: &["Black", "White", "Silver", "Gold", "Rose Gold", "Blue", "Red"],
        brands: &["Sony", "Bose", "Beats", "JBL", "Audio-Technica", "Sennheiser", "AKG"],
    },
    Template {
        id: "smartwatch",
        name: "Smartwatch",
        icon: "⌚",
        category: "Personal Items",
        colors: &["Silver", "Gold", "Black", "Rose Gold", "White", "Blue", "Green"],
        brands: &["Apple", "Samsung", "Garmin", "Fitbit", "Noise", "BoAt"],
    },
    Template {
        id: "watch",
        name: "Watch",
        icon: "⌚",
        category: "Personal Items",
        colors: &["Silver", "Gold", "Black", "Rose Gold", "White", "Brown", "Blue"],
        brands: &["Rolex", "Casio", "Seiko", "Titan", "Fastrack", "Omega"],
    },
    Template {
        id: "glasses",
        name: "Glasses",
        icon: "👓",
        category: "Personal Items",
        colors: &["Black", "Brown", "Tortoise", "Gold", "Silver", "Red", "Blue"],
        brands: &["Ray-Ban", "Oakley", "Warby Parker", "Prada", "Gucci"],
    },
    Template {
        id: "umbrella",
        name: "Umbrella",
        icon: "☂️",
        category: "Personal Items",
        colors: &["Black", "Navy", "Green", "Red", "Patterned", "Yellow", "Pink"],
        brands: &["Totes", "Blunt", "Fanny", "Senninger"],
    },
    Template {
        id: "charger",
        name: "Charger",
        icon: "🔌",
        category: "Electronics",
        colors: &["White", "Black", "Gray", "Silver", "Blue"],
        brands: &["Apple", "Samsung", "Anker", "Belkin", "Sony", "OnePlus"],
    },
    Template {
        id: "cable",
        name: "Cable",
        icon: "🔌",
        category: "Electronics",
        colors: &["White", "Black", "Gray", "Silver", "Blue", "Red"],
        brands: &["Apple", "Samsung", "Anker", "Belkin", "UGREEN", "Baseus"],
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates sharing a category, offered as title choices
pub fn siblings(template: &Template) -> impl Iterator<Item = &'static Template> + '_ {
    TEMPLATES.iter().filter(move |t| t.category == template.category)
}

/// A chip the user picked under a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailChoice {
    Title(String),
    Color(String),
    Brand(String),
    Location(String),
}

/// Block chips take a room number: `C Block-204`
pub fn room_location(block: &str, room: &str) -> Option<String> {
    let room = room.trim();
    (!room.is_empty()).then(|| format!("{}-{}", block, room))
}

/// Add a custom chip unless blank or already present; returns whether it was added
pub fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

impl ReportForm {
    /// Title only when empty; category always
    pub fn apply_template(&mut self, template: &Template) {
        if self.title.trim().is_empty() {
            self.title = template.name.to_string();
        }
        self.category = template.category.to_string();
    }

    /// Colors and brands are appended to the description
    pub fn apply_detail(&mut self, choice: DetailChoice) {
        match choice {
            DetailChoice::Title(title) => self.title = title,
            DetailChoice::Location(location) => self.location = location,
            DetailChoice::Color(word) | DetailChoice::Brand(word) => {
                let current = self.description.trim();
                if current.split(", ").any(|w| w == word) {
                    return;
                }
                self.description = if current.is_empty() {
                    word
                } else {
                    format!("{}, {}", current, word)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CATEGORIES;

    #[test]
    fn test_template_categories_are_wizard_categories() {
        for t in TEMPLATES {
            assert!(CATEGORIES.contains(&t.category), "{} has {}", t.id, t.category);
        }
    }

    #[test]
    fn test_siblings_share_category() {
        let phone = find("phone").unwrap();
        let names: Vec<&str> = siblings(phone).map(|t| t.name).collect();
        assert!(names.contains(&"Earbuds"));
        assert!(names.contains(&"Laptop"));
        assert!(!names.contains(&"Wallet"));
    }

    #[test]
    fn test_apply_template_keeps_typed_title() {
        let mut form = ReportForm { title: "My old Pixel".into(), ..Default::default() };
        form.apply_template(find("phone").unwrap());
        assert_eq!(form.title, "My old Pixel");
        assert_eq!(form.category, "Electronics");

        let mut blank = ReportForm::default();
        blank.apply_template(find("wallet").unwrap());
        assert_eq!(blank.title, "Wallet");
    }

    #[test]
    fn test_detail_chips_fill_fields() {
        let mut form = ReportForm::default();
        form.apply_detail(DetailChoice::Color("Black".into()));
        form.apply_detail(DetailChoice::Brand("Apple".into()));
        form.apply_detail(DetailChoice::Color("Black".into()));
        assert_eq!(form.description, "Black, Apple");

        let room = room_location("C Block", " 204 ").unwrap();
        form.apply_detail(DetailChoice::Location(room));
        assert_eq!(form.location, "C Block-204");
        assert_eq!(room_location("S Block", "  "), None);
    }

    #[test]
    fn test_push_unique_dedupes() {
        let mut custom = Vec::new();
        assert!(push_unique(&mut custom, " Teal "));
        assert!(!push_unique(&mut custom, "Teal"));
        assert!(!push_unique(&mut custom, ""));
        assert_eq!(custom, vec!["Teal".to_string()]);
    }
}
