//! Menu browsing

use std::io;

use clap::Args;
use rusty_money::iso::Currency;
use saffron::{
    menu::{ALL_CATEGORIES, CategoryLookup, DietaryFilter, MenuFilter, MenuItem, category_labels},
    money::format_amount,
};
use saffron_client::{MenuApi, MenuCatalog};

use crate::{
    errors::CliError,
    output::{flag, write_table},
};

/// Menu filters.
#[derive(Debug, Args)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent dietary toggle"
)]
pub struct MenuArgs {
    /// Category to show; `All` shows every category
    #[arg(long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Case-insensitive text to look for in names and descriptions
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only vegetarian dishes
    #[arg(long)]
    pub vegetarian: bool,

    /// Only spicy dishes
    #[arg(long)]
    pub spicy: bool,

    /// Only popular dishes
    #[arg(long)]
    pub popular: bool,

    /// One table per category
    #[arg(long)]
    pub grouped: bool,
}

impl MenuArgs {
    /// Filter state for these flags.
    pub(crate) fn filter(&self) -> MenuFilter {
        let mut filter = MenuFilter::default();

        filter.select_category(self.category.as_str());
        filter.search(self.search.trim());

        for (on, toggle) in [
            (self.vegetarian, DietaryFilter::Vegetarian),
            (self.spicy, DietaryFilter::Spicy),
            (self.popular, DietaryFilter::Popular),
        ] {
            if on {
                filter.toggle(toggle);
            }
        }

        filter
    }
}

pub(crate) async fn run<A: MenuApi>(
    args: &MenuArgs,
    catalog: &MenuCatalog<A>,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let categories = catalog.categories().await?;
    let lookup = catalog.category_lookup().await?;
    let view = catalog.view(&args.filter()).await?;

    writeln!(out, "Categories: {}", category_labels(&categories).join(", "))?;

    if view.items.is_empty() {
        writeln!(out, "No dishes match those filters.")?;

        return Ok(());
    }

    if args.grouped {
        for (category, items) in &view.groups {
            writeln!(out, "\n{category}")?;
            write_items(&mut *out, items, &lookup, currency)?;
        }
    } else {
        write_items(out, &view.items, &lookup, currency)?;
    }

    Ok(())
}

fn write_items(
    out: impl io::Write,
    items: &[MenuItem],
    lookup: &CategoryLookup,
    currency: &'static Currency,
) -> io::Result<()> {
    write_table(
        out,
        &["ID", "Name", "Category", "Price", "Veg", "Spicy", "Popular"],
        items.iter().map(|item| {
            vec![
                item.id.to_string(),
                item.name.clone(),
                lookup.resolve(&item.category).to_string(),
                format_amount(item.price, currency),
                flag(item.is_vegetarian, "veg"),
                flag(item.is_spicy, "spicy"),
                flag(item.is_popular, "popular"),
            ]
        }),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::NPR;
    use saffron::menu::{Category, CategoryId, CategorySelection, MenuItemId};
    use saffron_client::MockMenuApi;
    use testresult::TestResult;

    use super::*;

    fn item(id: &str, name: &str, category: &str, vegetarian: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::from(250),
            category: category.to_string(),
            image: None,
            is_vegetarian: vegetarian,
            is_popular: false,
            is_spicy: false,
            is_available: None,
        }
    }

    fn catalog() -> MenuCatalog<MockMenuApi> {
        let mut api = MockMenuApi::new();

        api.expect_menu_items().returning(|| {
            Ok(vec![
                item("1", "Veg Momo", "c1", true),
                item("2", "Chicken Momo", "c1", false),
                item("3", "Masala Tea", "c2", true),
            ])
        });
        api.expect_categories().returning(|| {
            Ok(vec![
                Category {
                    id: CategoryId::new("c1"),
                    name: "Momo".to_string(),
                    description: None,
                },
                Category {
                    id: CategoryId::new("c2"),
                    name: "Drinks".to_string(),
                    description: None,
                },
            ])
        });

        MenuCatalog::new(api)
    }

    fn args() -> MenuArgs {
        MenuArgs {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            vegetarian: false,
            spicy: false,
            popular: false,
            grouped: false,
        }
    }

    #[test]
    fn flags_become_filter_state() {
        let filter = MenuArgs {
            category: "Momo".to_string(),
            search: "  veg ".to_string(),
            vegetarian: true,
            ..args()
        }
        .filter();

        assert_eq!(
            filter.selected_category,
            CategorySelection::Named("Momo".to_string())
        );
        assert_eq!(filter.search_term, "veg");
        assert!(filter.active_filters.vegetarian);
        assert!(!filter.active_filters.spicy);
    }

    #[tokio::test]
    async fn vegetarian_filter_hides_meat() -> TestResult {
        let mut out = Vec::new();

        run(
            &MenuArgs {
                vegetarian: true,
                ..args()
            },
            &catalog(),
            NPR,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Categories: All, Drinks, Momo"));
        assert!(text.contains("Veg Momo"));
        assert!(text.contains("Masala Tea"));
        assert!(!text.contains("Chicken Momo"));

        Ok(())
    }

    #[tokio::test]
    async fn grouped_output_has_a_heading_per_category() -> TestResult {
        let mut out = Vec::new();

        run(
            &MenuArgs {
                grouped: true,
                ..args()
            },
            &catalog(),
            NPR,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;
        let drinks = text.find("\nDrinks\n").ok_or("missing Drinks heading")?;
        let momo = text.find("\nMomo\n").ok_or("missing Momo heading")?;

        assert!(drinks < momo, "groups are sorted by name");

        Ok(())
    }

    #[tokio::test]
    async fn empty_result_says_so() -> TestResult {
        let mut out = Vec::new();

        run(
            &MenuArgs {
                search: "pizza".to_string(),
                ..args()
            },
            &catalog(),
            NPR,
            &mut out,
        )
        .await?;

        assert!(String::from_utf8(out)?.contains("No dishes match"));

        Ok(())
    }
}
