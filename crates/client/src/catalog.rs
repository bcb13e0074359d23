//! Menu Catalog
//!
//! Caches the four catalog resources for the lifetime of a session. Each resource is fetched on
//! first use and kept until invalidated. Concurrent refreshes of the same resource are not
//! coordinated: whichever response arrives last is what stays cached.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use saffron::menu::{
    MenuFilter, filter_menu, group_by_category,
    models::{Category, CategoryLookup, DeliveryService, Location, MenuItem},
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{errors::ApiError, menu::MenuApi};

/// Cacheable catalog resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    /// `GET /menu-items`
    MenuItems,

    /// `GET /categories`
    Categories,

    /// `GET /locations`
    Locations,

    /// `GET /delivery-services`
    DeliveryServices,
}

#[derive(Debug, Clone)]
enum CatalogEntry {
    MenuItems(Arc<[MenuItem]>),
    Categories(Arc<[Category]>),
    Locations(Arc<[Location]>),
    DeliveryServices(Arc<[DeliveryService]>),
}

/// Session-scoped catalog cache over a [`MenuApi`].
#[derive(Debug)]
pub struct MenuCatalog<A> {
    api: A,
    entries: RwLock<FxHashMap<CatalogQuery, CatalogEntry>>,
}

/// Menu items after filtering, grouped for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    /// Visible items in response order
    pub items: Vec<MenuItem>,

    /// Visible items grouped by category name, groups sorted by name
    pub groups: Vec<(String, Vec<MenuItem>)>,
}

impl<A: MenuApi> MenuCatalog<A> {
    /// Empty cache over `api`.
    pub fn new(api: A) -> Self {
        Self {
            api,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Menu items, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the fetch fails. Nothing is cached on failure.
    pub async fn menu_items(&self) -> Result<Arc<[MenuItem]>, ApiError> {
        if let Some(CatalogEntry::MenuItems(items)) = self.cached(CatalogQuery::MenuItems).await {
            return Ok(items);
        }

        let items: Arc<[MenuItem]> = self.api.menu_items().await?.into();

        self.store(
            CatalogQuery::MenuItems,
            CatalogEntry::MenuItems(Arc::clone(&items)),
        )
        .await;

        Ok(items)
    }

    /// Categories, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the fetch fails. Nothing is cached on failure.
    pub async fn categories(&self) -> Result<Arc<[Category]>, ApiError> {
        if let Some(CatalogEntry::Categories(categories)) =
            self.cached(CatalogQuery::Categories).await
        {
            return Ok(categories);
        }

        let categories: Arc<[Category]> = self.api.categories().await?.into();

        self.store(
            CatalogQuery::Categories,
            CatalogEntry::Categories(Arc::clone(&categories)),
        )
        .await;

        Ok(categories)
    }

    /// Pickup locations, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the fetch fails. Nothing is cached on failure.
    pub async fn locations(&self) -> Result<Arc<[Location]>, ApiError> {
        if let Some(CatalogEntry::Locations(locations)) = self.cached(CatalogQuery::Locations).await
        {
            return Ok(locations);
        }

        let locations: Arc<[Location]> = self.api.locations().await?.into();

        self.store(
            CatalogQuery::Locations,
            CatalogEntry::Locations(Arc::clone(&locations)),
        )
        .await;

        Ok(locations)
    }

    /// Delivery partners, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the fetch fails. Nothing is cached on failure.
    pub async fn delivery_services(&self) -> Result<Arc<[DeliveryService]>, ApiError> {
        if let Some(CatalogEntry::DeliveryServices(services)) =
            self.cached(CatalogQuery::DeliveryServices).await
        {
            return Ok(services);
        }

        let services: Arc<[DeliveryService]> = self.api.delivery_services().await?.into();

        self.store(
            CatalogQuery::DeliveryServices,
            CatalogEntry::DeliveryServices(Arc::clone(&services)),
        )
        .await;

        Ok(services)
    }

    /// Category id → name table built from the cached categories.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if categories have to be fetched and the fetch fails.
    pub async fn category_lookup(&self) -> Result<CategoryLookup, ApiError> {
        let categories = self.categories().await?;

        Ok(CategoryLookup::new(categories.iter()))
    }

    /// Apply `filter` to the menu and group the result for display.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the menu or categories have to be fetched and the fetch fails.
    pub async fn view(&self, filter: &MenuFilter) -> Result<MenuView, ApiError> {
        let items = self.menu_items().await?;
        let lookup = self.category_lookup().await?;

        let visible = filter_menu(&items, &lookup, filter);

        let groups = group_by_category(visible.iter().copied(), &lookup)
            .into_iter()
            .map(|(name, items)| (name, items.into_iter().cloned().collect()))
            .collect();

        Ok(MenuView {
            items: visible.into_iter().cloned().collect(),
            groups,
        })
    }

    /// Whether `query` is currently cached.
    pub async fn is_cached(&self, query: CatalogQuery) -> bool {
        self.entries.read().await.contains_key(&query)
    }

    /// Drop one resource so the next read refetches it.
    pub async fn invalidate(&self, query: CatalogQuery) {
        debug!(?query, "invalidating catalog entry");

        self.entries.write().await.remove(&query);
    }

    /// Drop every cached resource.
    pub async fn invalidate_all(&self) {
        debug!("invalidating catalog");

        self.entries.write().await.clear();
    }

    async fn cached(&self, query: CatalogQuery) -> Option<CatalogEntry> {
        self.entries.read().await.get(&query).cloned()
    }

    async fn store(&self, query: CatalogQuery, entry: CatalogEntry) {
        self.entries.write().await.insert(query, entry);
    }
}
