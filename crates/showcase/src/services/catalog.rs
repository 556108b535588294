//! Catalog manager: the ordered list of published products.
//!
//! Pure in-memory operations; persistence is handled by
//! [`Showcase`](super::Showcase) after each change.

use chrono::{DateTime, Utc};
use m5_core::{CategoryFilter, Product, ProductDraft, ProductId, ProductInput, SearchTerm};

/// Published products in insertion (display) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Append a new product built from `draft`, created at `now`.
    ///
    /// The id is derived from `now` and bumped past any id already in use.
    pub fn create(&mut self, draft: ProductDraft, now: DateTime<Utc>) -> Product {
        let id = ProductId::generate(now, |candidate| self.contains(candidate));
        let product = draft.into_product(id, now);
        self.products.push(product.clone());
        product
    }

    /// Products passing both the category filter and the search term.
    ///
    /// The iterator borrows the catalog, so it reflects a single snapshot
    /// and is consumed once.
    pub fn read<'a>(
        &'a self,
        filter: CategoryFilter,
        search: &'a SearchTerm,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |product| filter.matches(product.category))
            .filter(move |product| product.matches_search(search))
    }

    /// Replace the editable fields of the product with `id`.
    ///
    /// Returns the updated product, or `None` (changing nothing) if no
    /// product has that id.
    pub fn update(&mut self, id: &ProductId, draft: ProductDraft) -> Option<&Product> {
        let product = self.products.iter_mut().find(|p| &p.id == id)?;
        product.apply(draft);
        Some(product)
    }

    /// Remove the product with `id`, returning it if it existed.
    pub fn delete(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| &p.id == id)?;
        Some(self.products.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Swap in a whole product list (imports).
    pub(crate) fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// The catalog a fresh installation starts with (ids `1` to `3`).
    #[must_use]
    pub fn sample(now: DateTime<Utc>) -> Self {
        let products = SAMPLE_PRODUCTS
            .iter()
            .enumerate()
            .filter_map(|(index, sample)| {
                let draft = ProductDraft::parse(&sample.input()).ok()?;
                Some(draft.into_product(ProductId::new((index + 1).to_string()), now))
            })
            .collect();
        Self::new(products)
    }
}

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    category: &'static str,
    image: &'static str,
    creator: &'static str,
}

impl SampleProduct {
    fn input(&self) -> ProductInput {
        ProductInput {
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            price: self.price.to_owned(),
            category: self.category.to_owned(),
            image: self.image.to_owned(),
            creator: self.creator.to_owned(),
        }
    }
}

const SAMPLE_PRODUCTS: [SampleProduct; 3] = [
    SampleProduct {
        name: "Quantum Display Pro",
        description: "Revolutionary holographic display technology that projects 3D images in mid-air without any screen.",
        price: "2999.99",
        category: "tech",
        image: "https://images.unsplash.com/photo-1593642702821-c8da6771f0c6?w=400&h=300&fit=crop",
        creator: "TechVision Inc.",
    },
    SampleProduct {
        name: "Neural Interface Headset",
        description: "Direct brain-computer interface allowing seamless control of digital devices through thought.",
        price: "1599.99",
        category: "innovation",
        image: "https://images.unsplash.com/photo-1551650975-87deedd944c3?w=400&h=300&fit=crop",
        creator: "MindLink Technologies",
    },
    SampleProduct {
        name: "AeroGlide Chair",
        description: "Floating office chair that hovers using magnetic levitation technology for ultimate comfort.",
        price: "2499.99",
        category: "design",
        image: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400&h=300&fit=crop",
        creator: "FutureFurniture Co.",
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use m5_core::{Category, ProductInput};

    use super::*;

    pub(crate) fn draft(name: &str, category: &str, creator: &str) -> ProductDraft {
        ProductDraft::parse(&ProductInput {
            name: name.to_owned(),
            description: format!("{name} description"),
            price: "10".to_owned(),
            category: category.to_owned(),
            image: "https://example.com/img.png".to_owned(),
            creator: creator.to_owned(),
        })
        .unwrap()
    }

    fn names<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<&'a str> {
        products.map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_sample_catalog_is_complete() {
        let catalog = Catalog::sample(Utc::now());
        assert_eq!(catalog.len(), 3);
        let ids: Vec<_> = catalog.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(catalog.all()[1].category, Category::Innovation);
    }

    #[test]
    fn test_create_appends_with_unique_ids() {
        let mut catalog = Catalog::default();
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let first = catalog.create(draft("A", "tech", "x"), now);
        let second = catalog.create(draft("B", "tech", "x"), now);

        assert_ne!(first.id, second.id);
        assert_eq!(names(catalog.all().iter()), ["A", "B"]);
        assert_eq!(second.date_added, now);
    }

    #[test]
    fn test_read_filters_by_category() {
        let mut catalog = Catalog::default();
        catalog.create(draft("Lamp", "design", "Lumen"), Utc::now());
        catalog.create(draft("Chip", "tech", "Silicon"), Utc::now());

        let search = SearchTerm::default();
        assert_eq!(
            names(catalog.read(CategoryFilter::Only(Category::Design), &search)),
            ["Lamp"]
        );
        assert_eq!(names(catalog.read(CategoryFilter::All, &search)), ["Lamp", "Chip"]);
        assert_eq!(
            catalog
                .read(CategoryFilter::Only(Category::Innovation), &search)
                .count(),
            0
        );
    }

    #[test]
    fn test_read_combines_search_and_filter() {
        let catalog = Catalog::sample(Utc::now());

        let search = SearchTerm::new("TECH");
        assert_eq!(
            names(catalog.read(CategoryFilter::All, &search)),
            ["Quantum Display Pro", "Neural Interface Headset"]
        );
        assert_eq!(
            names(catalog.read(CategoryFilter::Only(Category::Tech), &search)),
            ["Quantum Display Pro"]
        );
    }

    #[test]
    fn test_read_search_matches_creator() {
        let catalog = Catalog::sample(Utc::now());
        let search = SearchTerm::new("futurefurniture");
        assert_eq!(
            names(catalog.read(CategoryFilter::All, &search)),
            ["AeroGlide Chair"]
        );
    }

    #[test]
    fn test_read_search_keeps_spaces() {
        let catalog = Catalog::sample(Utc::now());
        assert!(names(catalog.read(CategoryFilter::All, &SearchTerm::new("pro "))).is_empty());
        assert!(names(catalog.read(CategoryFilter::All, &SearchTerm::new("   "))).is_empty());
        assert_eq!(
            names(catalog.read(CategoryFilter::All, &SearchTerm::new("display pro"))),
            ["Quantum Display Pro"]
        );
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut catalog = Catalog::sample(Utc::now());
        let before = catalog.clone();
        assert!(
            catalog
                .update(&ProductId::new("404"), draft("X", "tech", "y"))
                .is_none()
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_update_replaces_fields_in_place() {
        let mut catalog = Catalog::sample(Utc::now());
        let updated = catalog
            .update(&ProductId::new("2"), draft("Neural Band", "design", "MindLink"))
            .unwrap();
        assert_eq!(updated.name, "Neural Band");
        assert_eq!(names(catalog.all().iter())[1], "Neural Band");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_delete() {
        let mut catalog = Catalog::sample(Utc::now());
        assert!(catalog.delete(&ProductId::new("missing")).is_none());
        assert_eq!(catalog.len(), 3);

        let removed = catalog.delete(&ProductId::new("1")).unwrap();
        assert_eq!(removed.name, "Quantum Display Pro");
        assert!(!catalog.contains(&ProductId::new("1")));
    }
}
