//! Fixed product catalog shown on `/products` and `/product/{id}`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: &'static str,
    pub description: &'static str,
    /// File name under `static/img/`.
    pub image: &'static str,
    pub category: &'static str,
}

pub static PRODUCTS: [Product; 4] = [
    Product {
        id: 1,
        name: "Precision Cast Housing",
        description: "Aluminium die-cast housings machined to tight tolerances for industrial enclosures.",
        image: "housing.jpg",
        category: "Casting",
    },
    Product {
        id: 2,
        name: "Stamped Steel Bracket",
        description: "High-volume stamped brackets in galvanised steel, supplied in custom profiles.",
        image: "bracket.jpg",
        category: "Stamping",
    },
    Product {
        id: 3,
        name: "CNC Turned Shaft",
        description: "Turned and ground shafts for motors and gearboxes, hardened on request.",
        image: "shaft.jpg",
        category: "Machining",
    },
    Product {
        id: 4,
        name: "Powder-Coated Panel",
        description: "Laser-cut sheet panels finished with durable powder coating in any RAL colour.",
        image: "panel.jpg",
        category: "Sheet Metal",
    },
];

/// Product shown for unknown ids.
pub static DEFAULT_PRODUCT: &Product = &PRODUCTS[0];

pub fn all() -> &'static [Product] {
    &PRODUCTS
}

/// Looks up a product by id, falling back to [`DEFAULT_PRODUCT`].
pub fn find(id: i64) -> &'static Product {
    PRODUCTS
        .iter()
        .find(|p| p.id == id)
        .unwrap_or(DEFAULT_PRODUCT)
}
