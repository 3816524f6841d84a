//! The curated catalog data layer.
//!
//! The storefront ships with a built-in catalog of pieces and seller profiles
//! so it can run without a backend. The intent replay engine resolves piece
//! ids against this catalog when re-executing a deferred add-to-cart.

use crate::models::{Category, Condition, Product, Rating, Seller};

pub struct Catalog {
    products: Vec<Product>,
    sellers: Vec<Seller>,
}

impl Catalog {
    /// Build the built-in curated catalog.
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
            sellers: builtin_sellers(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Featured pieces for the landing page, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn seller(&self, id: &str) -> Option<&Seller> {
        self.sellers.iter().find(|s| s.id == id)
    }

    /// Seller profile for a piece, if the catalog knows the seller.
    pub fn seller_of(&self, product: &Product) -> Option<&Seller> {
        self.seller(&product.seller_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        Product {
            id: "vtg-001".to_string(),
            title: "Vintage Leather Satchel".to_string(),
            description: "Handcrafted Italian leather messenger bag from the 1960s. \
                          Brass hardware and original patina."
                .to_string(),
            price: 1250,
            currency: "USD".to_string(),
            condition: Condition::Excellent,
            brand: "Gucci".to_string(),
            category: Category::Accessories,
            images: vec!["/piece_1.png".to_string(), "/piece_2.png".to_string()],
            featured: true,
            stock: 1,
            seller_id: "user-001".to_string(),
            materials: vec![
                "Full-grain leather".to_string(),
                "Brass".to_string(),
                "Canvas lining".to_string(),
            ],
            origin: Some("Florence, Italy".to_string()),
        },
        Product {
            id: "vtg-002".to_string(),
            title: "Cashmere Turtleneck".to_string(),
            description: "Luxurious 1980s Italian cashmere turtleneck in pristine condition. \
                          Soft pearl grey with impeccable drape."
                .to_string(),
            price: 480,
            currency: "USD".to_string(),
            condition: Condition::Mint,
            brand: "Loro Piana".to_string(),
            category: Category::Knitwear,
            images: vec!["/piece_2.png".to_string(), "/piece_3.png".to_string()],
            featured: true,
            stock: 1,
            seller_id: "user-002".to_string(),
            materials: vec!["100% Cashmere".to_string()],
            origin: Some("Milan, Italy".to_string()),
        },
        Product {
            id: "vtg-003".to_string(),
            title: "Vintage Trench Coat".to_string(),
            description: "Iconic 1970s Burberry trench with original belting and plaid lining. \
                          Classic honey beige gabardine."
                .to_string(),
            price: 1850,
            currency: "USD".to_string(),
            condition: Condition::Excellent,
            brand: "Burberry".to_string(),
            category: Category::Outerwear,
            images: vec!["/piece_3.png".to_string(), "/piece_4.png".to_string()],
            featured: true,
            stock: 1,
            seller_id: "user-003".to_string(),
            materials: vec![
                "Cotton gabardine".to_string(),
                "Wool-blend lining".to_string(),
            ],
            origin: Some("London, England".to_string()),
        },
        Product {
            id: "vtg-004".to_string(),
            title: "Chelsea Boots".to_string(),
            description: "Classic 1990s handmade Chelsea boots in supple black leather. \
                          Goodyear welted construction."
                .to_string(),
            price: 720,
            currency: "USD".to_string(),
            condition: Condition::Good,
            brand: "Crockett & Jones".to_string(),
            category: Category::Footwear,
            images: vec!["/piece_4.png".to_string(), "/piece_5.png".to_string()],
            featured: false,
            stock: 1,
            seller_id: "user-004".to_string(),
            materials: vec!["Calf leather".to_string(), "Leather sole".to_string()],
            origin: Some("Northampton, England".to_string()),
        },
        Product {
            id: "vtg-005".to_string(),
            title: "Heritage Dress Watch".to_string(),
            description: "1960s manual-wind dress watch with original dial and signed crown. \
                          Recently serviced."
                .to_string(),
            price: 2400,
            currency: "USD".to_string(),
            condition: Condition::Excellent,
            brand: "Omega".to_string(),
            category: Category::Timepieces,
            images: vec!["/piece_5.png".to_string(), "/piece_6.png".to_string()],
            featured: false,
            stock: 1,
            seller_id: "user-001".to_string(),
            materials: vec!["Stainless steel".to_string(), "Acrylic crystal".to_string()],
            origin: Some("Bienne, Switzerland".to_string()),
        },
        Product {
            id: "vtg-006".to_string(),
            title: "Silk Carr\u{e} Scarf".to_string(),
            description: "Hand-rolled silk twill scarf from the early 1980s. \
                          Vivid equestrian motif, no pulls or stains."
                .to_string(),
            price: 390,
            currency: "USD".to_string(),
            condition: Condition::Mint,
            brand: "Herm\u{e8}s".to_string(),
            category: Category::Accessories,
            images: vec!["/piece_6.png".to_string(), "/piece_1.png".to_string()],
            featured: false,
            stock: 2,
            seller_id: "user-003".to_string(),
            materials: vec!["Silk twill".to_string()],
            origin: Some("Lyon, France".to_string()),
        },
    ]
}

fn builtin_sellers() -> Vec<Seller> {
    vec![
        Seller {
            id: "user-001".to_string(),
            name: "Sophie Chen".to_string(),
            bio: "Collector of timeless Italian craftsmanship and vintage leather goods."
                .to_string(),
            location: "Milan, Italy".to_string(),
            member_since: "2024-03-15".to_string(),
            verified_seller: true,
            rating: Rating {
                average: 4.9,
                count: 127,
            },
            total_sales: 143,
        },
        Seller {
            id: "user-002".to_string(),
            name: "Lars Bergstr\u{f6}m".to_string(),
            bio: "Scandinavian minimalist with a passion for heritage knitwear.".to_string(),
            location: "Stockholm, Sweden".to_string(),
            member_since: "2024-06-20".to_string(),
            verified_seller: true,
            rating: Rating {
                average: 4.8,
                count: 93,
            },
            total_sales: 108,
        },
        Seller {
            id: "user-003".to_string(),
            name: "Emma Sinclair".to_string(),
            bio: "Curator of British heritage pieces, specializing in vintage outerwear."
                .to_string(),
            location: "London, UK".to_string(),
            member_since: "2023-11-08".to_string(),
            verified_seller: true,
            rating: Rating {
                average: 5.0,
                count: 156,
            },
            total_sales: 182,
        },
        Seller {
            id: "user-004".to_string(),
            name: "James Morrison".to_string(),
            bio: "Connoisseur of English footwear and Northampton vintage finds.".to_string(),
            location: "Edinburgh, UK".to_string(),
            member_since: "2024-01-12".to_string(),
            verified_seller: true,
            rating: Rating {
                average: 4.7,
                count: 84,
            },
            total_sales: 97,
        },
    ]
}
